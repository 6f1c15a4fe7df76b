use crate::entity::{Activity, ActivityId};
use serde::{Deserialize, Serialize};

/// Nested view of one activity and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: ActivityId,
    pub name: String,
    pub level: i32,
    pub parent_id: Option<ActivityId>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// A leaf view of `activity`.
    pub fn leaf(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name.clone(),
            level: activity.level,
            parent_id: activity.parent_id,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: ActivityId) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}
