//! Activity taxonomy traversal.
//!
//! The taxonomy is an arena: activities live in a caller-supplied slice and
//! refer to their parent by id. `ActivityHierarchy` indexes that slice once
//! (id → position, parent id → child positions) and answers subtree questions
//! from the index.
//!
//! Parent links are expected to be acyclic, but nothing here relies on it.
//! Every traversal visits each node at most once, so malformed input yields a
//! partial result instead of looping. Traversals use explicit work lists, and
//! nested views stop at [`MAX_TREE_DEPTH`] levels.
//!
//! # Example
//!
//! ```rust
//! use orgdir::compute::hierarchy::{build_tree, descendant_ids};
//! use orgdir_types::Activity;
//!
//! let nodes = vec![
//!     Activity::root(1, "Еда"),
//!     Activity::new(2, "Мясная продукция", 2, Some(1)),
//!     Activity::new(3, "Молочная продукция", 2, Some(1)),
//! ];
//!
//! assert_eq!(descendant_ids(&nodes, 1).into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(build_tree(&nodes, None)[0].children.len(), 2);
//! ```

use orgdir_types::entity::{Activity, ActivityId};
use orgdir_types::tree::TreeNode;
use rustc_hash::{FxHashMap, FxHashSet};
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, VecDeque};

/// Deepest level a nested view reaches; nodes below it are left out.
pub const MAX_TREE_DEPTH: usize = 256;

/// Descendant ids of `root`, including `root`. Empty when `root` is unknown.
pub fn descendant_ids(nodes: &[Activity], root: ActivityId) -> BTreeSet<ActivityId> {
    ActivityHierarchy::new(nodes).descendant_ids(root)
}

/// Nested view of the nodes under `parent` (`None` for the whole forest).
pub fn build_tree(nodes: &[Activity], parent: Option<ActivityId>) -> Vec<TreeNode> {
    ActivityHierarchy::new(nodes).build_tree(parent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Position maps over a slice of activities, owned so a snapshot can keep them.
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    /// First position of each id
    by_id: FxHashMap<ActivityId, usize>,
    /// Child positions per parent id, in slice order; `None` holds the roots
    children: FxHashMap<Option<ActivityId>, Vec<usize>>,
}

impl HierarchyIndex {
    pub fn new(nodes: &[Activity]) -> Self {
        let mut by_id = FxHashMap::default();
        by_id.reserve(nodes.len());
        let mut children: FxHashMap<Option<ActivityId>, Vec<usize>> = FxHashMap::default();

        for (position, node) in nodes.iter().enumerate() {
            match by_id.entry(node.id) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => {
                    log::warn!("activity id {} appears more than once", node.id);
                }
            }
            children.entry(node.parent_id).or_default().push(position);
        }

        Self { by_id, children }
    }
}

/// Index over a slice of activities.
#[derive(Debug, Clone)]
pub struct ActivityHierarchy<'a> {
    nodes: &'a [Activity],
    index: Cow<'a, HierarchyIndex>,
}

/// A node under construction in [`ActivityHierarchy::build_under`].
struct Frame<'a> {
    view: Option<TreeNode>,
    pending: &'a [usize],
    built: Vec<TreeNode>,
}

impl<'a> ActivityHierarchy<'a> {
    pub fn new(nodes: &'a [Activity]) -> Self {
        Self {
            nodes,
            index: Cow::Owned(HierarchyIndex::new(nodes)),
        }
    }

    /// Reuses an index built earlier over the same `nodes`.
    pub fn with_index(nodes: &'a [Activity], index: &'a HierarchyIndex) -> Self {
        Self {
            nodes,
            index: Cow::Borrowed(index),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.index.by_id.contains_key(&id)
    }

    pub fn get(&self, id: ActivityId) -> Option<&'a Activity> {
        let nodes = self.nodes;
        self.index.by_id.get(&id).map(|&position| &nodes[position])
    }

    /// Direct children of `parent`, in slice order. `None` yields the roots.
    pub fn children_of(&self, parent: Option<ActivityId>) -> impl Iterator<Item = &'a Activity> + '_ {
        let nodes = self.nodes;
        self.child_positions(parent)
            .iter()
            .map(move |&position| &nodes[position])
    }

    pub fn roots(&self) -> impl Iterator<Item = &'a Activity> + '_ {
        self.children_of(None)
    }

    /// Breadth-first closure of the child relation starting at `root`.
    pub fn descendant_ids(&self, root: ActivityId) -> BTreeSet<ActivityId> {
        let mut found = BTreeSet::new();
        if !self.contains(root) {
            return found;
        }

        found.insert(root);
        let mut frontier = VecDeque::from([root]);

        while let Some(current) = frontier.pop_front() {
            for &position in self.child_positions(Some(current)) {
                let child = self.nodes[position].id;
                if found.insert(child) {
                    frontier.push_back(child);
                } else {
                    log::warn!(
                        "activity {} reached twice below {}; parent links contain a cycle",
                        child,
                        root
                    );
                }
            }
        }

        found
    }

    /// Nested view of the nodes whose parent is `parent`.
    ///
    /// Siblings keep slice order. Levels past [`MAX_TREE_DEPTH`] are cut off. When `parent` names a known node, that node
    /// is never repeated inside its own subtree.
    pub fn build_tree(&self, parent: Option<ActivityId>) -> Vec<TreeNode> {
        let mut visited = FxHashSet::default();
        if let Some(position) = parent.and_then(|id| self.index.by_id.get(&id)) {
            visited.insert(*position);
        }
        self.build_under(parent, &mut visited, MAX_TREE_DEPTH)
    }

    /// One activity with its nested descendants, or `None` if unknown.
    pub fn subtree(&self, id: ActivityId) -> Option<TreeNode> {
        let &position = self.index.by_id.get(&id)?;
        let mut visited = FxHashSet::default();
        visited.insert(position);

        let mut view = TreeNode::leaf(&self.nodes[position]);
        view.children = self.build_under(Some(id), &mut visited, MAX_TREE_DEPTH - 1);
        Some(view)
    }

    /// First activity, in slice order of the walk start, that is its own ancestor.
    pub fn find_cycle(&self) -> Option<ActivityId> {
        let mut state = vec![Visit::New; self.nodes.len()];

        for start in 0..self.nodes.len() {
            let mut path = Vec::new();
            let mut cursor = Some(start);

            while let Some(position) = cursor {
                match state[position] {
                    Visit::Done => break,
                    Visit::OnPath => return Some(self.nodes[position].id),
                    Visit::New => {
                        state[position] = Visit::OnPath;
                        path.push(position);
                        cursor = self.parent_position(position);
                    }
                }
            }

            for position in path {
                state[position] = Visit::Done;
            }
        }

        None
    }

    /// Builds the nodes under `parent`, at most `depth` levels deep.
    fn build_under(
        &self,
        parent: Option<ActivityId>,
        visited: &mut FxHashSet<usize>,
        depth: usize,
    ) -> Vec<TreeNode> {
        let mut stack = vec![Frame {
            view: None,
            pending: self.child_positions(parent),
            built: Vec::new(),
        }];

        loop {
            let level = stack.len();
            let Some(frame) = stack.last_mut() else { break };
            let pending = frame.pending;
            let Some((&position, rest)) = pending.split_first() else {
                let Some(done) = stack.pop() else { break };
                match (done.view, stack.last_mut()) {
                    (Some(mut view), Some(outer)) => {
                        view.children = done.built;
                        outer.built.push(view);
                    }
                    _ => return done.built,
                }
                continue;
            };
            frame.pending = rest;

            if !visited.insert(position) {
                log::warn!(
                    "activity {} already placed in the tree; parent links contain a cycle",
                    self.nodes[position].id
                );
                continue;
            }

            let node = &self.nodes[position];
            let below = self.child_positions(Some(node.id));
            if level >= depth {
                if !below.is_empty() {
                    log::warn!(
                        "activity {} is at the depth limit of {}; its descendants are left out",
                        node.id,
                        MAX_TREE_DEPTH
                    );
                }
                frame.built.push(TreeNode::leaf(node));
                continue;
            }

            stack.push(Frame {
                view: Some(TreeNode::leaf(node)),
                pending: below,
                built: Vec::new(),
            });
        }

        Vec::new()
    }

    fn child_positions(&self, parent: Option<ActivityId>) -> &[usize] {
        self.index
            .children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn parent_position(&self, position: usize) -> Option<usize> {
        self.nodes[position]
            .parent_id
            .and_then(|parent| self.index.by_id.get(&parent).copied())
    }
}
