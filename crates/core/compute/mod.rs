//! Distance math, activity hierarchy traversal, region predicates and validation.

pub mod hierarchy;
pub mod spatial;
pub mod validation;
