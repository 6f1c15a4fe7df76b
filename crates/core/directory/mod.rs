//! The directory intents.
//!
//! [`query`] holds the intents as pure functions over a snapshot,
//! [`Catalog`] binds one snapshot to its indexes, and [`Directory`] serves
//! the intents from a catalog kept current with its store.

pub mod catalog;
pub mod query;
mod service;

pub use catalog::Catalog;
pub use service::Directory;
