//! Persistence for directory datasets.
//!
//! A dataset is one JSON document written atomically: the new content goes
//! to a sibling temp file which then replaces the previous file.

mod dataset_file;

pub use dataset_file::DatasetFile;
