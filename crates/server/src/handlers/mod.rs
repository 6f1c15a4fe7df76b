//! API request handlers.

pub mod activities;
pub mod buildings;
pub mod health;
pub mod organizations;

pub use activities::*;
pub use buildings::*;
pub use health::*;
pub use organizations::*;
