//! Organization Directory Server
//!
//! HTTP API over the [`orgdir`] engine. Every route requires the shared
//! secret in the `X-API-Key` header.
//!
//! - Organizations by building, activity (single or subtree), region, id and name
//! - The activity forest and the building list
//! - Health with entity counts
//!
//! # Example
//!
//! ```ignore
//! use orgdir_server::{AppState, ServerConfig, serve};
//!
//! let config = ServerConfig::default();
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! serve(listener, AppState::open(config)?, shutdown).await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::{DEFAULT_API_KEY, ServerConfig};
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
