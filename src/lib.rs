//! Synchronizes tenant configuration between a directory tree and the
//! management API.
//!
//! A [`Context`] is assembled from layered configuration, loaded from the
//! directory tree by the per-kind handlers, and handed to an external
//! [`DeployEngine`](api::DeployEngine). [`Context::dump`] writes assets back
//! to the tree.

pub mod api;
pub mod config;
pub mod context;
pub mod directory;
mod error;
pub mod import;
pub mod keywords;

pub use config::{ConfigError, Configuration};
pub use context::{Assets, Context, ImportParams, Resource};
pub use directory::handlers::ResourceKind;
pub use error::{Error, Result};
pub use keywords::KeywordMappings;
