//! Configuration loading and management.

mod builder;
mod env;
mod error;
mod file;
pub mod keys;
mod resolved;
mod source;

pub use builder::ConfigBuilder;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use resolved::Configuration;
pub use source::{ConfigSource, MemorySource, Table};
