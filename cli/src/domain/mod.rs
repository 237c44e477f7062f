//! Domain layer: pure types, parsing, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod account;
pub mod config;
pub mod error;
pub mod key_pair;
pub mod network;
pub mod stack;
pub mod template;

pub use account::CallerIdentity;
pub use config::{ConfigOverrides, DeployConfig, Environment};
pub use error::{ConfigError, DeployError, StackError};
pub use network::SshCidr;
pub use stack::{StackOutput, StackParameters, StackStatusKind, StackSummary};
