//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the AWS
//! CLI adapter, filesystem access, HTTP lookups, and the embedded template.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod aws;
pub mod command_runner;
pub mod config;
pub mod key_store;
pub mod network;
