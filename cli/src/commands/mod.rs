//! Command implementations
//!
//! Handlers are thin: they pick the service, hand it the adapters held by
//! `AppContext`, and pass the result to the active renderer.

pub mod cleanup;
pub mod deploy;
pub mod outputs;
pub mod status;
pub mod validate;
pub mod version;
