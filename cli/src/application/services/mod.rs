//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod cleanup;
pub mod deploy;
pub mod key_pair;
pub mod preflight;
pub mod stack_status;
pub mod validate;

use std::process::Output;

/// Trimmed, lossy stderr of a finished AWS CLI call.
pub(crate) fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
