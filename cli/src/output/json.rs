//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed document to
//! stdout: the command's result on success, or an error object on failure.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::StackSummary;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice; `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn print<T: Serialize>(value: &T) -> Result<()> {
    write(&mut io::stdout().lock(), value)
}

/// Write `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized or `w` cannot be written.
pub fn write<T: Serialize>(w: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, value).context("JSON serialization failed")?;
    writeln!(w).context("writing JSON output")?;
    Ok(())
}

/// Renders command results as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Serialize any result type as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<()> {
        print(value)
    }

    /// The fields `status` reports, without the outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_status(&self, stack: &StackSummary) -> Result<()> {
        self.write_status(&mut io::stdout().lock(), stack)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails or `w` cannot be written.
    pub fn write_status(&self, w: &mut impl Write, stack: &StackSummary) -> Result<()> {
        write(
            w,
            &serde_json::json!({
                "stack_name": stack.stack_name,
                "stack_status": stack.stack_status,
                "creation_time": stack.creation_time,
                "last_updated_time": stack.last_updated_time,
            }),
        )
    }
}
