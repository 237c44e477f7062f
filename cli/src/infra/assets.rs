//! Embedded CloudFormation template.
//!
//! At compile time, `include_dir!` embeds everything under `infrastructure/`:
//!   - `cloudformation.yaml`: passed to `aws cloudformation deploy --template-file`

use std::path::PathBuf;

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};
use sha2::{Digest, Sha256};

static EMBEDDED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../infrastructure");

/// Name of the stack template inside the embedded directory.
pub const TEMPLATE_FILE: &str = "cloudformation.yaml";

/// Return the template body.
///
/// # Errors
///
/// Returns an error if the template was not embedded or is not UTF-8.
pub fn template_body() -> Result<&'static str> {
    EMBEDDED_ASSETS
        .get_file(TEMPLATE_FILE)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| anyhow::anyhow!("embedded template not found: {TEMPLATE_FILE}"))
}

/// Write the template to a temporary directory for the AWS CLI to read.
///
/// Returns `(path, guard)` where `path` is the template file and `guard` is a
/// [`tempfile::TempDir`] that deletes the directory when dropped.
///
/// # Errors
///
/// Returns an error if the temporary directory cannot be created or written.
pub fn extract_template() -> Result<(PathBuf, tempfile::TempDir)> {
    let dir = tempfile::tempdir().context("creating temp dir for template")?;
    let path = dir.path().join(TEMPLATE_FILE);
    std::fs::write(&path, template_body()?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok((path, dir))
}

/// Lowercase hex SHA-256 of the template body.
///
/// # Errors
///
/// Returns an error if the template is not embedded.
pub fn template_digest() -> Result<String> {
    Ok(sha256_hex(template_body()?.as_bytes()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    Sha256::digest(bytes)
        .iter()
        .fold(String::with_capacity(64), |mut acc, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        })
}
