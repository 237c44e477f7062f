//! Key pair naming rules.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::domain::error::ConfigError;

static KEY_PAIR_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,254}$").ok());

/// Validates a key pair name.
///
/// The name doubles as a local filename (`{name}.pem`), so path separators
/// and leading dots are rejected even though EC2 itself would accept them.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidKeyPairName`] if the name is not allowed.
pub fn validate_key_pair_name(name: &str) -> Result<()> {
    let valid = KEY_PAIR_RE.as_ref().is_some_and(|re| re.is_match(name));
    if !valid {
        return Err(ConfigError::InvalidKeyPairName(name.to_string()).into());
    }
    Ok(())
}

/// Local filename for a key pair's private key.
#[must_use]
pub fn key_file_name(name: &str) -> String {
    format!("{name}.pem")
}
