//! Application service: EC2 key pair provisioning.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::{KeyPairApi, KeyStore, ProgressReporter};
use crate::application::services::stderr_text;
use crate::domain::DeployError;

/// What `ensure` did about the key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeyPairOutcome {
    /// The key pair was already registered with EC2; nothing was created.
    Existing { local_key: Option<PathBuf> },
    /// A new key pair was created and its private key written locally.
    Created { path: PathBuf },
}

/// Make sure the named key pair exists, creating it if EC2 does not know it.
///
/// An existing key pair is never re-created, even when its local `.pem`
/// file is missing.
///
/// # Errors
///
/// Returns [`DeployError::KeyPairCreation`] if creation fails, or an error if
/// the private key cannot be written.
pub async fn ensure(
    aws: &impl KeyPairApi,
    keys: &impl KeyStore,
    reporter: &impl ProgressReporter,
    name: &str,
) -> Result<KeyPairOutcome> {
    let described = aws.describe_key_pair(name).await?;
    if described.status.success() {
        tracing::info!(key_pair = name, "reusing existing key pair");
        let local_key = keys.exists(name).then(|| keys.key_path(name));
        if local_key.is_none() {
            reporter.warn(&format!(
                "Key pair '{name}' exists but {} was not found locally",
                keys.key_path(name).display()
            ));
        }
        reporter.success(&format!("Using existing key pair {name}"));
        return Ok(KeyPairOutcome::Existing { local_key });
    }
    tracing::debug!(key_pair = name, stderr = %stderr_text(&described), "key pair not found");

    reporter.step(&format!("Creating key pair {name}..."));
    let created = aws.create_key_pair(name).await?;
    if !created.status.success() {
        return Err(DeployError::KeyPairCreation {
            name: name.to_string(),
            stderr: stderr_text(&created),
        }
        .into());
    }
    let pem = String::from_utf8_lossy(&created.stdout);
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(DeployError::KeyPairCreation {
            name: name.to_string(),
            stderr: "AWS returned no key material".to_string(),
        }
        .into());
    }
    let path = keys.write_private_key(name, pem)?;
    tracing::info!(key_pair = name, path = %path.display(), "created key pair");
    reporter.success(&format!("Key pair created, private key saved to {}", path.display()));
    Ok(KeyPairOutcome::Created { path })
}

/// Delete the key pair from EC2 and remove its local private key.
///
/// Returns whether a local key file was removed.
///
/// # Errors
///
/// Returns [`DeployError::KeyPairDeletion`] if EC2 rejects the deletion.
pub async fn remove(
    aws: &impl KeyPairApi,
    keys: &impl KeyStore,
    reporter: &impl ProgressReporter,
    name: &str,
) -> Result<bool> {
    reporter.step(&format!("Deleting key pair {name}..."));
    let output = aws.delete_key_pair(name).await?;
    if !output.status.success() {
        return Err(DeployError::KeyPairDeletion {
            name: name.to_string(),
            stderr: stderr_text(&output),
        }
        .into());
    }
    let removed_local = keys.remove(name)?;
    tracing::info!(key_pair = name, removed_local, "deleted key pair");
    reporter.success(&format!("Key pair {name} deleted"));
    Ok(removed_local)
}
