//! Caller identity as reported by `aws sts get-caller-identity`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The principal whose credentials the AWS CLI resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub user_id: String,
    pub account: String,
    pub arn: String,
}

impl CallerIdentity {
    /// Parse the JSON printed by `get-caller-identity --output json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid identity JSON.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("parsing caller identity")
    }
}
