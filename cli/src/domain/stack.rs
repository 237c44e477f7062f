//! CloudFormation stack parameters and `describe-stacks` parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::config::DeployConfig;
use crate::domain::error::StackError;
use crate::domain::network::SshCidr;

// ── Output keys ───────────────────────────────────────────────────────────────

pub const OUTPUT_PUBLIC_IP: &str = "EC2PublicIP";
pub const OUTPUT_DATA_BUCKET: &str = "DataBucketName";

/// Every output the template declares, in declaration order.
pub const TEMPLATE_OUTPUTS: &[&str] = &[
    "VPCId",
    "PublicSubnet1Id",
    "PublicSubnet2Id",
    OUTPUT_PUBLIC_IP,
    "EC2PrivateIP",
    OUTPUT_DATA_BUCKET,
    "ModelBucketName",
    "RawDataTableName",
    "PredictionsTableName",
    "UsersTableName",
    "EC2RoleArn",
];

// ── Parameters ────────────────────────────────────────────────────────────────

/// The five template parameters, computed from config and runtime inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackParameters {
    pub project_name: String,
    pub environment: String,
    pub key_pair_name: String,
    pub ssh_allowed_cidr: SshCidr,
    pub ami_id: String,
}

impl StackParameters {
    #[must_use]
    pub fn new(config: &DeployConfig, key_pair_name: &str, ssh_cidr: SshCidr) -> Self {
        Self {
            project_name: config.project.clone(),
            environment: config.environment.to_string(),
            key_pair_name: key_pair_name.to_string(),
            ssh_allowed_cidr: ssh_cidr,
            ami_id: config.ami_id.clone(),
        }
    }

    /// `(ParameterKey, value)` pairs in template order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ProjectName", self.project_name.clone()),
            ("Environment", self.environment.clone()),
            ("KeyPairName", self.key_pair_name.clone()),
            ("SSHAllowedCIDR", self.ssh_allowed_cidr.to_string()),
            ("AMIId", self.ami_id.clone()),
        ]
    }

    /// `Key=Value` strings for `--parameter-overrides`.
    #[must_use]
    pub fn to_overrides(&self) -> Vec<String> {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }
}

// ── describe-stacks ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeStacksResponse {
    #[serde(default)]
    stacks: Vec<StackSummary>,
}

/// One stack output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackOutput {
    pub output_key: String,
    pub output_value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub export_name: Option<String>,
}

/// The slice of `describe-stacks` this tool cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackSummary {
    pub stack_name: String,
    pub stack_status: String,
    pub creation_time: DateTime<Utc>,
    #[serde(default)]
    pub last_updated_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stack_status_reason: Option<String>,
    #[serde(default)]
    pub outputs: Vec<StackOutput>,
}

impl StackSummary {
    /// Parse `describe-stacks --output json` and return the first stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, or [`StackError::NotFound`]
    /// if the response lists no stacks.
    pub fn from_describe_json(stack_name: &str, bytes: &[u8]) -> anyhow::Result<Self> {
        let response: DescribeStacksResponse = serde_json::from_slice(bytes)
            .map_err(|e| anyhow::anyhow!("parsing describe-stacks output: {e}"))?;
        response
            .stacks
            .into_iter()
            .next()
            .ok_or_else(|| StackError::NotFound(stack_name.to_string()).into())
    }

    /// Value of the output named `key`, if the stack exports it.
    #[must_use]
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.output_key == key)
            .map(|o| o.output_value.as_str())
    }

    #[must_use]
    pub fn status_kind(&self) -> StackStatusKind {
        StackStatusKind::classify(&self.stack_status)
    }
}

/// Returns `true` when AWS CLI stderr reports a missing stack.
#[must_use]
pub fn is_stack_missing(stderr: &str) -> bool {
    stderr.contains("does not exist")
}

// ── Status classification ─────────────────────────────────────────────────────

/// Coarse grouping of CloudFormation's stack status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatusKind {
    /// `*_COMPLETE` without a rollback.
    Healthy,
    /// `*_IN_PROGRESS`.
    InProgress,
    /// Rolled back or failed.
    Failed,
}

impl StackStatusKind {
    #[must_use]
    pub fn classify(status: &str) -> Self {
        if status.ends_with("_IN_PROGRESS") {
            Self::InProgress
        } else if status.contains("ROLLBACK") || status.ends_with("_FAILED") {
            Self::Failed
        } else {
            Self::Healthy
        }
    }
}
