//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. `main` downcasts them to pick a JSON error code.

use thiserror::Error;

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Pre-flight and key pair failures raised before any stack is touched.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("AWS CLI is not installed. Install it from https://aws.amazon.com/cli/")]
    AwsCliMissing,

    #[error("AWS credentials are not configured or invalid. Run 'aws configure'.\n{stderr}")]
    InvalidCredentials { stderr: String },

    #[error("Could not determine public IP address: {0}")]
    PublicIpLookup(String),

    #[error("Failed to create key pair '{name}':\n{stderr}")]
    KeyPairCreation { name: String, stderr: String },

    #[error("Failed to delete key pair '{name}':\n{stderr}")]
    KeyPairDeletion { name: String, stderr: String },
}

impl DeployError {
    /// Stable machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AwsCliMissing => "AWS_CLI_MISSING",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::PublicIpLookup(_) => "PUBLIC_IP_LOOKUP_FAILED",
            Self::KeyPairCreation { .. } => "KEY_PAIR_CREATE_FAILED",
            Self::KeyPairDeletion { .. } => "KEY_PAIR_DELETE_FAILED",
        }
    }
}

// ── Stack errors ──────────────────────────────────────────────────────────────

/// Errors reported by CloudFormation stack operations.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("Stack '{0}' does not exist. Run 'stackctl deploy' to create it.")]
    NotFound(String),

    #[error(
        "Stack deployment failed for '{stack}':\n{stderr}\n\
         Inspect events: aws cloudformation describe-stack-events --stack-name {stack}"
    )]
    DeployFailed { stack: String, stderr: String },

    #[error("Stack deletion failed for '{stack}':\n{stderr}")]
    DeleteFailed { stack: String, stderr: String },

    #[error("Template validation failed:\n{0}")]
    InvalidTemplate(String),

    #[error("Template is missing parameter(s): {0}")]
    MissingParameters(String),
}

impl StackError {
    /// Stable machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "STACK_NOT_FOUND",
            Self::DeployFailed { .. } => "STACK_DEPLOY_FAILED",
            Self::DeleteFailed { .. } => "STACK_DELETE_FAILED",
            Self::InvalidTemplate(_) | Self::MissingParameters(_) => "INVALID_TEMPLATE",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment '{0}'. Valid values: dev, staging, prod")]
    InvalidEnvironment(String),

    #[error("Invalid project name '{0}': must match ^[a-z0-9][a-z0-9-]{{1,30}}[a-z0-9]$")]
    InvalidProject(String),

    #[error("Invalid key pair name '{0}'")]
    InvalidKeyPairName(String),

    #[error("Invalid SSH CIDR '{0}': expected a.b.c.d/n with n <= 32")]
    InvalidCidr(String),

    #[error("Invalid region '{0}'")]
    InvalidRegion(String),

    #[error("Invalid AMI id '{0}': expected ami- followed by 8 or 17 hex digits")]
    InvalidAmi(String),

    #[error(
        "The default AMI {ami} only exists in us-east-1; set ami_id in the config file to deploy to {region}"
    )]
    DefaultAmiOutsideRegion { ami: String, region: String },
}
