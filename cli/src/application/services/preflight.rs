//! Pre-flight checks shared by every command that talks to AWS.

use anyhow::{Context, Result};

use crate::application::ports::AwsToolchain;
use crate::application::services::stderr_text;
use crate::domain::{CallerIdentity, DeployError};

/// Verify the AWS CLI is installed and credentials resolve to an identity.
///
/// # Errors
///
/// Returns [`DeployError::AwsCliMissing`] if `aws` cannot be run, and
/// [`DeployError::InvalidCredentials`] if `sts get-caller-identity` fails.
pub async fn check(aws: &impl AwsToolchain) -> Result<CallerIdentity> {
    let version = match aws.version().await {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            tracing::debug!(stderr = %stderr_text(&output), "aws --version exited non-zero");
            return Err(DeployError::AwsCliMissing.into());
        }
        Err(e) => {
            tracing::debug!(error = %e, "aws --version could not be spawned");
            return Err(DeployError::AwsCliMissing.into());
        }
    };
    // AWS CLI v1 prints its version on stderr.
    let banner = if version.stdout.is_empty() {
        stderr_text(&version)
    } else {
        String::from_utf8_lossy(&version.stdout).trim().to_string()
    };
    tracing::debug!(version = %banner, "found aws cli");

    let output = aws
        .caller_identity()
        .await
        .context("running aws sts get-caller-identity")?;
    if !output.status.success() {
        return Err(DeployError::InvalidCredentials {
            stderr: stderr_text(&output),
        }
        .into());
    }
    let identity = CallerIdentity::from_json(&output.stdout)?;
    tracing::info!(account = %identity.account, arn = %identity.arn, "AWS credentials verified");
    Ok(identity)
}
