//! Application service: stack inspection use-case.

use anyhow::Result;

use crate::application::ports::{AwsProvider, StackApi};
use crate::application::services::{preflight, stderr_text};
use crate::domain::stack::is_stack_missing;
use crate::domain::{DeployConfig, StackError, StackSummary};

/// Describe `stack_name`.
///
/// # Errors
///
/// Returns [`StackError::NotFound`] if the stack does not exist, or an error
/// if `describe-stacks` fails for any other reason.
pub async fn describe(aws: &impl StackApi, stack_name: &str) -> Result<StackSummary> {
    let output = aws.describe_stack(stack_name).await?;
    if !output.status.success() {
        let stderr = stderr_text(&output);
        if is_stack_missing(&stderr) {
            return Err(StackError::NotFound(stack_name.to_string()).into());
        }
        anyhow::bail!("describe-stacks failed for '{stack_name}':\n{stderr}");
    }
    let summary = StackSummary::from_describe_json(stack_name, &output.stdout)?;
    tracing::info!(stack = %summary.stack_name, status = %summary.stack_status, "described stack");
    Ok(summary)
}

/// Run pre-flight checks, then describe the configured stack.
///
/// # Errors
///
/// Propagates pre-flight and describe failures.
pub async fn status(aws: &impl AwsProvider, config: &DeployConfig) -> Result<StackSummary> {
    config.validate()?;
    preflight::check(aws).await?;
    describe(aws, &config.stack_name()).await
}
