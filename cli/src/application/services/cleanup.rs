//! Application service: stack teardown use-case.

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::{AwsProvider, KeyStore, ProgressReporter, UserPrompt};
use crate::application::services::{key_pair, preflight, stderr_text};
use crate::domain::{DeployConfig, StackError};

/// What `cleanup` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CleanupOutcome {
    /// The operator declined; nothing was touched.
    Cancelled,
    Deleted {
        stack_name: String,
        key_pair_removed: bool,
    },
}

/// Delete the stack after confirmation, then optionally its key pair.
///
/// Nothing reaches AWS before the first confirmation is given.
///
/// # Errors
///
/// Returns an error if the prompt fails, pre-flight checks fail, or the
/// provider reports the deletion failed.
pub async fn cleanup(
    aws: &impl AwsProvider,
    keys: &impl KeyStore,
    prompt: &impl UserPrompt,
    reporter: &impl ProgressReporter,
    config: &DeployConfig,
) -> Result<CleanupOutcome> {
    config.validate()?;
    let stack_name = config.stack_name();

    if !prompt.confirm(
        &format!("Delete stack '{stack_name}' and all of its resources?"),
        false,
    )? {
        tracing::info!(stack = %stack_name, "cleanup cancelled");
        return Ok(CleanupOutcome::Cancelled);
    }

    preflight::check(aws).await?;

    // 1. Request deletion
    reporter.step(&format!("Deleting stack {stack_name}..."));
    let output = aws.delete_stack(&stack_name).await?;
    if !output.status.success() {
        return Err(StackError::DeleteFailed {
            stack: stack_name,
            stderr: stderr_text(&output),
        }
        .into());
    }

    // 2. Block until CloudFormation finishes
    reporter.begin_wait("Waiting for stack deletion to complete...");
    let result = aws.wait_stack_deleted(&stack_name).await;
    let succeeded = matches!(&result, Ok(o) if o.status.success());
    reporter.end_wait(
        succeeded,
        &if succeeded {
            format!("Stack {stack_name} deleted")
        } else {
            format!("Stack {stack_name} was not deleted")
        },
    );
    let waited = result?;
    if !waited.status.success() {
        return Err(StackError::DeleteFailed {
            stack: stack_name,
            stderr: stderr_text(&waited),
        }
        .into());
    }

    // 3. Key material
    let key_name = config.key_pair_name();
    let key_pair_removed = prompt.confirm(
        &format!("Also delete key pair '{key_name}' and its local private key?"),
        false,
    )?;
    if key_pair_removed {
        key_pair::remove(aws, keys, reporter, &key_name).await?;
    }

    Ok(CleanupOutcome::Deleted {
        stack_name,
        key_pair_removed,
    })
}
