//! Application service: template validation.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::AwsProvider;
use crate::application::services::{preflight, stderr_text};
use crate::domain::StackError;
use crate::domain::template::TemplateOutline;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub description: Option<String>,
    pub parameters: Vec<String>,
    pub resources: usize,
    pub outputs: Vec<String>,
    /// Whether CloudFormation itself accepted the template.
    pub remote_checked: bool,
}

/// Parse the template locally and, unless `offline`, ask CloudFormation to
/// validate it.
///
/// # Errors
///
/// Returns [`StackError::InvalidTemplate`] if either check rejects the body.
pub async fn validate(
    aws: &impl AwsProvider,
    template_path: &Path,
    template_body: &str,
    offline: bool,
) -> Result<ValidationReport> {
    let outline = TemplateOutline::parse(template_body)?;
    let mut report = ValidationReport {
        description: outline.description,
        parameters: outline.parameters,
        resources: outline.resources.len(),
        outputs: outline.outputs,
        remote_checked: false,
    };
    if offline {
        return Ok(report);
    }

    preflight::check(aws).await?;
    let output = aws.validate_template(template_path).await?;
    if !output.status.success() {
        return Err(StackError::InvalidTemplate(stderr_text(&output)).into());
    }
    report.remote_checked = true;
    Ok(report)
}
