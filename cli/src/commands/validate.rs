//! Validate command: check the bundled template.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::validate;
use crate::infra::assets;

/// Arguments for the validate command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateArgs {
    /// Only parse the template locally; do not call CloudFormation
    #[arg(long)]
    pub offline: bool,
}

/// Run the validate command.
///
/// # Errors
///
/// Returns an error if the template is rejected locally or by CloudFormation.
pub async fn run(app: &AppContext, args: &ValidateArgs) -> Result<()> {
    let (template_path, _dir) = assets::extract_template()?;
    let report = validate::validate(
        &app.aws,
        &template_path,
        assets::template_body()?,
        args.offline,
    )
    .await?;
    app.renderer().render_validation(&report)
}
