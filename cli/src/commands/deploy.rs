//! Deploy command: create or update the stack.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy::{self, DeployRequest};
use crate::domain::SshCidr;
use crate::infra::assets;

/// Arguments for the deploy command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployArgs {
    /// Allow SSH from this range instead of the detected public IP (/32)
    #[arg(long, value_name = "CIDR")]
    pub ssh_cidr: Option<SshCidr>,
}

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the template cannot be extracted or any deploy step fails.
pub async fn run(app: &AppContext, args: &DeployArgs) -> Result<()> {
    app.output.header(&format!(
        "Deploying {} to {}",
        app.config.stack_name(),
        app.config.region
    ));

    // `_dir` keeps the extracted template alive until the CLI call returns.
    let (template_path, _dir) = assets::extract_template()?;
    let template_digest = assets::template_digest()?;
    let request = DeployRequest {
        config: &app.config,
        template_path: &template_path,
        template_body: assets::template_body()?,
        template_digest: &template_digest,
        ssh_cidr: args.ssh_cidr,
    };

    let outcome = deploy::deploy(
        &app.aws,
        &app.ip_lookup,
        &app.keys,
        &app.reporter(),
        &request,
    )
    .await?;
    app.renderer().render_deploy(&outcome)
}
