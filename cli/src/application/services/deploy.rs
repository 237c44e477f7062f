//! Application service: create or update the stack.
//!
//! Order matters: credentials are checked before the public IP lookup, and
//! the key pair must exist before CloudFormation validates `KeyPairName`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::{
    AwsProvider, KeyStore, ProgressReporter, PublicIpLookup, StackDeploySpec,
};
use crate::application::services::key_pair::{self, KeyPairOutcome};
use crate::application::services::{preflight, stack_status, stderr_text};
use crate::domain::stack::{OUTPUT_DATA_BUCKET, OUTPUT_PUBLIC_IP};
use crate::domain::template::TemplateOutline;
use crate::domain::{DeployConfig, SshCidr, StackError, StackParameters, StackSummary};

/// Login user of the default Amazon Linux image.
pub const SSH_USER: &str = "ec2-user";

/// Everything `deploy` needs besides its ports.
pub struct DeployRequest<'a> {
    pub config: &'a DeployConfig,
    pub template_path: &'a Path,
    pub template_body: &'a str,
    /// SHA-256 of the template body, recorded as a stack tag.
    pub template_digest: &'a str,
    /// Skip the public IP lookup and use this range instead.
    pub ssh_cidr: Option<SshCidr>,
}

/// Result of a successful deployment.
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub account: String,
    pub ssh_cidr: SshCidr,
    pub key_pair_name: String,
    pub key_pair: KeyPairOutcome,
    pub key_path: PathBuf,
    pub stack: StackSummary,
}

impl DeployOutcome {
    #[must_use]
    pub fn public_ip(&self) -> Option<&str> {
        self.stack.output(OUTPUT_PUBLIC_IP)
    }

    #[must_use]
    pub fn data_bucket(&self) -> Option<&str> {
        self.stack.output(OUTPUT_DATA_BUCKET)
    }

    /// `ssh -i <key> ec2-user@<ip>` once the server has an address.
    #[must_use]
    pub fn ssh_command(&self) -> Option<String> {
        self.public_ip()
            .map(|ip| format!("ssh -i {} {SSH_USER}@{ip}", self.key_path.display()))
    }
}

/// Tags applied to the stack (and propagated by CloudFormation to resources).
#[must_use]
pub fn stack_tags(config: &DeployConfig, template_digest: &str) -> Vec<(String, String)> {
    vec![
        ("Project".to_string(), config.project.clone()),
        ("Environment".to_string(), config.environment.to_string()),
        ("ManagedBy".to_string(), "stackctl".to_string()),
        ("TemplateSha256".to_string(), template_digest.to_string()),
    ]
}

/// Deploy the template and return the resulting stack.
///
/// # Errors
///
/// Fails fast on invalid config, missing CLI or credentials, IP lookup
/// failure, key pair failure, or a failed stack operation.
pub async fn deploy(
    aws: &impl AwsProvider,
    ip_lookup: &impl PublicIpLookup,
    keys: &impl KeyStore,
    reporter: &impl ProgressReporter,
    req: &DeployRequest<'_>,
) -> Result<DeployOutcome> {
    let config = req.config;
    config.validate()?;
    config.validate_image()?;
    let outline = TemplateOutline::parse(req.template_body)?;

    // 1. Tooling and credentials
    let identity = preflight::check(aws).await?;
    reporter.success(&format!("AWS account {}", identity.account));

    // 2. SSH ingress range
    let ssh_cidr = if let Some(cidr) = req.ssh_cidr {
        cidr
    } else {
        reporter.step("Detecting public IP address...");
        SshCidr::host(ip_lookup.public_ip().await?)
    };
    reporter.success(&format!("SSH access restricted to {ssh_cidr}"));

    // 3. Key pair
    let key_pair_name = config.key_pair_name();
    let key_pair = key_pair::ensure(aws, keys, reporter, &key_pair_name).await?;

    // 4. Stack
    let params = StackParameters::new(config, &key_pair_name, ssh_cidr);
    outline.check_parameters(&params)?;
    let tags = stack_tags(config, req.template_digest);
    let stack_name = config.stack_name();
    let spec = StackDeploySpec {
        stack_name: &stack_name,
        template_path: req.template_path,
        parameters: &params,
        tags: &tags,
    };

    reporter.begin_wait(&format!("Deploying stack {stack_name} (this can take several minutes)..."));
    let result = aws.deploy_stack(&spec).await;
    let succeeded = matches!(&result, Ok(o) if o.status.success());
    reporter.end_wait(
        succeeded,
        &if succeeded {
            format!("Stack {stack_name} deployed")
        } else {
            format!("Stack {stack_name} failed to deploy")
        },
    );
    let output = result?;
    if !output.status.success() {
        return Err(StackError::DeployFailed {
            stack: stack_name,
            stderr: stderr_text(&output),
        }
        .into());
    }

    // 5. Outputs
    let stack = stack_status::describe(aws, &stack_name).await?;
    Ok(DeployOutcome {
        account: identity.account,
        ssh_cidr,
        key_path: keys.key_path(&key_pair_name),
        key_pair_name,
        key_pair,
        stack,
    })
}
