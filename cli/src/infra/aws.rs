//! Infrastructure implementation of the AWS port traits.
//!
//! `AwsCli<R>` routes every AWS call through the `aws` command-line tool via a
//! `CommandRunner`. Argument vectors are built by pure functions so they can
//! be checked without spawning anything.

use std::path::Path;
use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{
    AwsToolchain, CommandRunner, KeyPairApi, StackApi, StackDeploySpec,
};
use crate::infra::command_runner::{
    DEFAULT_CMD_TIMEOUT, STACK_OPERATION_TIMEOUT, TokioCommandRunner,
};

const AWS: &str = "aws";

/// Infrastructure adapter that routes all AWS calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct AwsCli<R: CommandRunner> {
    cmd_runner: R,
    stack_runner: R,
    region: String,
}

impl<R: CommandRunner> AwsCli<R> {
    /// Create an adapter with explicit runners: `cmd_runner` for quick calls,
    /// `stack_runner` for calls that block on CloudFormation.
    pub fn new(cmd_runner: R, stack_runner: R, region: impl Into<String>) -> Self {
        Self {
            cmd_runner,
            stack_runner,
            region: region.into(),
        }
    }

    async fn quick(&self, args: Vec<String>, what: &str) -> Result<Output> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.cmd_runner
            .run(AWS, &args)
            .await
            .with_context(|| format!("aws {what}"))
    }

    async fn long(&self, args: Vec<String>, what: &str) -> Result<Output> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.stack_runner
            .run(AWS, &args)
            .await
            .with_context(|| format!("aws {what}"))
    }
}

impl AwsCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner(region: impl Into<String>) -> Self {
        Self::new(
            TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
            TokioCommandRunner::new(STACK_OPERATION_TIMEOUT),
            region,
        )
    }
}

// ── Argument builders ─────────────────────────────────────────────────────────

fn with_region(mut args: Vec<String>, region: &str) -> Vec<String> {
    args.extend(["--region".to_string(), region.to_string()]);
    args
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| (*s).to_string()).collect()
}

/// `aws cloudformation deploy ...`
#[must_use]
pub fn deploy_args(spec: &StackDeploySpec<'_>, region: &str) -> Vec<String> {
    let mut args = owned(&["cloudformation", "deploy", "--template-file"]);
    args.push(spec.template_path.display().to_string());
    args.extend(owned(&["--stack-name", spec.stack_name, "--parameter-overrides"]));
    args.extend(spec.parameters.to_overrides());
    args.extend(owned(&["--capabilities", "CAPABILITY_NAMED_IAM"]));
    if !spec.tags.is_empty() {
        args.push("--tags".to_string());
        args.extend(spec.tags.iter().map(|(k, v)| format!("{k}={v}")));
    }
    args.push("--no-fail-on-empty-changeset".to_string());
    with_region(args, region)
}

#[must_use]
pub fn describe_stack_args(stack_name: &str, region: &str) -> Vec<String> {
    with_region(
        owned(&[
            "cloudformation",
            "describe-stacks",
            "--stack-name",
            stack_name,
            "--output",
            "json",
        ]),
        region,
    )
}

#[must_use]
pub fn create_key_pair_args(name: &str, region: &str) -> Vec<String> {
    with_region(
        owned(&[
            "ec2",
            "create-key-pair",
            "--key-name",
            name,
            "--query",
            "KeyMaterial",
            "--output",
            "text",
        ]),
        region,
    )
}

// ── Port implementations ──────────────────────────────────────────────────────

impl<R: CommandRunner> AwsToolchain for AwsCli<R> {
    async fn version(&self) -> Result<Output> {
        self.quick(owned(&["--version"]), "--version").await
    }

    async fn caller_identity(&self) -> Result<Output> {
        let args = with_region(
            owned(&["sts", "get-caller-identity", "--output", "json"]),
            &self.region,
        );
        self.quick(args, "sts get-caller-identity").await
    }
}

impl<R: CommandRunner> KeyPairApi for AwsCli<R> {
    async fn describe_key_pair(&self, name: &str) -> Result<Output> {
        let args = with_region(
            owned(&["ec2", "describe-key-pairs", "--key-names", name]),
            &self.region,
        );
        self.quick(args, "ec2 describe-key-pairs").await
    }

    async fn create_key_pair(&self, name: &str) -> Result<Output> {
        self.quick(create_key_pair_args(name, &self.region), "ec2 create-key-pair")
            .await
    }

    async fn delete_key_pair(&self, name: &str) -> Result<Output> {
        let args = with_region(
            owned(&["ec2", "delete-key-pair", "--key-name", name]),
            &self.region,
        );
        self.quick(args, "ec2 delete-key-pair").await
    }
}

impl<R: CommandRunner> StackApi for AwsCli<R> {
    async fn deploy_stack(&self, spec: &StackDeploySpec<'_>) -> Result<Output> {
        self.long(deploy_args(spec, &self.region), "cloudformation deploy")
            .await
    }

    async fn describe_stack(&self, stack_name: &str) -> Result<Output> {
        self.quick(
            describe_stack_args(stack_name, &self.region),
            "cloudformation describe-stacks",
        )
        .await
    }

    async fn delete_stack(&self, stack_name: &str) -> Result<Output> {
        let args = with_region(
            owned(&["cloudformation", "delete-stack", "--stack-name", stack_name]),
            &self.region,
        );
        self.quick(args, "cloudformation delete-stack").await
    }

    async fn wait_stack_deleted(&self, stack_name: &str) -> Result<Output> {
        let args = with_region(
            owned(&[
                "cloudformation",
                "wait",
                "stack-delete-complete",
                "--stack-name",
                stack_name,
            ]),
            &self.region,
        );
        self.long(args, "cloudformation wait stack-delete-complete")
            .await
    }

    async fn validate_template(&self, template_path: &Path) -> Result<Output> {
        let body = format!("file://{}", template_path.display());
        let args = with_region(
            owned(&["cloudformation", "validate-template", "--template-body", &body]),
            &self.region,
        );
        self.quick(args, "cloudformation validate-template").await
    }
}
