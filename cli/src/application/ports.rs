//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::StackParameters;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Inputs for `aws cloudformation deploy`.
pub struct StackDeploySpec<'a> {
    pub stack_name: &'a str,
    /// Template file on local disk.
    pub template_path: &'a Path,
    pub parameters: &'a StackParameters,
    /// `(Key, Value)` stack tags.
    pub tags: &'a [(String, String)],
}

// ── AWS Port Traits ───────────────────────────────────────────────────────────

/// Toolchain and credential inspection.
#[allow(async_fn_in_trait)]
pub trait AwsToolchain {
    /// `aws --version`. An `Err` means the CLI could not be spawned.
    async fn version(&self) -> Result<Output>;
    /// `aws sts get-caller-identity` as JSON.
    async fn caller_identity(&self) -> Result<Output>;
}

/// EC2 key pair operations.
#[allow(async_fn_in_trait)]
pub trait KeyPairApi {
    /// Describe a single key pair. Exits non-zero when it does not exist.
    async fn describe_key_pair(&self, name: &str) -> Result<Output>;
    /// Create a key pair; stdout carries the PEM private key.
    async fn create_key_pair(&self, name: &str) -> Result<Output>;
    async fn delete_key_pair(&self, name: &str) -> Result<Output>;
}

/// CloudFormation stack operations.
#[allow(async_fn_in_trait)]
pub trait StackApi {
    /// Create or update the stack (`cloudformation deploy`).
    async fn deploy_stack(&self, spec: &StackDeploySpec<'_>) -> Result<Output>;
    /// `describe-stacks` as JSON.
    async fn describe_stack(&self, stack_name: &str) -> Result<Output>;
    async fn delete_stack(&self, stack_name: &str) -> Result<Output>;
    /// Block until the provider reports the stack deleted.
    async fn wait_stack_deleted(&self, stack_name: &str) -> Result<Output>;
    async fn validate_template(&self, template_path: &Path) -> Result<Output>;
}

/// Composite trait: any type implementing all three sub-traits is an `AwsProvider`.
pub trait AwsProvider: AwsToolchain + KeyPairApi + StackApi {}

/// Blanket implementation: any type implementing all three sub-traits is an `AwsProvider`.
impl<T> AwsProvider for T where T: AwsToolchain + KeyPairApi + StackApi {}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Network Port ──────────────────────────────────────────────────────────────

/// Resolves the caller's public address as seen from the internet.
#[allow(async_fn_in_trait)]
pub trait PublicIpLookup {
    async fn public_ip(&self) -> Result<Ipv4Addr>;
}

// ── Local key material ────────────────────────────────────────────────────────

/// Local storage for generated private keys.
pub trait KeyStore {
    /// Path the private key for `name` lives (or would live) at.
    fn key_path(&self, name: &str) -> PathBuf;
    fn exists(&self, name: &str) -> bool;
    /// Persist PEM material readable only by the owner.
    fn write_private_key(&self, name: &str, pem: &str) -> Result<PathBuf>;
    /// Remove the key file. Returns `false` if there was nothing to remove.
    fn remove(&self, name: &str) -> Result<bool>;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Yes/no questions for the operator.
pub trait UserPrompt {
    /// Ask `prompt`; non-interactive sessions answer `default`.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Begin a long blocking wait (spinner on a TTY).
    fn begin_wait(&self, message: &str);
    /// End the wait started by `begin_wait`.
    fn end_wait(&self, success: bool, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Loads deployment configuration.
pub trait ConfigStore {
    fn load(&self) -> Result<crate::domain::DeployConfig>;
    /// Where the configuration is read from.
    fn path(&self) -> PathBuf;
}
