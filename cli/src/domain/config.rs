//! Domain types and validators for stackctl configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::key_pair::validate_key_pair_name;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_PROJECT: &str = "ml-platform";
pub const DEFAULT_REGION: &str = "us-east-1";
/// Amazon Linux 2 in `us-east-1`.
pub const DEFAULT_AMI_ID: &str = "ami-0c02fb55956c7d316";
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://checkip.amazonaws.com";

static PROJECT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{1,30}[a-z0-9]$").ok());

static AMI_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^ami-([0-9a-f]{8}|[0-9a-f]{17})$").ok());

static REGION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-gov)?-[a-z]+-\d$").ok());

// ── Environment ──────────────────────────────────────────────────────────────

/// Deployment environment. Mirrors the template's `AllowedValues`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Self::Dev, Self::Staging, Self::Prod];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidEnvironment(s.to_string()))
    }
}

// ── Config schema ────────────────────────────────────────────────────────────

/// Deployment configuration stored in `stackctl.yaml`.
///
/// Every field has a default, so a missing or empty file reproduces the
/// fixed project/environment/region the tool has always deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub project: String,
    pub environment: Environment,
    pub region: String,
    pub ami_id: String,
    /// Explicit key pair name. Derived from project and environment when unset.
    pub key_pair: Option<String>,
    /// Directory the generated private key is written to.
    pub key_dir: PathBuf,
    pub ip_lookup_url: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            environment: Environment::default(),
            region: DEFAULT_REGION.to_string(),
            ami_id: DEFAULT_AMI_ID.to_string(),
            key_pair: None,
            key_dir: PathBuf::from("."),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
        }
    }
}

/// Values supplied on the command line (or their env vars) that win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub project: Option<String>,
    pub environment: Option<Environment>,
    pub region: Option<String>,
}

impl DeployConfig {
    /// Apply command-line overrides on top of file values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(project) = &overrides.project {
            self.project.clone_from(project);
        }
        if let Some(environment) = overrides.environment {
            self.environment = environment;
        }
        if let Some(region) = &overrides.region {
            self.region.clone_from(region);
        }
        self
    }

    /// `{project}-{environment}`
    #[must_use]
    pub fn stack_name(&self) -> String {
        format!("{}-{}", self.project, self.environment)
    }

    /// Explicit key pair, or `{project}-{environment}-key`.
    #[must_use]
    pub fn key_pair_name(&self) -> String {
        self.key_pair
            .clone()
            .unwrap_or_else(|| format!("{}-key", self.stack_name()))
    }

    /// Validates every field that ends up on an AWS command line.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field as a [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        validate_project(&self.project)?;
        validate_region(&self.region)?;
        validate_key_pair_name(&self.key_pair_name())?;
        Ok(())
    }

    /// Checks that `ami_id` can be launched in `region`.
    ///
    /// AMI ids are regional, and the built-in default is only registered in
    /// [`DEFAULT_REGION`]; other regions need an explicit `ami_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAmi`] for a malformed id, or
    /// [`ConfigError::DefaultAmiOutsideRegion`] when the default image would
    /// be sent to another region.
    pub fn validate_image(&self) -> Result<()> {
        let valid = AMI_RE.as_ref().is_some_and(|re| re.is_match(&self.ami_id));
        if !valid {
            return Err(ConfigError::InvalidAmi(self.ami_id.clone()).into());
        }
        if self.ami_id == DEFAULT_AMI_ID && self.region != DEFAULT_REGION {
            return Err(ConfigError::DefaultAmiOutsideRegion {
                ami: self.ami_id.clone(),
                region: self.region.clone(),
            }
            .into());
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a project name against the template's `AllowedPattern`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidProject`] if the name does not match.
pub fn validate_project(project: &str) -> Result<()> {
    let valid = PROJECT_RE.as_ref().is_some_and(|re| re.is_match(project));
    if !valid {
        return Err(ConfigError::InvalidProject(project.to_string()).into());
    }
    Ok(())
}

/// Validates an AWS region name such as `us-east-1` or `us-gov-west-1`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidRegion`] if the name is malformed.
pub fn validate_region(region: &str) -> Result<()> {
    let valid = REGION_RE.as_ref().is_some_and(|re| re.is_match(region));
    if !valid {
        return Err(ConfigError::InvalidRegion(region.to_string()).into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
