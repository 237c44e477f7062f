//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the global flags: it resolves the
//! deployment configuration and wires the production adapters, so command
//! handlers only decide which service to call and how to render the result.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{ConfigStore, UserPrompt};
use crate::domain::{ConfigOverrides, DeployConfig};
use crate::infra::aws::AwsCli;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::key_store::FsKeyStore;
use crate::infra::network::HttpIpLookup;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Answer yes to every confirmation prompt.
    pub yes: bool,
}

/// Where configuration comes from and what overrides it.
pub struct ConfigFlags {
    /// Explicit config file (`--config` / `STACKCTL_CONFIG`).
    pub path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    pub config: ConfigFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Resolved deployment configuration.
    pub config: DeployConfig,
    /// AWS CLI adapter bound to the configured region.
    pub aws: AwsCli<TokioCommandRunner>,
    /// Where generated private keys are written.
    pub keys: FsKeyStore,
    pub ip_lookup: HttpIpLookup,
    /// `--yes`: confirm every prompt without asking.
    pub assume_yes: bool,
    /// No operator to ask: `CI` is set or stdin is not a terminal.
    ///
    /// Prompts answer their default, which for destructive actions is "no".
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let non_interactive = std::env::var("CI").is_ok() || !std::io::stdin().is_terminal();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let store = YamlConfigStore::new(flags.config.path.clone());
        let config = store.load()?.with_overrides(&flags.config.overrides);
        tracing::debug!(path = %store.path().display(), stack = %config.stack_name(), "resolved config");

        // JSON mode keeps stdout for the result document.
        let quiet = flags.output.quiet || flags.output.json;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            aws: AwsCli::default_runner(config.region.clone()),
            keys: FsKeyStore::new(&config.key_dir),
            ip_lookup: HttpIpLookup::new(config.ip_lookup_url.clone()),
            config,
            assume_yes: flags.behaviour.yes,
            non_interactive,
        })
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress sink for long-running services.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

impl UserPrompt for AppContext {
    /// `--yes` confirms; a non-interactive session returns `default`
    /// without prompting.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        if self.non_interactive {
            tracing::info!(prompt, default, "non-interactive session, using default answer");
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
