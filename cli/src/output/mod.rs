//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::cleanup::CleanupOutcome;
use crate::application::services::deploy::DeployOutcome;
use crate::application::services::validate::ValidationReport;
use crate::domain::StackSummary;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let styles = if use_colors {
            Styles::colored()
        } else {
            Styles::default()
        };

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// `  Label:           value`, with the label styled.
    #[must_use]
    pub fn format_kv(&self, key: &str, value: &str) -> String {
        format!("  {} {value}", format!("{key:<16}").style(self.styles.label))
    }
}

/// Output-mode dispatch for command results.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the result of `deploy`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deploy(&self, outcome: &DeployOutcome) -> Result<()> {
        match self {
            Self::Human(r) => Ok(r.render_deploy(outcome)?),
            Self::Json(r) => r.render(outcome),
        }
    }

    /// Render the result of `cleanup`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_cleanup(&self, outcome: &CleanupOutcome) -> Result<()> {
        match self {
            Self::Human(r) => Ok(r.render_cleanup(outcome)?),
            Self::Json(r) => r.render(outcome),
        }
    }

    /// Render the stack's name, status, and creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written or JSON serialization fails.
    pub fn render_status(&self, stack: &StackSummary) -> Result<()> {
        match self {
            Self::Human(r) => Ok(r.render_status(stack)?),
            Self::Json(r) => r.render_status(stack),
        }
    }

    /// Render every stack output.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_outputs(&self, stack: &StackSummary) -> Result<()> {
        match self {
            Self::Human(r) => Ok(r.render_outputs(stack)?),
            Self::Json(r) => r.render(&stack.outputs),
        }
    }

    /// Render a template validation report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_validation(&self, report: &ValidationReport) -> Result<()> {
        match self {
            Self::Human(r) => Ok(r.render_validation(report)?),
            Self::Json(r) => r.render(report),
        }
    }
}
