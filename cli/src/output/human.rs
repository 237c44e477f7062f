//! Human-readable terminal renderer.
//!
//! Each `render_*` method prints to stdout unless the context is quiet; the
//! matching `write_*` method does the formatting against any writer.

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize as _;

use crate::application::services::cleanup::CleanupOutcome;
use crate::application::services::deploy::DeployOutcome;
use crate::application::services::key_pair::KeyPairOutcome;
use crate::application::services::validate::ValidationReport;
use crate::domain::StackSummary;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render a finished deployment: where the server is and how to reach it.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn render_deploy(&self, outcome: &DeployOutcome) -> io::Result<()> {
        if self.ctx.quiet {
            return Ok(());
        }
        self.write_deploy(&mut io::stdout().lock(), outcome)
    }

    /// # Errors
    ///
    /// Returns an error if `w` cannot be written.
    pub fn write_deploy(&self, w: &mut impl Write, outcome: &DeployOutcome) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "  {}", "Deployment complete".style(self.ctx.styles.header))?;
        writeln!(w)?;
        self.kv(w, "Stack:", &outcome.stack.stack_name)?;
        self.kv(w, "Status:", &self.styled_status(&outcome.stack.stack_status))?;
        self.kv(w, "Server IP:", outcome.public_ip().unwrap_or("(pending)"))?;
        self.kv(w, "Data bucket:", outcome.data_bucket().unwrap_or("(unknown)"))?;
        self.kv(w, "Key pair:", &outcome.key_pair_name)?;
        match &outcome.key_pair {
            KeyPairOutcome::Created { path }
            | KeyPairOutcome::Existing {
                local_key: Some(path),
            } => self.kv(w, "Private key:", &path.display().to_string())?,
            KeyPairOutcome::Existing { local_key: None } => {}
        }

        if let Some(ssh) = outcome.ssh_command() {
            writeln!(w)?;
            writeln!(
                w,
                "  {} Connect: {}",
                "ℹ".style(self.ctx.styles.info),
                ssh.style(self.ctx.styles.command)
            )?;
        }
        Ok(())
    }

    /// Render the result of `cleanup`.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn render_cleanup(&self, outcome: &CleanupOutcome) -> io::Result<()> {
        if self.ctx.quiet {
            return Ok(());
        }
        self.write_cleanup(&mut io::stdout().lock(), outcome)
    }

    /// # Errors
    ///
    /// Returns an error if `w` cannot be written.
    pub fn write_cleanup(&self, w: &mut impl Write, outcome: &CleanupOutcome) -> io::Result<()> {
        match outcome {
            CleanupOutcome::Cancelled => writeln!(w, "Cleanup cancelled."),
            CleanupOutcome::Deleted {
                stack_name,
                key_pair_removed,
            } => {
                writeln!(
                    w,
                    "  {} Stack {stack_name} and its resources removed",
                    "✓".style(self.ctx.styles.success)
                )?;
                if !key_pair_removed {
                    writeln!(w, "  {} Key pair kept", "ℹ".style(self.ctx.styles.info))?;
                }
                Ok(())
            }
        }
    }

    /// Render the stack's name, status, and creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn render_status(&self, stack: &StackSummary) -> io::Result<()> {
        if self.ctx.quiet {
            return Ok(());
        }
        self.write_status(&mut io::stdout().lock(), stack)
    }

    /// # Errors
    ///
    /// Returns an error if `w` cannot be written.
    pub fn write_status(&self, w: &mut impl Write, stack: &StackSummary) -> io::Result<()> {
        self.kv(w, "Stack:", &stack.stack_name)?;
        self.kv(w, "Status:", &self.styled_status(&stack.stack_status))?;
        self.kv(w, "Created:", &format_time(stack.creation_time))?;
        if let Some(updated) = stack.last_updated_time {
            self.kv(w, "Last updated:", &format_time(updated))?;
        }
        if let Some(reason) = &stack.stack_status_reason {
            self.kv(w, "Reason:", reason)?;
        }
        Ok(())
    }

    /// Render every stack output as an aligned table.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn render_outputs(&self, stack: &StackSummary) -> io::Result<()> {
        if self.ctx.quiet {
            return Ok(());
        }
        self.write_outputs(&mut io::stdout().lock(), stack)
    }

    /// # Errors
    ///
    /// Returns an error if `w` cannot be written.
    pub fn write_outputs(&self, w: &mut impl Write, stack: &StackSummary) -> io::Result<()> {
        if stack.outputs.is_empty() {
            return writeln!(w, "Stack {} has no outputs yet.", stack.stack_name);
        }
        let width = stack
            .outputs
            .iter()
            .map(|o| o.output_key.len())
            .max()
            .unwrap_or(0);
        writeln!(
            w,
            "  {}",
            format!("Outputs ({})", stack.stack_name).style(self.ctx.styles.header)
        )?;
        writeln!(w)?;
        for output in &stack.outputs {
            let key = format!("{:<width$}", output.output_key);
            writeln!(
                w,
                "  {}  {}",
                key.style(self.ctx.styles.output_key),
                output.output_value
            )?;
        }
        Ok(())
    }

    /// Render a template validation report.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn render_validation(&self, report: &ValidationReport) -> io::Result<()> {
        if self.ctx.quiet {
            return Ok(());
        }
        self.write_validation(&mut io::stdout().lock(), report)
    }

    /// # Errors
    ///
    /// Returns an error if `w` cannot be written.
    pub fn write_validation(&self, w: &mut impl Write, report: &ValidationReport) -> io::Result<()> {
        let verdict = if report.remote_checked {
            "CloudFormation accepted the template"
        } else {
            "Template parsed (offline check only)"
        };
        writeln!(w, "  {} {verdict}", "✓".style(self.ctx.styles.success))?;
        if let Some(description) = &report.description {
            self.kv(w, "Description:", description)?;
        }
        self.kv(w, "Parameters:", &report.parameters.join(", "))?;
        self.kv(w, "Resources:", &report.resources.to_string())?;
        self.kv(w, "Outputs:", &report.outputs.join(", "))
    }

    fn kv(&self, w: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
        writeln!(w, "{}", self.ctx.format_kv(key, value))
    }

    fn styled_status(&self, status: &str) -> String {
        status.style(self.ctx.styles.stack_status(status)).to_string()
    }
}

/// `2024-05-01 14:30:00 +02:00` in the operator's local time zone.
#[must_use]
pub fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}
