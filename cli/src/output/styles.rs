//! Colour roles for stackctl output.

use owo_colors::Style;

use crate::domain::StackStatusKind;

/// One style per kind of line, plus CloudFormation status colouring.
///
/// `Default` is the plain sheet used for `--no-color`, `NO_COLOR`, and
/// non-terminal stdout.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// Labels in `Label: value` blocks.
    pub label: Style,
    /// Keys in the `outputs` table.
    pub output_key: Style,
    pub header: Style,
    /// The `ssh -i ...` connect line.
    pub command: Style,
}

impl Styles {
    /// The terminal palette.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            info: Style::new().blue(),
            label: Style::new().dimmed(),
            output_key: Style::new().bold(),
            header: Style::new().bold().cyan(),
            command: Style::new().bold(),
        }
    }

    /// Green for settled stacks, yellow while CloudFormation is working,
    /// red for failures and rollbacks.
    #[must_use]
    pub fn stack_status(&self, status: &str) -> Style {
        match StackStatusKind::classify(status) {
            StackStatusKind::Healthy => self.success,
            StackStatusKind::InProgress => self.warning,
            StackStatusKind::Failed => self.error,
        }
    }
}
