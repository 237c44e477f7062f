//! Outputs command

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::stack_status;

/// Run the outputs command.
///
/// # Errors
///
/// Returns an error if the stack does not exist or cannot be described.
pub async fn run(app: &AppContext) -> Result<()> {
    let stack = stack_status::status(&app.aws, &app.config).await?;
    app.renderer().render_outputs(&stack)
}
