//! Status command: name, status, and creation time of the stack.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::stack_status;

/// Run the status command.
///
/// # Errors
///
/// Returns [`crate::domain::StackError::NotFound`] if the stack has not been
/// deployed, or an error if AWS cannot be queried.
pub async fn run(app: &AppContext) -> Result<()> {
    let stack = stack_status::status(&app.aws, &app.config).await?;
    app.renderer().render_status(&stack)
}
