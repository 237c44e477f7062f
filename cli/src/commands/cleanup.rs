//! Cleanup command: delete the stack.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::cleanup;

/// Run the cleanup command.
///
/// # Errors
///
/// Returns an error if pre-flight checks fail or the stack cannot be deleted.
pub async fn run(app: &AppContext) -> Result<()> {
    let outcome = cleanup::cleanup(&app.aws, &app.keys, app, &app.reporter(), &app.config).await?;
    app.renderer().render_cleanup(&outcome)
}
