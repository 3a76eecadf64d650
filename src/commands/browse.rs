//! Resource browser command (`backoffice browse`)

use iocraft::prelude::*;

use super::interactive::is_stdin_tty;
use super::list::{ListOptions, build_query};
use crate::context::AppContext;
use crate::error::{BackofficeError, Result};
use crate::query::DateFilter;
use crate::resources;
use crate::tui::ResourceBrowser;

/// Launch the browser TUI for one resource
pub async fn cmd_browse(
    ctx: AppContext,
    resource_name: &str,
    search: Option<String>,
    filter: Option<DateFilter>,
) -> Result<()> {
    let resource = resources::find(resource_name)?;
    if !is_stdin_tty() {
        return Err(BackofficeError::InvalidInput(
            "browse needs an interactive terminal. Use `backoffice list` instead".to_string(),
        ));
    }

    let options = ListOptions {
        filter,
        search,
        ..Default::default()
    };
    let query = build_query(resource, &options, ctx.config.page_size())?;

    tracing::info!(resource = resource.name, "starting browser");

    element!(ResourceBrowser(
        resource: Some(resource),
        query: Some(query),
        binding: Some(ctx.list_binding()),
        mutator: Some(ctx.mutator()),
    ))
    .fullscreen()
    .await
    .map_err(|e| BackofficeError::Other(format!("TUI error: {}", e)))?;

    if ctx.session.is_invalidated() {
        return Err(BackofficeError::Unauthorized(
            "the API rejected the token. Update it with: backoffice config set api.token <token>"
                .to_string(),
        ));
    }
    Ok(())
}
