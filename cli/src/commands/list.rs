//! `warden <ORG> --print-fax`: list every active fax service.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::FoundryApi;
use crate::application::services::inventory::list_active_fax_services;
use crate::output::{HumanRenderer, TerminalReporter};

/// Run `warden <ORG> --print-fax`.
///
/// # Errors
///
/// Returns an error if the provider listing call fails.
pub async fn run(app: &AppContext, api: &impl FoundryApi, organization: &str) -> Result<()> {
    app.output
        .header(&format!("Printing all active fax services for {organization}..."));
    let reporter = TerminalReporter::new(&app.output);
    let inventory =
        list_active_fax_services(api, &reporter, organization, app.config.page_limit).await?;
    HumanRenderer::new(&app.output).render_inventory(&inventory);
    Ok(())
}
