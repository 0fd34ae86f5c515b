//! `warden <ORG> --single-fax-id <ID>`: show one fax service.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::FoundryApi;
use crate::application::services::inventory::find_fax_service;
use crate::domain::{Lookup, ServiceId};
use crate::output::{HumanRenderer, TerminalReporter};

/// Run `warden <ORG> --single-fax-id <ID>`.
///
/// "Not found" and "not active" are reported by the lookup itself and are not
/// errors.
///
/// # Errors
///
/// Returns an error if the search fails or the service cannot be resolved.
pub async fn run(
    app: &AppContext,
    api: &impl FoundryApi,
    organization: &str,
    service_id: ServiceId,
) -> Result<()> {
    app.output.header(&format!(
        "Printing fax service user info for service id {service_id}..."
    ));
    let reporter = TerminalReporter::new(&app.output);
    if let Lookup::Found(record) = find_fax_service(api, &reporter, organization, service_id).await? {
        HumanRenderer::new(&app.output).render_candidate(&record);
    }
    Ok(())
}
