//! `warden <ORG> --migrate-all[-verbose]` and `--migrate-single-id <ID>`.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::{FoundryApi, Pause};
use crate::application::services::inventory::{find_fax_service, list_active_fax_services};
use crate::application::services::migration::{migrate_all, migrate_fax_to_voice_service};
use crate::domain::{BatchSummary, Lookup, ServiceId};
use crate::output::{HumanRenderer, TerminalReporter};

/// Run `warden <ORG> --migrate-all` (`verbose` prints each record first).
///
/// # Errors
///
/// Returns an error if the listing fails, the prompt fails, or any record
/// did not reach a completed migration.
pub async fn run_all(
    app: &AppContext,
    api: &impl FoundryApi,
    pause: &impl Pause,
    organization: &str,
    verbose: bool,
) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    let renderer = HumanRenderer::new(&app.output);

    app.output
        .header(&format!("Collecting active fax services for {organization}..."));
    let inventory =
        list_active_fax_services(api, &reporter, organization, app.config.page_limit).await?;
    if inventory.candidates.is_empty() {
        app.output.info("No fax services to migrate.");
        return Ok(());
    }

    let count = inventory.candidates.len();
    if !app.confirm(&format!(
        "Deprovision {count} fax service(s) in {organization} and re-provision each number as voice?"
    ))? {
        app.output.info("Cancelled.");
        return Ok(());
    }

    let policy = app.config.migration_policy();
    let entries = migrate_all(
        api,
        pause,
        &reporter,
        organization,
        &inventory.candidates,
        &policy,
        |record| {
            if verbose {
                renderer.render_candidate(record);
            }
        },
    )
    .await;

    renderer.render_batch(&entries);
    let summary = BatchSummary::from_entries(&entries);
    anyhow::ensure!(
        summary.done == summary.total(),
        "{} of {} migrations did not complete",
        summary.total() - summary.done,
        summary.total()
    );
    Ok(())
}

/// Run `warden <ORG> --migrate-single-id <ID>`.
///
/// # Errors
///
/// Returns an error if the lookup fails, a provider call fails mid-migration,
/// or the migration ends in a failure state.
pub async fn run_single(
    app: &AppContext,
    api: &impl FoundryApi,
    pause: &impl Pause,
    organization: &str,
    service_id: ServiceId,
) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    let renderer = HumanRenderer::new(&app.output);

    let Lookup::Found(record) = find_fax_service(api, &reporter, organization, service_id).await?
    else {
        return Ok(());
    };
    renderer.render_candidate(&record);

    if !app.confirm(&format!(
        "Deprovision fax service {service_id} and re-provision {} as voice?",
        record.fax_did()
    ))? {
        app.output.info("Cancelled.");
        return Ok(());
    }

    let policy = app.config.migration_policy();
    let report =
        migrate_fax_to_voice_service(api, pause, &reporter, organization, &record, &policy)
            .await?;
    renderer.render_migration(&report);
    anyhow::ensure!(report.is_done(), "migration of fax service {service_id} did not complete");
    Ok(())
}
