//! Application service: fax service discovery and aggregation.
//!
//! Builds candidate records by combining the service listing with user and
//! extension lookups. Imports only from `crate::domain` and
//! `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{ExtensionSearch, ProgressReporter, ServiceCatalog, UserDirectory};
use crate::application::services::resolve::{resolve_did, resolve_username};
use crate::domain::{
    CandidateRecord, FaxService, Inventory, Lookup, Ownership, ResolveError, ServiceId,
    ServiceStatus, SkippedService,
};

/// List every active fax service in `organization` as candidate records.
///
/// A service that cannot be resolved into a complete record (no DID, missing
/// department or location, extension search failure) is skipped and listed in
/// [`Inventory::skipped`]; the rest of the pass continues.
///
/// # Errors
///
/// Returns an error if the listing call itself fails. No partial inventory is
/// returned in that case.
pub async fn list_active_fax_services(
    api: &(impl ServiceCatalog + UserDirectory + ExtensionSearch),
    reporter: &impl ProgressReporter,
    organization: &str,
    limit: u32,
) -> Result<Inventory> {
    let page = api
        .list_active_fax(organization, limit)
        .await
        .with_context(|| format!("listing active fax services for {organization}"))?;

    reporter.step(&format!("Total Active Fax Services: {}", page.total));
    tracing::info!(
        organization,
        total = page.total,
        returned = page.services.len(),
        "listed active fax services"
    );
    if u64::try_from(page.services.len()).unwrap_or(u64::MAX) < page.total {
        reporter.warn(&format!(
            "provider returned {} of {} services (page limit {limit})",
            page.services.len(),
            page.total
        ));
    }

    let mut inventory = Inventory {
        total_active: page.total,
        ..Inventory::default()
    };

    for service in page.services {
        let service_id = service.id;
        match build_candidate(api, service).await {
            Ok(record) => inventory.candidates.push(record),
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!(%service_id, %reason, "skipping service");
                reporter.warn(&format!("skipping fax service {service_id}: {reason}"));
                inventory.skipped.push(SkippedService { service_id, reason });
            }
        }
    }

    Ok(inventory)
}

/// Look up one fax service by id.
///
/// Reports and returns [`Lookup::NotFound`] when the search has no match and
/// [`Lookup::Suspended`] when the match is suspended.
///
/// # Errors
///
/// Returns an error if the search call fails or the matched service cannot be
/// resolved into a complete record.
pub async fn find_fax_service(
    api: &(impl ServiceCatalog + UserDirectory + ExtensionSearch),
    reporter: &impl ProgressReporter,
    organization: &str,
    service_id: ServiceId,
) -> Result<Lookup> {
    let services = api
        .search_fax(organization, service_id)
        .await
        .with_context(|| format!("searching for fax service {service_id} in {organization}"))?;

    let Some(service) = services.into_iter().next() else {
        reporter.warn(&format!(
            "There is no existing fax service with service id {service_id}."
        ));
        return Ok(Lookup::NotFound);
    };

    if service.status == ServiceStatus::Suspended {
        reporter.warn(&format!(
            "The fax service with service id {service_id} is suspended/not active."
        ));
        return Ok(Lookup::Suspended);
    }

    let record = build_candidate(api, service)
        .await
        .with_context(|| format!("resolving fax service {service_id}"))?;
    Ok(Lookup::Found(record))
}

/// Enrich one provider service into a complete candidate record.
async fn build_candidate(
    api: &(impl UserDirectory + ExtensionSearch),
    service: FaxService,
) -> Result<CandidateRecord> {
    let FaxService {
        id,
        owner,
        department_id,
        location_id,
        ..
    } = service;

    let department_id = department_id.ok_or(ResolveError::MissingField {
        service_id: id,
        field: "department",
    })?;
    let location_id = location_id.ok_or(ResolveError::MissingField {
        service_id: id,
        field: "location",
    })?;

    let username = match &owner {
        Ownership::Owned { user_id } => resolve_username(api, user_id).await,
        Ownership::Unowned => None,
    };
    let did = resolve_did(api, id).await?;

    Ok(CandidateRecord::new(
        username,
        owner,
        department_id,
        location_id,
        id,
        did,
    ))
}
