//! Application service: fax-to-voice migration engine.
//!
//! Moves one number from its fax service to a DID-Addon voice service:
//! validate and commit the deprovision, wait for the number to be released,
//! then validate and commit the provision. Records are processed strictly
//! one at a time.
//!
//! A provision-phase failure leaves the fax service already deprovisioned.
//! Nothing here rolls that back; the report says so and the caller surfaces it.

use anyhow::{Context, Result};

use crate::application::ports::{ExtensionSearch, Pause, ProgressReporter, ServiceProvisioning};
use crate::domain::migration::commit_succeeded;
use crate::domain::{
    BatchEntry, CandidateRecord, DeprovisionRequest, MigrationPolicy, MigrationReport,
    MigrationState, Phase, ProvisionRequest, ReleaseCheck, ValidationReport, ValidationVerdict,
};

/// Migrate one candidate record.
///
/// Validation rejections and non-200/202 commits end the record in
/// [`MigrationState::ValidationRejected`] or [`MigrationState::CommitFailed`]
/// and are returned as `Ok`. Once the fax service is deprovisioned, transport
/// errors also end the record, in [`MigrationState::TransportFailed`], so the
/// report still shows the number was left without a service.
///
/// # Errors
///
/// Returns an error when a deprovision-phase provider call fails at the
/// transport or decoding level.
pub async fn migrate_fax_to_voice_service(
    api: &(impl ServiceProvisioning + ExtensionSearch),
    pause: &impl Pause,
    reporter: &impl ProgressReporter,
    organization: &str,
    record: &CandidateRecord,
    policy: &MigrationPolicy,
) -> Result<MigrationReport> {
    let service_id = record.fax_service_id();
    let did = record.fax_did();
    let mut run = Run::new(record);

    // Deprovision.
    let deprovision = DeprovisionRequest::for_candidate(organization, record);
    run.enter(MigrationState::DeprovisionValidating);
    reporter.step(&format!("validating deprovision of fax service {service_id}..."));
    let validation = api
        .validate_deprovision(&deprovision)
        .await
        .with_context(|| format!("validating deprovision of fax service {service_id}"))?;
    if let Some(rejected) = run.check_validation(Phase::Deprovision, &validation, reporter) {
        return Ok(run.finish(rejected));
    }

    run.enter(MigrationState::DeprovisionRequested);
    let status = api
        .deprovision(&deprovision)
        .await
        .with_context(|| format!("deprovisioning fax service {service_id}"))?;
    if !commit_succeeded(status) {
        reporter.warn(&format!(
            "deprovision of fax service {service_id} failed (HTTP {status}); no voice service provisioned"
        ));
        return Ok(run.finish(MigrationState::CommitFailed {
            phase: Phase::Deprovision,
            status,
        }));
    }
    reporter.success(&format!("fax service {service_id} deprovisioned"));

    // Cooldown.
    run.enter(MigrationState::Cooldown);
    wait_for_release(api, pause, reporter, record, policy).await;

    // Provision.
    let provision = ProvisionRequest::for_candidate(organization, record);
    run.enter(MigrationState::ProvisionValidating);
    reporter.step(&format!("validating voice provision for {did}..."));
    let validation = match api.validate_provision(&provision).await {
        Ok(validation) => validation,
        Err(e) => {
            let e = e.context(format!("validating voice provision for {did}"));
            return Ok(run.fail_after_deprovision(&e, reporter));
        }
    };
    if let Some(rejected) = run.check_validation(Phase::Provision, &validation, reporter) {
        return Ok(run.finish(rejected));
    }

    run.enter(MigrationState::ProvisionRequested);
    let status = match api.provision(&provision).await {
        Ok(status) => status,
        Err(e) => {
            let e = e.context(format!("provisioning voice service for {did}"));
            return Ok(run.fail_after_deprovision(&e, reporter));
        }
    };
    if !commit_succeeded(status) {
        reporter.warn(&format!(
            "voice provision for {did} failed (HTTP {status}); fax service {service_id} is already deprovisioned"
        ));
        return Ok(run.finish(MigrationState::CommitFailed {
            phase: Phase::Provision,
            status,
        }));
    }

    reporter.success(&format!("{did} migrated from fax service {service_id} to voice"));
    Ok(run.finish(MigrationState::Done))
}

/// Migrate every record in order, one at a time.
///
/// `before_each` runs before each record starts (verbose listing). A
/// deprovision-phase transport error on one record is recorded as
/// [`BatchEntry::Errored`] and the batch moves on to the next record.
pub async fn migrate_all(
    api: &(impl ServiceProvisioning + ExtensionSearch),
    pause: &impl Pause,
    reporter: &impl ProgressReporter,
    organization: &str,
    records: &[CandidateRecord],
    policy: &MigrationPolicy,
    mut before_each: impl FnMut(&CandidateRecord),
) -> Vec<BatchEntry> {
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        before_each(record);
        let entry =
            match migrate_fax_to_voice_service(api, pause, reporter, organization, record, policy)
                .await
            {
                Ok(report) => BatchEntry::Finished(report),
                Err(e) => {
                    let service_id = record.fax_service_id();
                    let message = format!("{e:#}");
                    tracing::warn!(%service_id, error = %message, "migration aborted");
                    reporter.warn(&format!(
                        "migration of fax service {service_id} aborted: {message}"
                    ));
                    BatchEntry::Errored {
                        service_id,
                        message,
                    }
                }
            };
        entries.push(entry);
    }
    entries
}

/// Hold for the fixed cooldown, then optionally poll until the old service
/// no longer holds a number.
async fn wait_for_release(
    api: &impl ExtensionSearch,
    pause: &impl Pause,
    reporter: &impl ProgressReporter,
    record: &CandidateRecord,
    policy: &MigrationPolicy,
) {
    let did = record.fax_did();
    reporter.step(&format!(
        "waiting {}s for {did} to be released...",
        policy.cooldown.as_secs()
    ));
    pause.pause(policy.cooldown).await;

    let ReleaseCheck::Poll { interval, attempts } = policy.release_check else {
        return;
    };
    let service_id = record.fax_service_id();
    for attempt in 1..=attempts {
        match api.search_dids(service_id).await {
            Ok(dids) if dids.is_empty() => {
                tracing::info!(%service_id, attempt, "number released");
                return;
            }
            Ok(_) => tracing::debug!(%service_id, attempt, "number still bound"),
            Err(e) => tracing::warn!(%service_id, attempt, error = %e, "release check failed"),
        }
        if attempt < attempts {
            pause.pause(interval).await;
        }
    }
    reporter.warn(&format!(
        "{did} still bound to fax service {service_id} after {attempts} checks; provisioning anyway"
    ));
}

/// State trail of one record's migration.
struct Run {
    report: MigrationReport,
}

impl Run {
    fn new(record: &CandidateRecord) -> Self {
        Self {
            report: MigrationReport {
                service_id: record.fax_service_id(),
                did: record.fax_did().clone(),
                trail: vec![MigrationState::Idle],
                outcome: MigrationState::Idle,
                warnings: Vec::new(),
            },
        }
    }

    fn enter(&mut self, state: MigrationState) {
        tracing::info!(service_id = %self.report.service_id, %state, "migration state");
        self.report.trail.push(state.clone());
        self.report.outcome = state;
    }

    fn finish(mut self, state: MigrationState) -> MigrationReport {
        self.enter(state);
        self.report
    }

    /// Ends a record whose provision-phase call failed in transit.
    fn fail_after_deprovision(
        self,
        error: &anyhow::Error,
        reporter: &impl ProgressReporter,
    ) -> MigrationReport {
        let message = format!("{error:#}");
        tracing::warn!(service_id = %self.report.service_id, error = %message, "provision phase aborted");
        reporter.warn(&format!(
            "{message}; fax service {} is already deprovisioned",
            self.report.service_id
        ));
        self.finish(MigrationState::TransportFailed {
            phase: Phase::Provision,
            message,
        })
    }

    /// Returns the rejection state when validation fails; records warnings
    /// and returns `None` otherwise.
    fn check_validation(
        &mut self,
        phase: Phase,
        validation: &ValidationReport,
        reporter: &impl ProgressReporter,
    ) -> Option<MigrationState> {
        match validation.verdict() {
            ValidationVerdict::Rejected(message) => {
                reporter.warn(&format!("{phase} validation rejected: {message}"));
                Some(MigrationState::ValidationRejected { phase, message })
            }
            ValidationVerdict::Proceed { warnings } => {
                for warning in warnings {
                    reporter.warn(&format!("{phase} validation warning: {warning}"));
                    self.report.warnings.push(warning);
                }
                None
            }
        }
    }
}
