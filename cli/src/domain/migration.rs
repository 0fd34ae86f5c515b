//! Fax-to-voice migration rules: requests, validation verdicts, states.
//!
//! Pure functions only; no I/O, no async. The application layer drives the
//! transitions; this module decides what each provider answer means.

use std::fmt;
use std::time::Duration;

use crate::domain::candidate::{CandidateRecord, Did, Ownership, ServiceId};

// ── Constants ────────────────────────────────────────────────────────────────

/// Reason attached to every deprovision request.
pub const DEPROVISION_REASON: &str = "REDEPLOYMENT";

/// SKU of the voice service provisioned on the freed number.
pub const VOICE_ADDON_SKU: &str = "DID-ADDON-MR-U-1";

/// Time the provider needs to return a released number to its pool.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// Interval between release polls when polling is enabled.
pub const DEFAULT_RELEASE_POLL_INTERVAL: Duration = Duration::from_secs(2);

// ── Requests ─────────────────────────────────────────────────────────────────

/// Deprovision request for one fax service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprovisionRequest {
    pub organization: String,
    pub service_id: ServiceId,
    pub reason: &'static str,
}

impl DeprovisionRequest {
    #[must_use]
    pub fn for_candidate(organization: &str, record: &CandidateRecord) -> Self {
        Self {
            organization: organization.to_string(),
            service_id: record.fax_service_id(),
            reason: DEPROVISION_REASON,
        }
    }
}

/// Provision request for the replacement voice service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub organization: String,
    pub sku: &'static str,
    pub did: Did,
    pub location_id: String,
    pub department_id: String,
    /// `None` for unowned services: the provider rejects an empty user reference.
    pub user_id: Option<String>,
}

impl ProvisionRequest {
    #[must_use]
    pub fn for_candidate(organization: &str, record: &CandidateRecord) -> Self {
        let user_id = match record.owner() {
            Ownership::Owned { user_id } => Some(user_id.clone()),
            Ownership::Unowned => None,
        };
        Self {
            organization: organization.to_string(),
            sku: VOICE_ADDON_SKU,
            did: record.fax_did().clone(),
            location_id: record.location_id().to_string(),
            department_id: record.service_department_id().to_string(),
            user_id,
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Business-rule feedback from a validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// What the engine does with a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    /// At least one error: stop, report the first one.
    Rejected(String),
    /// No errors. Warnings are informational and never block.
    Proceed { warnings: Vec<String> },
}

impl ValidationReport {
    /// A report carrying a single error message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn verdict(&self) -> ValidationVerdict {
        match self.errors.first() {
            Some(first) => ValidationVerdict::Rejected(first.clone()),
            None => ValidationVerdict::Proceed {
                warnings: self.warnings.clone(),
            },
        }
    }
}

/// Commits succeed on 200, or 202 when the provider accepts asynchronously.
#[must_use]
pub fn commit_succeeded(status: u16) -> bool {
    matches!(status, 200 | 202)
}

// ── State machine ────────────────────────────────────────────────────────────

/// Which half of the migration a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Deprovision,
    Provision,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deprovision => f.write_str("deprovision"),
            Self::Provision => f.write_str("provision"),
        }
    }
}

/// Migration states of one candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationState {
    Idle,
    DeprovisionValidating,
    DeprovisionRequested,
    Cooldown,
    ProvisionValidating,
    ProvisionRequested,
    Done,
    ValidationRejected { phase: Phase, message: String },
    CommitFailed { phase: Phase, status: u16 },
    /// A provider call failed in transit; the record stops where it was.
    TransportFailed { phase: Phase, message: String },
}

impl MigrationState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Done
                | Self::ValidationRejected { .. }
                | Self::CommitFailed { .. }
                | Self::TransportFailed { .. }
        )
    }

    /// Whether the fax service has already been removed when this state is
    /// reached. Provision-phase failures leave the number without a service.
    #[must_use]
    pub fn fax_deprovisioned(&self) -> bool {
        match self {
            Self::Cooldown
            | Self::ProvisionValidating
            | Self::ProvisionRequested
            | Self::Done => true,
            Self::ValidationRejected { phase, .. }
            | Self::CommitFailed { phase, .. }
            | Self::TransportFailed { phase, .. } => *phase == Phase::Provision,
            Self::Idle | Self::DeprovisionValidating | Self::DeprovisionRequested => false,
        }
    }
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::DeprovisionValidating => f.write_str("validating deprovision"),
            Self::DeprovisionRequested => f.write_str("deprovision requested"),
            Self::Cooldown => f.write_str("cooldown"),
            Self::ProvisionValidating => f.write_str("validating provision"),
            Self::ProvisionRequested => f.write_str("provision requested"),
            Self::Done => f.write_str("done"),
            Self::ValidationRejected { phase, message } => {
                write!(f, "{phase} validation rejected: {message}")
            }
            Self::CommitFailed { phase, status } => {
                write!(f, "{phase} failed with HTTP {status}")
            }
            Self::TransportFailed { phase, message } => {
                write!(f, "{phase} aborted: {message}")
            }
        }
    }
}

// ── Policy ───────────────────────────────────────────────────────────────────

/// Optional check that the number has left the fax service before provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseCheck {
    /// Rely on the fixed cooldown alone.
    #[default]
    None,
    /// After the cooldown, poll the extension search until no DID is bound to
    /// the old service, at most `attempts` times.
    Poll { interval: Duration, attempts: u32 },
}

/// Timing policy for the gap between deprovision and provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationPolicy {
    pub cooldown: Duration,
    pub release_check: ReleaseCheck,
}

impl Default for MigrationPolicy {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
            release_check: ReleaseCheck::None,
        }
    }
}

// ── Reports ──────────────────────────────────────────────────────────────────

/// Outcome of migrating one candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub service_id: ServiceId,
    pub did: Did,
    /// Every state entered, in order, ending with `outcome`.
    pub trail: Vec<MigrationState>,
    pub outcome: MigrationState,
    /// Non-blocking validation warnings, in the order received.
    pub warnings: Vec<String>,
}

impl MigrationReport {
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.outcome == MigrationState::Done
    }
}

/// One record's result within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEntry {
    Finished(MigrationReport),
    /// A transport error before the fax service was removed stopped this
    /// record only.
    Errored { service_id: ServiceId, message: String },
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub done: usize,
    pub rejected: usize,
    pub commit_failed: usize,
    pub errored: usize,
    /// Records whose fax service is gone but whose voice service never landed.
    pub stranded: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry {
                BatchEntry::Finished(report) => {
                    match report.outcome {
                        MigrationState::Done => summary.done += 1,
                        MigrationState::ValidationRejected { .. } => summary.rejected += 1,
                        MigrationState::CommitFailed { .. } => summary.commit_failed += 1,
                        MigrationState::TransportFailed { .. } => summary.errored += 1,
                        _ => {}
                    }
                    if !report.is_done() && report.outcome.fax_deprovisioned() {
                        summary.stranded += 1;
                    }
                }
                BatchEntry::Errored { .. } => summary.errored += 1,
            }
        }
        summary
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.done + self.rejected + self.commit_failed + self.errored
    }
}
