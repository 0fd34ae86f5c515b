//! Candidate records: the unit of work for inventory and migration.
//!
//! Pure types only; no I/O, no async.

use std::fmt;

use crate::domain::error::ResolveError;

/// Rendered in place of a username when the service has no owner or the
/// directory lookup failed.
pub const NO_USERNAME: &str = "No username";

/// Rendered in place of a user id when the service has no owner.
pub const NO_USER_ID: &str = "No user id";

// ── Identifiers ──────────────────────────────────────────────────────────────

/// Provider identifier of a telephony service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceId(pub u64);

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ServiceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A phone number bound to a service. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did(String);

impl Did {
    /// Wrap a provider-supplied number for `service_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EmptyDid`] if `raw` is empty or whitespace.
    pub fn new(service_id: ServiceId, raw: &str) -> Result<Self, ResolveError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::EmptyDid(service_id));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Ownership ────────────────────────────────────────────────────────────────

/// Who a service is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership {
    Owned { user_id: String },
    Unowned,
}

impl Ownership {
    /// Build from an optional provider user id. Blank ids count as unowned.
    #[must_use]
    pub fn from_user_id(user_id: Option<String>) -> Self {
        match user_id {
            Some(id) if !id.trim().is_empty() => Self::Owned { user_id: id },
            _ => Self::Unowned,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Owned { user_id } => Some(user_id),
            Self::Unowned => None,
        }
    }
}

// ── Candidate record ─────────────────────────────────────────────────────────

/// One fax service eligible for inspection or migration.
///
/// Fields are private so a record can only be built whole through
/// [`CandidateRecord::new`]; the migration engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    username: Option<String>,
    owner: Ownership,
    service_department_id: String,
    location_id: String,
    fax_service_id: ServiceId,
    fax_did: Did,
}

impl CandidateRecord {
    #[must_use]
    pub fn new(
        username: Option<String>,
        owner: Ownership,
        service_department_id: String,
        location_id: String,
        fax_service_id: ServiceId,
        fax_did: Did,
    ) -> Self {
        // A username without an owner is meaningless.
        let username = match owner {
            Ownership::Owned { .. } => username,
            Ownership::Unowned => None,
        };
        Self {
            username,
            owner,
            service_department_id,
            location_id,
            fax_service_id,
            fax_did,
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn owner(&self) -> &Ownership {
        &self.owner
    }

    #[must_use]
    pub fn service_department_id(&self) -> &str {
        &self.service_department_id
    }

    #[must_use]
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    #[must_use]
    pub fn fax_service_id(&self) -> ServiceId {
        self.fax_service_id
    }

    #[must_use]
    pub fn fax_did(&self) -> &Did {
        &self.fax_did
    }

    /// Username for display, falling back to [`NO_USERNAME`].
    #[must_use]
    pub fn display_username(&self) -> &str {
        self.username().unwrap_or(NO_USERNAME)
    }

    /// User id for display, falling back to [`NO_USER_ID`].
    #[must_use]
    pub fn display_user_id(&self) -> &str {
        self.owner.user_id().unwrap_or(NO_USER_ID)
    }
}

// ── Aggregation results ──────────────────────────────────────────────────────

/// A listed service that could not become a [`CandidateRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedService {
    pub service_id: ServiceId,
    pub reason: String,
}

/// Result of one organization-wide listing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Total active services reported by the provider's pagination metadata.
    pub total_active: u64,
    /// Records in provider order.
    pub candidates: Vec<CandidateRecord>,
    pub skipped: Vec<SkippedService>,
}

/// Result of a single-id search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    NotFound,
    Suspended,
    Found(CandidateRecord),
}

impl Lookup {
    #[must_use]
    pub fn into_candidate(self) -> Option<CandidateRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound | Self::Suspended => None,
        }
    }
}
