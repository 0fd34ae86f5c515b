//! Provider-side view of a fax service, before enrichment.

use crate::domain::candidate::{Ownership, ServiceId};

/// Lifecycle status reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Active,
    Suspended,
    Other(String),
}

impl ServiceStatus {
    /// Parse a provider status string. Matching is case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Self::Active,
            "SUSPENDED" => Self::Suspended,
            _ => Self::Other(raw.to_string()),
        }
    }
}

/// One service as returned by a listing or search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaxService {
    pub id: ServiceId,
    pub status: ServiceStatus,
    pub owner: Ownership,
    pub department_id: Option<String>,
    pub location_id: Option<String>,
}

/// One page of the active-fax listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePage {
    /// Pagination total; may exceed `services.len()` when the page cap bites.
    pub total: u64,
    pub services: Vec<FaxService>,
}
