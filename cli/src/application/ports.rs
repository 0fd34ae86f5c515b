//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::time::Duration;

use anyhow::Result;

use crate::domain::{
    DeprovisionRequest, FaxService, ProvisionRequest, ServiceId, ServicePage, ValidationReport,
    WardenConfig,
};

// ── Provider Port Traits ──────────────────────────────────────────────────────

/// User directory lookups.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    /// Resolve a user id to its display name.
    ///
    /// Returns `Ok(None)` when the provider answers with anything but success
    /// or the body carries no usable name.
    async fn lookup_username(&self, user_id: &str) -> Result<Option<String>>;
}

/// Extension (phone number) search.
#[allow(async_fn_in_trait)]
pub trait ExtensionSearch {
    /// Every DID currently bound to `service_id`, in provider order.
    async fn search_dids(&self, service_id: ServiceId) -> Result<Vec<String>>;
}

/// Read-only access to the organization's services.
#[allow(async_fn_in_trait)]
pub trait ServiceCatalog {
    /// List active fax services, at most `limit` of them.
    async fn list_active_fax(&self, organization: &str, limit: u32) -> Result<ServicePage>;
    /// Search fax services by id within the organization.
    async fn search_fax(&self, organization: &str, service_id: ServiceId)
    -> Result<Vec<FaxService>>;
}

/// Two-step (validate, then commit) service mutations.
///
/// Commits return the raw HTTP status; the domain decides what counts as
/// success.
#[allow(async_fn_in_trait)]
pub trait ServiceProvisioning {
    async fn validate_deprovision(&self, request: &DeprovisionRequest)
    -> Result<ValidationReport>;
    async fn deprovision(&self, request: &DeprovisionRequest) -> Result<u16>;
    async fn validate_provision(&self, request: &ProvisionRequest) -> Result<ValidationReport>;
    async fn provision(&self, request: &ProvisionRequest) -> Result<u16>;
}

/// Composite trait; any type implementing all four provider ports.
pub trait FoundryApi: UserDirectory + ExtensionSearch + ServiceCatalog + ServiceProvisioning {}

/// Blanket implementation: any type implementing all four sub-traits is a `FoundryApi`.
impl<T> FoundryApi for T where T: UserDirectory + ExtensionSearch + ServiceCatalog + ServiceProvisioning
{}

// ── Timing Port ───────────────────────────────────────────────────────────────

/// Suspends the current operation. Abstracted so tests observe waits
/// without sleeping.
#[allow(async_fn_in_trait)]
pub trait Pause {
    async fn pause(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Source of validated runtime configuration.
pub trait ConfigSource {
    /// # Errors
    ///
    /// Returns an error if required settings are missing or malformed.
    fn load(&self) -> Result<WardenConfig>;
}
