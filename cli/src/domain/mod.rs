//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `reqwest`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod candidate;
pub mod config;
pub mod error;
pub mod migration;
pub mod service;

pub use candidate::{
    CandidateRecord, Did, Inventory, Lookup, NO_USER_ID, NO_USERNAME, Ownership, ServiceId,
    SkippedService,
};
pub use config::WardenConfig;
pub use error::{ApiError, ConfigError, ResolveError};
pub use migration::{
    BatchEntry, BatchSummary, DeprovisionRequest, MigrationPolicy, MigrationReport,
    MigrationState, Phase, ProvisionRequest, ReleaseCheck, ValidationReport, ValidationVerdict,
};
pub use service::{FaxService, ServicePage, ServiceStatus};
