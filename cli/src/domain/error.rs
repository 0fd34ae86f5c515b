//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio` or `reqwest`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use thiserror::Error;

use crate::domain::candidate::ServiceId;

// ── Provider API errors ───────────────────────────────────────────────────────

/// Failures of listing and search calls against the provider.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response from {context}")]
    Malformed { context: String },
}

// ── Resolution errors ─────────────────────────────────────────────────────────

/// Failures turning a provider service into a complete candidate record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no DID found for service {0}")]
    DidNotFound(ServiceId),

    #[error("provider returned an empty DID for service {0}")]
    EmptyDid(ServiceId),

    #[error("service {service_id} has no {field}")]
    MissingField {
        service_id: ServiceId,
        field: &'static str,
    },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors loading runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WARDEN_BEARER_TOKEN is not set. Export a provider API token first.")]
    MissingToken,

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}
