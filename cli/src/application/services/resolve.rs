//! Application service: user and extension resolution.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{ExtensionSearch, UserDirectory};
use crate::domain::{Did, ResolveError, ServiceId};

/// Resolve a user id to a display name.
///
/// Never fails: an unsuccessful or unreadable lookup yields `None` so one bad
/// directory entry cannot stop an aggregation pass.
pub async fn resolve_username(directory: &impl UserDirectory, user_id: &str) -> Option<String> {
    match directory.lookup_username(user_id).await {
        Ok(name) => {
            if name.is_none() {
                tracing::warn!(user_id, "user lookup returned no username");
            }
            name
        }
        Err(e) => {
            tracing::warn!(user_id, error = %e, "user lookup failed");
            None
        }
    }
}

/// Resolve the DID bound to `service_id`. The first match wins.
///
/// # Errors
///
/// Returns [`ResolveError::DidNotFound`] when the search has no matches,
/// [`ResolveError::EmptyDid`] when the first match is blank, or the
/// underlying transport error.
pub async fn resolve_did(extensions: &impl ExtensionSearch, service_id: ServiceId) -> Result<Did> {
    let dids = extensions
        .search_dids(service_id)
        .await
        .with_context(|| format!("searching extensions for service {service_id}"))?;
    let first = dids.first().ok_or(ResolveError::DidNotFound(service_id))?;
    Ok(Did::new(service_id, first)?)
}
