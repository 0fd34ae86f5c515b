//! JSON wire shapes of the provider API and their mapping to domain types.
//!
//! Nothing outside `crate::infra` sees these structs.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiError, DeprovisionRequest, FaxService, Ownership, ProvisionRequest, ServiceId,
    ServicePage, ServiceStatus, ValidationReport,
};

// ── Shared ───────────────────────────────────────────────────────────────────

/// Provider ids arrive as JSON numbers or strings depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }

    fn as_service_id(&self) -> Option<ServiceId> {
        match self {
            Self::Number(n) => Some(ServiceId(*n)),
            Self::Text(s) => s.trim().parse().ok().map(ServiceId),
        }
    }
}

/// `{ "id": .. }` sub-object.
#[derive(Debug, Clone, Deserialize)]
pub struct IdRef {
    #[serde(default)]
    pub id: Option<RawId>,
}

impl IdRef {
    fn into_text(self) -> Option<String> {
        self.id.map(RawId::into_text)
    }
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
}

// ── Services ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDto {
    pub id: RawId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user: Option<IdRef>,
    #[serde(default)]
    pub department: Option<IdRef>,
    #[serde(default)]
    pub location: Option<IdRef>,
}

impl ServiceDto {
    /// # Errors
    ///
    /// Returns [`ApiError::Malformed`] if the service id is not an integer.
    pub fn into_domain(self) -> Result<FaxService, ApiError> {
        let id = self.id.as_service_id().ok_or_else(|| ApiError::Malformed {
            context: format!("service id {:?}", self.id),
        })?;
        Ok(FaxService {
            id,
            status: self
                .status
                .as_deref()
                .map_or(ServiceStatus::Active, ServiceStatus::parse),
            owner: Ownership::from_user_id(self.user.and_then(IdRef::into_text)),
            department_id: self.department.and_then(IdRef::into_text),
            location_id: self.location.and_then(IdRef::into_text),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct ServiceListResponse {
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub data: Vec<ServiceDto>,
}

impl ServiceListResponse {
    /// # Errors
    ///
    /// Returns [`ApiError::Malformed`] if any service id is unusable.
    pub fn into_domain(self) -> Result<ServicePage, ApiError> {
        let services = self
            .data
            .into_iter()
            .map(ServiceDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        let total = self
            .pagination
            .map_or_else(|| u64::try_from(services.len()).unwrap_or(u64::MAX), |p| p.total);
        Ok(ServicePage { total, services })
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceSearchResponse {
    #[serde(default)]
    pub data: Vec<ServiceDto>,
}

#[derive(Debug, Serialize)]
pub struct ServiceSearchBody<'a> {
    pub filter: ServiceFilter<'a>,
}

#[derive(Debug, Serialize)]
pub struct ServiceFilter<'a> {
    pub ids: Vec<u64>,
    pub types: Vec<&'a str>,
    pub organization: &'a str,
}

impl<'a> ServiceSearchBody<'a> {
    #[must_use]
    pub fn fax(organization: &'a str, service_id: ServiceId) -> Self {
        Self {
            filter: ServiceFilter {
                ids: vec![service_id.0],
                types: vec!["FAX"],
                organization,
            },
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub data: UserData,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    #[serde(rename = "userName", default)]
    pub user_name: Option<String>,
}

// ── Extensions ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExtensionSearchBody {
    pub filter: ExtensionFilter,
}

#[derive(Debug, Serialize)]
pub struct ExtensionFilter {
    pub services: Vec<u64>,
}

impl ExtensionSearchBody {
    #[must_use]
    pub fn for_service(service_id: ServiceId) -> Self {
        Self {
            filter: ExtensionFilter {
                services: vec![service_id.0],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtensionSearchResponse {
    #[serde(default)]
    pub data: Vec<ExtensionDto>,
}

#[derive(Debug, Deserialize)]
pub struct ExtensionDto {
    #[serde(default)]
    pub did: Option<String>,
}

impl ExtensionSearchResponse {
    /// One DID per extension, in provider order. An extension without a DID
    /// keeps its position as an empty string.
    #[must_use]
    pub fn into_dids(self) -> Vec<String> {
        self.data
            .into_iter()
            .map(|e| e.did.unwrap_or_default())
            .collect()
    }
}

// ── Deprovision / provision ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeprovisionBody<'a> {
    pub organization: &'a str,
    #[serde(rename = "serviceId")]
    pub service_id: u64,
    pub reason: &'a str,
}

impl<'a> From<&'a DeprovisionRequest> for DeprovisionBody<'a> {
    fn from(req: &'a DeprovisionRequest) -> Self {
        Self {
            organization: &req.organization,
            service_id: req.service_id.0,
            reason: req.reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IdBody<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProvisionBody<'a> {
    pub organization: &'a str,
    pub sku: &'a str,
    pub did: &'a str,
    pub location: IdBody<'a>,
    pub department: IdBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<IdBody<'a>>,
}

impl<'a> From<&'a ProvisionRequest> for ProvisionBody<'a> {
    fn from(req: &'a ProvisionRequest) -> Self {
        Self {
            organization: &req.organization,
            sku: req.sku,
            did: req.did.as_str(),
            location: IdBody {
                id: &req.location_id,
            },
            department: IdBody {
                id: &req.department_id,
            },
            user: req.user_id.as_deref().map(|id| IdBody { id }),
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// A validation entry: a bare string or `{ "message": .. }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageDto {
    Text(String),
    Object {
        #[serde(default, alias = "msg")]
        message: Option<String>,
        #[serde(default)]
        code: Option<String>,
    },
}

impl MessageDto {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Object { message, code } => message
                .or(code)
                .unwrap_or_else(|| "unspecified".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ValidationBody {
    #[serde(default)]
    pub errors: Vec<MessageDto>,
    #[serde(default)]
    pub warnings: Vec<MessageDto>,
}

/// Validation answers carry their lists at the top level or under `data`.
#[derive(Debug, Default, Deserialize)]
pub struct ValidationResponse {
    #[serde(default)]
    pub data: Option<ValidationBody>,
    #[serde(flatten)]
    pub top: ValidationBody,
}

impl ValidationResponse {
    #[must_use]
    pub fn into_domain(self) -> ValidationReport {
        let mut body = self.top;
        if let Some(nested) = self.data {
            body.errors.extend(nested.errors);
            body.warnings.extend(nested.warnings);
        }
        ValidationReport {
            errors: body.errors.into_iter().map(MessageDto::into_text).collect(),
            warnings: body
                .warnings
                .into_iter()
                .map(MessageDto::into_text)
                .collect(),
        }
    }
}
