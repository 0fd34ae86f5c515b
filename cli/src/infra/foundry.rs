//! Provider API client: implements the provider port traits over HTTPS.

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{
    ExtensionSearch, ServiceCatalog, ServiceProvisioning, UserDirectory,
};
use crate::domain::{
    ApiError, DeprovisionRequest, FaxService, ProvisionRequest, ServiceId, ServicePage,
    ValidationReport, WardenConfig,
};
use crate::infra::wire::{
    DeprovisionBody, ErrorBody, ExtensionSearchBody, ExtensionSearchResponse, ProvisionBody,
    ServiceDto, ServiceListResponse, ServiceSearchBody, ServiceSearchResponse, UserResponse,
    ValidationResponse,
};

/// Longest slice of a raw error body carried into an error message.
const ERROR_BODY_PREVIEW: usize = 200;

/// Bearer-authenticated JSON client for the provider's operations API.
pub struct FoundryClient {
    http: Client,
    base_url: String,
    token: String,
}

impl FoundryClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &WardenConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .timeout(config.http_timeout())
            .default_headers(headers)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: config.bearer_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        tracing::debug!(path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        tracing::debug!(path, status = response.status().as_u16(), "response");
        Ok(response)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        tracing::debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        tracing::debug!(path, status = response.status().as_u16(), "response");
        Ok(response)
    }

    async fn read(response: Response, path: &str) -> Result<(StatusCode, String)> {
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response from {path}"))?;
        Ok((status, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
        let (status, body) = Self::read(response, path).await?;
        Ok(decode_body(status, &body, path)?)
    }

    async fn validate<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ValidationReport> {
        let response = self.post(path, body).await?;
        let (status, text) = Self::read(response, path).await?;
        Ok(validation_outcome(status, &text, path)?)
    }

    async fn commit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<u16> {
        let response = self.post(path, body).await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), message = %error_message(status, &text), "commit rejected");
        }
        Ok(status.as_u16())
    }
}

impl UserDirectory for FoundryClient {
    async fn lookup_username(&self, user_id: &str) -> Result<Option<String>> {
        let path = format!("users/{user_id}");
        let response = self.get(&path, &[]).await?;
        let (status, body) = Self::read(response, &path).await?;
        Ok(username_from(status, &body, user_id))
    }
}

impl ExtensionSearch for FoundryClient {
    async fn search_dids(&self, service_id: ServiceId) -> Result<Vec<String>> {
        let path = "extensions/search";
        let response = self
            .post(path, &ExtensionSearchBody::for_service(service_id))
            .await?;
        let body: ExtensionSearchResponse = Self::decode(response, path).await?;
        Ok(body.into_dids())
    }
}

impl ServiceCatalog for FoundryClient {
    async fn list_active_fax(&self, organization: &str, limit: u32) -> Result<ServicePage> {
        let path = "services";
        let limit = limit.to_string();
        let response = self
            .get(
                path,
                &[
                    ("limit", limit.as_str()),
                    ("organization", organization),
                    ("type", "fax"),
                    ("active", "true"),
                ],
            )
            .await?;
        let body: ServiceListResponse = Self::decode(response, path).await?;
        Ok(body.into_domain()?)
    }

    async fn search_fax(
        &self,
        organization: &str,
        service_id: ServiceId,
    ) -> Result<Vec<FaxService>> {
        let path = "services/search";
        let response = self
            .post(path, &ServiceSearchBody::fax(organization, service_id))
            .await?;
        let body: ServiceSearchResponse = Self::decode(response, path).await?;
        Ok(body
            .data
            .into_iter()
            .map(ServiceDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

impl ServiceProvisioning for FoundryClient {
    async fn validate_deprovision(&self, request: &DeprovisionRequest) -> Result<ValidationReport> {
        self.validate("services/deprovision/validate", &DeprovisionBody::from(request))
            .await
    }

    async fn deprovision(&self, request: &DeprovisionRequest) -> Result<u16> {
        self.commit("services/deprovision", &DeprovisionBody::from(request))
            .await
    }

    async fn validate_provision(&self, request: &ProvisionRequest) -> Result<ValidationReport> {
        self.validate("services/provision/validate", &ProvisionBody::from(request))
            .await
    }

    async fn provision(&self, request: &ProvisionRequest) -> Result<u16> {
        self.commit("services/provision", &ProvisionBody::from(request))
            .await
    }
}

/// Decode a success body, or turn a non-success status into
/// [`ApiError::Status`] carrying the provider's message.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str, path: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(status, body),
        });
    }
    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(path, error = %e, "undecodable body");
        ApiError::Malformed {
            context: path.to_string(),
        }
    })
}

/// Classify a validation answer.
///
/// A non-success status whose body still lists errors is that report; any
/// other non-success status is a rejection carrying the provider message. A
/// success status must carry a decodable report.
fn validation_outcome(status: StatusCode, body: &str, path: &str) -> Result<ValidationReport, ApiError> {
    let parsed = serde_json::from_str::<ValidationResponse>(body)
        .ok()
        .map(ValidationResponse::into_domain);

    match parsed {
        Some(report) if status.is_success() || !report.errors.is_empty() => Ok(report),
        _ if !status.is_success() => Ok(ValidationReport::rejected(error_message(status, body))),
        _ => Err(ApiError::Malformed {
            context: path.to_string(),
        }),
    }
}

/// Username from a user lookup answer; `None` unless the status is 200 and
/// the body names the user.
fn username_from(status: StatusCode, body: &str, user_id: &str) -> Option<String> {
    if status != StatusCode::OK {
        tracing::debug!(user_id, status = status.as_u16(), "user lookup unsuccessful");
        return None;
    }
    match serde_json::from_str::<UserResponse>(body) {
        Ok(user) => user.data.user_name,
        Err(e) => {
            tracing::warn!(user_id, error = %e, "malformed user lookup body");
            None
        }
    }
}

/// Best human-readable message for a non-success response.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody { msg: Some(msg) }) = serde_json::from_str::<ErrorBody>(body) {
        return msg;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string();
    }
    trimmed.chars().take(ERROR_BODY_PREVIEW).collect()
}
