//! HTTP client for the large-shareholding disclosure API.

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{IssuerSearchQuery, PageQuery, Query},
    types::{
        Filer, FilerID, Issuer, IssuerHistoryResponse, IssuerID, IssuerOwnershipResponse,
        PaginatedResponse,
    },
    Error,
};

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Typed client for the disclosure API. One method per endpoint.
///
/// Cloning is cheap; clones share the underlying connection pool. No request
/// timeout is applied and nothing is retried: a failed request surfaces as an
/// [`Error`] to the caller.
#[derive(Clone)]
pub struct Client {
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a client pointing at [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e)
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query + Sync,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                "Request failed with status {}: {}",
                status,
                truncate_body(&body)
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!("API request failed: {} - {}", status, body),
            });
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e)
        })?;

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode(e)
        })?;

        Ok(parsed)
    }

    /// Fetches one page of filers. `GET /api/filers`
    pub async fn get_filers(&self, query: &PageQuery) -> Result<PaginatedResponse<Filer>, Error> {
        self.get("/api/filers", Some(query)).await
    }

    /// Fetches a single filer by its numeric ID. `GET /api/filers/{id}`
    pub async fn get_filer(&self, filer_id: FilerID) -> Result<Filer, Error> {
        self.get::<Filer, PageQuery>(format!("/api/filers/{}", filer_id).as_str(), None)
            .await
    }

    /// Fetches one page of the issuers a filer has reported holdings in.
    pub async fn get_issuers_by_filer(
        &self,
        filer_id: FilerID,
        query: &PageQuery,
    ) -> Result<PaginatedResponse<Issuer>, Error> {
        self.get(
            format!("/api/filers/{}/issuers", filer_id).as_str(),
            Some(query),
        )
        .await
    }

    /// Searches issuers by name or code. `GET /api/issuers`
    ///
    /// Unlike the list endpoints this returns a bare array.
    pub async fn search_issuers(&self, query: &IssuerSearchQuery) -> Result<Vec<Issuer>, Error> {
        self.get("/api/issuers", Some(query)).await
    }

    /// Fetches every filer currently holding the given issuer.
    pub async fn get_issuer_ownerships(
        &self,
        issuer_id: IssuerID,
    ) -> Result<IssuerOwnershipResponse, Error> {
        self.get::<IssuerOwnershipResponse, PageQuery>(
            format!("/api/issuers/{}/ownerships", issuer_id).as_str(),
            None,
        )
        .await
    }

    /// Fetches the filing history of one issuer as reported by one filer.
    pub async fn get_issuer_history(
        &self,
        filer_id: FilerID,
        issuer_id: IssuerID,
    ) -> Result<IssuerHistoryResponse, Error> {
        self.get::<IssuerHistoryResponse, PageQuery>(
            format!("/api/filers/{}/issuers/{}/history", filer_id, issuer_id).as_str(),
            None,
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
