//! Thin typed client for the Notion pages/databases API.
//!
//! The service's contract with Notion is "send a structured request object,
//! receive a structured response object or a typed error"; everything else
//! (retries, caching, consistency) is out of scope.

pub mod types;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use types::{
    CreatePageRequest, Page, Property, PropertyFilter, QueryDatabaseRequest,
    QueryDatabaseResponse, UpdatePageRequest,
};

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Error classification codes used by the Notion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotionErrorCode {
    ObjectNotFound,
    Unauthorized,
    ValidationError,
    InvalidRequest,
    InvalidJson,
    RateLimited,
    InternalServerError,
    ServiceUnavailable,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    #[error("notion api error ({code:?}): {message}")]
    Api {
        code: NotionErrorCode,
        message: String,
    },

    #[error("notion request timed out")]
    Timeout,

    #[error("notion transport error: {0}")]
    Transport(reqwest::Error),

    #[error("failed to decode notion response: {0}")]
    Decode(reqwest::Error),
}

impl NotionError {
    fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(error)
        }
    }

    pub fn code(&self) -> Option<NotionErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Error body the API returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: NotionErrorCode,
    #[serde(default)]
    message: String,
}

/// Stateless HTTP client shared read-only across requests.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Client against an alternate endpoint, used by the wiremock tests.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client construction cannot fail with static options");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub async fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        self.send(self.http.get(url)).await
    }

    pub async fn create_page(&self, request: &CreatePageRequest) -> Result<Page, NotionError> {
        let url = format!("{}/pages", self.base_url);
        self.send(self.http.post(url).json(request)).await
    }

    pub async fn update_page(
        &self,
        page_id: &str,
        request: &UpdatePageRequest,
    ) -> Result<Page, NotionError> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        self.send(self.http.patch(url).json(request)).await
    }

    pub async fn query_database(
        &self,
        database_id: &str,
        filter: Option<PropertyFilter>,
    ) -> Result<Vec<Page>, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);
        let body = QueryDatabaseRequest { filter };
        let response: QueryDatabaseResponse = self.send(self.http.post(url).json(&body)).await?;
        Ok(response.results)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, NotionError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .map_err(NotionError::from_reqwest)?;

        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(NotionError::Decode);
        }

        debug!(%status, "notion api returned an error response");
        let body = response.json::<ApiErrorBody>().await.ok();
        let (code, message) = body
            .map(|b| (b.code, b.message))
            .unwrap_or((NotionErrorCode::Unknown, String::new()));

        Err(NotionError::Api { code, message })
    }
}
