/// Notion database client
///
/// API Flow:
/// 1. Schema: GET /v1/databases/{id} → property definitions with their select options
/// 2. Query: POST /v1/databases/{id}/query → matching pages (first page only)
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{DatabaseSchema, QueryResponse},
    services::{catalog::CatalogClient, query::QueryBody},
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client as HttpClient,
};

const NOTION_VERSION_HEADER: &str = "Notion-Version";

#[derive(Clone)]
pub struct NotionClient {
    http_client: HttpClient,
    headers: HeaderMap,
    api_url: String,
    database_id: String,
}

impl NotionClient {
    /// Fails if the key or version cannot be sent as an HTTP header value
    pub fn new(
        api_key: String,
        api_url: String,
        database_id: String,
        notion_version: String,
    ) -> AppResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(),
            headers: build_headers(&api_key, &notion_version)?,
            api_url: api_url.trim_end_matches('/').to_string(),
            database_id,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.notion_api_key.clone(),
            config.notion_api_url.clone(),
            config.notion_database_id.clone(),
            config.notion_version.clone(),
        )
    }

    fn database_url(&self) -> String {
        format!("{}/v1/databases/{}", self.api_url, self.database_id)
    }

    /// Headers sent on every call
    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }
}

fn build_headers(api_key: &str, notion_version: &str) -> AppResult<HeaderMap> {
    let authorization = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
        AppError::InvalidInput("NOTION_API_KEY is not a valid HTTP header value".to_string())
    })?;
    let version = HeaderValue::from_str(notion_version).map_err(|_| {
        AppError::InvalidInput("NOTION_VERSION is not a valid HTTP header value".to_string())
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(NOTION_VERSION_HEADER, version);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn transport_status(e: &reqwest::Error) -> Option<u16> {
    e.status().map(|s| s.as_u16())
}

#[async_trait::async_trait]
impl CatalogClient for NotionClient {
    async fn fetch_schema(&self) -> AppResult<DatabaseSchema> {
        let schema_error = |status: Option<u16>, message: String| AppError::RemoteSchema {
            status,
            message,
        };

        let response = self
            .http_client
            .get(self.database_url())
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| schema_error(transport_status(&e), e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status, provider = "notion", "Schema fetch rejected");
            return Err(schema_error(Some(status), text));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| schema_error(transport_status(&e), e.to_string()))?;

        let schema: DatabaseSchema = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Notion database schema");
            schema_error(None, format!("Failed to parse Notion response: {}", e))
        })?;

        tracing::info!(
            properties = schema.properties.len(),
            provider = "notion",
            "Database schema fetched"
        );

        Ok(schema)
    }

    async fn query(&self, body: QueryBody) -> AppResult<Vec<serde_json::Value>> {
        let query_error = |status: Option<u16>, message: String| AppError::RemoteQuery {
            status,
            message,
        };

        let url = format!("{}/query", self.database_url());

        let response = self
            .http_client
            .post(&url)
            .headers(self.headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| query_error(transport_status(&e), e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status, provider = "notion", "Database query rejected");
            return Err(query_error(Some(status), text));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| query_error(transport_status(&e), e.to_string()))?;
        tracing::debug!(response = %response_text, "Raw Notion query response");

        let parsed: QueryResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Notion query response");
            query_error(None, format!("Failed to parse Notion response: {}", e))
        })?;

        if parsed.has_more {
            tracing::debug!("Query has further pages; only the first page is used");
        }

        tracing::info!(
            results = parsed.results.len(),
            filtered = body.filter.is_some(),
            provider = "notion",
            "Database query completed"
        );

        Ok(parsed.results)
    }

    fn name(&self) -> &'static str {
        "notion"
    }
}
