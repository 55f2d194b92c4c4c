//! Notion REST API client.
//!
//! Two calls are needed: query a database for pages on a given date, and
//! patch a page's checkbox once it has been announced.
//! Requires: an integration token with access to the database.

use async_trait::async_trait;
use chrono::NaiveDate;
use daybell_core::config::{AppConfig, PropertyNames};
use daybell_core::error::{DaybellError, Result};
use daybell_core::page::Page;
use daybell_core::traits::EventSource;
use serde::Deserialize;
use serde_json::{Value, json};

/// Response body of `POST /databases/{id}/query`.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Page>,
}

/// Notion database client.
pub struct NotionClient {
    api_key: String,
    database_id: String,
    /// Base URL for the API (e.g., "https://api.notion.com/v1").
    base_url: String,
    notion_version: String,
    properties: PropertyNames,
    client: reqwest::Client,
}

impl NotionClient {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("Daybell/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DaybellError::Http(format!("Client error: {e}")))?;

        Ok(Self {
            api_key: config.notion_api_key.clone(),
            database_id: config.database_id.clone(),
            base_url: config.notion_api_base.trim_end_matches('/').to_string(),
            notion_version: config.notion_version.clone(),
            properties: config.properties.clone(),
            client,
        })
    }

    /// Attach auth and version headers shared by every request.
    fn apply_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", &self.notion_version)
            .header("Content-Type", "application/json")
    }

    fn query_body(&self, date: NaiveDate) -> Value {
        json!({
            "filter": {
                "property": self.properties.date,
                "date": { "equals": date.format("%Y-%m-%d").to_string() }
            }
        })
    }

    fn mark_body(&self) -> Value {
        let mut properties = serde_json::Map::new();
        properties.insert(self.properties.notified.clone(), json!({ "checkbox": true }));
        json!({ "properties": properties })
    }

    /// Turn a non-success response into an error carrying the status and body.
    async fn check(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(DaybellError::Notion(format!("{what} failed {status}: {body}")))
    }
}

#[async_trait]
impl EventSource for NotionClient {
    async fn pages_on(&self, date: NaiveDate) -> Result<Vec<Page>> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        tracing::debug!("🔎 Querying {} for {}", self.database_id, date);

        let response = self
            .apply_headers(self.client.post(&url))
            .json(&self.query_body(date))
            .send()
            .await
            .map_err(|e| DaybellError::Notion(format!("Query request failed: {e}")))?;
        let response = Self::check(response, "Query").await?;

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| DaybellError::Notion(format!("Invalid query response: {e}")))?;

        tracing::info!("📅 {} page(s) dated {}", body.results.len(), date);
        Ok(body.results)
    }

    async fn mark_notified(&self, page_id: &str) -> Result<()> {
        let url = format!("{}/pages/{}", self.base_url, page_id);

        let response = self
            .apply_headers(self.client.patch(&url))
            .json(&self.mark_body())
            .send()
            .await
            .map_err(|e| DaybellError::Notion(format!("Update request failed: {e}")))?;
        Self::check(response, "Update").await?;

        tracing::debug!("☑️ Marked page {} as notified", page_id);
        Ok(())
    }
}
