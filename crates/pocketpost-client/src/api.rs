//! Thin reqwest wrapper over the four entry access functions.

use pocketpost_models::Entry;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ClientError, Result};

pub struct EntryApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl EntryApi {
    /// One reqwest client per service, constructed up front and reused for
    /// every round-trip.
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// GET /entries — the full unfiltered scan every listing filters over.
    pub async fn list(&self) -> Result<Vec<Entry>> {
        let response = self.request(Method::GET, None).send().await?;
        let entries: Vec<Entry> = Self::check(response).await?.json().await?;
        debug!(count = entries.len(), "fetched entry scan");
        Ok(entries)
    }

    pub async fn get(&self, id: &str) -> Result<Entry> {
        self.get_optional(id)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("Entry {}", id)))
    }

    pub async fn get_optional(&self, id: &str) -> Result<Option<Entry>> {
        let response = self.request(Method::GET, Some(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(response).await?.json().await?))
    }

    /// POST /entries — returns the assigned id.
    pub async fn create(&self, record: Map<String, Value>) -> Result<String> {
        let response = self
            .request(Method::POST, None)
            .json(&Value::Object(record))
            .send()
            .await?;
        let body: Value = Self::check(response).await?.json().await?;
        body.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::Api {
                status: 201,
                message: "create response carried no id".to_string(),
            })
    }

    /// PUT /entries?id= — all named fields commit atomically; the echo of
    /// what was applied comes back.
    pub async fn update_fields(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        let response = self
            .request(Method::PUT, Some(id))
            .json(&Value::Object(fields))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("Entry {}", id)));
        }
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self.request(Method::DELETE, Some(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("Entry {}", id)));
        }
        Self::check(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, id: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}/entries", self.base_url));
        if let Some(id) = id {
            builder = builder.query(&[("id", id)]);
        }
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", token);
        }
        builder
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let raw = response.text().await.unwrap_or_default();
        // Error bodies are JSON-encoded strings; fall back to the raw text.
        let message = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
