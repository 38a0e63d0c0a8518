//! Google Knowledge Graph entity search client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use mystery_animal_domain::KnowledgeEntity;

use crate::infrastructure::config::{DEFAULT_KG_BASE_URL, DEFAULT_KG_TIMEOUT_SECS};
use crate::infrastructure::ports::{KnowledgePort, LookupError};

/// Client for the entity search endpoint. Only the top hit is requested.
#[derive(Clone)]
pub struct KnowledgeGraphClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl KnowledgeGraphClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, api_key: &str) -> Result<Option<KnowledgeEntity>, LookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("query", query),
                ("limit", "1"),
                ("indent", "true"),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| LookupError::RequestFailed(e.to_string()))?;
            return Err(LookupError::RequestFailed(error_text));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        Ok(top_entity(body))
    }
}

impl Default for KnowledgeGraphClient {
    fn default() -> Self {
        Self::new(
            DEFAULT_KG_BASE_URL,
            None,
            Duration::from_secs(DEFAULT_KG_TIMEOUT_SECS),
        )
    }
}

#[async_trait]
impl KnowledgePort for KnowledgeGraphClient {
    async fn lookup(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<Option<KnowledgeEntity>, LookupError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(LookupError::Unavailable);
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LookupError::Cancelled),
            result = self.search(query, api_key) => result,
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "itemListElement", default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "@type", default)]
    types: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

fn top_entity(body: SearchResponse) -> Option<KnowledgeEntity> {
    body.items.into_iter().next().map(|item| KnowledgeEntity {
        types: item.result.types,
        description: item.result.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Option<KnowledgeEntity> {
        top_entity(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn takes_types_and_description_of_the_first_hit() {
        let entity = parse(json!({
            "itemListElement": [
                { "result": { "@type": ["Thing", "Person"], "name": "Taylor Swift", "description": "American singer-songwriter" }, "resultScore": 900.0 },
                { "result": { "@type": ["Thing"], "description": "ignored" } }
            ]
        }))
        .unwrap();

        assert_eq!(entity.types, vec!["Thing".to_string(), "Person".to_string()]);
        assert_eq!(entity.description.as_deref(), Some("American singer-songwriter"));
    }

    #[test]
    fn no_hits_is_no_entity() {
        assert!(parse(json!({ "itemListElement": [] })).is_none());
        assert!(parse(json!({})).is_none());
    }

    #[test]
    fn missing_description_is_kept_as_none() {
        let entity = parse(json!({ "itemListElement": [{ "result": { "@type": ["Place"] } }] })).unwrap();
        assert!(entity.description.is_none());
    }

    #[tokio::test]
    async fn without_a_key_lookups_are_unavailable() {
        let client = KnowledgeGraphClient::default();
        assert!(!client.is_enabled());

        let result = client.lookup("taylor swift", CancellationToken::new()).await;
        assert_eq!(result, Err(LookupError::Unavailable));
    }

    #[tokio::test]
    async fn a_cancelled_token_stops_the_lookup() {
        let client = KnowledgeGraphClient::new(
            "http://127.0.0.1:9/search",
            Some("key".to_string()),
            Duration::from_secs(30),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client.lookup("taylor swift", cancel).await;
        assert_eq!(result, Err(LookupError::Cancelled));
    }
}
