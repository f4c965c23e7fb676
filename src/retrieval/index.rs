//! Search collaborator client
//!
//! The knowledge base lives in a managed hybrid index: one query combines
//! a lexical/semantic text signal with a nearest-neighbor vector match,
//! optionally restricted by a boolean filter expression. The trait seam
//! lets tests substitute an in-memory index.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WayfarerError};
use crate::types::RetrievalHit;

/// Finite, non-restartable sequence of hits in collaborator order
pub type HitStream = BoxStream<'static, Result<RetrievalHit>>;

/// The vector side of a hybrid query
#[derive(Debug, Clone, Serialize)]
pub struct VectorQuery {
    pub text: String,
    #[serde(rename = "kNearestNeighbors")]
    pub k_nearest_neighbors: usize,
    pub fields: String,
}

/// A hybrid query against the index
#[derive(Debug, Clone, Serialize)]
pub struct QuerySpec {
    /// Lexical/semantic text signal; never empty
    pub search_text: String,
    pub vector_query: VectorQuery,
    /// Boolean filter expression, handed through verbatim
    pub filter: Option<String>,
    /// Maximum number of hits
    pub top: usize,
}

/// Read-only access to the hybrid search index
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run one hybrid query, yielding hits in relevance order
    async fn query(&self, spec: QuerySpec) -> Result<HitStream>;

    /// Fetch authoritative records for exact keys (grounding re-resolution).
    /// Callers must pass allow-list-validated keys only.
    async fn fetch_by_keys(&self, keys: &[String]) -> Result<Vec<RetrievalHit>>;
}

/// HTTP client for the managed search service
pub struct HttpSearchIndex {
    client: reqwest::Client,
    endpoint: String,
    index: String,
    api_key: String,
}

const API_VERSION: &str = "2024-07-01";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    value: Vec<HitDoc>,
}

#[derive(Debug, Deserialize)]
struct HitDoc {
    key: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

impl HttpSearchIndex {
    pub fn new(endpoint: String, index: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            index,
            api_key,
        }
    }

    async fn post_search(&self, body: serde_json::Value) -> Result<Vec<RetrievalHit>> {
        let url = format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint, self.index, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(WayfarerError::Search(format!(
                "Search API error {}: {}",
                status, text
            )));
        }

        let data: SearchResponse = response.json().await?;

        Ok(data
            .value
            .into_iter()
            .map(|doc| RetrievalHit {
                key: doc.key,
                title: doc.title,
                body: doc.body,
            })
            .collect())
    }
}

#[async_trait]
impl SearchIndex for HttpSearchIndex {
    async fn query(&self, spec: QuerySpec) -> Result<HitStream> {
        let mut body = serde_json::json!({
            "search": spec.search_text,
            "queryType": "semantic",
            "top": spec.top,
            "select": "key,title,body",
            "vectorQueries": [{
                "kind": "text",
                "text": spec.vector_query.text,
                "k": spec.vector_query.k_nearest_neighbors,
                "fields": spec.vector_query.fields,
            }],
        });
        if let Some(filter) = spec.filter {
            body["filter"] = serde_json::Value::String(filter);
        }

        let hits = self.post_search(body).await?;

        Ok(stream::iter(hits.into_iter().map(Ok)).boxed())
    }

    async fn fetch_by_keys(&self, keys: &[String]) -> Result<Vec<RetrievalHit>> {
        if keys.is_empty() {
            return Ok(vec![]);
        }

        // The key field is searchable with a keyword tokenizer rather than
        // filterable, so exact-match re-resolution goes through a full
        // query over the key field.
        let body = serde_json::json!({
            "search": keys.join(" OR "),
            "searchFields": "key",
            "queryType": "full",
            "top": keys.len(),
            "select": "key,title,body",
        });

        self.post_search(body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_spec_serialization() {
        let spec = QuerySpec {
            search_text: "praia".to_string(),
            vector_query: VectorQuery {
                text: "praia".to_string(),
                k_nearest_neighbors: 50,
                fields: "text_vector".to_string(),
            },
            filter: Some("(destination == 'MAD')".to_string()),
            top: 5,
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["vector_query"]["kNearestNeighbors"], 50);
        assert_eq!(json["filter"], "(destination == 'MAD')");
    }

    #[test]
    fn test_endpoint_trailing_slash_normalized() {
        let index = HttpSearchIndex::new(
            "https://search.example.net/".to_string(),
            "destinations".to_string(),
            "key".to_string(),
        );
        assert_eq!(index.endpoint, "https://search.example.net");
    }

    #[test]
    fn test_hit_doc_defaults() {
        let doc: HitDoc = serde_json::from_str(r#"{"key": "Paris-KB"}"#).unwrap();
        assert_eq!(doc.key, "Paris-KB");
        assert_eq!(doc.title, "");
        assert_eq!(doc.body, "");
    }
}
