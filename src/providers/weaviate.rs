//! Weaviate Cloud chunk store client
//!
//! Talks to a hosted Weaviate cluster over its REST surface (readiness and
//! schema) and GraphQL endpoint (`nearText` retrieval and grouped-task
//! generation). Embedding and generation provider keys are forwarded as
//! request headers; the cluster calls those providers itself.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

use crate::config::WeaviateConfig;
use crate::error::{Error, Result};
use crate::types::passage::ScoredPassage;

use super::chunk_store::{ChunkStore, GroupedGeneration};

const OPENAI_KEY_HEADER: &str = "x-openai-api-key";
const VOYAGEAI_KEY_HEADER: &str = "x-voyageai-api-key";

/// Weaviate Cloud client
pub struct WeaviateStore {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    collection_available: bool,
    search_timeout: Duration,
    generate_timeout: Duration,
}

impl WeaviateStore {
    /// Connect to the cluster and acquire the collection handle
    ///
    /// A cluster that connects but reports not ready is logged and kept;
    /// readiness is re-checked live by the health endpoint.
    pub async fn connect(config: &WeaviateConfig) -> Result<Self> {
        let base_url = normalize_cluster_url(&config.cluster_url);

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|e| Error::Config(format!("Invalid Weaviate API key: {e}")))?,
        );
        headers.insert(
            OPENAI_KEY_HEADER,
            HeaderValue::from_str(&config.openai_api_key)
                .map_err(|e| Error::Config(format!("Invalid OpenAI API key: {e}")))?,
        );
        if let Some(key) = &config.voyageai_api_key {
            headers.insert(
                VOYAGEAI_KEY_HEADER,
                HeaderValue::from_str(key)
                    .map_err(|e| Error::Config(format!("Invalid VoyageAI API key: {e}")))?,
            );
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Unavailable(format!("Failed to build HTTP client: {e}")))?;

        tracing::info!("Connecting to Weaviate Cloud at: {}", base_url);

        let store = Self {
            http,
            base_url,
            collection: config.collection.clone(),
            collection_available: false,
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
        };

        if store.is_ready().await {
            tracing::info!("Weaviate connection successful, client is ready");
        } else {
            tracing::warn!("Weaviate client connected but reports not ready");
        }

        let collection_available = store.check_collection().await;
        if collection_available {
            tracing::info!("Connected to {} collection", store.collection);
        } else {
            tracing::warn!("Collection {} not found in cluster schema", store.collection);
        }

        Ok(Self {
            collection_available,
            ..store
        })
    }

    async fn check_collection(&self) -> bool {
        let url = format!("{}/v1/schema/{}", self.base_url, self.collection);
        match self.http.get(&url).timeout(self.search_timeout).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Schema lookup for {} failed: {}", self.collection, e);
                false
            }
        }
    }

    /// Issue a GraphQL query and return the parsed body
    async fn graphql(
        &self,
        query: String,
        timeout: Duration,
    ) -> std::result::Result<Value, GraphqlFailure> {
        let url = format!("{}/v1/graphql", self.base_url);
        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| GraphqlFailure {
                timed_out: e.is_timeout(),
                message: format!("request to Weaviate failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GraphqlFailure::immediate(format!(
                "Weaviate returned HTTP {status}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| GraphqlFailure {
            timed_out: e.is_timeout(),
            message: format!("invalid JSON from Weaviate: {e}"),
        })?;

        if let Some(messages) = graphql_errors(&body) {
            return Err(GraphqlFailure::immediate(messages));
        }

        Ok(body)
    }

    fn near_text_query(&self, query: &str, limit: usize) -> String {
        format!(
            "{{ Get {{ {class}(nearText: {{concepts: [{concept}]}}, limit: {limit}) \
             {{ text title source _additional {{ distance }} }} }} }}",
            class = self.collection,
            concept = quote(query),
        )
    }

    fn generate_query(&self, query: &str, limit: usize, task: &str) -> String {
        format!(
            "{{ Get {{ {class}(nearText: {{concepts: [{concept}]}}, limit: {limit}) \
             {{ text title source _additional {{ distance \
             generate(groupedResult: {{task: {task}}}) {{ groupedResult error }} }} }} }} }}",
            class = self.collection,
            concept = quote(query),
            task = quote(task),
        )
    }
}

#[async_trait]
impl ChunkStore for WeaviateStore {
    async fn is_ready(&self) -> bool {
        let url = format!("{}/v1/.well-known/ready", self.base_url);
        match self.http.get(&url).timeout(self.search_timeout).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn collection_available(&self) -> bool {
        self.collection_available
    }

    async fn near_text(&self, query: &str, limit: usize) -> Result<Vec<ScoredPassage>> {
        let body = self
            .graphql(self.near_text_query(query, limit), self.search_timeout)
            .await
            .map_err(|failure| Error::Retrieval(failure.message))?;

        parse_passages(&body, &self.collection).map_err(Error::Retrieval)
    }

    async fn generate_from_text(
        &self,
        query: &str,
        limit: usize,
        task: &str,
    ) -> Result<GroupedGeneration> {
        // One pipelined call. An immediate transport or lookup failure means
        // retrieval never completed; exhausting the generation time budget or
        // a per-result generate error means the store retrieved context but
        // answer synthesis failed.
        let body = self
            .graphql(self.generate_query(query, limit, task), self.generate_timeout)
            .await
            .map_err(pipelined_failure)?;

        let passages = parse_passages(&body, &self.collection).map_err(Error::Retrieval)?;

        if let Some(message) = generation_error(&body, &self.collection) {
            return Err(Error::Generation(message));
        }

        Ok(GroupedGeneration {
            answer: grouped_answer(&body, &self.collection),
            passages,
        })
    }

    async fn close(&self) {
        // reqwest connections are released on drop; nothing to tear down
        // server-side for a read-only client.
        tracing::info!("Closing Weaviate client");
    }

    fn name(&self) -> &str {
        "weaviate"
    }
}

/// A failed GraphQL round trip, noting whether the time budget ran out
#[derive(Debug)]
struct GraphqlFailure {
    timed_out: bool,
    message: String,
}

impl GraphqlFailure {
    fn immediate(message: String) -> Self {
        Self {
            timed_out: false,
            message,
        }
    }
}

/// Classify a failed pipelined retrieval + generation call
///
/// A timeout means retrieval was accepted and the generation budget was
/// consumed, so it surfaces as a generation failure; anything immediate is a
/// failed lookup.
fn pipelined_failure(failure: GraphqlFailure) -> Error {
    if failure.timed_out {
        Error::Generation(failure.message)
    } else {
        Error::Retrieval(failure.message)
    }
}

/// Ensure the cluster URL has a scheme and no trailing slash
fn normalize_cluster_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Quote a string as a GraphQL string literal
fn quote(text: &str) -> String {
    // GraphQL string escaping matches JSON string escaping
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

fn graphql_errors(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect();
    Some(messages.join("; "))
}

fn get_objects<'a>(body: &'a Value, collection: &str) -> Option<&'a Vec<Value>> {
    body.get("data")?.get("Get")?.get(collection)?.as_array()
}

/// Extract passages from a GraphQL `Get` response, preserving store order
fn parse_passages(body: &Value, collection: &str) -> std::result::Result<Vec<ScoredPassage>, String> {
    let objects = get_objects(body, collection)
        .ok_or_else(|| format!("missing data.Get.{collection} in Weaviate response"))?;

    let passages = objects
        .iter()
        .map(|obj| ScoredPassage {
            text: str_field(obj, "text"),
            title: str_field(obj, "title"),
            source: str_field(obj, "source"),
            distance: obj
                .pointer("/_additional/distance")
                .and_then(Value::as_f64)
                .unwrap_or(ScoredPassage::DEFAULT_DISTANCE),
        })
        .collect();

    Ok(passages)
}

fn str_field(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The grouped answer is attached to the first object that carries one
fn grouped_answer(body: &Value, collection: &str) -> Option<String> {
    get_objects(body, collection)?
        .iter()
        .filter_map(|obj| obj.pointer("/_additional/generate/groupedResult"))
        .filter_map(Value::as_str)
        .map(str::to_string)
        .next()
}

fn generation_error(body: &Value, collection: &str) -> Option<String> {
    get_objects(body, collection)?
        .iter()
        .filter_map(|obj| obj.pointer("/_additional/generate/error"))
        .filter_map(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_text_body() -> Value {
        json!({
            "data": { "Get": { "ISODocuments": [
                {
                    "text": "Risk management process for medical devices...",
                    "title": "ISO 14971",
                    "source": "iso14971.pdf",
                    "_additional": { "distance": 0.12 }
                },
                {
                    "text": "Software labeling requirements...",
                    "title": "IEC 62304",
                    "source": "iec62304.pdf",
                    "_additional": { "distance": 0.44 }
                }
            ]}}
        })
    }

    #[test]
    fn parses_passages_in_store_order() {
        let passages = parse_passages(&near_text_body(), "ISODocuments").unwrap();
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].title, "ISO 14971");
        assert_eq!(passages[0].distance, 0.12);
        assert_eq!(passages[1].title, "IEC 62304");
    }

    #[test]
    fn missing_distance_defaults_to_one() {
        let body = json!({
            "data": { "Get": { "ISODocuments": [
                { "text": "t", "title": "T", "source": "s", "_additional": {} }
            ]}}
        });
        let passages = parse_passages(&body, "ISODocuments").unwrap();
        assert_eq!(passages[0].distance, ScoredPassage::DEFAULT_DISTANCE);
    }

    #[test]
    fn missing_collection_is_an_error() {
        let body = json!({ "data": { "Get": {} } });
        assert!(parse_passages(&body, "ISODocuments").is_err());
    }

    #[test]
    fn grouped_answer_comes_from_first_carrying_object() {
        let body = json!({
            "data": { "Get": { "ISODocuments": [
                { "text": "t", "title": "T", "source": "s",
                  "_additional": { "distance": 0.1,
                      "generate": { "groupedResult": "ISO 14971 defines risk management.", "error": null } } },
                { "text": "t2", "title": "T2", "source": "s2",
                  "_additional": { "distance": 0.2, "generate": null } }
            ]}}
        });
        assert_eq!(
            grouped_answer(&body, "ISODocuments").as_deref(),
            Some("ISO 14971 defines risk management.")
        );
        assert!(generation_error(&body, "ISODocuments").is_none());
    }

    #[test]
    fn generation_error_is_surfaced() {
        let body = json!({
            "data": { "Get": { "ISODocuments": [
                { "text": "t", "title": "T", "source": "s",
                  "_additional": { "generate": { "groupedResult": null, "error": "connection to OpenAI failed" } } }
            ]}}
        });
        assert_eq!(
            generation_error(&body, "ISODocuments").as_deref(),
            Some("connection to OpenAI failed")
        );
    }

    #[test]
    fn graphql_errors_are_joined() {
        let body = json!({ "errors": [
            { "message": "invalid nearText" },
            { "message": "unknown class" }
        ]});
        assert_eq!(
            graphql_errors(&body).as_deref(),
            Some("invalid nearText; unknown class")
        );
    }

    #[test]
    fn pipelined_timeout_is_a_generation_failure() {
        let err = pipelined_failure(GraphqlFailure {
            timed_out: true,
            message: "request to Weaviate failed: operation timed out".to_string(),
        });
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn pipelined_transport_failure_is_a_retrieval_failure() {
        let err = pipelined_failure(GraphqlFailure::immediate(
            "Weaviate returned HTTP 502 Bad Gateway".to_string(),
        ));
        assert!(matches!(err, Error::Retrieval(_)));
    }

    #[test]
    fn cluster_url_gets_https_scheme() {
        assert_eq!(
            normalize_cluster_url("my-cluster.weaviate.cloud/"),
            "https://my-cluster.weaviate.cloud"
        );
        assert_eq!(
            normalize_cluster_url("http://localhost:8080"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn query_text_is_escaped() {
        let quoted = quote(r#"what is "safe"?"#);
        assert_eq!(quoted, r#""what is \"safe\"?""#);
    }
}
