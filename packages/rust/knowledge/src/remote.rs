//! Live client for the managed knowledge-base service.
//!
//! JSON over HTTPS with bearer auth. Every operation is one remote call; no
//! retry or backoff beyond what the HTTP client itself provides. Failures
//! map to [`LokalizeError::Service`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use lokalize_shared::{Chunk, LokalizeError, Result, RetrievedChunk};

use crate::IngestSummary;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CreateKbRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateKbResponse {
    knowledge_base_id: String,
}

#[derive(Debug, Serialize)]
struct IngestRequest<'a> {
    documents: Vec<IngestDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct IngestDocument<'a> {
    id: &'a str,
    text: &'a str,
    metadata: IngestMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct IngestMetadata<'a> {
    source_url: &'a str,
    document_id: &'a str,
    chunk_index: usize,
}

#[derive(Debug, Deserialize)]
struct IngestResponse {
    job_id: String,
    accepted: usize,
    #[serde(default)]
    rejected: usize,
}

#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    query: &'a str,
    /// Always "hybrid" — combined keyword + semantic scoring.
    search_type: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    results: Vec<RetrieveHit>,
}

#[derive(Debug, Deserialize)]
struct RetrieveHit {
    text: String,
    score: f32,
    #[serde(default)]
    metadata: Option<HitMetadata>,
}

#[derive(Debug, Deserialize)]
struct HitMetadata {
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

// ---------------------------------------------------------------------------
// RemoteKnowledgeBase
// ---------------------------------------------------------------------------

/// Connection settings for the live service.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Service base URL, e.g. `https://knowledge-api.lokalize.dev/v1`.
    pub endpoint: String,
    /// Bearer token.
    pub api_key: String,
    /// Knowledge-base id, if one already exists.
    pub knowledge_base_id: Option<String>,
    /// Model used by the generation endpoint.
    pub model_id: String,
    /// Retrieval hits below this score are dropped.
    pub min_score: f32,
    /// Token budget for generation.
    pub max_tokens: u32,
}

/// Client for the managed knowledge-base service.
pub struct RemoteKnowledgeBase {
    config: RemoteConfig,
    client: Client,
}

impl RemoteKnowledgeBase {
    /// Build a client from connection settings.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("lokalize/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LokalizeError::service(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// The knowledge-base id this client targets, if known.
    pub fn knowledge_base_id(&self) -> Option<&str> {
        self.config.knowledge_base_id.as_deref()
    }

    fn require_kb_id(&self) -> Result<&str> {
        self.config
            .knowledge_base_id
            .as_deref()
            .ok_or_else(|| LokalizeError::service("no knowledge base id configured or created"))
    }

    /// Create a knowledge base; the returned id is also remembered on the
    /// client for subsequent ingest/retrieve calls.
    #[instrument(skip(self))]
    pub async fn create_knowledge_base(&mut self, name: &str) -> Result<String> {
        let url = format!("{}/knowledge-bases", self.config.endpoint);
        let response: CreateKbResponse = self
            .post_json("create knowledge base", &url, &CreateKbRequest { name })
            .await?;

        debug!(kb_id = %response.knowledge_base_id, "knowledge base created");
        self.config.knowledge_base_id = Some(response.knowledge_base_id.clone());
        Ok(response.knowledge_base_id)
    }

    /// Submit a chunk batch as an ingestion job.
    #[instrument(skip_all, fields(chunks = chunks.len()))]
    pub async fn ingest_chunks(&self, chunks: &[Chunk]) -> Result<IngestSummary> {
        let kb_id = self.require_kb_id()?;
        let url = format!("{}/knowledge-bases/{kb_id}/documents", self.config.endpoint);

        let request = IngestRequest {
            documents: chunks
                .iter()
                .map(|c| IngestDocument {
                    id: &c.id,
                    text: &c.text,
                    metadata: IngestMetadata {
                        source_url: &c.source_url,
                        document_id: &c.document_id,
                        chunk_index: c.index,
                    },
                })
                .collect(),
        };

        let response: IngestResponse = self.post_json("ingest", &url, &request).await?;

        debug!(
            job_id = %response.job_id,
            accepted = response.accepted,
            rejected = response.rejected,
            "ingestion job submitted"
        );

        Ok(IngestSummary {
            job_id: response.job_id,
            accepted: response.accepted,
            rejected: response.rejected,
        })
    }

    /// Hybrid retrieval; hits under `min_score` are dropped.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let kb_id = self.require_kb_id()?;
        let url = format!("{}/knowledge-bases/{kb_id}/retrieve", self.config.endpoint);

        let request = RetrieveRequest {
            query,
            search_type: "hybrid",
            max_results: top_k,
        };

        let response: RetrieveResponse = self.post_json("retrieve", &url, &request).await?;
        let total = response.results.len();

        let hits: Vec<RetrievedChunk> = response
            .results
            .into_iter()
            .filter(|hit| hit.score >= self.config.min_score)
            .map(|hit| RetrievedChunk {
                text: hit.text,
                source_url: hit.metadata.and_then(|m| m.source_url),
                score: hit.score,
            })
            .collect();

        debug!(
            returned = total,
            kept = hits.len(),
            min_score = self.config.min_score,
            "retrieval complete"
        );

        Ok(hits)
    }

    /// Ask the hosted model to complete `prompt`.
    #[instrument(skip_all)]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/generate", self.config.endpoint);
        let request = GenerateRequest {
            model: &self.config.model_id,
            prompt,
            max_tokens: self.config.max_tokens,
        };

        let response: GenerateResponse = self.post_json("generate", &url, &request).await?;

        if response.text.is_empty() {
            return Err(LokalizeError::service("generation returned empty text"));
        }
        Ok(response.text)
    }

    /// POST a JSON body and decode a JSON response, mapping every failure to
    /// a service error tagged with the operation name.
    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        op: &str,
        url: &str,
        body: &B,
    ) -> Result<R> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LokalizeError::service(format!("{op}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LokalizeError::service(format!("{op}: HTTP {status}")));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| LokalizeError::service(format!("{op}: invalid response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn remote(server: &MockServer, kb_id: Option<&str>) -> RemoteKnowledgeBase {
        RemoteKnowledgeBase::new(RemoteConfig {
            endpoint: server.uri(),
            api_key: "sk-test".into(),
            knowledge_base_id: kb_id.map(String::from),
            model_id: "anthropic.claude-3-sonnet-20240229-v1:0".into(),
            min_score: 0.7,
            max_tokens: 1000,
        })
        .unwrap()
    }

    fn chunk(text: &str, index: usize) -> Chunk {
        Chunk {
            id: format!("chunk-{index}"),
            document_id: "doc-1".into(),
            source_url: "https://example.com/culture".into(),
            text: text.into(),
            index,
            offset: index * 10,
        }
    }

    #[tokio::test]
    async fn create_remembers_the_new_kb_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/knowledge-bases"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"name": "fashion-culture"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"knowledge_base_id": "kb-new-42"})),
            )
            .mount(&server)
            .await;

        let mut remote = remote(&server, None);
        let id = remote.create_knowledge_base("fashion-culture").await.unwrap();

        assert_eq!(id, "kb-new-42");
        assert_eq!(remote.knowledge_base_id(), Some("kb-new-42"));
    }

    #[tokio::test]
    async fn ingest_posts_chunks_with_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/knowledge-bases/kb-1/documents"))
            .and(body_partial_json(json!({
                "documents": [
                    {
                        "text": "first chunk",
                        "metadata": {
                            "source_url": "https://example.com/culture",
                            "chunk_index": 0
                        }
                    },
                    {"text": "second chunk"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_id": "job-7",
                "accepted": 2,
                "rejected": 0
            })))
            .mount(&server)
            .await;

        let remote = remote(&server, Some("kb-1"));
        let summary = remote
            .ingest_chunks(&[chunk("first chunk", 0), chunk("second chunk", 1)])
            .await
            .unwrap();

        assert_eq!(summary.job_id, "job-7");
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 0);
    }

    #[tokio::test]
    async fn retrieve_requests_hybrid_search_and_filters_by_score() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/knowledge-bases/kb-1/retrieve"))
            .and(body_partial_json(json!({
                "query": "modest fashion norms",
                "search_type": "hybrid",
                "max_results": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"text": "strong hit", "score": 0.91,
                     "metadata": {"source_url": "https://example.com/a"}},
                    {"text": "weak hit", "score": 0.42},
                    {"text": "borderline hit", "score": 0.7}
                ]
            })))
            .mount(&server)
            .await;

        let remote = remote(&server, Some("kb-1"));
        let hits = remote.retrieve("modest fashion norms", 5).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "strong hit");
        assert_eq!(hits[0].source_url.as_deref(), Some("https://example.com/a"));
        assert_eq!(hits[1].text, "borderline hit");
    }

    #[tokio::test]
    async fn generate_returns_model_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(json!({
                "model": "anthropic.claude-3-sonnet-20240229-v1:0",
                "max_tokens": 1000
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"text": "Lead with modest silhouettes."})),
            )
            .mount(&server)
            .await;

        let remote = remote(&server, Some("kb-1"));
        let text = remote.generate("prompt").await.unwrap();
        assert_eq!(text, "Lead with modest silhouettes.");
    }

    #[tokio::test]
    async fn server_error_maps_to_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/knowledge-bases/kb-1/retrieve"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let remote = remote(&server, Some("kb-1"));
        let err = remote.retrieve("query", 5).await.unwrap_err();
        assert!(matches!(err, LokalizeError::Service(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn operations_without_kb_id_fail_fast() {
        let server = MockServer::start().await;
        let remote = remote(&server, None);

        let err = remote.retrieve("query", 5).await.unwrap_err();
        assert!(err.to_string().contains("no knowledge base id"));

        let err = remote.ingest_chunks(&[chunk("text", 0)]).await.unwrap_err();
        assert!(err.to_string().contains("no knowledge base id"));
    }
}
