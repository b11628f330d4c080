//! Knowledge Base Client.
//!
//! Wraps the managed retrieval service behind three remote operations —
//! create-knowledge-base, ingest, and hybrid retrieval — plus the hosted
//! generation endpoint. All of the hard work (embedding, indexing, hybrid
//! search, generation) happens on the service side; this crate is request
//! shaping and error mapping.
//!
//! When credentials are absent the pipeline runs against
//! [`MockKnowledgeBase`] instead, which answers from the built-in cultural
//! profiles so the demo always completes.

mod mock;
mod remote;

pub use mock::{EXAMPLE_ADVICE, MOCK_KNOWLEDGE_BASE_ID, MockKnowledgeBase};
pub use remote::{RemoteConfig, RemoteKnowledgeBase};

use lokalize_shared::{
    AppConfig, Backend, Chunk, Result, RetrievedChunk, ServiceMode,
};

// ---------------------------------------------------------------------------
// IngestSummary
// ---------------------------------------------------------------------------

/// Outcome of an ingestion job submission.
#[derive(Debug, Clone)]
pub struct IngestSummary {
    /// Service-assigned job identifier.
    pub job_id: String,
    /// Chunks accepted for indexing.
    pub accepted: usize,
    /// Chunks rejected by the service.
    pub rejected: usize,
}

// ---------------------------------------------------------------------------
// KnowledgeService
// ---------------------------------------------------------------------------

/// The knowledge-base backend the pipeline talks to.
///
/// Resolved once from [`ServiceMode`]; every downstream call dispatches on
/// the variant instead of re-checking credentials.
pub enum KnowledgeService {
    /// The managed cloud service.
    Live(RemoteKnowledgeBase),
    /// Canned answers from built-in cultural data.
    Mock(MockKnowledgeBase),
}

impl KnowledgeService {
    /// Build the service for a resolved mode.
    pub fn from_mode(mode: &ServiceMode, config: &AppConfig) -> Result<Self> {
        match mode {
            ServiceMode::Live {
                api_key,
                knowledge_base_id,
            } => {
                let remote = RemoteKnowledgeBase::new(RemoteConfig {
                    endpoint: config.service.endpoint.clone(),
                    api_key: api_key.clone(),
                    knowledge_base_id: knowledge_base_id.clone(),
                    model_id: config.service.model_id.clone(),
                    min_score: config.service.min_score,
                    max_tokens: config.service.max_tokens,
                })?;
                Ok(Self::Live(remote))
            }
            ServiceMode::Mock { reason } => {
                tracing::info!(%reason, "credentials absent, using mock knowledge base");
                Ok(Self::Mock(MockKnowledgeBase::new()))
            }
        }
    }

    /// Which backend this is.
    pub fn backend(&self) -> Backend {
        match self {
            Self::Live(_) => Backend::Live,
            Self::Mock(_) => Backend::Mock,
        }
    }

    /// The knowledge-base id in use, if one exists yet.
    pub fn knowledge_base_id(&self) -> Option<&str> {
        match self {
            Self::Live(remote) => remote.knowledge_base_id(),
            Self::Mock(_) => Some(MOCK_KNOWLEDGE_BASE_ID),
        }
    }

    /// Create a knowledge base and remember its id.
    pub async fn create_knowledge_base(&mut self, name: &str) -> Result<String> {
        match self {
            Self::Live(remote) => remote.create_knowledge_base(name).await,
            Self::Mock(_) => Ok(MOCK_KNOWLEDGE_BASE_ID.to_string()),
        }
    }

    /// Submit a chunk batch for indexing.
    pub async fn ingest_chunks(&self, chunks: &[Chunk]) -> Result<IngestSummary> {
        match self {
            Self::Live(remote) => remote.ingest_chunks(chunks).await,
            Self::Mock(mock) => Ok(mock.ingest_chunks(chunks)),
        }
    }

    /// Hybrid (semantic + keyword) retrieval of the `top_k` best chunks.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        match self {
            Self::Live(remote) => remote.retrieve(query, top_k).await,
            Self::Mock(mock) => Ok(mock.retrieve(top_k)),
        }
    }

    /// Ask the hosted model to complete `prompt`.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            Self::Live(remote) => remote.generate(prompt).await,
            Self::Mock(_) => Ok(EXAMPLE_ADVICE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_mode_builds_mock_backend() {
        let config = AppConfig::default();
        let mode = ServiceMode::Mock {
            reason: "LOKALIZE_API_KEY is not set".into(),
        };

        let service = KnowledgeService::from_mode(&mode, &config).unwrap();
        assert_eq!(service.backend(), Backend::Mock);
        assert_eq!(service.knowledge_base_id(), Some(MOCK_KNOWLEDGE_BASE_ID));
    }

    #[test]
    fn live_mode_builds_live_backend() {
        let config = AppConfig::default();
        let mode = ServiceMode::Live {
            api_key: "sk-test".into(),
            knowledge_base_id: Some("kb-123".into()),
        };

        let service = KnowledgeService::from_mode(&mode, &config).unwrap();
        assert_eq!(service.backend(), Backend::Live);
        assert_eq!(service.knowledge_base_id(), Some("kb-123"));
    }

    #[tokio::test]
    async fn mock_generation_returns_the_documented_example() {
        let config = AppConfig::default();
        let mode = ServiceMode::Mock {
            reason: "test".into(),
        };
        let service = KnowledgeService::from_mode(&mode, &config).unwrap();

        let advice = service.generate("any prompt").await.unwrap();
        assert_eq!(advice, EXAMPLE_ADVICE);
    }
}
