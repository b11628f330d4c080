//! Query orchestrator.
//!
//! Retrieves supporting chunks, builds the generation prompt, and calls the
//! hosted model. A remote failure is never surfaced to the caller — the
//! advisor logs it and answers with the static example response instead, so
//! a demo run always produces output.

use tracing::{debug, instrument, warn};

use lokalize_knowledge::{EXAMPLE_ADVICE, KnowledgeService};
use lokalize_shared::{Backend, LocalizationRequest, QueryResult, RetrievedChunk, find_profile};

use crate::prompt::build_prompt;

/// Answers localization questions against a knowledge service.
pub struct LocalizationAdvisor<'a> {
    service: &'a KnowledgeService,
    top_k: usize,
}

impl<'a> LocalizationAdvisor<'a> {
    pub fn new(service: &'a KnowledgeService, top_k: usize) -> Self {
        Self { service, top_k }
    }

    /// Answer one localization question.
    #[instrument(skip_all, fields(region = %request.target_region))]
    pub async fn advise(&self, request: &LocalizationRequest) -> QueryResult {
        let query = request.retrieval_query();

        let sources = match self.service.retrieve(&query, self.top_k).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "retrieval failed, answering with example advice");
                return self.placeholder(request, Vec::new());
            }
        };

        debug!(hits = sources.len(), "retrieved supporting chunks");

        let profile = find_profile(&request.target_region);
        let prompt = build_prompt(request, &sources, profile);

        match self.service.generate(&prompt).await {
            Ok(advice) => QueryResult {
                question: request.question.clone(),
                target_region: request.target_region.clone(),
                advice,
                sources,
                answered_by: self.service.backend(),
            },
            Err(e) => {
                warn!(error = %e, "generation failed, answering with example advice");
                self.placeholder(request, sources)
            }
        }
    }

    /// The static example response used when the service cannot answer.
    fn placeholder(&self, request: &LocalizationRequest, sources: Vec<RetrievedChunk>) -> QueryResult {
        QueryResult {
            question: request.question.clone(),
            target_region: request.target_region.clone(),
            advice: EXAMPLE_ADVICE.to_string(),
            sources,
            answered_by: Backend::Mock,
        }
    }
}
