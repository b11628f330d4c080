//! End-to-end demo pipeline: URLs → loader → chunker → ingest → queries.
//!
//! One linear pass, by design never fatal past configuration loading: fetch
//! failures skip the URL, service failures drop to canned output, and the
//! demo always prints something.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use lokalize_chunker::chunk_documents;
use lokalize_knowledge::KnowledgeService;
use lokalize_scraper::WebScraper;
use lokalize_shared::{
    AppConfig, Backend, Chunk, LocalizationRequest, LokalizeError, QueryResult, Result,
    ServiceMode, resolve_service_mode,
};

use crate::advisor::LocalizationAdvisor;

/// Questions the demo runs against the knowledge base.
const SAMPLE_QUESTIONS: &[&str] = &[
    "How should luxury fashion brands adapt their marketing for Saudi Arabian consumers?",
    "How should I adapt a luxury handbag advertisement for the Saudi Arabian market?",
    "Which colors should a spring campaign lead with, and which should it avoid?",
];

/// Name given to a knowledge base the pipeline creates on the fly.
const DEFAULT_KB_NAME: &str = "lokalize-fashion-culture";

/// File the chunk batch is dumped into inside the output directory.
const CHUNK_BATCH_FILE: &str = "chunk_batch.json";

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each sample question is asked.
    fn question_asked(&self, question: &str, current: usize, total: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn question_asked(&self, _question: &str, _current: usize, _total: usize) {}
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Summary of the scrape → chunk → ingest half of the pipeline.
#[derive(Debug)]
pub struct IngestReport {
    /// Which backend the chunks went to.
    pub backend: Backend,
    /// The knowledge base targeted (created on the fly when live mode had none).
    pub knowledge_base_id: Option<String>,
    /// Documents successfully scraped.
    pub documents_loaded: usize,
    /// URLs skipped, with the error that caused the skip.
    pub failures: Vec<(String, String)>,
    /// Chunks produced from the loaded documents.
    pub chunk_count: usize,
    /// Chunks the service accepted for indexing.
    pub chunks_accepted: usize,
    /// Where the chunk batch was written, if the write succeeded.
    pub batch_path: Option<PathBuf>,
}

/// Result of a full demo run.
#[derive(Debug)]
pub struct DemoResult {
    /// Ingestion half of the run.
    pub ingest: IngestReport,
    /// One answer per sample question.
    pub answers: Vec<QueryResult>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

/// Run the full demo: scrape, chunk, ingest, then answer the sample questions.
#[instrument(skip_all)]
pub async fn run_demo(config: &AppConfig, progress: &dyn ProgressReporter) -> Result<DemoResult> {
    let start = Instant::now();

    let mode = resolve_service_mode(config, true);
    let mut service = KnowledgeService::from_mode(&mode, config)?;

    let ingest = ingest_into(&mut service, config, progress).await?;

    progress.phase("Running sample queries");
    let advisor = LocalizationAdvisor::new(&service, config.defaults.top_k);
    let total = SAMPLE_QUESTIONS.len();
    let mut answers = Vec::with_capacity(total);

    for (i, question) in SAMPLE_QUESTIONS.iter().enumerate() {
        progress.question_asked(question, i + 1, total);
        let request =
            LocalizationRequest::new(*question, config.defaults.target_region.clone());
        answers.push(advisor.advise(&request).await);
    }

    let elapsed = start.elapsed();
    info!(
        documents = ingest.documents_loaded,
        chunks = ingest.chunk_count,
        answers = answers.len(),
        elapsed_ms = elapsed.as_millis(),
        "demo complete"
    );

    Ok(DemoResult {
        ingest,
        answers,
        elapsed,
    })
}

/// Scrape, chunk, and ingest without running queries.
#[instrument(skip_all)]
pub async fn run_ingest(
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<IngestReport> {
    let mode = resolve_service_mode(config, true);
    let mut service = KnowledgeService::from_mode(&mode, config)?;
    ingest_into(&mut service, config, progress).await
}

/// Answer one localization question against an existing knowledge base.
///
/// Requires configured credentials and knowledge-base id for a live answer;
/// otherwise the mock backend responds.
#[instrument(skip_all, fields(region = %request.target_region))]
pub async fn ask(config: &AppConfig, request: &LocalizationRequest) -> Result<QueryResult> {
    let mode = resolve_service_mode(config, false);
    if let ServiceMode::Mock { reason } = &mode {
        info!(%reason, "answering from canned data");
    }
    let service = KnowledgeService::from_mode(&mode, config)?;
    let advisor = LocalizationAdvisor::new(&service, config.defaults.top_k);
    Ok(advisor.advise(request).await)
}

/// The scrape → chunk → ingest sequence shared by `run_demo` and `run_ingest`.
async fn ingest_into(
    service: &mut KnowledgeService,
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<IngestReport> {
    progress.phase("Scraping cultural sources");
    let scraper = WebScraper::new()?;
    let outcome = scraper.load(&config.sources.urls).await;

    info!(
        loaded = outcome.documents.len(),
        skipped = outcome.failures.len(),
        "scrape complete"
    );
    if outcome.documents.is_empty() {
        warn!("no documents could be loaded, continuing with an empty batch");
    }

    progress.phase("Chunking documents");
    let chunks = chunk_documents(&outcome.documents, &config.chunking)?;

    progress.phase("Writing chunk batch");
    let batch_path = match write_chunk_batch(&config.defaults.output_dir, &chunks) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(error = %e, "could not write chunk batch");
            None
        }
    };

    progress.phase("Preparing knowledge base");
    if service.backend() == Backend::Live && service.knowledge_base_id().is_none() {
        match service.create_knowledge_base(DEFAULT_KB_NAME).await {
            Ok(id) => info!(kb_id = %id, "created knowledge base"),
            Err(e) => warn!(error = %e, "could not create knowledge base"),
        }
    }

    progress.phase("Ingesting chunks");
    let chunks_accepted = if chunks.is_empty() {
        0
    } else {
        match service.ingest_chunks(&chunks).await {
            Ok(summary) => {
                info!(
                    job_id = %summary.job_id,
                    accepted = summary.accepted,
                    rejected = summary.rejected,
                    "ingestion job submitted"
                );
                summary.accepted
            }
            Err(e) => {
                warn!(error = %e, "ingestion failed, continuing without indexing");
                0
            }
        }
    };

    Ok(IngestReport {
        backend: service.backend(),
        knowledge_base_id: service.knowledge_base_id().map(String::from),
        documents_loaded: outcome.documents.len(),
        failures: outcome.failures,
        chunk_count: chunks.len(),
        chunks_accepted,
        batch_path,
    })
}

/// Write the chunk batch as pretty JSON into the demo output directory.
fn write_chunk_batch(output_dir: &str, chunks: &[Chunk]) -> Result<PathBuf> {
    let dir = expand_tilde(output_dir);
    std::fs::create_dir_all(&dir).map_err(|e| LokalizeError::io(&dir, e))?;

    let path = dir.join(CHUNK_BATCH_FILE);
    let json = serde_json::to_string_pretty(chunks)
        .map_err(|e| LokalizeError::validation(format!("chunk batch serialization: {e}")))?;
    std::fs::write(&path, json).map_err(|e| LokalizeError::io(&path, e))?;

    Ok(path)
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
