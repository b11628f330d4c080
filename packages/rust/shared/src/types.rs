//! Core domain types for the Lokalize pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A scraped source page, reduced to plain text.
///
/// Created by the loader, consumed by the chunker. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier (UUID v7, time-sortable).
    pub id: String,
    /// The URL the page was fetched from.
    pub source_url: String,
    /// Page title (first `<h1>`, falling back to `<title>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Extracted plain text with boilerplate stripped.
    pub text: String,
    /// SHA-256 hash of the extracted text.
    pub content_hash: String,
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

/// A window of document text sized for retrieval.
///
/// Invariant: `document_id` always names the [`Document`] the chunk was cut
/// from, and chunks of one document are ordered by `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Content-derived identifier (SHA-256 of the chunk text).
    pub id: String,
    /// Owning document.
    pub document_id: String,
    /// Source URL carried along for ingestion metadata.
    pub source_url: String,
    /// The chunk text.
    pub text: String,
    /// Sequence index within the document (0-based).
    pub index: usize,
    /// Byte offset of the chunk start within the document text.
    pub offset: usize,
}

// ---------------------------------------------------------------------------
// Retrieval & query types
// ---------------------------------------------------------------------------

/// One hit returned by hybrid retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Excerpt text returned by the service.
    pub text: String,
    /// Source URL of the excerpt, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Relevance score assigned by the service.
    pub score: f32,
}

/// Which backend produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The managed cloud service.
    Live,
    /// The built-in canned fallback.
    Mock,
}

/// A localization question with optional campaign context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationRequest {
    /// The free-text question.
    pub question: String,
    /// Target cultural region, e.g. "Saudi Arabia".
    pub target_region: String,
    /// Brand positioning context, e.g. "luxury fashion house".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_context: Option<String>,
    /// Product category, e.g. "handbags".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Campaign kind, e.g. "social media launch".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_type: Option<String>,
}

impl LocalizationRequest {
    /// Create a request with just a question and region.
    pub fn new(question: impl Into<String>, target_region: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            target_region: target_region.into(),
            brand_context: None,
            product_type: None,
            campaign_type: None,
        }
    }

    /// Fold the optional context fields into a single retrieval query string.
    pub fn retrieval_query(&self) -> String {
        let mut parts = vec![self.question.clone()];
        if let Some(brand) = &self.brand_context {
            parts.push(format!("Brand context: {brand}"));
        }
        if let Some(product) = &self.product_type {
            parts.push(format!("Product type: {product}"));
        }
        if let Some(campaign) = &self.campaign_type {
            parts.push(format!("Campaign type: {campaign}"));
        }
        parts.push(format!("Target region: {}", self.target_region));
        parts.join(" | ")
    }
}

/// The answer to one localization question. Created per query, not persisted.
///
/// Invariant: `advice` is non-empty on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The original question.
    pub question: String,
    /// Target cultural region the advice is for.
    pub target_region: String,
    /// Generated localization advice.
    pub advice: String,
    /// Excerpts the advice was grounded on.
    pub sources: Vec<RetrievedChunk>,
    /// Which backend answered.
    pub answered_by: Backend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_query_folds_context() {
        let mut request = LocalizationRequest::new(
            "How should we adapt this campaign?",
            "Saudi Arabia",
        );
        request.brand_context = Some("luxury fashion house".into());
        request.product_type = Some("handbags".into());

        let query = request.retrieval_query();
        assert!(query.starts_with("How should we adapt this campaign?"));
        assert!(query.contains("Brand context: luxury fashion house"));
        assert!(query.contains("Product type: handbags"));
        assert!(query.ends_with("Target region: Saudi Arabia"));
    }

    #[test]
    fn retrieval_query_without_context_is_question_and_region() {
        let request = LocalizationRequest::new("What colors work?", "Japan");
        assert_eq!(
            request.retrieval_query(),
            "What colors work? | Target region: Japan"
        );
    }

    #[test]
    fn chunk_serialization_roundtrip() {
        let chunk = Chunk {
            id: "abc123".into(),
            document_id: "doc-1".into(),
            source_url: "https://example.com/culture".into(),
            text: "Modesty is central to public dress.".into(),
            index: 0,
            offset: 0,
        };

        let json = serde_json::to_string(&chunk).expect("serialize");
        let parsed: Chunk = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, chunk);
    }

    #[test]
    fn query_result_serializes_backend_lowercase() {
        let result = QueryResult {
            question: "q".into(),
            target_region: "Saudi Arabia".into(),
            advice: "advice".into(),
            sources: vec![],
            answered_by: Backend::Mock,
        };
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(json.contains("\"answered_by\":\"mock\""));
    }
}
