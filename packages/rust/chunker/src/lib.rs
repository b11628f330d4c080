//! Fixed-size sliding-window chunking.
//!
//! Splits document text into overlapping windows sized for retrieval. No
//! semantic boundary detection — window starts advance by
//! `chunk_size - chunk_overlap` bytes, snapped to UTF-8 character boundaries
//! so that consecutive windows stay contiguous. Deterministic for identical
//! input and configuration.

use sha2::{Digest, Sha256};
use tracing::debug;

use lokalize_shared::{Chunk, ChunkingConfig, Document, LokalizeError, Result};

/// Split a batch of documents into ordered chunks.
///
/// Chunks keep document order: all chunks of `documents[0]` come before any
/// chunk of `documents[1]`.
pub fn chunk_documents(documents: &[Document], config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    validate(config)?;

    let mut chunks = Vec::new();
    for doc in documents {
        chunks.extend(chunk_document(doc, config)?);
    }

    debug!(
        documents = documents.len(),
        chunks = chunks.len(),
        chunk_size = config.chunk_size,
        chunk_overlap = config.chunk_overlap,
        "chunked document batch"
    );

    Ok(chunks)
}

/// Split one document into ordered chunks.
pub fn chunk_document(doc: &Document, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    validate(config)?;

    let text = doc.text.as_str();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let stride = config.chunk_size - config.chunk_overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;

    loop {
        let end = ceil_char_boundary(text, start.saturating_add(config.chunk_size));
        let span = &text[start..end];

        chunks.push(Chunk {
            id: content_id(span),
            document_id: doc.id.clone(),
            source_url: doc.source_url.clone(),
            text: span.to_string(),
            index,
            offset: start,
        });

        if end >= text.len() {
            break;
        }

        // Advance by the stride, snapping down to a character boundary.
        // The snapped start never passes `end`, so windows stay contiguous.
        let mut next = floor_char_boundary(text, start + stride);
        if next <= start {
            next = ceil_char_boundary(text, start + 1);
        }
        start = next;
        index += 1;
    }

    Ok(chunks)
}

fn validate(config: &ChunkingConfig) -> Result<()> {
    if config.chunk_size == 0 {
        return Err(LokalizeError::validation("chunk_size must be positive"));
    }
    if config.chunk_overlap >= config.chunk_size {
        return Err(LokalizeError::validation(format!(
            "chunk_overlap ({}) must be smaller than chunk_size ({})",
            config.chunk_overlap, config.chunk_size
        )));
    }
    Ok(())
}

/// Content-derived chunk id (SHA-256 of the chunk text).
fn content_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Largest char boundary `<= i` (clamped to the string length).
fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= i` (clamped to the string length).
fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
