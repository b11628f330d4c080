//! Document loader: fetches source pages and reduces them to plain text.
//!
//! Each configured URL is fetched over HTTP and parsed with `scraper`;
//! navigation chrome is stripped and the remaining text is collapsed into a
//! single whitespace-normalized string. A failed fetch is logged and skipped
//! — one bad URL never aborts the batch.

mod extract;

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use lokalize_shared::{Document, LokalizeError, Result};

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("lokalize/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// LoadOutcome
// ---------------------------------------------------------------------------

/// Result of loading a batch of URLs.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Successfully fetched and extracted documents, in input order.
    pub documents: Vec<Document>,
    /// Skipped URLs with the error that caused the skip.
    pub failures: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// WebScraper
// ---------------------------------------------------------------------------

/// Fetches pages and turns them into [`Document`]s.
pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    /// Create a scraper with the default HTTP client settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LokalizeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch every URL in order, skipping failures.
    ///
    /// Fetches are sequential — the demo is one linear pass, and source
    /// sites are third-party pages we have no business hammering.
    #[instrument(skip_all, fields(urls = urls.len()))]
    pub async fn load(&self, urls: &[String]) -> LoadOutcome {
        let mut documents = Vec::new();
        let mut failures = Vec::new();

        for raw in urls {
            let url = match Url::parse(raw) {
                Ok(url) => url,
                Err(e) => {
                    warn!(url = %raw, error = %e, "invalid source URL, skipping");
                    failures.push((raw.clone(), format!("invalid URL: {e}")));
                    continue;
                }
            };

            match self.fetch_document(&url).await {
                Ok(doc) => {
                    debug!(url = %raw, bytes = doc.text.len(), "loaded document");
                    documents.push(doc);
                }
                Err(e) => {
                    warn!(url = %raw, error = %e, "fetch failed, skipping");
                    failures.push((raw.clone(), e.to_string()));
                }
            }
        }

        LoadOutcome {
            documents,
            failures,
        }
    }

    /// Fetch a single page and extract its text content.
    async fn fetch_document(&self, url: &Url) -> Result<Document> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| LokalizeError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LokalizeError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LokalizeError::Network(format!("{url}: body read failed: {e}")))?;

        let extracted = extract::extract_text(&body);
        if extracted.text.is_empty() {
            return Err(LokalizeError::parse(format!(
                "{url}: no text content after stripping markup"
            )));
        }

        Ok(Document {
            id: Uuid::now_v7().to_string(),
            source_url: url.to_string(),
            title: extracted.title,
            content_hash: compute_hash(&extracted.text),
            text: extracted.text,
            fetched_at: Utc::now(),
        })
    }
}

/// Compute SHA-256 hash of content.
fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CULTURE_PAGE: &str = r#"<html>
      <head><title>Gulf Fashion Notes</title></head>
      <body>
        <nav>Home | About | Contact</nav>
        <main>
          <h1>Dress Norms in the Gulf</h1>
          <p>Modest silhouettes dominate public wardrobes.</p>
          <p>Green holds religious significance across the region.</p>
        </main>
        <script>trackPageView();</script>
        <footer>Copyright 2024</footer>
      </body>
    </html>"#;

    #[tokio::test]
    async fn loads_and_extracts_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/culture"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CULTURE_PAGE))
            .mount(&server)
            .await;

        let scraper = WebScraper::new().unwrap();
        let outcome = scraper.load(&[format!("{}/culture", server.uri())]).await;

        assert_eq!(outcome.documents.len(), 1);
        assert!(outcome.failures.is_empty());

        let doc = &outcome.documents[0];
        assert_eq!(doc.title.as_deref(), Some("Dress Norms in the Gulf"));
        assert!(doc.text.contains("Modest silhouettes"));
        assert!(doc.text.contains("religious significance"));
        // Chrome and scripts are stripped
        assert!(!doc.text.contains("Home | About"));
        assert!(!doc.text.contains("trackPageView"));
        assert!(!doc.text.contains("Copyright"));
        assert_eq!(doc.content_hash.len(), 64);
    }

    #[tokio::test]
    async fn one_failed_url_does_not_abort_the_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/good"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CULTURE_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/also-good"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CULTURE_PAGE))
            .mount(&server)
            .await;

        let scraper = WebScraper::new().unwrap();
        let urls = [
            format!("{}/good", server.uri()),
            format!("{}/broken", server.uri()),
            format!("{}/also-good", server.uri()),
        ];
        let outcome = scraper.load(&urls).await;

        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].0.ends_with("/broken"));
        assert!(outcome.failures[0].1.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn not_found_is_recorded_as_failure() {
        let server = MockServer::start().await;

        let scraper = WebScraper::new().unwrap();
        let outcome = scraper.load(&[format!("{}/missing", server.uri())]).await;

        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].1.contains("HTTP 404"));
    }

    #[tokio::test]
    async fn empty_page_is_recorded_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><script>only();</script></body></html>"),
            )
            .mount(&server)
            .await;

        let scraper = WebScraper::new().unwrap();
        let outcome = scraper.load(&[format!("{}/empty", server.uri())]).await;

        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].1.contains("no text content"));
    }

    #[tokio::test]
    async fn invalid_url_is_skipped() {
        let scraper = WebScraper::new().unwrap();
        let outcome = scraper.load(&["not a url".to_string()]).await;

        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].1.contains("invalid URL"));
    }
}
