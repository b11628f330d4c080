//! HTML → plain text extraction.
//!
//! Readability heuristics: prefer `<main>`/`<article>` content roots, fall
//! back to `<body>`, and skip navigation chrome wherever the root ends up.

use scraper::{ElementRef, Html, Selector};

/// Elements whose subtrees never contribute to document text.
const CHROME_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "script", "style", "noscript", "iframe", "svg",
];

/// Selectors tried in order when locating the main content area.
const CONTENT_SELECTORS: &[&str] = &["main", "article", r#"[role="main"]"#, ".content"];

/// Plain text pulled out of a page.
pub(crate) struct ExtractedText {
    /// First `<h1>`, falling back to `<title>`.
    pub title: Option<String>,
    /// Whitespace-normalized body text.
    pub text: String,
}

/// Extract the title and whitespace-normalized text content from raw HTML.
pub(crate) fn extract_text(html: &str) -> ExtractedText {
    let doc = Html::parse_document(html);

    let title = extract_title(&doc);

    let mut raw = String::new();
    if let Some(root) = content_root(&doc) {
        collect_text(root, &mut raw);
    }

    ExtractedText {
        title,
        text: normalize_whitespace(&raw),
    }
}

/// Locate the main content element, falling back to `<body>`.
fn content_root(doc: &Html) -> Option<ElementRef<'_>> {
    for sel_str in CONTENT_SELECTORS {
        let sel = Selector::parse(sel_str).expect("static selector");
        if let Some(el) = doc.select(&sel).next() {
            return Some(el);
        }
    }

    let body_sel = Selector::parse("body").expect("static selector");
    doc.select(&body_sel).next()
}

/// Append the text of an element's subtree, skipping chrome elements.
fn collect_text(el: ElementRef<'_>, out: &mut String) {
    if CHROME_TAGS.contains(&el.value().name()) {
        return;
    }

    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = ElementRef::wrap(child) {
            collect_text(child_el, out);
        }
    }
}

/// First `<h1>` text, falling back to the `<title>` element.
fn extract_title(doc: &Html) -> Option<String> {
    for sel_str in ["h1", "title"] {
        let sel = Selector::parse(sel_str).expect("static selector");
        if let Some(el) = doc.select(&sel).next() {
            let text = el.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Collapse all runs of whitespace into single spaces.
fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
