//! Prompt assembly for the generation endpoint.
//!
//! Combines the question, retrieved excerpts, and the target region's
//! cultural profile into one generation prompt. The model does the heavy
//! lifting; this is string assembly.

use std::fmt::Write;

use lokalize_shared::{CulturalProfile, LocalizationRequest, RetrievedChunk};

/// Build the localization prompt for one request.
pub fn build_prompt(
    request: &LocalizationRequest,
    hits: &[RetrievedChunk],
    profile: Option<&CulturalProfile>,
) -> String {
    let region = &request.target_region;
    let mut prompt = format!(
        "You are an expert in fashion marketing localization with deep knowledge of \
         {region}'s cultural norms, values, and preferences.\n\n"
    );

    if let Some(profile) = profile {
        prompt.push_str("Cultural profile:\n");
        let _ = writeln!(prompt, "Tone: {}", profile.tone);
        for s in &profile.sensitivities {
            let _ = writeln!(prompt, "- {s}");
        }
        for g in &profile.guidance {
            let _ = writeln!(prompt, "- {}: {}", g.subject, g.note);
        }
        prompt.push('\n');
    }

    prompt.push_str("Context information:\n");
    if hits.is_empty() {
        prompt.push_str("No supporting excerpts were retrieved.\n");
    }
    for hit in hits {
        let source = hit.source_url.as_deref().unwrap_or("built-in profile");
        let _ = writeln!(prompt, "Source: {source}\nContent: {}\n", hit.text);
    }

    let _ = writeln!(prompt, "\nUser query: {}", request.retrieval_query());

    let _ = write!(
        prompt,
        "\nBased on the provided context about {region}'s culture and fashion norms, \
         provide specific, actionable advice for localizing fashion marketing. Consider:\n\
         \n\
         1. Cultural sensitivities and values\n\
         2. Appropriate imagery and messaging\n\
         3. Color symbolism and preferences\n\
         4. Religious and social considerations\n\
         5. Local fashion trends and preferences\n\
         6. Marketing channels and approaches\n\
         \n\
         Provide a comprehensive response that goes beyond translation to true cultural \
         localization.\n\nResponse:"
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use lokalize_shared::find_profile;

    fn hit(text: &str, source: Option<&str>) -> RetrievedChunk {
        RetrievedChunk {
            text: text.into(),
            source_url: source.map(String::from),
            score: 0.9,
        }
    }

    #[test]
    fn prompt_contains_question_context_and_profile() {
        let request = LocalizationRequest::new(
            "How should we launch the handbag line?",
            "Saudi Arabia",
        );
        let hits = [hit(
            "Modest silhouettes dominate.",
            Some("https://example.com/a"),
        )];
        let profile = find_profile("Saudi Arabia");

        let prompt = build_prompt(&request, &hits, profile);

        assert!(prompt.contains("How should we launch the handbag line?"));
        assert!(prompt.contains("Source: https://example.com/a"));
        assert!(prompt.contains("Content: Modest silhouettes dominate."));
        assert!(prompt.contains("Cultural profile:"));
        assert!(prompt.contains("Color symbolism and preferences"));
        assert!(prompt.ends_with("Response:"));
    }

    #[test]
    fn missing_profile_omits_profile_section() {
        let request = LocalizationRequest::new("q", "Atlantis");
        let prompt = build_prompt(&request, &[], None);

        assert!(!prompt.contains("Cultural profile:"));
        assert!(prompt.contains("No supporting excerpts were retrieved."));
        assert!(prompt.contains("Atlantis"));
    }

    #[test]
    fn sourceless_hits_are_attributed_to_the_builtin_profile() {
        let request = LocalizationRequest::new("q", "Saudi Arabia");
        let prompt = build_prompt(&request, &[hit("gold signals luxury", None)], None);
        assert!(prompt.contains("Source: built-in profile"));
    }
}
