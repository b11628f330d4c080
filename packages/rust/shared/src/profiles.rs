//! Cultural profile records.
//!
//! A small static set of descriptive records used to frame prompts and to
//! back the mock service. Loaded once, read-only for the process lifetime.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// One color or symbol note, e.g. "green — religious significance".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceNote {
    /// The color or symbol the note is about.
    pub subject: String,
    /// What it signals in the region.
    pub note: String,
}

/// Descriptive record of a region's cultural context for fashion marketing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CulturalProfile {
    /// Region identifier, e.g. "Saudi Arabia".
    pub region: String,
    /// Sensitivities campaigns must respect.
    pub sensitivities: Vec<String>,
    /// Color and symbol guidance.
    pub guidance: Vec<GuidanceNote>,
    /// Messaging tone notes.
    pub tone: String,
}

static BUILTIN: LazyLock<Vec<CulturalProfile>> = LazyLock::new(|| {
    vec![
        CulturalProfile {
            region: "Saudi Arabia".into(),
            sensitivities: vec![
                "Modest dress is the public norm; imagery should favor covered silhouettes".into(),
                "Religious observances shape campaign timing — plan around Ramadan and Eid".into(),
                "Avoid alcohol references and mixed-gender social scenes in imagery".into(),
                "Family approval strongly influences luxury purchases".into(),
            ],
            guidance: vec![
                note("green", "carries religious significance; use respectfully, never as a novelty accent"),
                note("gold", "signals luxury and hospitality; strong fit for premium positioning"),
                note("white", "purity and formality; dominant in traditional menswear"),
                note("black", "elegance and tradition; the abaya palette, safe for womenswear"),
                note("crescent and star", "religious symbol — do not use as decoration"),
            ],
            tone: "Formal and family-oriented; respect tradition while celebrating the growing \
                   local fashion scene"
                .into(),
        },
        CulturalProfile {
            region: "United Arab Emirates".into(),
            sensitivities: vec![
                "Cosmopolitan audience, but modesty guidelines still apply in public imagery".into(),
                "Campaigns often run bilingually — Arabic copy is expected, not optional".into(),
            ],
            guidance: vec![
                note("gold", "aspirational luxury, widely used in retail"),
                note("red", "festive but assertive; test with local panels before leading with it"),
            ],
            tone: "Polished and international with clear local respect markers".into(),
        },
        CulturalProfile {
            region: "Japan".into(),
            sensitivities: vec![
                "Understatement outperforms exaggeration; avoid superlative-heavy claims".into(),
                "Seasonal framing matters — align launches with seasonal motifs".into(),
            ],
            guidance: vec![
                note("white", "purity, but also mourning in formal contexts; pair carefully"),
                note("red", "auspicious and energetic; common in celebration campaigns"),
            ],
            tone: "Precise, quality-focused, quietly premium".into(),
        },
    ]
});

fn note(subject: &str, text: &str) -> GuidanceNote {
    GuidanceNote {
        subject: subject.into(),
        note: text.into(),
    }
}

/// The built-in profile set.
pub fn builtin_profiles() -> &'static [CulturalProfile] {
    &BUILTIN
}

/// Look up a profile by region name, case-insensitively.
pub fn find_profile(region: &str) -> Option<&'static CulturalProfile> {
    builtin_profiles()
        .iter()
        .find(|p| p.region.eq_ignore_ascii_case(region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_contains_primary_region() {
        let profile = find_profile("Saudi Arabia").expect("primary profile");
        assert!(!profile.sensitivities.is_empty());
        assert!(!profile.guidance.is_empty());
        assert!(!profile.tone.is_empty());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find_profile("saudi arabia").is_some());
        assert!(find_profile("JAPAN").is_some());
        assert!(find_profile("Atlantis").is_none());
    }
}
