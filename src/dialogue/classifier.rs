//! Keyword classifier
//!
//! Rules are checked in order against the lowercased text and the first
//! rule with any substring hit wins. Order matters: distress phrases must
//! shadow plain stress words, and mood words must shadow short greeting and
//! closing words that can appear inside them.

use super::Category;

const RULES: &[(Category, &[&str])] = &[
    (
        Category::SevereStress,
        &[
            "can't take",
            "too much",
            "overwhelm",
            "breaking",
            "falling apart",
            "panic",
        ],
    ),
    (
        Category::Happy,
        &["happy", "great", "amazing", "good", "wonderful", "excited"],
    ),
    (
        Category::Sad,
        &["sad", "down", "depressed", "lonely", "hurt", "crying"],
    ),
    (
        Category::Stressed,
        &["stress", "anxious", "anxiety", "worry", "nervous", "pressure"],
    ),
    (Category::Acceptance, &["yes", "sure", "okay", "please"]),
    (Category::Decline, &["no", "not now", "maybe later"]),
    (
        Category::Breathing,
        &["breath", "calm", "relax", "meditation"],
    ),
    (Category::Closing, &["bye", "thank", "better", "helped"]),
    (Category::Greeting, &["hi", "hello", "hey"]),
];

/// Classify a user utterance. Total and deterministic.
pub fn classify(text: &str) -> Category {
    let folded = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| folded.contains(k)))
        .map_or(Category::General, |(category, _)| *category)
}
