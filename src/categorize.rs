//! Keyword-based content categorization.
//!
//! Scores Markdown text against a small taxonomy by counting keyword hits.
//! Purely lexical; no stemming or weighting beyond raw counts.

use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default taxonomy: category name -> keywords.
fn default_taxonomy() -> Vec<(String, Vec<String>)> {
    let raw: &[(&str, &[&str])] = &[
        ("api", &["api", "endpoint", "request", "response", "parameter", "rest", "json"]),
        ("guide", &["guide", "how to", "step", "setup", "install", "configure"]),
        ("reference", &["reference", "specification", "definition", "syntax", "schema"]),
        ("tutorial", &["tutorial", "example", "walkthrough", "lesson", "exercise"]),
        ("architecture", &["architecture", "design", "component", "diagram", "overview", "system"]),
        ("data", &["table", "dataset", "column", "row", "value", "statistics", "figure"]),
    ];
    raw.iter()
        .map(|(name, words)| {
            (name.to_string(), words.iter().map(|w| w.to_string()).collect())
        })
        .collect()
}

/// One scored category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryScore {
    /// Category name
    pub category: String,
    /// Total keyword occurrences
    pub score: usize,
    /// Keywords that actually occurred, with their counts
    pub matched_keywords: BTreeMap<String, usize>,
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Score `text` against `categories` (name, keywords) pairs and return
/// categories with at least one hit, highest score first. Matching is
/// case-insensitive and substring-based.
pub fn categorize(text: &str, categories: &[(String, Vec<String>)]) -> Vec<CategoryScore> {
    let lowered = text.to_lowercase();

    let mut scores: Vec<CategoryScore> = categories
        .iter()
        .map(|(name, keywords)| {
            let mut matched = BTreeMap::new();
            for keyword in keywords {
                let count = count_occurrences(&lowered, &keyword.to_lowercase());
                if count > 0 {
                    matched.insert(keyword.clone(), count);
                }
            }
            CategoryScore {
                category: name.clone(),
                score: matched.values().sum(),
                matched_keywords: matched,
            }
        })
        .filter(|s| s.score > 0)
        .collect();

    scores.sort_by(|a, b| b.score.cmp(&a.score).then(a.category.cmp(&b.category)));
    scores
}

/// Score `text` against the built-in taxonomy.
pub fn categorize_default(text: &str) -> Vec<CategoryScore> {
    categorize(text, &default_taxonomy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn api_heavy_text_ranks_api_first() {
        let text = "The API exposes an endpoint. Each request returns a JSON response.";
        let scores = categorize_default(text);
        assert_eq!(scores[0].category, "api");
        assert!(scores[0].score >= 4);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let scores = categorize_default("TUTORIAL with an EXAMPLE");
        assert_eq!(scores[0].category, "tutorial");
        assert_eq!(scores[0].score, 2);
    }

    #[test]
    fn unmatched_categories_are_omitted() {
        let scores = categorize_default("nothing relevant here at all");
        assert!(scores.iter().all(|s| s.score > 0));
    }

    #[test]
    fn custom_categories_override_taxonomy() {
        let categories = vec![("fruit".to_string(), vec!["apple".to_string(), "pear".to_string()])];
        let scores = categorize("apple apple pear", &categories);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 3);
        assert_eq!(scores[0].matched_keywords["apple"], 2);
    }

    #[test]
    fn empty_text_matches_nothing() {
        assert!(categorize_default("").is_empty());
    }

    #[test]
    fn ties_break_alphabetically() {
        let categories = vec![
            ("zeta".to_string(), vec!["x".to_string()]),
            ("alpha".to_string(), vec!["x".to_string()]),
        ];
        let scores = categorize("x", &categories);
        assert_eq!(scores[0].category, "alpha");
    }
}
