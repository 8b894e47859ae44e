// src/types/opportunity.rs
use serde::{Deserialize, Serialize};

/// A single listing normalized from any source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub organization: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub deadline: String,
    pub eligibility: String,
    pub link: String,
    pub description: String,
    pub category: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted: Option<String>,
}

impl Opportunity {
    /// Case-insensitive match of `term` against title, description or organization.
    pub fn matches_text(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [&self.title, &self.description, &self.organization]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    /// Like [`matches_text`](Self::matches_text) but tags count too.
    pub fn matches_text_or_tag(&self, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.matches_text(term)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&lowered))
    }

    pub fn is_remote(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|loc| loc.trim().eq_ignore_ascii_case("remote"))
    }
}
