// src/sources/github.rs
use anyhow::Result;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::SourcesConfig;
use crate::core::ServiceClient;
use crate::types::Opportunity;

const SEARCH_ENDPOINT: &str = "/search/repositories";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const PER_PAGE: &str = "10";
const DEFAULT_QUERY: &str = "good-first-issues:>0 help-wanted-issues:>0";

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubSearchResponse {
    pub items: Vec<GitHubRepo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub owner: GitHubOwner,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubOwner {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Open-source repositories with good first issues, from the GitHub search API.
pub struct GitHubSource {
    client: ServiceClient,
}

impl GitHubSource {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        let client = ServiceClient::with_headers(
            &config.github_api_url,
            config.timeout_seconds,
            GITHUB_ACCEPT,
            config.github_token.as_deref(),
        )?;
        Ok(Self { client })
    }

    /// Fetch up to ten recently updated repositories; any failure yields an empty list
    pub async fn fetch(&self, search_query: &str) -> Vec<Opportunity> {
        let query = build_query(search_query);
        let params = [
            ("q", query.as_str()),
            ("sort", "updated"),
            ("order", "desc"),
            ("per_page", PER_PAGE),
        ];

        match self
            .client
            .get_json::<GitHubSearchResponse>(SEARCH_ENDPOINT, &params)
            .await
        {
            Ok(response) => {
                info!("GitHub search returned {} repositories", response.items.len());
                response.items.into_iter().map(map_repo).collect()
            }
            Err(e) => {
                warn!("Error fetching GitHub opportunities: {:#}", e);
                Vec::new()
            }
        }
    }
}

pub(crate) fn build_query(search_query: &str) -> String {
    let trimmed = search_query.trim();
    if trimmed.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        format!("{} in:name,description,readme good-first-issues:>0", trimmed)
    }
}

pub(crate) fn map_repo(repo: GitHubRepo) -> Opportunity {
    let tags = repo
        .language
        .into_iter()
        .chain(repo.topics)
        .filter(|tag| !tag.is_empty())
        .collect();

    Opportunity {
        id: format!("gh-{}", repo.id),
        title: repo.name,
        organization: repo.owner.login,
        kind: "Open Source".to_string(),
        deadline: "Ongoing".to_string(),
        eligibility: "Open to all contributors".to_string(),
        link: repo.html_url,
        description: repo
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "No description available".to_string()),
        category: "Technology".to_string(),
        source: "GitHub".to_string(),
        location: Some("Remote".to_string()),
        tags,
        logo: repo.owner.avatar_url,
        posted: None,
    }
}
