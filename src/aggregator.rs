// src/aggregator.rs
//! Combines every source into one batch and applies the client-side filters

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::info;

use crate::config::SourcesConfig;
use crate::sources::{curated, BackendSource, GitHubSource, ListingChannel, SyntheticSource};
use crate::types::Opportunity;

pub const TRENDING_LIMIT: usize = 10;

/// Filter for the latest-listings view
#[derive(Debug, Clone, Default)]
pub struct LatestFilter {
    /// Exact type, compared case-insensitively
    pub kind: Option<String>,
    /// Matches title, organization, description or any tag
    pub term: Option<String>,
    /// Forwarded to the backend channels and applied to the merged batch
    pub location: Option<String>,
}

pub struct Aggregator {
    github: GitHubSource,
    backend: BackendSource,
    synthetic: SyntheticSource,
}

impl Aggregator {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        Ok(Self::from_sources(
            GitHubSource::new(config)?,
            BackendSource::new(config)?,
            SyntheticSource::new(config.synthetic_count),
        ))
    }

    pub fn from_sources(
        github: GitHubSource,
        backend: BackendSource,
        synthetic: SyntheticSource,
    ) -> Self {
        Self {
            github,
            backend,
            synthetic,
        }
    }

    /// GitHub results, then curated, then generated placeholders; optionally location-filtered
    pub async fn fetch_all(&self, query: &str, location: &str) -> Vec<Opportunity> {
        let mut all = self.github.fetch(query).await;
        all.extend(curated::featured());
        if self.synthetic.is_enabled() {
            all.extend(self.synthetic.generate());
        }

        let all = dedupe_by_id(all);
        info!("Aggregated {} opportunities", all.len());

        if location.trim().is_empty() {
            all
        } else {
            filter_by_location(all, location)
        }
    }

    /// Records whose title, description or organization contains `query`
    pub async fn search(&self, query: &str) -> Vec<Opportunity> {
        let all = self.fetch_all("", "").await;
        search_in(all, query)
    }

    /// Up to [`TRENDING_LIMIT`] records picked uniformly at random
    pub async fn trending(&self) -> Vec<Opportunity> {
        let all = self.fetch_all("", "").await;
        select_trending(all, &mut rand::rng())
    }

    /// Curated recent listings plus every backend channel, filtered
    pub async fn latest(&self, filter: &LatestFilter) -> Vec<Opportunity> {
        let location = filter.location.as_deref().unwrap_or("");
        let (indeed, internships, volunteer, linkedin) = tokio::join!(
            self.backend.fetch(ListingChannel::IndeedJobs, location),
            self.backend.fetch(ListingChannel::Internships, location),
            self.backend.fetch(ListingChannel::Volunteer, location),
            self.backend.fetch(ListingChannel::LinkedInJobs, location),
        );

        let mut all = curated::latest();
        all.extend(indeed);
        all.extend(internships);
        all.extend(volunteer);
        all.extend(linkedin);

        apply_latest_filter(dedupe_by_id(all), filter)
    }

    /// Look up a single record in a fresh batch; backend ids go to their own channel
    pub async fn find(&self, id: &str) -> Option<Opportunity> {
        if let Some(channel) = ListingChannel::from_id(id) {
            return self
                .backend
                .fetch(channel, "")
                .await
                .into_iter()
                .find(|o| o.id == id);
        }

        let latest = curated::latest();
        if let Some(found) = latest.into_iter().find(|o| o.id == id) {
            return Some(found);
        }
        self.fetch_all("", "").await.into_iter().find(|o| o.id == id)
    }
}

/// Keep the first record for each id
pub fn dedupe_by_id(opportunities: Vec<Opportunity>) -> Vec<Opportunity> {
    let mut seen = HashSet::new();
    opportunities
        .into_iter()
        .filter(|o| seen.insert(o.id.clone()))
        .collect()
}

/// Case-insensitive substring match on `location`; "Remote" always matches
pub fn filter_by_location(opportunities: Vec<Opportunity>, location: &str) -> Vec<Opportunity> {
    let needle = location.trim().to_lowercase();
    if needle.is_empty() {
        return opportunities;
    }

    opportunities
        .into_iter()
        .filter(|o| match &o.location {
            Some(loc) => o.is_remote() || loc.to_lowercase().contains(&needle),
            None => false,
        })
        .collect()
}

pub fn search_in(opportunities: Vec<Opportunity>, query: &str) -> Vec<Opportunity> {
    let query = query.trim();
    if query.is_empty() {
        return opportunities;
    }
    opportunities
        .into_iter()
        .filter(|o| o.matches_text(query))
        .collect()
}

/// Fisher-Yates shuffle, then the first [`TRENDING_LIMIT`].
/// Accepts any batch; duplicate ids are dropped first.
pub fn select_trending<R: Rng + ?Sized>(
    opportunities: Vec<Opportunity>,
    rng: &mut R,
) -> Vec<Opportunity> {
    let mut picked = dedupe_by_id(opportunities);
    picked.shuffle(rng);
    picked.truncate(TRENDING_LIMIT);
    picked
}

pub fn apply_latest_filter(opportunities: Vec<Opportunity>, filter: &LatestFilter) -> Vec<Opportunity> {
    let kind = filter
        .kind
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());
    let term = filter
        .term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let location = filter.location.as_deref().unwrap_or("");

    filter_by_location(opportunities, location)
        .into_iter()
        .filter(|o| kind.map_or(true, |k| o.kind.eq_ignore_ascii_case(k)))
        .filter(|o| term.map_or(true, |t| o.matches_text_or_tag(t)))
        .collect()
}
