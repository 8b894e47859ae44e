// src/sources/backend.rs
use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::SourcesConfig;
use crate::core::ServiceClient;
use crate::types::Opportunity;

/// The internal listing endpoints, one per upstream board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingChannel {
    IndeedJobs,
    Internships,
    Volunteer,
    LinkedInJobs,
}

impl ListingChannel {
    pub const ALL: [ListingChannel; 4] = [
        ListingChannel::IndeedJobs,
        ListingChannel::Internships,
        ListingChannel::Volunteer,
        ListingChannel::LinkedInJobs,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            ListingChannel::IndeedJobs => "/api/indeed-jobs",
            ListingChannel::Internships => "/api/internships",
            ListingChannel::Volunteer => "/api/volunteer",
            ListingChannel::LinkedInJobs => "/api/linkedin-jobs",
        }
    }

    /// Channel whose prefix an aggregated id carries, e.g. `int` for `int-9`
    pub fn from_id(id: &str) -> Option<ListingChannel> {
        let (prefix, rest) = id.split_once('-')?;
        if rest.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|c| c.id_prefix() == prefix)
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            ListingChannel::IndeedJobs => "in",
            ListingChannel::Internships => "int",
            ListingChannel::Volunteer => "vol",
            ListingChannel::LinkedInJobs => "li",
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ListingChannel::IndeedJobs | ListingChannel::LinkedInJobs => "Job",
            ListingChannel::Internships => "Internship",
            ListingChannel::Volunteer => "Volunteer",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            ListingChannel::IndeedJobs => "Indeed",
            ListingChannel::Internships => "Internships",
            ListingChannel::Volunteer => "Volunteer",
            ListingChannel::LinkedInJobs => "LinkedIn",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            ListingChannel::Volunteer => "Social",
            _ => "Work",
        }
    }
}

impl fmt::Display for ListingChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BackendResponse {
    #[serde(default)]
    pub items: Vec<BackendListing>,
}

// Job boards send `company*`, the volunteer board sends `organization*` and `categories`
#[derive(Debug, Deserialize)]
pub(crate) struct BackendListing {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "organization")]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub posted_at: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "categories")]
    pub skills: Option<Vec<String>>,
    #[serde(default, alias = "organization_logo")]
    pub company_logo: Option<String>,
}

/// Adapter over the internal listings backend. Unconfigured means always empty.
pub struct BackendSource {
    client: Option<ServiceClient>,
}

impl BackendSource {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        let client = match &config.backend_url {
            Some(url) => Some(ServiceClient::new(url, config.timeout_seconds)?),
            None => None,
        };
        Ok(Self { client })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Fetch one channel; network or shape errors yield an empty list
    pub async fn fetch(&self, channel: ListingChannel, location: &str) -> Vec<Opportunity> {
        let Some(client) = &self.client else {
            debug!("No listings backend configured, skipping {}", channel);
            return Vec::new();
        };

        match client
            .get_json::<BackendResponse>(channel.endpoint(), &[("location", location)])
            .await
        {
            Ok(response) => {
                info!("{} returned {} listings", channel, response.items.len());
                map_listings(channel, response.items)
            }
            Err(e) => {
                warn!("Error fetching {}: {:#}", channel, e);
                Vec::new()
            }
        }
    }
}

pub(crate) fn map_listings(channel: ListingChannel, items: Vec<BackendListing>) -> Vec<Opportunity> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.as_ref().and_then(id_string);
            if id.is_none() {
                warn!("Skipping {} listing without an id", channel);
            }
            id.map(|id| map_listing(channel, &id, item))
        })
        .collect()
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn map_listing(channel: ListingChannel, id: &str, item: BackendListing) -> Opportunity {
    Opportunity {
        id: format!("{}-{}", channel.id_prefix(), id),
        title: item.title.unwrap_or_else(|| "Untitled listing".to_string()),
        organization: item.company.unwrap_or_default(),
        kind: channel.kind().to_string(),
        deadline: item.deadline.unwrap_or_else(|| "Rolling".to_string()),
        eligibility: "See listing for requirements".to_string(),
        link: item.url.unwrap_or_default(),
        description: item.description.unwrap_or_default(),
        category: channel.category().to_string(),
        source: channel.source().to_string(),
        location: item.location.filter(|l| !l.trim().is_empty()),
        tags: item.skills.unwrap_or_default(),
        logo: item.company_logo,
        posted: item.posted_at,
    }
}
