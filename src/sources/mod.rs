// src/sources/mod.rs
//! Source adapters. Every adapter maps its upstream into [`Opportunity`](crate::types::Opportunity)
//! and reports failure as an empty list.

pub mod backend;
pub mod curated;
pub mod github;
pub mod synthetic;

pub use backend::{BackendSource, ListingChannel};
pub use github::GitHubSource;
pub use synthetic::SyntheticSource;
