// src/core/mod.rs
//! Core plumbing shared by the listing sources

pub mod service_client;

pub use service_client::ServiceClient;
