//! Opportunity aggregation and the OppGenie chat assistant.

pub mod aggregator;
pub mod chat;
pub mod cli;
pub mod config;
pub mod core;
pub mod output;
pub mod sources;
pub mod types;

pub use aggregator::{Aggregator, LatestFilter, TRENDING_LIMIT};
pub use chat::{ChatClient, ChatError};
pub use config::ConfigManager;
pub use types::{ChatMessage, ChatRole, Opportunity};

/// Log through `tracing` with the level given as the first token.
#[macro_export]
macro_rules! app_log {
    (trace, $($arg:tt)+) => { ::tracing::trace!($($arg)+) };
    (debug, $($arg:tt)+) => { ::tracing::debug!($($arg)+) };
    (info, $($arg:tt)+) => { ::tracing::info!($($arg)+) };
    (warn, $($arg:tt)+) => { ::tracing::warn!($($arg)+) };
    (error, $($arg:tt)+) => { ::tracing::error!($($arg)+) };
}
