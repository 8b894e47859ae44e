// src/chat/mod.rs
pub mod client;
pub mod error;
pub mod prompt;

pub use client::ChatClient;
pub use error::ChatError;
