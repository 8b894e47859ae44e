pub mod chat;
pub mod opportunity;

pub use chat::{ChatMessage, ChatRole};
pub use opportunity::Opportunity;
