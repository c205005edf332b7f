pub mod credentials;
pub mod endpoints;
pub mod message;

// Re-export the core data shapes for convenience
pub use credentials::Credentials;
pub use endpoints::MailEndpoints;
pub use message::{
    MessageDetail, MessagePage, MessageSummary, SentMessageDetail, SentMessageSummary, SentPage,
};
