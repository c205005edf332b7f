//! Library core for MailScout.
//!
//! Given only an email address and password, MailScout locates the
//! provider's IMAP/SMTP endpoints (catalog lookup, MX-derived lookup,
//! heuristic probing), verifies the credentials on both protocols, and
//! then offers paginated mailbox reading, sent-folder resolution, and
//! HTML sending over the discovered endpoints.

pub mod auth;
pub mod config;
pub mod discovery;
pub mod error;
pub mod imap;
pub mod mailbox;
pub mod message;
pub mod models;
pub mod smtp;

pub use error::Error;

pub mod prelude {
    pub use crate::auth::{AuthError, CredentialVerifier};
    pub use crate::config::Settings;
    pub use crate::discovery::{DiscoveryEngine, DiscoveryError};
    pub use crate::error::Error;
    pub use crate::imap::ImapError;
    pub use crate::mailbox::Mailbox;
    pub use crate::models::{Credentials, MailEndpoints};
    pub use crate::smtp::SmtpError;
}
