use thiserror::Error;

use crate::auth::AuthError;
use crate::discovery::DiscoveryError;
use crate::imap::error::ImapError;
use crate::smtp::SmtpError;

/// Crate-wide error type aggregating the per-subsystem errors.
///
/// Discovery and verification failures are fatal to their operation and
/// surface here as structured variants; per-message failures inside a
/// listing are handled lower down (skipped with a warning) and never
/// reach this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("IMAP error: {0}")]
    Imap(#[from] ImapError),

    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
