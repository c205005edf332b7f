use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryError;

/// Resolved mail server endpoints for one provider.
///
/// Produced by the discovery engine. Fields stay `None` when a lookup
/// strategy could not resolve them; callers must check completeness
/// before attempting verification or any protocol operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailEndpoints {
    pub imap_host: Option<String>,
    pub imap_port: Option<u16>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
}

impl MailEndpoints {
    pub fn new(
        imap_host: impl Into<String>,
        imap_port: u16,
        smtp_host: impl Into<String>,
        smtp_port: u16,
    ) -> Self {
        Self {
            imap_host: Some(imap_host.into()),
            imap_port: Some(imap_port),
            smtp_host: Some(smtp_host.into()),
            smtp_port: Some(smtp_port),
        }
    }

    pub fn empty() -> Self {
        Self {
            imap_host: None,
            imap_port: None,
            smtp_host: None,
            smtp_port: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.imap_host.is_some()
            && self.imap_port.is_some()
            && self.smtp_host.is_some()
            && self.smtp_port.is_some()
    }

    /// IMAP host and port, or which field is missing.
    pub fn imap(&self) -> Result<(&str, u16), DiscoveryError> {
        let host = self
            .imap_host
            .as_deref()
            .ok_or(DiscoveryError::EndpointsIncomplete("imap_host"))?;
        let port = self
            .imap_port
            .ok_or(DiscoveryError::EndpointsIncomplete("imap_port"))?;
        Ok((host, port))
    }

    /// SMTP host and port, or which field is missing.
    pub fn smtp(&self) -> Result<(&str, u16), DiscoveryError> {
        let host = self
            .smtp_host
            .as_deref()
            .ok_or(DiscoveryError::EndpointsIncomplete("smtp_host"))?;
        let port = self
            .smtp_port
            .ok_or(DiscoveryError::EndpointsIncomplete("smtp_port"))?;
        Ok((host, port))
    }
}
