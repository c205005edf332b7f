use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::MailEndpoints;

/// Known-good endpoints for one well-known provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderEntry {
    pub imap_host: &'static str,
    pub imap_port: u16,
    pub smtp_host: &'static str,
    pub smtp_port: u16,
}

impl ProviderEntry {
    pub fn endpoints(&self) -> MailEndpoints {
        MailEndpoints::new(self.imap_host, self.imap_port, self.smtp_host, self.smtp_port)
    }
}

/// The provider table lives here as data so adding a provider never
/// touches lookup logic.
const PROVIDERS: &[(&str, ProviderEntry)] = &[
    (
        "gmail.com",
        ProviderEntry {
            imap_host: "imap.gmail.com",
            imap_port: 993,
            smtp_host: "smtp.gmail.com",
            smtp_port: 587,
        },
    ),
    (
        "yahoo.com",
        ProviderEntry {
            imap_host: "imap.mail.yahoo.com",
            imap_port: 993,
            smtp_host: "smtp.mail.yahoo.com",
            smtp_port: 587,
        },
    ),
    (
        "outlook.com",
        ProviderEntry {
            imap_host: "outlook.office365.com",
            imap_port: 993,
            smtp_host: "smtp.office365.com",
            smtp_port: 587,
        },
    ),
    (
        "icloud.com",
        ProviderEntry {
            imap_host: "imap.mail.me.com",
            imap_port: 993,
            smtp_host: "smtp.mail.me.com",
            smtp_port: 587,
        },
    ),
    (
        "zoho.com",
        ProviderEntry {
            imap_host: "imap.zoho.com",
            imap_port: 993,
            smtp_host: "smtp.zoho.com",
            smtp_port: 587,
        },
    ),
];

lazy_static! {
    static ref PROVIDER_MAP: HashMap<&'static str, ProviderEntry> =
        PROVIDERS.iter().copied().collect();
}

/// Exact-domain lookup into the provider catalog.
pub fn lookup(domain: &str) -> Option<MailEndpoints> {
    PROVIDER_MAP
        .get(domain.to_ascii_lowercase().as_str())
        .map(ProviderEntry::endpoints)
}
