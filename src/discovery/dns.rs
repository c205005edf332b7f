use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use log::debug;
#[cfg(test)]
use mockall::automock;

use crate::discovery::DiscoveryError;

/// Narrow DNS seam used by the discovery engine.
///
/// Only MX resolution is needed here; hiding the resolver behind a trait
/// keeps the engine testable without live DNS.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// MX exchange hosts for `domain`, best preference first, lowercased,
    /// with any trailing dot trimmed. An empty answer is an error.
    async fn resolve_mx(&self, domain: &str) -> Result<Vec<String>, DiscoveryError>;
}

/// `MxResolver` backed by the system resolver configuration.
pub struct HickoryMxResolver {
    resolver: TokioResolver,
}

impl HickoryMxResolver {
    pub fn new() -> Result<Self, DiscoveryError> {
        // Use default system resolver configuration with Tokio runtime
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| DiscoveryError::Resolution(e.to_string()))?
            .build();
        Ok(Self { resolver })
    }
}

#[async_trait]
impl MxResolver for HickoryMxResolver {
    async fn resolve_mx(&self, domain: &str) -> Result<Vec<String>, DiscoveryError> {
        let lookup = self
            .resolver
            .mx_lookup(domain)
            .await
            .map_err(|e| DiscoveryError::Resolution(e.to_string()))?;

        let mut records: Vec<(u16, String)> = lookup
            .iter()
            .map(|mx| {
                let host = mx
                    .exchange()
                    .to_string()
                    .trim_end_matches('.')
                    .to_lowercase();
                (mx.preference(), host)
            })
            .collect();
        // Preference order, name as tie-break, so repeated lookups under
        // unchanged DNS state pick the same exchange
        records.sort();

        let hosts: Vec<String> = records.into_iter().map(|(_, host)| host).collect();
        debug!("MX records for {}: {:?}", domain, hosts);

        if hosts.is_empty() {
            return Err(DiscoveryError::NoMxRecords(domain.to_string()));
        }
        Ok(hosts)
    }
}
