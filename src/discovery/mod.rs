// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mail endpoint discovery for arbitrary domains.
//!
//! Resolution runs MX lookup first, then a fixed chain of strategies:
//! catalog match on the literal domain, catalog match on the MX-derived
//! registrable domain, and finally heuristic host/port probing. Static
//! per-deployment overrides are consulted before any of that, so a
//! pinned domain works even when its DNS does not.

pub mod catalog;
pub mod dns;
pub mod probe;

use log::{debug, info};
use thiserror::Error;

use crate::config::DiscoveryConfig;
use crate::models::MailEndpoints;
use dns::{HickoryMxResolver, MxResolver};
use probe::{probe_first, PortProber, TcpProber};

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
    #[error("No MX records found for domain: {0}")]
    NoMxRecords(String),
    #[error("DNS lookup failed: {0}")]
    Resolution(String),
    #[error("Discovered endpoints are missing {0}")]
    EndpointsIncomplete(&'static str),
}

/// One step of the endpoint lookup chain. Kept as data so the order is
/// visible in one place and new strategies slot in without touching the
/// engine loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    CatalogLiteral,
    CatalogDerived,
    HeuristicProbe,
}

const STRATEGY_CHAIN: &[Strategy] = &[
    Strategy::CatalogLiteral,
    Strategy::CatalogDerived,
    Strategy::HeuristicProbe,
];

// Candidate tables for the probing fallback. Host-major order: every
// port of a host is tried before the next host, and earlier entries win
// ties.
const IMAP_HOST_PREFIXES: &[&str] = &["imap", "mail"];
const IMAP_PORTS: &[u16] = &[993, 143];
const SMTP_HOST_PREFIXES: &[&str] = &["smtp", "mail"];
const SMTP_PORTS: &[u16] = &[465, 587, 25];

pub struct DiscoveryEngine {
    resolver: Box<dyn MxResolver>,
    prober: Box<dyn PortProber>,
    settings: DiscoveryConfig,
}

impl DiscoveryEngine {
    pub fn new(settings: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        Ok(Self {
            resolver: Box::new(HickoryMxResolver::new()?),
            prober: Box::new(TcpProber),
            settings,
        })
    }

    /// Build an engine from explicit parts. Tests inject mock resolvers
    /// and probers through this.
    pub fn with_parts(
        resolver: Box<dyn MxResolver>,
        prober: Box<dyn PortProber>,
        settings: DiscoveryConfig,
    ) -> Self {
        Self {
            resolver,
            prober,
            settings,
        }
    }

    /// Resolve the mail endpoints for an email address.
    ///
    /// Fields the chain could not resolve stay `None` in the returned
    /// endpoints; callers check completeness before verification.
    pub async fn discover(&self, address: &str) -> Result<MailEndpoints, DiscoveryError> {
        let domain = extract_domain(address)?;
        info!("Starting endpoint discovery for domain: {}", domain);

        // A pinned deployment has to keep working when its DNS is
        // broken, so overrides run before MX resolution.
        if let Some(endpoints) = self.static_override(domain) {
            info!("Using static endpoint override for {}", domain);
            return Ok(endpoints);
        }

        let mx_hosts = self.resolver.resolve_mx(domain).await?;
        let mx_host = mx_hosts
            .first()
            .ok_or_else(|| DiscoveryError::NoMxRecords(domain.to_string()))?;
        let derived_domain = derive_registrable_domain(mx_host);
        debug!("MX host {} derives lookup domain {}", mx_host, derived_domain);

        for strategy in STRATEGY_CHAIN {
            if let Some(endpoints) = self.apply(*strategy, domain, &derived_domain).await {
                info!("Strategy {:?} resolved endpoints for {}", strategy, domain);
                return Ok(endpoints);
            }
            debug!("Strategy {:?} had no answer for {}", strategy, domain);
        }

        // Only reachable with a chain that does not end in the probing
        // fallback; the caller sees the same incomplete-endpoints shape.
        Ok(MailEndpoints::empty())
    }

    async fn apply(
        &self,
        strategy: Strategy,
        domain: &str,
        derived_domain: &str,
    ) -> Option<MailEndpoints> {
        match strategy {
            Strategy::CatalogLiteral => catalog::lookup(domain),
            Strategy::CatalogDerived => catalog::lookup(derived_domain),
            Strategy::HeuristicProbe => Some(self.probe_candidates(derived_domain).await),
        }
    }

    fn static_override(&self, domain: &str) -> Option<MailEndpoints> {
        self.settings
            .overrides
            .iter()
            .find(|o| o.domain.eq_ignore_ascii_case(domain))
            .map(|o| {
                MailEndpoints::new(
                    o.imap_host.clone(),
                    o.imap_port,
                    o.smtp_host.clone(),
                    o.smtp_port,
                )
            })
    }

    /// Heuristic fallback: probe the conventional subdomains of the
    /// MX-derived domain. Either side may stay unresolved.
    async fn probe_candidates(&self, domain: &str) -> MailEndpoints {
        let limit = std::time::Duration::from_secs(self.settings.probe_timeout_secs);
        let imap_candidates = candidate_pairs(IMAP_HOST_PREFIXES, domain, IMAP_PORTS);
        let smtp_candidates = candidate_pairs(SMTP_HOST_PREFIXES, domain, SMTP_PORTS);

        let (imap_winner, smtp_winner) = tokio::join!(
            probe_first(self.prober.as_ref(), &imap_candidates, limit),
            probe_first(self.prober.as_ref(), &smtp_candidates, limit),
        );

        let mut endpoints = MailEndpoints::empty();
        if let Some((host, port)) = imap_winner {
            debug!("Probe selected IMAP endpoint {}:{}", host, port);
            endpoints.imap_host = Some(host);
            endpoints.imap_port = Some(port);
        }
        if let Some((host, port)) = smtp_winner {
            debug!("Probe selected SMTP endpoint {}:{}", host, port);
            endpoints.smtp_host = Some(host);
            endpoints.smtp_port = Some(port);
        }
        endpoints
    }
}

fn extract_domain(address: &str) -> Result<&str, DiscoveryError> {
    address
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .ok_or_else(|| DiscoveryError::InvalidAddress(address.to_string()))
}

/// Last two dot-separated labels of an MX host. MX exchanges routinely
/// live under a suite vendor's domain, so this is the secondary catalog
/// key and the base for probe candidates.
fn derive_registrable_domain(mx_host: &str) -> String {
    let labels: Vec<&str> = mx_host.split('.').collect();
    if labels.len() >= 2 {
        format!(
            "{}.{}",
            labels[labels.len() - 2],
            labels[labels.len() - 1]
        )
    } else {
        mx_host.to_string()
    }
}

fn candidate_pairs(prefixes: &[&str], domain: &str, ports: &[u16]) -> Vec<(String, u16)> {
    let mut pairs = Vec::with_capacity(prefixes.len() * ports.len());
    for prefix in prefixes {
        let host = format!("{}.{}", prefix, domain);
        for port in ports {
            pairs.push((host.clone(), *port));
        }
    }
    pairs
}
