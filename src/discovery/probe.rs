// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use futures::future::join_all;
use log::debug;
#[cfg(test)]
use mockall::automock;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// TCP reachability check used by the heuristic discovery fallback.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PortProber: Send + Sync {
    /// True when a TCP connect to `host:port` completes within `limit`.
    /// DNS failure, refusal and timeout all count as unreachable; there
    /// is no retry at this layer.
    async fn is_reachable(&self, host: &str, port: u16, limit: Duration) -> bool;
}

pub struct TcpProber;

#[async_trait]
impl PortProber for TcpProber {
    async fn is_reachable(&self, host: &str, port: u16, limit: Duration) -> bool {
        match timeout(limit, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => {
                debug!("Probe {}:{} reachable", host, port);
                true
            }
            Ok(Err(e)) => {
                debug!("Probe {}:{} failed: {}", host, port, e);
                false
            }
            Err(_elapsed) => {
                debug!("Probe {}:{} timed out after {:?}", host, port, limit);
                false
            }
        }
    }
}

/// Probes every candidate concurrently, then picks the winner by scanning
/// results in candidate order. Concurrency bounds the worst-case latency
/// to one timeout; the ordered scan keeps the outcome deterministic when
/// several candidates are reachable.
pub async fn probe_first(
    prober: &dyn PortProber,
    candidates: &[(String, u16)],
    limit: Duration,
) -> Option<(String, u16)> {
    let checks = candidates
        .iter()
        .map(|(host, port)| prober.is_reachable(host, *port, limit));
    let results = join_all(checks).await;

    candidates
        .iter()
        .zip(results)
        .find(|(_, reachable)| *reachable)
        .map(|((host, port), _)| (host.clone(), *port))
}
