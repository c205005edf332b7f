// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Config file overrides driving the discovery engine end to end.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mailscout::config::Settings;
    use mailscout::discovery::dns::MxResolver;
    use mailscout::discovery::probe::PortProber;
    use mailscout::discovery::{DiscoveryEngine, DiscoveryError};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Resolver standing in for a DNS outage.
    struct DeadDns;

    #[async_trait]
    impl MxResolver for DeadDns {
        async fn resolve_mx(&self, domain: &str) -> Result<Vec<String>, DiscoveryError> {
            Err(DiscoveryError::Resolution(format!(
                "no nameserver reachable for {}",
                domain
            )))
        }
    }

    struct ClosedPorts;

    #[async_trait]
    impl PortProber for ClosedPorts {
        async fn is_reachable(&self, _host: &str, _port: u16, _limit: Duration) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn config_file_pin_survives_dns_outage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(
            &path,
            r#"
[[discovery.overrides]]
domain = "branch-office.example"
imap_host = "mail.branch-office.example"
imap_port = 993
smtp_host = "mail.branch-office.example"
smtp_port = 587
"#,
        )
        .unwrap();

        let settings = Settings::new(path.to_str()).expect("Failed to load deploy settings");
        let engine = DiscoveryEngine::with_parts(
            Box::new(DeadDns),
            Box::new(ClosedPorts),
            settings.discovery.clone(),
        );

        // The pinned domain resolves from the file alone
        let endpoints = engine
            .discover("pat@branch-office.example")
            .await
            .expect("pinned domain should resolve offline");
        assert_eq!(
            endpoints.imap().unwrap(),
            ("mail.branch-office.example", 993)
        );
        assert_eq!(
            endpoints.smtp().unwrap(),
            ("mail.branch-office.example", 587)
        );

        // Every other domain still depends on DNS and fails loudly
        let other = engine.discover("pat@other.example").await;
        assert!(matches!(other, Err(DiscoveryError::Resolution(_))));
    }
}
