#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mailscout::config::{DiscoveryConfig, StaticOverride};
    use mailscout::discovery::dns::MxResolver;
    use mailscout::discovery::probe::PortProber;
    use mailscout::discovery::{DiscoveryEngine, DiscoveryError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Resolver that answers every lookup with a fixed MX host list and
    /// counts how often it was asked.
    struct FixedMx {
        hosts: Vec<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MxResolver for FixedMx {
        async fn resolve_mx(&self, domain: &str) -> Result<Vec<String>, DiscoveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hosts.is_empty() {
                return Err(DiscoveryError::NoMxRecords(domain.to_string()));
            }
            Ok(self.hosts.iter().map(|h| h.to_string()).collect())
        }
    }

    /// Prober where only the listed host:port pairs accept connections.
    struct OpenPorts {
        open: Vec<(&'static str, u16)>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PortProber for OpenPorts {
        async fn is_reachable(&self, host: &str, port: u16, _limit: Duration) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.open.iter().any(|(h, p)| *h == host && *p == port)
        }
    }

    fn engine_with(
        hosts: Vec<&'static str>,
        open: Vec<(&'static str, u16)>,
    ) -> (DiscoveryEngine, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let mx_calls = Arc::new(AtomicUsize::new(0));
        let probe_calls = Arc::new(AtomicUsize::new(0));
        let engine = DiscoveryEngine::with_parts(
            Box::new(FixedMx {
                hosts,
                calls: mx_calls.clone(),
            }),
            Box::new(OpenPorts {
                open,
                calls: probe_calls.clone(),
            }),
            DiscoveryConfig::default(),
        );
        (engine, mx_calls, probe_calls)
    }

    #[tokio::test]
    async fn known_provider_resolves_without_probing() {
        let (engine, _, probe_calls) = engine_with(vec!["gmail-smtp-in.l.google.com"], vec![]);

        let endpoints = engine.discover("someone@gmail.com").await.unwrap();

        assert_eq!(endpoints.imap().unwrap(), ("imap.gmail.com", 993));
        assert_eq!(endpoints.smtp().unwrap(), ("smtp.gmail.com", 587));
        assert_eq!(probe_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mx_derived_domain_reaches_the_provider_table() {
        // Custom domain hosted on iCloud: the MX exchange lives under
        // icloud.com even though the login domain does not.
        let (engine, _, _) = engine_with(vec!["mx01.mail.icloud.com"], vec![]);

        let endpoints = engine.discover("anna@family-blog.example").await.unwrap();

        assert_eq!(endpoints.imap().unwrap(), ("imap.mail.me.com", 993));
        assert_eq!(endpoints.smtp().unwrap(), ("smtp.mail.me.com", 587));
    }

    #[tokio::test]
    async fn pinned_domain_skips_dns_entirely() {
        let mx_calls = Arc::new(AtomicUsize::new(0));
        let settings = DiscoveryConfig {
            overrides: vec![StaticOverride {
                domain: "corp.example".to_string(),
                imap_host: "groupware.corp.example".to_string(),
                imap_port: 143,
                smtp_host: "groupware.corp.example".to_string(),
                smtp_port: 25,
            }],
            ..DiscoveryConfig::default()
        };
        let engine = DiscoveryEngine::with_parts(
            Box::new(FixedMx {
                hosts: vec![],
                calls: mx_calls.clone(),
            }),
            Box::new(OpenPorts {
                open: vec![],
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            settings,
        );

        let endpoints = engine.discover("it@CORP.example").await.unwrap();

        assert_eq!(endpoints.imap().unwrap(), ("groupware.corp.example", 143));
        assert_eq!(endpoints.smtp().unwrap(), ("groupware.corp.example", 25));
        // The FixedMx above would have reported no MX records, so the
        // zero here proves the override ran first.
        assert_eq!(mx_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn probing_prefers_earlier_hosts_over_earlier_ports() {
        // Every imap.* port is closed; mail.* answers on both 993 and
        // 143. Host-major candidate order must still pick mail.*:993.
        let (engine, _, _) = engine_with(
            vec!["mx.hoster.example"],
            vec![("mail.hoster.example", 993), ("mail.hoster.example", 143)],
        );

        let endpoints = engine.discover("me@selfhosted.example").await.unwrap();

        assert_eq!(endpoints.imap().unwrap(), ("mail.hoster.example", 993));
    }

    #[tokio::test]
    async fn probing_can_resolve_one_side_only() {
        let (engine, _, _) = engine_with(
            vec!["mx.hoster.example"],
            vec![("smtp.hoster.example", 465)],
        );

        let endpoints = engine.discover("me@selfhosted.example").await.unwrap();

        assert!(!endpoints.is_complete());
        assert_eq!(endpoints.smtp().unwrap(), ("smtp.hoster.example", 465));
        match endpoints.imap() {
            Err(DiscoveryError::EndpointsIncomplete(field)) => assert_eq!(field, "imap_host"),
            other => panic!("expected incomplete imap endpoint, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_addresses_are_rejected_up_front() {
        let (engine, mx_calls, _) = engine_with(vec!["mx.hoster.example"], vec![]);

        for address in ["plainstring", "trailing@", "@"] {
            let result = engine.discover(address).await;
            assert!(
                matches!(result, Err(DiscoveryError::InvalidAddress(_))),
                "{:?} should be rejected",
                address
            );
        }
        assert_eq!(mx_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_mx_answer_is_fatal() {
        let (engine, _, probe_calls) = engine_with(vec![], vec![]);

        let result = engine.discover("user@dead.example").await;

        assert!(matches!(result, Err(DiscoveryError::NoMxRecords(_))));
        assert_eq!(probe_calls.load(Ordering::SeqCst), 0);
    }
}
