// Live-provider checks. Run with `--features live_tests` and supply a
// real account through the environment or a .env file:
//   MAILSCOUT_LIVE_ADDRESS=you@example.com
//   MAILSCOUT_PASSWORD=app-password
#[cfg(all(test, feature = "live_tests"))]
mod live_tests {
    use mailscout::auth::CredentialVerifier;
    use mailscout::config::Settings;
    use mailscout::discovery::DiscoveryEngine;
    use mailscout::mailbox::Mailbox;
    use mailscout::models::Credentials;

    fn live_settings() -> Settings {
        let _ = env_logger::builder().is_test(true).try_init();
        dotenvy::dotenv().ok();
        Settings::new(None).expect("Failed to load settings")
    }

    fn live_credentials() -> Credentials {
        let address =
            std::env::var("MAILSCOUT_LIVE_ADDRESS").expect("Missing MAILSCOUT_LIVE_ADDRESS env var");
        let password =
            std::env::var("MAILSCOUT_PASSWORD").expect("Missing MAILSCOUT_PASSWORD env var");
        Credentials::new(address, password)
    }

    #[tokio::test]
    async fn discovers_a_well_known_provider() {
        let settings = live_settings();
        let engine = DiscoveryEngine::new(settings.discovery.clone()).expect("engine");

        let endpoints = engine.discover("probe@gmail.com").await.expect("discovery");

        assert_eq!(endpoints.imap().unwrap(), ("imap.gmail.com", 993));
        assert_eq!(endpoints.smtp().unwrap(), ("smtp.gmail.com", 587));
    }

    #[tokio::test]
    async fn verifies_and_pages_the_live_inbox() {
        let settings = live_settings();
        let credentials = live_credentials();
        let engine = DiscoveryEngine::new(settings.discovery.clone()).expect("engine");

        let endpoints = engine
            .discover(&credentials.address)
            .await
            .expect("discovery");
        assert!(
            endpoints.is_complete(),
            "discovery left gaps: {:?}",
            endpoints
        );

        CredentialVerifier::new(&settings.auth)
            .verify(&credentials, &endpoints)
            .await
            .expect("both protocol logins should succeed");

        let mailbox = Mailbox::new(credentials, endpoints, &settings);
        let page = mailbox.inbox(Some(1), Some(5)).await.expect("inbox page");
        println!(
            "Live inbox holds {} messages; first page returned {}",
            page.total,
            page.emails.len()
        );
        assert!(page.emails.len() <= 5);
    }

    #[tokio::test]
    async fn lists_the_live_sent_folder() {
        let settings = live_settings();
        let credentials = live_credentials();
        let engine = DiscoveryEngine::new(settings.discovery.clone()).expect("engine");
        let endpoints = engine
            .discover(&credentials.address)
            .await
            .expect("discovery");

        let mailbox = Mailbox::new(credentials, endpoints, &settings);
        let page = mailbox.sent(Some(1), Some(3)).await.expect("sent page");
        println!("Live sent folder holds {} messages", page.total);
    }
}
