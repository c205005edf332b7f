// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Credential verification against discovered endpoints.
//!
//! A login is usable only when BOTH protocol sides accept the
//! credentials. Send-only or receive-only providers count as not
//! loggable, since the product needs both directions.

use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use thiserror::Error;
use tokio::time::timeout;

use crate::config::AuthConfig;
use crate::discovery::DiscoveryError;
use crate::imap;
use crate::models::{Credentials, MailEndpoints};
use crate::smtp;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Endpoints(#[from] DiscoveryError),

    #[error("SMTP verification failed: {0}")]
    Smtp(String),

    #[error("IMAP verification failed: {0}")]
    Imap(String),
}

/// Network-facing side of the two protocol checks, behind a narrow
/// seam like the discovery resolver and prober, so the conjunction can
/// be exercised without live servers.
#[async_trait]
pub trait ProtocolChecks: Send + Sync {
    async fn check_smtp(
        &self,
        credentials: &Credentials,
        endpoints: &MailEndpoints,
    ) -> Result<(), AuthError>;

    async fn check_imap(
        &self,
        credentials: &Credentials,
        endpoints: &MailEndpoints,
    ) -> Result<(), AuthError>;
}

struct NetworkChecks {
    login_timeout: Duration,
}

#[async_trait]
impl ProtocolChecks for NetworkChecks {
    /// SMTP side: connect with port-appropriate TLS and authenticate,
    /// bounded by the login timeout.
    async fn check_smtp(
        &self,
        credentials: &Credentials,
        endpoints: &MailEndpoints,
    ) -> Result<(), AuthError> {
        let (host, port) = endpoints.smtp()?;
        let mailer = smtp::build_transport(host, port, credentials, self.login_timeout)
            .map_err(|e| AuthError::Smtp(e.to_string()))?;

        match timeout(self.login_timeout, mailer.test_connection()).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => {
                warn!("SMTP connection test to {}:{} was refused", host, port);
                Err(AuthError::Smtp(format!(
                    "{}:{} rejected the connection test",
                    host, port
                )))
            }
            Ok(Err(e)) => {
                warn!(
                    "SMTP verification failed for {}: {}",
                    credentials.address, e
                );
                Err(AuthError::Smtp(e.to_string()))
            }
            Err(_) => Err(AuthError::Smtp(format!(
                "verification timed out after {:?}",
                self.login_timeout
            ))),
        }
    }

    /// IMAP side: implicit-TLS connect and LOGIN. Success requires the
    /// server's explicit OK; the probe session is closed right away.
    async fn check_imap(
        &self,
        credentials: &Credentials,
        endpoints: &MailEndpoints,
    ) -> Result<(), AuthError> {
        let (host, port) = endpoints.imap()?;
        let mut session = imap::connect_and_login(
            host,
            port,
            &credentials.address,
            credentials.secret(),
            self.login_timeout,
        )
        .await
        .map_err(|e| AuthError::Imap(e.to_string()))?;
        session.logout().await.ok();
        Ok(())
    }
}

pub struct CredentialVerifier {
    checks: Box<dyn ProtocolChecks>,
}

impl CredentialVerifier {
    pub fn new(settings: &AuthConfig) -> Self {
        Self {
            checks: Box::new(NetworkChecks {
                login_timeout: Duration::from_secs(settings.login_timeout_secs),
            }),
        }
    }

    /// Build a verifier from an explicit check implementation. Tests
    /// inject fixed-outcome checks through this.
    pub fn with_checks(checks: Box<dyn ProtocolChecks>) -> Self {
        Self { checks }
    }

    /// Run both protocol checks. The two run concurrently but the
    /// verdict is a conjunction; SMTP failures are reported first.
    pub async fn verify(
        &self,
        credentials: &Credentials,
        endpoints: &MailEndpoints,
    ) -> Result<(), AuthError> {
        let (smtp_result, imap_result) = tokio::join!(
            self.checks.check_smtp(credentials, endpoints),
            self.checks.check_imap(credentials, endpoints),
        );
        smtp_result?;
        imap_result?;
        info!(
            "Credentials verified on both protocols for {}",
            credentials.address
        );
        Ok(())
    }

    pub async fn verify_smtp(
        &self,
        credentials: &Credentials,
        endpoints: &MailEndpoints,
    ) -> Result<(), AuthError> {
        self.checks.check_smtp(credentials, endpoints).await
    }

    pub async fn verify_imap(
        &self,
        credentials: &Credentials,
        endpoints: &MailEndpoints,
    ) -> Result<(), AuthError> {
        self.checks.check_imap(credentials, endpoints).await
    }
}
