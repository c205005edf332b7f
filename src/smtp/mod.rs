// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SMTP transport construction and message sending.

use std::time::Duration;

use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{debug, info};
use thiserror::Error;

use crate::models::Credentials;

/// Well-known implicit-TLS submission port. Every other port gets a
/// plaintext connect followed by a STARTTLS upgrade.
pub const SMTPS_PORT: u16 = 465;

#[derive(Error, Debug)]
pub enum SmtpError {
    #[error("SMTP configuration error: {0}")]
    Config(String),

    #[error("Message build error: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Build an authenticated async transport for the endpoint, choosing
/// the TLS mode by port.
pub fn build_transport(
    host: &str,
    port: u16,
    credentials: &Credentials,
    timeout: Duration,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, SmtpError> {
    let auth = SmtpCredentials::new(
        credentials.address.clone(),
        credentials.secret().to_string(),
    );

    let builder = if port == SMTPS_PORT {
        AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| SmtpError::Config(format!("SMTP relay error: {}", e)))?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| SmtpError::Config(format!("SMTP relay error: {}", e)))?
    };

    Ok(builder
        .port(port)
        .credentials(auth)
        .timeout(Some(timeout))
        .build())
}

fn build_message(
    sender: &str,
    to: &str,
    subject: &str,
    body_html: &str,
) -> Result<Message, SmtpError> {
    let from: Mailbox = sender
        .parse()
        .map_err(|e| SmtpError::Config(format!("Invalid sender address {}: {}", sender, e)))?;
    let recipient: Mailbox = to
        .parse()
        .map_err(|e| SmtpError::Config(format!("Invalid recipient address {}: {}", to, e)))?;

    Ok(Message::builder()
        .from(from)
        .to(recipient)
        .subject(subject)
        .multipart(MultiPart::alternative().singlepart(
            SinglePart::builder()
                .header(header::ContentType::TEXT_HTML)
                .body(body_html.to_string()),
        ))?)
}

/// Compose and transmit an HTML message. Transport and authentication
/// failures surface to the caller; there is no local retry.
pub async fn send_html(
    credentials: &Credentials,
    host: &str,
    port: u16,
    timeout: Duration,
    to: &str,
    subject: &str,
    body_html: &str,
) -> Result<(), SmtpError> {
    let email = build_message(&credentials.address, to, subject, body_html)?;
    let mailer = build_transport(host, port, credentials, timeout)?;

    info!("Sending message to {} via {}:{}", to, host, port);
    mailer.send(email).await?;
    debug!("Message to {} accepted by {}", to, host);
    Ok(())
}
