use std::sync::Arc;
use std::time::Duration;

use async_imap::{Client, Session};
use log::{debug, info, warn};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::{client::TlsStream, TlsConnector};
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

use crate::imap::error::ImapError;

type CompatTlsStream = Compat<TlsStream<TcpStream>>;

/// Authenticated IMAP session over implicit TLS. Callers own the
/// session for exactly one operation and must log out on every exit
/// path.
pub type TlsSession = Session<CompatTlsStream>;

fn tls_connector() -> Result<TlsConnector, ImapError> {
    let mut roots = RootCertStore::empty();
    let certs = rustls_native_certs::load_native_certs()?;
    let (added, ignored) = roots.add_parsable_certificates(certs);
    debug!("Loaded {} trust roots ({} unusable)", added, ignored);
    if roots.is_empty() {
        warn!("Trust root store is empty; TLS verification will fail");
    }

    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(TlsConnector::from(Arc::new(config)))
}

async fn open_tls_stream(host: &str, port: u16) -> Result<TlsStream<TcpStream>, ImapError> {
    debug!("Opening TCP connection to {}:{}", host, port);
    let tcp = TcpStream::connect((host, port)).await?;

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|_| ImapError::Tls(format!("Invalid server name: {}", host)))?;
    let connector = tls_connector()?;
    let stream = connector
        .connect(server_name, tcp)
        .await
        .map_err(|e| ImapError::Tls(e.to_string()))?;
    debug!("TLS handshake complete for {}:{}", host, port);
    Ok(stream)
}

/// Connect over implicit TLS and authenticate, returning a live
/// session. A rejected LOGIN surfaces as `ImapError::Auth`; the login
/// exchange itself runs under `login_timeout`.
pub async fn connect_and_login(
    host: &str,
    port: u16,
    username: &str,
    password: &str,
    login_timeout: Duration,
) -> Result<TlsSession, ImapError> {
    let tls_stream = open_tls_stream(host, port).await?;
    let client = Client::new(tls_stream.compat());
    debug!("IMAP client ready, logging in as '{}'", username);

    match timeout(login_timeout, client.login(username, password)).await {
        Ok(Ok(session)) => {
            info!("IMAP login succeeded for {}", username);
            Ok(session)
        }
        Ok(Err((err, _client))) => {
            warn!("IMAP login rejected for {}", username);
            Err(match err {
                async_imap::error::Error::No(msg) => ImapError::Auth(msg),
                other => ImapError::from(other),
            })
        }
        Err(_) => {
            warn!(
                "IMAP login for {} timed out after {:?}",
                username, login_timeout
            );
            Err(ImapError::Timeout(format!(
                "login to {}:{} exceeded {:?}",
                host, port, login_timeout
            )))
        }
    }
}
