use std::time::Duration;

use futures_util::TryStreamExt;
use log::{debug, warn};

use crate::imap::client::{connect_and_login, TlsSession};
use crate::imap::error::ImapError;
use crate::imap::folders::{resolve_sent_folder, ListedMailbox};
use crate::message;
use crate::message::DecodedMessage;
use crate::models::{
    Credentials, MessageDetail, MessagePage, MessageSummary, SentMessageDetail,
    SentMessageSummary, SentPage,
};

pub const INBOX: &str = "INBOX";

/// Paginated access to one account's mailboxes.
///
/// Every public method opens a fresh session, performs its operation,
/// and logs out before returning, on error paths too. Nothing here
/// holds a connection across calls.
pub struct MailboxReader<'a> {
    host: &'a str,
    port: u16,
    credentials: &'a Credentials,
    login_timeout: Duration,
}

impl<'a> MailboxReader<'a> {
    pub fn new(
        host: &'a str,
        port: u16,
        credentials: &'a Credentials,
        login_timeout: Duration,
    ) -> Self {
        Self {
            host,
            port,
            credentials,
            login_timeout,
        }
    }

    async fn open(&self) -> Result<TlsSession, ImapError> {
        connect_and_login(
            self.host,
            self.port,
            &self.credentials.address,
            self.credentials.secret(),
            self.login_timeout,
        )
        .await
    }

    /// List one page of the inbox, newest first.
    pub async fn inbox_page(&self, page: usize, per_page: usize) -> Result<MessagePage, ImapError> {
        let mut session = self.open().await?;
        let result = self.inbox_page_in(&mut session, page, per_page).await;
        session.logout().await.ok();
        result
    }

    /// Fetch one inbox message in full by its sequence number.
    pub async fn message(&self, seq: u32) -> Result<MessageDetail, ImapError> {
        let mut session = self.open().await?;
        let result = self.message_in(&mut session, seq).await;
        session.logout().await.ok();
        result
    }

    /// Flag an inbox message as read.
    pub async fn mark_seen(&self, seq: u32) -> Result<(), ImapError> {
        let mut session = self.open().await?;
        let result = mark_seen_in(&mut session, seq).await;
        session.logout().await.ok();
        result
    }

    /// List one page of the sent folder, newest first. The folder name
    /// is resolved from the live LIST response on every call.
    pub async fn sent_page(&self, page: usize, per_page: usize) -> Result<SentPage, ImapError> {
        let mut session = self.open().await?;
        let result = self.sent_page_in(&mut session, page, per_page).await;
        session.logout().await.ok();
        result
    }

    /// Fetch one sent message in full by its UID.
    pub async fn sent_message(&self, uid: u32) -> Result<SentMessageDetail, ImapError> {
        let mut session = self.open().await?;
        let result = self.sent_message_in(&mut session, uid).await;
        session.logout().await.ok();
        result
    }

    async fn inbox_page_in(
        &self,
        session: &mut TlsSession,
        page: usize,
        per_page: usize,
    ) -> Result<MessagePage, ImapError> {
        session.select(INBOX).await?;

        let found = session.search("ALL").await?;
        let mut ids: Vec<u32> = found.into_iter().collect();
        ids.sort_unstable();
        ids.reverse();
        let total = ids.len();
        debug!("{} holds {} messages", INBOX, total);

        let mut emails = Vec::new();
        for seq in page_window(&ids, page, per_page) {
            match fetch_decoded(session, *seq, false).await {
                Ok(decoded) => emails.push(MessageSummary {
                    uid: *seq,
                    from: decoded.from,
                    subject: decoded.subject,
                    date: decoded.date,
                }),
                // One broken message must not sink the whole page.
                Err(e) => warn!("Skipping message {} in {}: {}", seq, INBOX, e),
            }
        }

        Ok(MessagePage {
            page,
            per_page,
            total,
            emails,
        })
    }

    async fn message_in(
        &self,
        session: &mut TlsSession,
        seq: u32,
    ) -> Result<MessageDetail, ImapError> {
        session.select(INBOX).await?;
        let decoded = fetch_decoded(session, seq, false).await?;
        Ok(MessageDetail {
            uid: seq,
            from: decoded.from,
            subject: decoded.subject,
            date: decoded.date,
            body: decoded.body,
        })
    }

    async fn sent_page_in(
        &self,
        session: &mut TlsSession,
        page: usize,
        per_page: usize,
    ) -> Result<SentPage, ImapError> {
        let folder = select_sent_folder(session).await?;

        // UIDs, not sequence numbers: sent-folder contents shift often
        // enough that sequence numbers are unreliable across sessions.
        let found = session.uid_search("ALL").await?;
        let mut ids: Vec<u32> = found.into_iter().collect();
        ids.sort_unstable();
        ids.reverse();
        let total = ids.len();
        debug!("Sent folder '{}' holds {} messages", folder, total);

        let mut emails = Vec::new();
        for uid in page_window(&ids, page, per_page) {
            match fetch_decoded(session, *uid, true).await {
                Ok(decoded) => emails.push(SentMessageSummary {
                    uid: *uid,
                    to: decoded.to,
                    subject: decoded.subject,
                    date: decoded.date,
                }),
                Err(e) => warn!("Skipping sent message {}: {}", uid, e),
            }
        }

        Ok(SentPage {
            page,
            per_page,
            total,
            emails,
        })
    }

    async fn sent_message_in(
        &self,
        session: &mut TlsSession,
        uid: u32,
    ) -> Result<SentMessageDetail, ImapError> {
        select_sent_folder(session).await?;
        let decoded = fetch_decoded(session, uid, true).await?;
        Ok(SentMessageDetail {
            uid,
            to: decoded.to,
            subject: decoded.subject,
            date: decoded.date,
            body: decoded.body,
        })
    }
}

async fn mark_seen_in(session: &mut TlsSession, seq: u32) -> Result<(), ImapError> {
    session.select(INBOX).await?;
    let seq_set = seq.to_string();
    let updates = session.store(&seq_set, "+FLAGS (\\Seen)").await?;
    updates.try_collect::<Vec<_>>().await?;
    debug!("Marked message {} as seen", seq);
    Ok(())
}

/// Resolve the sent folder from a live LIST and select it. Not finding
/// one is an error that carries the full listing for diagnostics.
async fn select_sent_folder(session: &mut TlsSession) -> Result<&'static str, ImapError> {
    let mailboxes = list_mailboxes(session).await?;
    let folder = match resolve_sent_folder(&mailboxes) {
        Some(folder) => folder,
        None => {
            return Err(ImapError::SentFolderNotFound {
                mailboxes: mailboxes.into_iter().map(|m| m.name).collect(),
            })
        }
    };
    // Sent-folder names routinely contain spaces and brackets; the
    // client library quotes the name on the wire.
    session.select(folder).await?;
    Ok(folder)
}

async fn list_mailboxes(session: &mut TlsSession) -> Result<Vec<ListedMailbox>, ImapError> {
    let mut stream = session.list(Some(""), Some("*")).await?;
    let mut mailboxes = Vec::new();
    while let Some(name) = stream.try_next().await? {
        mailboxes.push(ListedMailbox::new(name.name(), name.delimiter()));
    }
    drop(stream);
    Ok(mailboxes)
}

/// Fetch one full message and decode it. `by_uid` switches between UID
/// FETCH and sequence-number FETCH; an empty response maps to a
/// not-found error rather than a silent miss.
async fn fetch_decoded(
    session: &mut TlsSession,
    id: u32,
    by_uid: bool,
) -> Result<DecodedMessage, ImapError> {
    let id_set = id.to_string();
    let fetched = if by_uid {
        let mut stream = session.uid_fetch(&id_set, "BODY[]").await?;
        let first = stream.try_next().await?;
        drop(stream);
        first
    } else {
        let mut stream = session.fetch(&id_set, "BODY[]").await?;
        let first = stream.try_next().await?;
        drop(stream);
        first
    };

    let fetched = fetched.ok_or(ImapError::MessageNotFound(id))?;
    let raw = fetched
        .body()
        .ok_or_else(|| ImapError::MissingData(format!("no message payload for {}", id)))?;
    message::decode(raw).map_err(|e| ImapError::Parse(e.to_string()))
}

/// Slice of `ids` covering the requested page. Out-of-range pages are
/// empty, not an error.
fn page_window(ids: &[u32], page: usize, per_page: usize) -> &[u32] {
    let start = page.max(1).saturating_sub(1).saturating_mul(per_page);
    if start >= ids.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(ids.len());
    &ids[start..end]
}
