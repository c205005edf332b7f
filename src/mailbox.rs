// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! High-level mailbox operations for one verified account.

use std::time::Duration;

use crate::config::Settings;
use crate::error::Error;
use crate::imap::MailboxReader;
use crate::models::{
    Credentials, MailEndpoints, MessageDetail, MessagePage, SentMessageDetail, SentPage,
};
use crate::smtp;

/// One account bound to its resolved endpoints.
///
/// Every method opens a fresh protocol session and closes it before
/// returning, so instances are cheap to build per request and carry no
/// live connection between calls.
pub struct Mailbox {
    credentials: Credentials,
    endpoints: MailEndpoints,
    login_timeout: Duration,
    default_page_size: usize,
}

impl Mailbox {
    pub fn new(credentials: Credentials, endpoints: MailEndpoints, settings: &Settings) -> Self {
        Self {
            credentials,
            endpoints,
            login_timeout: settings.login_timeout(),
            default_page_size: settings.mail.default_page_size,
        }
    }

    pub fn endpoints(&self) -> &MailEndpoints {
        &self.endpoints
    }

    fn reader(&self) -> Result<MailboxReader<'_>, Error> {
        let (host, port) = self.endpoints.imap()?;
        Ok(MailboxReader::new(
            host,
            port,
            &self.credentials,
            self.login_timeout,
        ))
    }

    fn paging(&self, page: Option<usize>, per_page: Option<usize>) -> (usize, usize) {
        (
            page.unwrap_or(1).max(1),
            per_page.unwrap_or(self.default_page_size),
        )
    }

    /// One page of the inbox, newest first.
    pub async fn inbox(
        &self,
        page: Option<usize>,
        per_page: Option<usize>,
    ) -> Result<MessagePage, Error> {
        let (page, per_page) = self.paging(page, per_page);
        Ok(self.reader()?.inbox_page(page, per_page).await?)
    }

    /// One inbox message in full, by sequence number.
    pub async fn message(&self, id: u32) -> Result<MessageDetail, Error> {
        Ok(self.reader()?.message(id).await?)
    }

    /// Flag an inbox message as read.
    pub async fn mark_seen(&self, id: u32) -> Result<(), Error> {
        Ok(self.reader()?.mark_seen(id).await?)
    }

    /// One page of the sent folder, newest first.
    pub async fn sent(
        &self,
        page: Option<usize>,
        per_page: Option<usize>,
    ) -> Result<SentPage, Error> {
        let (page, per_page) = self.paging(page, per_page);
        Ok(self.reader()?.sent_page(page, per_page).await?)
    }

    /// One sent message in full, by UID.
    pub async fn sent_message(&self, uid: u32) -> Result<SentMessageDetail, Error> {
        Ok(self.reader()?.sent_message(uid).await?)
    }

    /// Compose and send an HTML message from this account.
    pub async fn send(&self, to: &str, subject: &str, body_html: &str) -> Result<(), Error> {
        let (host, port) = self.endpoints.smtp()?;
        smtp::send_html(
            &self.credentials,
            host,
            port,
            self.login_timeout,
            to,
            subject,
            body_html,
        )
        .await?;
        Ok(())
    }
}
