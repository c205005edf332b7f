// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sent-folder resolution across inconsistent server layouts.
//!
//! Servers disagree on where sent mail lives: bracketed Gmail-style
//! names, dot- or slash-nested INBOX children, or a bare "Sent"
//! variant. Candidates are kept as data in priority order; the first
//! candidate that matches any listed mailbox decides the literal name
//! used for SELECT.

use log::debug;

/// Known sent-folder names, highest priority first. Order matters:
/// when several candidates are substrings of a real folder name, the
/// earliest one wins.
pub const SENT_FOLDER_CANDIDATES: &[&str] = &[
    "[Gmail]/Sent Mail",
    "INBOX.Sent",
    "INBOX/Sent",
    "INBOX.Sent Items",
    "INBOX/Sent Items",
    "INBOX.Sent Mail",
    "INBOX/Sent Mail",
    "Sent Messages",
    "Sent",
    "Sent Items",
    "Sent Mail",
];

/// One mailbox from a LIST response: its full name and the hierarchy
/// delimiter the server reported for it.
#[derive(Debug, Clone)]
pub struct ListedMailbox {
    pub name: String,
    pub delimiter: Option<String>,
}

impl ListedMailbox {
    pub fn new(name: impl Into<String>, delimiter: Option<&str>) -> Self {
        Self {
            name: name.into(),
            delimiter: delimiter.map(|d| d.to_string()),
        }
    }

    /// Last hierarchy segment of the mailbox name.
    fn leaf(&self) -> &str {
        match self.delimiter.as_deref() {
            Some(delim) if !delim.is_empty() => {
                self.name.rsplit(delim).next().unwrap_or(&self.name)
            }
            _ => &self.name,
        }
    }

    /// Case-insensitive match: the candidate equals the leaf name, or
    /// the full name ends with the candidate. The suffix rule tolerates
    /// a namespace prefix some servers put in front of every mailbox.
    fn matches(&self, candidate: &str) -> bool {
        let candidate_lower = candidate.to_lowercase();
        self.leaf().to_lowercase() == candidate_lower
            || self.name.to_lowercase().ends_with(&candidate_lower)
    }
}

/// Resolve which sent-folder name to SELECT, scanning candidates in
/// priority order. Returns the candidate literal, which normalizes away
/// server-reported formatting quirks. `None` means no listed mailbox
/// looked like a sent folder.
pub fn resolve_sent_folder(mailboxes: &[ListedMailbox]) -> Option<&'static str> {
    for candidate in SENT_FOLDER_CANDIDATES {
        if let Some(hit) = mailboxes.iter().find(|m| m.matches(candidate)) {
            debug!(
                "Sent folder candidate '{}' matched mailbox '{}'",
                candidate, hit.name
            );
            return Some(candidate);
        }
    }
    None
}
