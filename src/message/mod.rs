// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raw RFC822 payload decoding.
//!
//! Turns a fetched message into displayable header and body strings.
//! Encoded-word headers are decoded by the MIME parser; absent headers
//! degrade to placeholder text instead of failing the whole fetch.

use mail_parser::{HeaderValue, Message, MessagePart, MimeHeaders, PartType};
use thiserror::Error;

pub const NO_SUBJECT: &str = "No Subject";
pub const UNKNOWN_SENDER: &str = "Unknown Sender";
pub const UNKNOWN_RECIPIENT: &str = "Unknown Recipient";
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const NO_CONTENT: &str = "No content available";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Message payload could not be parsed")]
    Unparseable,
}

/// Decoded view of one message. All fields are display-ready strings.
#[derive(Debug, Clone)]
pub struct DecodedMessage {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub date: String,
    pub body: String,
}

pub fn decode(raw: &[u8]) -> Result<DecodedMessage, DecodeError> {
    let message = Message::parse(raw).ok_or(DecodeError::Unparseable)?;

    let subject = message
        .subject()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_SUBJECT)
        .to_string();
    let from = address_text(message.from()).unwrap_or_else(|| UNKNOWN_SENDER.to_string());
    let to = address_text(message.to()).unwrap_or_else(|| UNKNOWN_RECIPIENT.to_string());
    // RFC3339 when the header parses, the raw header text when it does
    // not, the sentinel only when the header is absent entirely.
    let date = message
        .date()
        .map(|d| d.to_rfc3339())
        .or_else(|| raw_header_text(&message, "Date"))
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());
    let body = select_body(&message);

    Ok(DecodedMessage {
        subject,
        from,
        to,
        date,
        body,
    })
}

/// Body selection: the first HTML part that is not an attachment wins
/// outright; otherwise the first plain-text part is used. Parts are
/// visited in message order, so alternative sets resolve the same way
/// every time.
fn select_body(message: &Message) -> String {
    let mut plain: Option<String> = None;
    let mut html: Option<String> = None;

    for part in &message.parts {
        match &part.body {
            PartType::Html(content) => {
                if !is_attachment(part) {
                    html = Some(content.to_string());
                    break;
                }
            }
            PartType::Text(content) => {
                if plain.is_none() {
                    plain = Some(content.to_string());
                }
            }
            _ => {}
        }
    }

    html.or(plain)
        .map(|body| body.trim().to_string())
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| NO_CONTENT.to_string())
}

fn is_attachment(part: &MessagePart) -> bool {
    part.content_disposition()
        .map(|cd| cd.ctype().eq_ignore_ascii_case("attachment"))
        .unwrap_or(false)
}

/// Raw text of a top-level header, for headers whose structured parse
/// failed but whose bytes are still worth showing.
fn raw_header_text(message: &Message, name: &str) -> Option<String> {
    let root = message.parts.first()?;
    let header = root
        .headers
        .iter()
        .find(|h| h.name.as_str().eq_ignore_ascii_case(name))?;
    let raw = message
        .raw_message
        .get(header.offset_start..header.offset_end)?;
    let text = String::from_utf8_lossy(raw).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn address_text(header: &HeaderValue) -> Option<String> {
    match header {
        HeaderValue::Address(addr) => format_address(
            addr.name.as_ref().map(|n| n.as_ref()),
            addr.address.as_ref().map(|a| a.as_ref()),
        ),
        HeaderValue::AddressList(addrs) => {
            let formatted: Vec<String> = addrs
                .iter()
                .filter_map(|addr| {
                    format_address(
                        addr.name.as_ref().map(|n| n.as_ref()),
                        addr.address.as_ref().map(|a| a.as_ref()),
                    )
                })
                .collect();
            if formatted.is_empty() {
                None
            } else {
                Some(formatted.join(", "))
            }
        }
        _ => None,
    }
}

fn format_address(name: Option<&str>, address: Option<&str>) -> Option<String> {
    match (name, address) {
        (Some(name), Some(address)) if !name.trim().is_empty() => {
            Some(format!("{} <{}>", name.trim(), address))
        }
        (_, Some(address)) => Some(address.to_string()),
        (Some(name), None) if !name.trim().is_empty() => Some(name.trim().to_string()),
        _ => None,
    }
}
