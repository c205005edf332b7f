// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests {
    use mailscout::models::{
        Credentials, MailEndpoints, MessagePage, MessageSummary, SentMessageSummary, SentPage,
    };
    use serde_json::json;

    #[test]
    fn inbox_page_serializes_under_the_emails_key() {
        let page = MessagePage {
            page: 2,
            per_page: 10,
            total: 37,
            emails: vec![MessageSummary {
                uid: 104,
                from: "Anna <anna@example.com>".to_string(),
                subject: "Minutes".to_string(),
                date: "2025-05-01T09:30:00+00:00".to_string(),
            }],
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["page"], json!(2));
        assert_eq!(value["per_page"], json!(10));
        assert_eq!(value["total"], json!(37));
        assert_eq!(value["emails"][0]["uid"], json!(104));
        assert_eq!(value["emails"][0]["from"], json!("Anna <anna@example.com>"));
        assert_eq!(value["emails"][0]["subject"], json!("Minutes"));
    }

    #[test]
    fn sent_rows_carry_the_recipient() {
        let page = SentPage {
            page: 1,
            per_page: 5,
            total: 1,
            emails: vec![SentMessageSummary {
                uid: 9,
                to: "support@vendor.example".to_string(),
                subject: "Ticket 1182".to_string(),
                date: "2025-05-02T11:00:00+00:00".to_string(),
            }],
        };

        let value = serde_json::to_value(&page).unwrap();
        let row = &value["emails"][0];
        assert_eq!(row["to"], json!("support@vendor.example"));
        assert!(row.get("from").is_none());
    }

    #[test]
    fn endpoints_round_trip_through_json() {
        let endpoints = MailEndpoints::new("imap.example.com", 993, "smtp.example.com", 587);
        let text = serde_json::to_string(&endpoints).unwrap();
        let back: MailEndpoints = serde_json::from_str(&text).unwrap();
        assert_eq!(back, endpoints);

        // Unresolved fields must stay visible as explicit nulls rather
        // than disappearing from the payload.
        let value = serde_json::to_value(MailEndpoints::empty()).unwrap();
        assert!(value.as_object().unwrap().contains_key("imap_host"));
        assert!(value["imap_host"].is_null());
    }

    #[test]
    fn credentials_never_leak_through_debug() {
        let creds = Credentials::new("user@example.com", "s3cret-app-password");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("user@example.com"));
        assert!(printed.contains("***"));
        assert!(!printed.contains("s3cret-app-password"));
    }
}
