use serde::{Deserialize, Serialize};

/// One row in a paginated inbox listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    pub uid: u32,
    pub from: String,
    pub subject: String,
    pub date: String,
}

/// A fully decoded inbox message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDetail {
    pub uid: u32,
    pub from: String,
    pub subject: String,
    pub date: String,
    pub body: String,
}

/// One row in a paginated sent-folder listing. The counterparty here is
/// the recipient, not the sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentMessageSummary {
    pub uid: u32,
    pub to: String,
    pub subject: String,
    pub date: String,
}

/// A fully decoded sent message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentMessageDetail {
    pub uid: u32,
    pub to: String,
    pub subject: String,
    pub date: String,
    pub body: String,
}

/// One page of an inbox listing. `total` is the full unfiltered folder
/// count, independent of the requested page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub emails: Vec<MessageSummary>,
}

/// One page of a sent-folder listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentPage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub emails: Vec<SentMessageSummary>,
}
