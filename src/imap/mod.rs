pub mod client;
pub mod error;
pub mod folders;
pub mod reader;

pub use client::connect_and_login;
pub use error::ImapError;
pub use reader::MailboxReader;
