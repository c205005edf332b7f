//! MailScout command line interface.
//!
//! Usage:
//!   mailscout discover <address>                       # Resolve endpoints only
//!   mailscout login <address>                          # Verify credentials on SMTP and IMAP
//!   mailscout inbox <address> --page 2 --per-page 20   # List inbox messages
//!   mailscout read <address> <id>                      # Fetch one inbox message
//!   mailscout mark-seen <address> <id>                 # Flag an inbox message as read
//!   mailscout send <address> --to .. --subject .. --body ..
//!   mailscout sent <address>                           # List sent messages
//!   mailscout sent-read <address> <uid>                # Fetch one sent message
//!
//! The account password is taken from MAILSCOUT_PASSWORD (or --password).

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::debug;

use mailscout::auth::CredentialVerifier;
use mailscout::config::Settings;
use mailscout::discovery::DiscoveryEngine;
use mailscout::mailbox::Mailbox;
use mailscout::models::Credentials;
use mailscout::Error;

#[derive(Parser)]
#[command(
    name = "mailscout",
    about = "Discover, verify, and use a provider's mail endpoints",
    version
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Account {
    /// Email address
    address: String,

    /// Account password (prefer the environment variable)
    #[arg(long, env = "MAILSCOUT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve IMAP/SMTP endpoints for an address
    Discover {
        /// Email address
        address: String,
    },
    /// Verify credentials against discovered endpoints on both protocols
    Login {
        #[command(flatten)]
        account: Account,
    },
    /// List one page of the inbox, newest first
    Inbox {
        #[command(flatten)]
        account: Account,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Fetch one inbox message by sequence number
    Read {
        #[command(flatten)]
        account: Account,
        /// Sequence number from the inbox listing
        id: u32,
    },
    /// Flag an inbox message as read
    MarkSeen {
        #[command(flatten)]
        account: Account,
        id: u32,
    },
    /// Send an HTML message
    Send {
        #[command(flatten)]
        account: Account,
        #[arg(long)]
        to: String,
        #[arg(long)]
        subject: String,
        /// HTML message body
        #[arg(long)]
        body: String,
    },
    /// List one page of the sent folder, newest first
    Sent {
        #[command(flatten)]
        account: Account,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Fetch one sent message by UID
    SentRead {
        #[command(flatten)]
        account: Account,
        uid: u32,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = match Settings::new(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log.level.clone()))
        .init();

    if let Err(e) = run(cli.command, &settings).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, settings: &Settings) -> Result<(), Error> {
    match command {
        Command::Discover { address } => {
            let engine = DiscoveryEngine::new(settings.discovery.clone())?;
            let endpoints = engine.discover(&address).await?;
            println!("{}", serde_json::to_string_pretty(&endpoints)?);
        }
        Command::Login { account } => {
            let engine = DiscoveryEngine::new(settings.discovery.clone())?;
            let endpoints = engine.discover(&account.address).await?;
            let credentials = Credentials::new(account.address, account.password);
            CredentialVerifier::new(&settings.auth)
                .verify(&credentials, &endpoints)
                .await?;
            println!("Login verified for {}", credentials.address);
            println!("{}", serde_json::to_string_pretty(&endpoints)?);
        }
        Command::Inbox {
            account,
            page,
            per_page,
        } => {
            let mailbox = open_mailbox(account, settings).await?;
            let listing = mailbox.inbox(page, per_page).await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Read { account, id } => {
            let mailbox = open_mailbox(account, settings).await?;
            let message = mailbox.message(id).await?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
        Command::MarkSeen { account, id } => {
            let mailbox = open_mailbox(account, settings).await?;
            mailbox.mark_seen(id).await?;
            println!("Marked message {} as seen", id);
        }
        Command::Send {
            account,
            to,
            subject,
            body,
        } => {
            let mailbox = open_mailbox(account, settings).await?;
            mailbox.send(&to, &subject, &body).await?;
            println!("Message sent to {}", to);
        }
        Command::Sent {
            account,
            page,
            per_page,
        } => {
            let mailbox = open_mailbox(account, settings).await?;
            let listing = mailbox.sent(page, per_page).await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::SentRead { account, uid } => {
            let mailbox = open_mailbox(account, settings).await?;
            let message = mailbox.sent_message(uid).await?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
    }
    Ok(())
}

async fn open_mailbox(account: Account, settings: &Settings) -> Result<Mailbox, Error> {
    let engine = DiscoveryEngine::new(settings.discovery.clone())?;
    let endpoints = engine.discover(&account.address).await?;
    debug!("Resolved endpoints for {}: {:?}", account.address, endpoints);
    let credentials = Credentials::new(account.address, account.password);
    Ok(Mailbox::new(credentials, endpoints, settings))
}
