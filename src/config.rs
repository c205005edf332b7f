use config::{Environment, File};
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// A per-deployment endpoint pin for one domain.
///
/// Domains listed here bypass DNS and probing entirely; the configured
/// hosts are taken as-is. This is how a single-tenant install with a
/// known mail server opts out of general discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticOverride {
    pub domain: String,
    pub imap_host: String,
    pub imap_port: u16,
    pub smtp_host: String,
    pub smtp_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// TCP connect timeout for each host:port probe, in seconds.
    pub probe_timeout_secs: u64,
    #[serde(default)]
    pub overrides: Vec<StaticOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Upper bound on each SMTP/IMAP login attempt, in seconds.
    pub login_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub default_page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub log: LogConfig,
    pub discovery: DiscoveryConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
}

impl Settings {
    pub fn new(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        // Default configuration values
        let mut config_builder = config::Config::builder()
            // Log defaults
            .set_default("log.level", "info")?
            // Discovery defaults
            .set_default("discovery.probe_timeout_secs", 3)?
            .set_default("discovery.overrides", Vec::<String>::new())?
            // Auth defaults
            .set_default("auth.login_timeout_secs", 10)?
            // Mail defaults
            .set_default("mail.default_page_size", 10)?;

        // Add configuration from file
        if let Some(path) = config_path {
            config_builder = config_builder.add_source(File::with_name(path));
        }

        // Add environment variables with prefix
        // e.g. `MAILSCOUT_LOG_LEVEL=...` would override `log.level`
        config_builder = config_builder.add_source(
            Environment::with_prefix("MAILSCOUT")
                .separator("_")
                .ignore_empty(true),
        );

        // Add direct environment variables for the settings operators
        // actually tune in deployments
        let env_vars = [
            ("PROBE_TIMEOUT_SECS", "discovery.probe_timeout_secs"),
            ("LOGIN_TIMEOUT_SECS", "auth.login_timeout_secs"),
            ("DEFAULT_PAGE_SIZE", "mail.default_page_size"),
            ("LOG_LEVEL", "log.level"),
        ];

        for (env_var, config_key) in &env_vars {
            if let Ok(value) = env::var(env_var) {
                if *env_var == "LOG_LEVEL" {
                    config_builder = config_builder.set_override(*config_key, value)?;
                } else if let Ok(number) = value.parse::<u64>() {
                    config_builder = config_builder.set_override(*config_key, number)?;
                } else {
                    warn!("Invalid numeric value in {}: {}", env_var, value);
                }
            }
        }

        // Build the config and deserialize it into Settings
        config_builder.build()?.try_deserialize()
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery.probe_timeout_secs)
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.auth.login_timeout_secs)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 3,
            overrides: Vec::new(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_timeout_secs: 10,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            discovery: DiscoveryConfig::default(),
            auth: AuthConfig::default(),
            mail: MailConfig::default(),
        }
    }
}
