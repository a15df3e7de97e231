use std::{fmt::Debug, path::PathBuf, str::FromStr};
use tracing::{info, warn};

/// Key pair and contact used to identify this server to push services (VAPID)
#[derive(Clone)]
pub struct VapidConfig {
    /// Uncompressed P-256 public key, base64url encoded
    pub public_key: String,
    /// Raw P-256 private key, base64url encoded, or a PKCS#8 PEM key
    pub private_key: String,
    /// Contact of the server operator, usually a `mailto:` url
    pub subject: String,
}

impl Debug for VapidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapidConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("subject", &self.subject)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// VAPID credentials. When they are missing pushes are only recorded in memory.
    pub vapid: Option<VapidConfig>,
    /// File holding the `ScheduledReminder`s
    pub reminders_file: PathBuf,
    /// File holding the registered `PushSubscription`s
    pub subscriptions_file: PathBuf,
    /// Origins allowed to call the api from a browser. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Title of every pushed notification, the body is the reminder text
    pub notification_title: String,
    /// How many seconds a push service should hold on to an undelivered message
    pub push_ttl_secs: u32,
}

fn env_or<T>(name: &str, default_value: T) -> T
where
    T: FromStr + Debug,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    name, value, default_value
                );
                default_value
            }
        },
        Err(_) => default_value,
    }
}

impl Config {
    pub fn new() -> Self {
        let port = env_or("PORT", 3001);

        let vapid = match (
            std::env::var("PUBLIC_VAPID_KEY"),
            std::env::var("PRIVATE_VAPID_KEY"),
        ) {
            (Ok(public_key), Ok(private_key)) => Some(VapidConfig {
                public_key,
                private_key,
                subject: std::env::var("VAPID_SUBJECT")
                    .unwrap_or_else(|_| "mailto:test@example.com".into()),
            }),
            _ => {
                info!("Did not find PUBLIC_VAPID_KEY and PRIVATE_VAPID_KEY environment variables.");
                None
            }
        };

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            port,
            vapid,
            reminders_file: env_or("REMINDERS_FILE", PathBuf::from("data.json")),
            subscriptions_file: env_or("SUBSCRIPTIONS_FILE", PathBuf::from("subscriptions.json")),
            cors_allowed_origins,
            notification_title: std::env::var("NOTIFICATION_TITLE")
                .unwrap_or_else(|_| "Reminder".into()),
            push_ttl_secs: env_or("PUSH_TTL_SECS", 60 * 60 * 24),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
