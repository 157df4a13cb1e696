use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum database pool size (default: `20`).
    pub db_max_connections: u32,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Telegram bot settings.
    pub telegram: TelegramConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            jwt: JwtConfig::from_env(),
            telegram: TelegramConfig::from_env(),
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Bot API base URL (default: `https://api.telegram.org`).
    pub api_url: String,
    /// Whether to run the opt-in bot's long-poll loop (default: `true`).
    pub polling_enabled: bool,
    /// Long-poll duration per `getUpdates` call (default: 30 s).
    pub poll_timeout: Duration,
    /// Upper bound on a single notification delivery (default: 10 s).
    pub send_timeout: Duration,
}

impl TelegramConfig {
    /// Load Telegram settings from environment variables.
    ///
    /// | Env Var                      | Required | Default                    |
    /// |------------------------------|----------|----------------------------|
    /// | `TELEGRAM_BOT_TOKEN`         | **yes**  | --                         |
    /// | `TELEGRAM_API_URL`           | no       | `https://api.telegram.org` |
    /// | `TELEGRAM_POLLING_ENABLED`   | no       | `true`                     |
    /// | `TELEGRAM_POLL_TIMEOUT_SECS` | no       | `30`                       |
    /// | `TELEGRAM_SEND_TIMEOUT_SECS` | no       | `10`                       |
    ///
    /// # Panics
    ///
    /// Panics if `TELEGRAM_BOT_TOKEN` is not set or a value does not parse.
    pub fn from_env() -> Self {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .expect("TELEGRAM_BOT_TOKEN must be set in the environment");

        let api_url = std::env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| "https://api.telegram.org".into());

        let polling_enabled: bool = std::env::var("TELEGRAM_POLLING_ENABLED")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("TELEGRAM_POLLING_ENABLED must be true or false");

        let poll_timeout_secs: u64 = std::env::var("TELEGRAM_POLL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("TELEGRAM_POLL_TIMEOUT_SECS must be a valid u64");

        let send_timeout_secs: u64 = std::env::var("TELEGRAM_SEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("TELEGRAM_SEND_TIMEOUT_SECS must be a valid u64");

        Self {
            bot_token,
            api_url,
            polling_enabled,
            poll_timeout: Duration::from_secs(poll_timeout_secs),
            send_timeout: Duration::from_secs(send_timeout_secs),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
