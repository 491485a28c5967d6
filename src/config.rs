use std::env;
use std::time::Duration;

/// Retry policy for the initial document-store connection.
///
/// The default mirrors the historical behavior: retry forever with a fixed
/// five second delay. Tests inject a bounded policy instead.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of connection attempts; `None` retries indefinitely.
    pub max_attempts: Option<u32>,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            delay: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    /// HS256 signing secret for session tokens. Required; never defaulted in source.
    pub jwt_secret: String,
    /// When true, status updates are checked against the known status set.
    pub strict_status: bool,
    pub connect_retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            strict_status: env::var("STRICT_STATUS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            connect_retry: RetryPolicy {
                max_attempts: env::var("DB_CONNECT_MAX_ATTEMPTS")
                    .ok()
                    .map(|v| v.parse().expect("DB_CONNECT_MAX_ATTEMPTS must be a number")),
                delay: Duration::from_millis(
                    env::var("DB_CONNECT_RETRY_DELAY_MS")
                        .unwrap_or_else(|_| "5000".to_string())
                        .parse()
                        .expect("DB_CONNECT_RETRY_DELAY_MS must be a number"),
                ),
            },
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
