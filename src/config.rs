use std::time::Duration;

use clap::Parser;

use crate::payload::{DEFAULT_EMAIL, DEFAULT_ID, DEFAULT_PASSWORD, UserPayload};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5050/users";

/// Everything a single run needs. `Default` reproduces the fixed request:
/// the default payload against `http://localhost:5050/users` with no timeout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    pub endpoint: String,
    pub payload: UserPayload,
    pub timeout: Option<Duration>,
}

impl RunnerConfig {
    pub fn new(endpoint: impl Into<String>, payload: UserPayload) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, UserPayload::default())
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "create-user", about = "POST a user record to a REST endpoint")]
pub struct Cli {
    /// Target URL for the POST
    #[arg(long, env = "USER_CREATE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "USER_CREATE_EMAIL", default_value = DEFAULT_EMAIL)]
    pub email: String,

    #[arg(
        long,
        env = "USER_CREATE_PASSWORD",
        default_value = DEFAULT_PASSWORD,
        hide_env_values = true
    )]
    pub password: String,

    /// Client-supplied user id, sent as-is
    #[arg(long, env = "USER_CREATE_ID", default_value = DEFAULT_ID)]
    pub id: String,

    /// Request timeout in milliseconds; unbounded when omitted
    #[arg(long, env = "USER_CREATE_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl From<Cli> for RunnerConfig {
    fn from(cli: Cli) -> Self {
        let payload = UserPayload::new(cli.email, cli.password, cli.id);
        let config = RunnerConfig::new(cli.endpoint, payload);
        match cli.timeout_ms {
            Some(ms) => config.with_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}
