use sonic_rs::Value;
use thiserror::Error;
use tracing::info;

use crate::adapter::{Client, RestError, RestResult};
use crate::config::RunnerConfig;

pub const CREATED: u16 = 201;

/// Result of a request that reached the server and got a response back.
#[derive(Clone, Debug)]
pub enum Outcome {
    Created { body: Value },
    Failed { status: u16, body: String },
}

impl Outcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Created { .. } => CREATED,
            Self::Failed { status, .. } => *status,
        }
    }

    /// The single line printed for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Created { body } => format!("User created successfully: {body}"),
            Self::Failed { status, body } => format!("Failed to create user: {status} {body}"),
        }
    }

    pub fn into_result(self) -> Result<Value, RunError> {
        match self {
            Self::Created { body } => Ok(body),
            Self::Failed { status, body } => Err(RunError::HttpStatus { status, body }),
        }
    }
}

/// Transport faults and non-201 responses, kept apart.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("transport fault: {0}")]
    Transport(#[from] RestError),
    #[error("server answered {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

pub struct RequestRunner {
    client: Client,
    config: RunnerConfig,
}

impl RequestRunner {
    pub fn new(client: Client, config: RunnerConfig) -> Self {
        Self { client, config }
    }

    pub fn from_config(config: RunnerConfig) -> Self {
        Self::new(Client::new(), config)
    }

    /// Sends the payload once. Any HTTP status is an `Outcome`; only
    /// transport faults and an unparseable 201 body are errors.
    pub async fn run(&self) -> RestResult<Outcome> {
        let response = self
            .client
            .post_json(&self.config.endpoint, &self.config.payload, self.config.timeout)
            .await?;

        if response.status() == CREATED {
            let body = response.json::<Value>()?;
            info!(endpoint = %self.config.endpoint, "user created");
            Ok(Outcome::Created { body })
        } else {
            let status = response.status();
            info!(endpoint = %self.config.endpoint, status, "user creation failed");
            Ok(Outcome::Failed {
                status,
                body: response.text().into_owned(),
            })
        }
    }

    pub async fn create_user(&self) -> Result<Value, RunError> {
        self.run().await?.into_result()
    }
}
