//! Creates a user by POSTing a JSON record to a REST endpoint, behind a small
//! transport seam so the exchange can be driven by an in-memory mock in tests.

pub mod adapter;
pub mod config;
pub mod logging;
pub mod mock;
pub mod payload;
pub mod runner;

pub use reqwest::Method;

pub use adapter::{
    Client, ReqwestTransport, RestBytes, RestError, RestErrorKind, RestFuture, RestRequest,
    RestResponse, RestResult, RestTransport, RestTransportState,
};
pub use config::{Cli, DEFAULT_ENDPOINT, RunnerConfig};
pub use mock::{
    MockBehavior, MockBehaviorPlan, MockResponse, MockRestAdapter, MockRestStateSnapshot,
};
pub use payload::UserPayload;
pub use runner::{Outcome, RequestRunner, RunError};
