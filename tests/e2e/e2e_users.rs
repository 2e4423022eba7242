use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use tokio::net::TcpListener;
use user_create::{RequestRunner, RestErrorKind, RunnerConfig, UserPayload};

#[derive(Clone, Default)]
struct AppState {
    received: Arc<Mutex<Vec<(Option<String>, Bytes)>>>,
}

impl AppState {
    fn received(&self) -> Vec<(Option<String>, Bytes)> {
        self.received.lock().expect("state lock").clone()
    }
}

#[tokio::test]
async fn e2e_created_roundtrip_over_http() {
    let server = TestServer::start().await;
    let runner = RequestRunner::from_config(RunnerConfig::new(
        server.url("/users"),
        UserPayload::default(),
    ));

    let outcome = runner.run().await.expect("server answers");
    assert!(outcome.is_created());
    let message = outcome.message();
    assert!(message.contains("User created successfully:"));
    assert!(message.contains("12345"));
    assert!(message.contains("testuser@example.com"));

    let received = server.state.received();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let sent: UserPayload = sonic_rs::from_slice(body).expect("server got the json payload");
    assert_eq!(sent, UserPayload::default());
}

#[tokio::test]
async fn e2e_rejection_is_printed_with_status_and_text() {
    let server = TestServer::start().await;
    let runner = RequestRunner::from_config(RunnerConfig::new(
        server.url("/users-invalid"),
        UserPayload::default(),
    ));

    let outcome = runner.run().await.expect("server answers");
    assert_eq!(outcome.status(), 400);
    assert_eq!(outcome.message(), "Failed to create user: 400 \"Invalid email\"");
}

#[tokio::test]
async fn e2e_server_error_with_empty_body() {
    let server = TestServer::start().await;
    let runner = RequestRunner::from_config(RunnerConfig::new(
        server.url("/users-broken"),
        UserPayload::default(),
    ));

    let outcome = runner.run().await.expect("server answers");
    assert_eq!(outcome.message(), "Failed to create user: 500 ");
}

#[tokio::test]
async fn e2e_connection_refused_is_connect_fault() {
    let url = closed_port_url().await;
    let runner = RequestRunner::from_config(RunnerConfig::new(url, UserPayload::default()));

    let err = runner.run().await.expect_err("nothing listens on the port");
    assert_eq!(err.kind(), RestErrorKind::Connect);
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_binary_prints_outcome_and_exits_zero() {
    let server = TestServer::start().await;
    let endpoint = server.url("/users");

    let output = run_binary(endpoint).await;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("User created successfully:"));
    assert_eq!(stdout.lines().count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_binary_rejection_is_quiet_on_stderr() {
    let server = TestServer::start().await;
    let endpoint = server.url("/users-invalid");

    let output = run_binary(endpoint).await;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "Failed to create user: 400 \"Invalid email\"");
    assert!(output.stderr.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_binary_piped_logs_have_no_colour_codes() {
    let server = TestServer::start().await;
    let endpoint = server.url("/users-invalid");

    let output = run_binary_with_filter(endpoint, Some("info")).await;
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("user creation failed"));
    assert!(stderr.contains("INFO"));
    assert!(!stderr.contains('\u{1b}'));
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_binary_exits_non_zero_when_unreachable() {
    let url = closed_port_url().await;

    let output = run_binary(url).await;
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("User created successfully"));
    assert!(!stdout.contains("Failed to create user"));
}

async fn run_binary(endpoint: String) -> Output {
    run_binary_with_filter(endpoint, None).await
}

async fn run_binary_with_filter(endpoint: String, filter: Option<&'static str>) -> Output {
    tokio::task::spawn_blocking(move || {
        let mut command = Command::new(env!("CARGO_BIN_EXE_create-user"));
        command.arg("--endpoint").arg(endpoint).env_remove("RUST_LOG");
        if let Some(filter) = filter {
            command.env("RUST_LOG", filter);
        }
        command.output().expect("spawn create-user")
    })
    .await
    .expect("blocking task joins")
}

async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/users")
}

struct TestServer {
    base_url: String,
    state: AppState,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Self {
        let state = AppState::default();
        let app = Router::new()
            .route("/users", post(create_handler))
            .route("/users-invalid", post(invalid_handler))
            .route("/users-broken", post(broken_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{}", addr);

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url,
            state,
            task,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state
        .received
        .lock()
        .expect("state lock")
        .push((content_type, body));
    (
        StatusCode::CREATED,
        r#"{"id":"12345","email":"testuser@example.com"}"#,
    )
}

async fn invalid_handler() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "\"Invalid email\"")
}

async fn broken_handler() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}
