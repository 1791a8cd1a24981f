use std::sync::{Arc, Mutex};
use std::time::Duration;

use analysis_client::OverlayConfig;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use board_overlay::PlacementTiming;
use serde_json::Value;

/// Canned reply and request log for the mock analysis service.
#[derive(Clone)]
pub struct MockService {
    reply: Arc<Mutex<(StatusCode, String)>>,
    seen: Arc<Mutex<Vec<Value>>>,
    pub base_url: String,
}

impl MockService {
    /// Change what the next request gets back.
    pub fn set_reply(&self, status: StatusCode, body: &str) {
        *self.reply.lock().unwrap() = (status, body.to_string());
    }

    pub fn requests(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Config pointing both endpoints at this mock, with short timings.
    pub fn config(&self) -> OverlayConfig {
        OverlayConfig {
            analysis_url: self.url("/analyze"),
            health_url: self.url("/health"),
            request_timeout: Duration::from_secs(5),
            board_poll_interval: Duration::from_millis(5),
            placement: PlacementTiming {
                settle_delay: Duration::from_millis(1),
                not_ready_retry: Duration::from_millis(1),
                max_not_ready_retries: Some(3),
            },
            ..Default::default()
        }
    }
}

async fn analyze(State(mock): State<MockService>, Json(body): Json<Value>) -> (StatusCode, String) {
    mock.seen.lock().unwrap().push(body);
    let (status, reply) = mock.reply.lock().unwrap().clone();
    (status, reply)
}

/// Start a mock analysis service on a random local port.
pub async fn spawn_mock(status: StatusCode, body: &str) -> MockService {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().unwrap();

    let mock = MockService {
        reply: Arc::new(Mutex::new((status, body.to_string()))),
        seen: Arc::new(Mutex::new(Vec::new())),
        base_url: format!("http://{addr}"),
    };

    let app = Router::new()
        .route("/analyze", post(analyze))
        .route("/health", post(analyze))
        .with_state(mock.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service error");
    });

    mock
}

/// An address with nothing listening on it.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/analyze")
}
