//! Stub upstream model API standing in for the HuggingFace Inference API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Canned payload the healthy stub endpoint returns. Content is arbitrary;
/// the service must pass it through byte for byte.
pub const FAKE_AUDIO: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfake-audio-payload";

pub struct StubUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubUpstream {
    /// Number of inference requests received so far, across all routes.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn ok_handler(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, Vec<u8>) {
    hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, FAKE_AUDIO.to_vec())
}

async fn busy_handler(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, String) {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "model facebook/musicgen-small is currently loading".to_string(),
    )
}

/// Spawn the stub on an ephemeral port. `/ok` answers with audio bytes,
/// `/busy` with a 503, mirroring the two upstream behaviors the service
/// distinguishes.
pub async fn spawn_stub_upstream() -> StubUpstream {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/ok", post(ok_handler))
        .route("/busy", post(busy_handler))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream {
        base_url: format!("http://{}", addr),
        hits,
    }
}

/// Spawn a stub `/generate` backend that always answers with a fixed status
/// and body. Used to drive the client against exact wire-level responses.
pub async fn spawn_canned_backend(status: StatusCode, body: &'static [u8]) -> String {
    let app = Router::new().route(
        "/generate",
        post(move || async move { (status, body.to_vec()) }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind canned backend listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
