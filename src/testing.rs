//! Fake services for tests
//!
//! Serves an axum router on an ephemeral local port.

use axum::Router;

/// Base URL on a privileged port no test binds; ephemeral ports never land on it
pub const CLOSED_BASE_URL: &str = "http://127.0.0.1:1";

/// Serve `router` on 127.0.0.1 and return its base URL
pub async fn spawn_service(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
