#![allow(dead_code)]

use axum::Router;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_service(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub analysis service");
    let addr = listener.local_addr().expect("stub service address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub service crashed");
    });
    format!("http://{addr}")
}

/// A localhost URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway port");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{addr}")
}
