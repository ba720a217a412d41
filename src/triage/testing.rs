//! Local stand-ins for provider HTTP APIs.

use std::net::SocketAddr;

use axum::Router;
use tokio::io::AsyncWriteExt;

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub(crate) async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// A base URL where nothing is listening.
pub(crate) async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A base URL whose listener answers every connection with non-HTTP bytes.
pub(crate) async fn garbage_server() -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let _ = socket.write_all(b"NOT-HTTP garbage\r\n\r\n").await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}")
}
