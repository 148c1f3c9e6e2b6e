use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::http::HttpStatusSource;
use crate::status::{PollError, StatusSource};
use crate::test_support::cam;

fn reply(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Answers one request with `response`, or holds the connection open
/// without answering when `response` is `None`.
async fn serve_once(response: Option<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        match response {
            Some(response) => {
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
            None => tokio::time::sleep(Duration::from_secs(10)).await,
        }
    });

    format!("http://{addr}/status")
}

fn source(url: String) -> HttpStatusSource {
    HttpStatusSource::new(url, Duration::from_millis(300)).expect("client")
}

#[tokio::test]
async fn motion_object_is_parsed() {
    // Arrange
    let url = serve_once(Some(reply("200 OK", r#"{"cam1":true,"cam2":false}"#))).await;

    // Act
    let snapshot = source(url).fetch().await.expect("snapshot");

    // Assert
    assert!(snapshot.has_motion(cam(1)));
    assert!(!snapshot.has_motion(cam(2)));
    assert!(!snapshot.has_motion(cam(3)));
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let url = serve_once(Some(reply("503 Service Unavailable", "{}"))).await;

    let result = source(url).fetch().await;

    assert_eq!(result, Err(PollError::Status(503)));
}

#[tokio::test]
async fn non_object_body_is_malformed() {
    let url = serve_once(Some(reply("200 OK", "[1]"))).await;

    let result = source(url).fetch().await;

    assert!(
        matches!(&result, Err(PollError::Malformed(reason)) if reason.contains("array")),
        "got {result:?}"
    );
}

#[tokio::test]
async fn silent_endpoint_times_out() {
    let url = serve_once(None).await;

    let result = source(url).fetch().await;

    assert_eq!(result, Err(PollError::Timeout));
}

#[tokio::test]
async fn refused_connection_is_a_transport_failure() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    // Act
    let result = source(format!("http://{addr}/status")).fetch().await;

    // Assert
    assert!(matches!(result, Err(PollError::Transport(_))), "got {result:?}");
}
