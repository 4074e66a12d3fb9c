mod common;

use std::net::SocketAddr;
use std::time::Duration;

use spycat::adapters::http::{HttpServer, ServerError};
use spycat::domain::models::{MissionPolicy, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use common::test_state;

type RunningServer = (SocketAddr, oneshot::Sender<()>, JoinHandle<Result<(), ServerError>>);

async fn start_server() -> RunningServer {
    let (state, _pool) = test_state(MissionPolicy::default()).await;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = ServerConfig { shutdown_grace_secs: 1, ..ServerConfig::default() };
    let server = HttpServer::new(config, state);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_on(listener, async move {
        let _ = stop_rx.await;
    }));
    (addr, stop_tx, handle)
}

#[tokio::test]
async fn test_server_answers_then_stops_on_signal() {
    let (addr, stop_tx, handle) = start_server().await;

    let body = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop within the grace period")
        .unwrap();
    assert!(result.is_ok());

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_idle_keep_alive_connection_does_not_block_shutdown() {
    let (addr, stop_tx, handle) = start_server().await;

    // Holds an open connection the server has to give up on
    let _idle = TcpStream::connect(addr).await.unwrap();

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server ignored the grace period")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_in_flight_request_finishes_after_signal() {
    let (addr, stop_tx, handle) = start_server().await;

    let body = r#"{"name":"Tom","breed":"abys","yearsOfExperience":2,"salary":500}"#;
    let (head, tail) = body.split_at(body.len() / 2);
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request_head = format!(
        "POST /cats HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(request_head.as_bytes()).await.unwrap();
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.flush().await.unwrap();

    // Shutdown starts while the handler is still waiting for the body
    tokio::time::sleep(Duration::from_millis(100)).await;
    stop_tx.send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    stream.write_all(tail.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 201"), "{response}");
    assert!(response.contains("\"name\":\"Tom\""), "{response}");

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop within the grace period")
        .unwrap();
    assert!(result.is_ok());
    assert!(TcpStream::connect(addr).await.is_err());
}
