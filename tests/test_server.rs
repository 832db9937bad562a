//! End-to-end tests over a real TCP socket.

use docroot::config::{Config, ServerConfig, StaticFilesConfig};
use docroot::server::listener::{bind, serve};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn start(root: &std::path::Path, max_connections: usize) -> std::net::SocketAddr {
    let listener = bind("127.0.0.1:0".parse().unwrap(), 16).unwrap();
    let addr = listener.local_addr().unwrap();

    let cfg = Config {
        server: ServerConfig {
            max_connections,
            ..ServerConfig::default()
        },
        static_files: StaticFilesConfig {
            root: root.to_path_buf(),
        },
    };

    tokio::spawn(async move {
        let _ = serve(listener, &cfg).await;
    });

    addr
}

async fn get(addr: std::net::SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

#[tokio::test]
async fn test_server_serves_and_closes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<p>hi</p>").unwrap();
    let addr = start(dir.path(), 4).await;

    let response = get(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert!(response.contains("Content-Type: text/html\r\n"));
    assert!(response.contains("Content-Length: 9\r\n"));
    assert!(response.ends_with("\r\n\r\n<p>hi</p>"));
}

#[tokio::test]
async fn test_server_error_pathway() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(dir.path(), 4).await;

    let response = get(addr, b"GET /data HTTP/1.1\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 403 Forbidden\r\n"));
    assert!(response.ends_with("<h1>403 Forbidden</h1>"));

    let response = get(addr, b"GET /data.unknownext HTTP/1.1\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 415 Unsupported Media Type\r\n"));
}

#[tokio::test]
async fn test_server_handles_sequential_connections_with_one_slot() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "a").unwrap();
    let addr = start(dir.path(), 1).await;

    for _ in 0..3 {
        let response = get(addr, b"GET /a.txt HTTP/1.1\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.ends_with("\r\n\r\na"));
    }
}

#[tokio::test]
async fn test_server_response_survives_unread_headers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("big.txt"), vec![b'z'; 16 * 1024]).unwrap();
    let addr = start(dir.path(), 4).await;

    let mut request = b"GET /big.txt HTTP/1.1\r\n".to_vec();
    for i in 0..1000 {
        request.extend_from_slice(format!("X-Filler-{}: {}\r\n", i, "y".repeat(20)).as_bytes());
    }
    request.extend_from_slice(b"\r\n");

    let response = get(addr, &request).await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Length: 16384\r\n"));
    assert!(response.ends_with(&"z".repeat(16 * 1024)));
}
