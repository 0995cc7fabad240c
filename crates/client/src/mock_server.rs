//! A minimal mock HTTP server built on tokio that returns canned responses.

use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub(crate) struct MockServer {
    listener: tokio::net::TcpListener,
    pub(crate) base_url: String,
}

impl MockServer {
    pub(crate) async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{port}");
        Self { listener, base_url }
    }

    /// Accept one connection, answer it, and return the raw request head
    /// (request line and headers).
    pub(crate) async fn respond_once(self, status_code: u16, body: &str) -> String {
        let body = body.to_owned();
        let (mut stream, _) = self.listener.accept().await.unwrap();

        let mut buf = vec![0u8; 8192];
        let n = stream.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).into_owned();

        let response = format!(
            "HTTP/1.1 {status_code} OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n\
             {body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        request
    }
}
