use pagescrape_model::{HarvestError, Result};
use std::error::Error as StdError;

/// Identification sent with every request. Some sites refuse clients that
/// don't look like a desktop browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Fetch a page and return its body as text.
///
/// One GET, no retry, and no timeout beyond the client default. Transport
/// failures and non-2xx statuses come back as `HarvestError::Fetch`; a body
/// that can't be read comes back as `HarvestError::Parse`.
pub async fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| HarvestError::Fetch(describe(&e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| HarvestError::Fetch(describe(&e)))?;

    let status = response.status();
    tracing::debug!(url = %url, status = %status, "Received response");
    if !status.is_success() {
        return Err(HarvestError::Fetch(format!("HTTP {status} for {url}")));
    }

    response
        .text()
        .await
        .map_err(|e| HarvestError::Parse(describe(&e)))
}

/// Flatten an error and its sources into one line.
///
/// reqwest's top-level message ("error sending request for url ...") hides
/// the useful part, e.g. "Connection refused".
fn describe(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned HTTP response on a local port, reporting the raw
    /// request it received.
    fn serve_once(response: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap();
            tx.send(String::from_utf8_lossy(&buf[..n]).to_string()).unwrap();
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{addr}/page"), rx)
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_user_agent() {
        let (url, requests) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 21\r\nConnection: close\r\n\r\n<h2>Hello world</h2>\n",
        );

        let body = fetch_page(&url).await.unwrap();
        assert_eq!(body, "<h2>Hello world</h2>\n");

        let request = requests.recv().unwrap().to_lowercase();
        assert!(request.starts_with("get /page"));
        assert!(request.contains(&format!("user-agent: {}", USER_AGENT.to_lowercase())));
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let (url, _requests) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );

        let err = fetch_page(&url).await.unwrap_err();
        match err {
            HarvestError::Fetch(msg) => assert!(msg.contains("404"), "{msg}"),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop to get a port with nothing listening.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let err = fetch_page(&format!("http://127.0.0.1:{port}/")).await.unwrap_err();
        assert!(matches!(err, HarvestError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let err = fetch_page("not a url").await.unwrap_err();
        assert!(matches!(err, HarvestError::Fetch(_)));
    }
}
