//! Connectivity probing.
//!
//! Before each dispatch the prober answers one question: is outbound
//! internet access usable right now? A DNS answer or a TCP accept is not
//! enough; captive portals and interception proxies pass those while
//! serving their own pages. The probe therefore requires a success status
//! and a content marker that only the genuine page carries.

use std::time::Duration;

use crate::observability::{PROBE_FAILURES, PROBE_REQUESTS};

/// Well-known host fetched by the probe.
const PROBE_URL: &str = "https://www.baidu.com";

/// Substring that must appear in the body for the page to count as genuine.
const PROBE_MARKER: &str = "baidu.com";

/// Bound on the whole probe, connection through body.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Returns whether outbound internet access is currently usable.
///
/// Computed fresh on every call; callers must not cache the verdict because
/// network state can change between invocations. Never panics and never
/// returns an error: any failure - client construction, connect, timeout,
/// non-success status, unreadable body, missing marker - is `false`.
pub async fn is_online() -> bool {
    probe(PROBE_URL, PROBE_TIMEOUT).await
}

async fn probe(url: &str, timeout: Duration) -> bool {
    PROBE_REQUESTS.click();
    let Ok(client) = reqwest::Client::builder().timeout(timeout).build() else {
        PROBE_FAILURES.click();
        return false;
    };
    let Ok(response) = client.get(url).send().await else {
        PROBE_FAILURES.click();
        return false;
    };
    if !response.status().is_success() {
        PROBE_FAILURES.click();
        return false;
    }
    match response.text().await {
        Ok(body) if body.contains(PROBE_MARKER) => true,
        _ => {
            PROBE_FAILURES.click();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::SocketAddr;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a loopback port.
    async fn serve_once(status_line: &str, body: &str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "{status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len(),
        );
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        addr
    }

    #[tokio::test]
    async fn unreachable_target_is_offline() {
        // Bind and immediately drop to get a port with no listener.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert!(!probe(&format!("http://{addr}/"), Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn genuine_page_is_online() {
        let addr = serve_once(
            "HTTP/1.1 200 OK",
            "<html><head><title>baidu.com</title></head></html>",
        )
        .await;
        assert!(probe(&format!("http://{addr}/"), Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn captive_portal_body_is_offline() {
        let addr = serve_once("HTTP/1.1 200 OK", "<html>Sign in to this network</html>").await;
        assert!(!probe(&format!("http://{addr}/"), Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn non_success_status_is_offline() {
        let addr = serve_once("HTTP/1.1 503 Service Unavailable", "baidu.com").await;
        assert!(!probe(&format!("http://{addr}/"), Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn invalid_url_is_offline() {
        assert!(!probe("not a url", Duration::from_secs(1)).await);
    }
}
