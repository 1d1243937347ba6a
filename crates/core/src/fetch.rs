use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use santa_route::{FeedFetcher, RouteError};

/// Fetches route documents over HTTP
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn classify(url: &str, err: reqwest::Error) -> RouteError {
    if err.is_timeout() {
        RouteError::Timeout(url.to_owned())
    } else {
        RouteError::Fetch {
            url: url.to_owned(),
            message: err.to_string(),
        }
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = santa_route::Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            tracing::debug!("GET {url}");
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| classify(url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RouteError::Status {
                    url: url.to_owned(),
                    status: status.as_u16(),
                });
            }

            let bytes = response.bytes().await.map_err(|e| classify(url, e))?;
            tracing::debug!("received {} bytes from {url}", bytes.len());
            Ok(bytes.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();

        // Nothing listens on port 9 of the loopback interface
        let result = fetcher.fetch("http://127.0.0.1:9/route.json").await;
        assert!(matches!(
            result,
            Err(RouteError::Fetch { .. } | RouteError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await;
        });

        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        let url = format!("http://127.0.0.1:{port}/route.json");
        let result = fetcher.fetch(&url).await;

        assert!(matches!(result, Err(RouteError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Accept and hold the connection without ever answering
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let client = Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let fetcher = HttpFetcher::with_client(client);
        let url = format!("http://127.0.0.1:{port}/route.json");

        match fetcher.fetch(&url).await {
            Err(RouteError::Timeout(timed_out)) => assert_eq!(timed_out, url),
            other => panic!("Expected Timeout, got {other:?}"),
        }
    }
}
