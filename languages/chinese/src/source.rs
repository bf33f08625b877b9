use std::path::PathBuf;
use std::sync::Arc;

use hanzi_core::error::BuildError;
use reqwest::header::CACHE_CONTROL;

/// Where the raw text of one dictionary comes from
#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Retrieve the full dictionary text
    async fn fetch(&self) -> Result<String, BuildError>;
}

/// Dictionary served over HTTP(S)
pub struct HttpSource {
    client: reqwest::Client,
    name: String,
    url: String,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl TextSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, BuildError> {
        tracing::info!("Fetching {} from {}", self.name, self.url);

        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| self.fetch_error(e))?;

        if !response.status().is_success() {
            return Err(BuildError::Status {
                name: self.name.clone(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|e| self.fetch_error(e))
    }
}

impl HttpSource {
    fn fetch_error(&self, e: reqwest::Error) -> BuildError {
        BuildError::Fetch {
            name: self.name.clone(),
            reason: e.to_string(),
        }
    }
}

/// Dictionary stored on the local filesystem
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait::async_trait]
impl TextSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, BuildError> {
        tracing::info!("Reading {} from {}", self.name, self.path.display());

        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| BuildError::Fetch {
                name: self.name.clone(),
                reason: format!("{}: {}", self.path.display(), e),
            })
    }
}

/// Dictionary text already in memory
pub struct StaticSource {
    name: String,
    text: Arc<str>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait::async_trait]
impl TextSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, BuildError> {
        Ok(self.text.to_string())
    }
}

/// HTTP source for `http://` and `https://` locations, file source otherwise
pub fn source_from_location(
    client: &reqwest::Client,
    name: &str,
    location: &str,
    version: &str,
) -> Arc<dyn TextSource> {
    if is_remote(location) {
        Arc::new(HttpSource::new(client.clone(), name, versioned_url(location, version)))
    } else {
        Arc::new(FileSource::new(name, location))
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Append `v=<version>` so caches never serve an older dictionary
pub fn versioned_url(url: &str, version: &str) -> String {
    if version.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}v={version}")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use super::*;

    /// Serve one HTTP response on a local port; yields the request head
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (head_tx, head_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let _ = head_tx.send(String::from_utf8_lossy(&request).into_owned());

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        (format!("http://{addr}/cedict_ts.u8"), head_rx)
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn test_http_source_returns_body() {
        let (url, head_rx) = serve_once("200 OK", "山 山 [shan1] /mountain/\n").await;
        let source = source_from_location(&client(), "CC-CEDICT", &url, "cedict-7");

        let text = source.fetch().await.unwrap();
        assert_eq!(text, "山 山 [shan1] /mountain/\n");

        let head = head_rx.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert_eq!(request_line, "GET /cedict_ts.u8?v=cedict-7 HTTP/1.1");
        assert!(
            head.to_ascii_lowercase().contains("cache-control: no-cache"),
            "missing no-cache header: {head}"
        );
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let (url, _head_rx) = serve_once("404 Not Found", "missing").await;
        let source = HttpSource::new(client(), "CC-Canto", url);

        match source.fetch().await {
            Err(BuildError::Status { name, status }) => {
                assert_eq!(name, "CC-Canto");
                assert_eq!(status, 404);
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_connection_failure_is_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(client(), "CC-CEDICT", format!("http://{addr}/d"));
        match source.fetch().await {
            Err(BuildError::Fetch { name, .. }) => assert_eq!(name, "CC-CEDICT"),
            other => panic!("Expected fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_versioned_url() {
        assert_eq!(
            versioned_url("https://example.org/cedict_ts.u8", "cedict-1"),
            "https://example.org/cedict_ts.u8?v=cedict-1"
        );
        assert_eq!(
            versioned_url("https://example.org/dict?fmt=u8", "2"),
            "https://example.org/dict?fmt=u8&v=2"
        );
        assert_eq!(versioned_url("https://example.org/d", ""), "https://example.org/d");
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/cedict_ts.u8"));
        assert!(is_remote("http://localhost:8080/cccanto.u8"));
        assert!(!is_remote("assets/cedict_ts.u8"));
        assert!(!is_remote("/srv/dict/httpdocs.u8"));
    }

    #[tokio::test]
    async fn test_file_source_reads_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "山 山 [shan1] /mountain/").unwrap();

        let source = FileSource::new("CC-CEDICT", file.path());
        let text = source.fetch().await.unwrap();
        assert_eq!(text, "山 山 [shan1] /mountain/\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new("CC-Canto", dir.path().join("missing.u8"));

        match source.fetch().await {
            Err(BuildError::Fetch { name, reason }) => {
                assert_eq!(name, "CC-Canto");
                assert!(reason.contains("missing.u8"));
            }
            other => panic!("Expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new("fixture", "你好 你好 [ni3 hao3] /hello/");
        assert_eq!(source.name(), "fixture");
        assert_eq!(source.fetch().await.unwrap(), "你好 你好 [ni3 hao3] /hello/");
    }
}
