//! Retrieval of the raw bibliography text from a URL or a local file.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Failure to obtain the bibliography resource.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Could not load bibliography (HTTP {status} from {url})")]
    Status { url: String, status: u16 },
    #[error("Could not load bibliography: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not load bibliography from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A static resource holding bibliography text.
pub trait BibSource: Send + Sync {
    /// Human-readable location, used in diagnostics.
    fn name(&self) -> &str;

    /// Read the whole resource. Performs exactly one read and never retries.
    fn fetch<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, RetrievalError>> + Send + 'a>>;
}

/// Bibliography served over HTTP(S).
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl BibSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self.client.get(&self.url).send().await?;

            if !resp.status().is_success() {
                return Err(RetrievalError::Status {
                    url: self.url.clone(),
                    status: resp.status().as_u16(),
                });
            }

            let body = resp.text().await?;
            tracing::debug!(url = %self.url, bytes = body.len(), "fetched bibliography");
            Ok(body)
        })
    }
}

/// Bibliography stored on the local filesystem.
pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

impl BibSource for FileSource {
    fn name(&self) -> &str {
        &self.display
    }

    fn fetch<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            let body = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| RetrievalError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            tracing::debug!(path = %self.display, bytes = body.len(), "read bibliography");
            Ok(body)
        })
    }
}

/// Whether a location should be fetched over HTTP rather than read from disk.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pick the source implementation for a location string.
pub fn source_from_location(location: &str, client: &reqwest::Client) -> Box<dyn BibSource> {
    if is_remote(location) {
        Box::new(HttpSource::new(location.trim(), client.clone()))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Build the HTTP client used for remote sources. The timeout is enforced by
/// the transport, not by the pipeline.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, RetrievalError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pubshelf/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://example.org/paper.bib"));
        assert!(is_remote("HTTP://example.org/paper.bib"));
        assert!(!is_remote("media/bibliography/paper.bib"));
        assert!(!is_remote("/srv/site/httpdocs/paper.bib"));
    }

    #[test]
    fn status_error_message() {
        let err = RetrievalError::Status {
            url: "https://example.org/paper.bib".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Could not load bibliography (HTTP 404 from https://example.org/paper.bib)"
        );
    }

    #[test]
    fn file_source_name_is_path() {
        let source = FileSource::new("media/bibliography/paper.bib");
        assert_eq!(source.name(), "media/bibliography/paper.bib");
    }
}
