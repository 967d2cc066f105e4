//! HTTP downloads.
//!
//! Downloads go through the [`HttpClient`] trait so installation and key
//! refresh can be exercised without a network.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use swiftly_core::{Error, Result};
use swiftly_ui::{Printer, Progress, Spinner, Style};
use tracing::{debug, instrument};

/// Default timeout for a single download, generous for large toolchains.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Capability to fetch a URL into a local file.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Download `url` to `dest`, replacing any existing file.
    async fn download_file(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`HttpClient`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    printer: Printer,
}

impl ReqwestClient {
    /// Create a client with the default timeout.
    pub fn new(printer: Printer) -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT, printer)
    }

    /// Create a client with an explicit timeout.
    pub fn with_timeout(timeout: Duration, printer: Printer) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("swiftly/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network {
                message: format!("failed to create HTTP client: {}", e),
                url: String::new(),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client, printer })
    }
}

fn network_error(url: &str, message: String, source: Option<reqwest::Error>) -> Error {
    Error::Network {
        message,
        url: url.to_string(),
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    #[instrument(skip(self, dest))]
    async fn download_file(&self, url: &str, dest: &Path) -> Result<()> {
        let name = dest
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| url.to_string());

        let spinner = Spinner::new(format!("Fetching {}...", name), self.printer);

        debug!("Downloading from {}", url);
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                spinner.fail(format!("Failed to fetch {}", name));
                return Err(network_error(url, e.to_string(), Some(e)));
            }
        };

        if !response.status().is_success() {
            spinner.fail(format!("Failed to fetch {}", name));
            return Err(network_error(url, format!("HTTP {}", response.status()), None));
        }

        let total_size = response.content_length().unwrap_or(0);
        spinner.clear();

        let progress = (total_size > 0)
            .then(|| Progress::new(total_size, format!("Downloading {}", name), self.printer));

        // Stream into a temporary sibling of `dest`; it is removed on drop
        // unless the download completes and is persisted.
        let dir = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut file = tempfile::Builder::new()
            .prefix(".swiftly-download")
            .tempfile_in(dir)
            .map_err(|e| Error::io("failed to create download file", dir, e))?;

        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                network_error(url, format!("download interrupted: {}", e), Some(e))
            })?;
            file.write_all(&chunk)
                .map_err(|e| Error::io("failed to write download data", file.path(), e))?;
            downloaded += chunk.len() as u64;
            if let Some(ref progress) = progress {
                progress.advance(chunk.len() as u64);
            }
        }

        if let Some(progress) = progress {
            progress.finish(format!("Downloaded {} ({})", name, Style::megabytes(downloaded)));
        }

        file.persist(dest)
            .map_err(|e| Error::io("failed to finalize download", dest, e.error))?;

        debug!(bytes = downloaded, "Saved {}", dest.display());
        Ok(())
    }
}
