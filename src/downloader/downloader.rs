//! Core downloader implementation with fetch logic.
//!
//! A download is a sequence of attempts sharing one [`TransferState`]. Each
//! attempt prepares the destination, probes the resource, checks the probe
//! against the reference size and the file on disk, then streams the body
//! into the destination, resuming with a `Range` request when it can. A
//! transient failure backs off and starts a new attempt; any other failure
//! ends the download.
//!
//! # Examples
//!
//! ```rust,no_run
//! use abc::{DownloadRequest, DownloaderBuilder};
//!
//! # async fn example() -> Result<(), abc::Error> {
//! let downloader = DownloaderBuilder::new().build();
//! let request = DownloadRequest::new("https://example.com/file.zip")
//!     .destination("downloads/file.zip")
//!     .retry_limit(5);
//!
//! let summary = downloader.download(&request).await.into_result()?;
//! println!("{:?} bytes, ranges: {:?}", summary.total_size(), summary.accept_ranges());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::failure::{Failure, FailureExt};
use super::resume::can_resume;
use super::state::TransferState;
use crate::download::{DownloadOptions, DownloadRequest, Status, Summary};
use crate::error::{Error, Result};
use crate::http::{create_http_client, probe, HttpClientConfig, ProbeInfo, ProbeVerdict};
use crate::progress::{ProgressDisplay, ProgressReporter};

use futures::stream::{self, StreamExt};
use reqwest::{
    header::{HeaderMap, RANGE},
    Response, StatusCode, Url,
};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use std::fmt;
use std::fmt::Debug;
use std::io::{ErrorKind, SeekFrom};
use std::path::Path;
use tokio::{
    fs,
    fs::{File, OpenOptions},
    io::{AsyncSeekExt, AsyncWriteExt},
};
use tracing::{debug, error, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use abc::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

/// Where an attempt writes, and from which offset.
struct Destination {
    file: File,
    offset: u64,
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the number of concurrent downloads.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Gets the extra headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets the configuration.
    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Runs one download to completion.
    ///
    /// Without a destination only the probe runs and the summary carries
    /// the size and range support of the resource.
    pub async fn download(&self, request: &DownloadRequest) -> Summary {
        let display = ProgressDisplay::new(self.config.style.clone());
        self.fetch(request, &display).await
    }

    /// Runs independent downloads concurrently, at most
    /// `concurrent_downloads` at a time. Summaries are returned in the order
    /// of the requests.
    pub async fn download_all(&self, requests: &[DownloadRequest]) -> Vec<Summary> {
        let display = ProgressDisplay::new(self.config.style.clone());
        stream::iter(requests)
            .map(|r| self.fetch(r, &display))
            .buffered(self.config.concurrent_downloads)
            .collect::<Vec<_>>()
            .await
    }

    /// Runs a download and turns its outcome into a summary.
    async fn fetch(&self, request: &DownloadRequest, display: &ProgressDisplay) -> Summary {
        let mut state = TransferState::new(self.config.backoff);
        let status = match self.run(request, display, &mut state).await {
            Ok(status) => status,
            Err(e) => {
                error!("Download of {:?} failed: {}", request.url(), e);
                say(request, display, &e.to_string());
                Status::Fail(e)
            }
        };

        let (total_size, accept_ranges) = match state.reference() {
            Some(info) => (info.total_size, info.accept_ranges.clone()),
            None => (None, String::new()),
        };
        Summary::new(request.url().unwrap_or_default(), total_size, accept_ranges, status)
            .with_retries(state.retries())
            .with_elapsed(state.elapsed())
    }

    /// The retry loop.
    async fn run(
        &self,
        request: &DownloadRequest,
        display: &ProgressDisplay,
        state: &mut TransferState,
    ) -> Result<Status> {
        let url = request.parsed_url()?;
        let client = create_http_client(HttpClientConfig {
            timeout: request.request_timeout(),
            user_agent: request.agent().map(String::from),
            headers: self.config.headers.clone(),
        })?;

        if let Some(destination) = request.destination_path() {
            say(
                request,
                display,
                &format!("Downloading {} to {}...", url, destination.display()),
            );
        }

        loop {
            match self.attempt(&client, &url, request, display, state).await {
                Ok(status) => return Ok(status),
                Err(Failure::Fatal(e)) => return Err(e),
                Err(Failure::Transient(e)) => {
                    if !state.try_consume_retry(request.retries()) {
                        return Err(e);
                    }
                    warn!("Attempt on {} failed, retry {}: {}", url, state.retries(), e);
                    say(request, display, &e.to_string());
                    say(request, display, &format!("Retry {}...", state.retries()));
                    state.back_off().await;
                }
            }
        }
    }

    /// One pass of prepare, probe, validate and transfer.
    async fn attempt(
        &self,
        client: &ClientWithMiddleware,
        url: &Url,
        request: &DownloadRequest,
        display: &ProgressDisplay,
        state: &mut TransferState,
    ) -> std::result::Result<Status, Failure> {
        let options = request.download_options();

        if let Some(path) = request.destination_path() {
            prepare_file(path, options, state).await.fatal()?;
            state.mark_started();
        }

        let probed = probe(client, url).await.classified()?;
        let info = state.record_probe(probed).fatal()?.clone();

        let Some(path) = request.destination_path() else {
            return Ok(Status::Probed);
        };

        if info.check_existing(state.existing_size).fatal()? == ProbeVerdict::AlreadyComplete {
            debug!("{} already holds all {} bytes", path.display(), state.existing_size);
            say(
                request,
                display,
                "The download was already completed previously",
            );
            return Ok(Status::AlreadyComplete);
        }

        let mut destination = open_destination(path, &info, request, state)
            .await
            .fatal()?;

        let mut req = client.get(url.clone());
        if destination.offset > 0 {
            req = req.header(RANGE, format!("bytes={}-", destination.offset));
        } else if let Some(range) = request.explicit_range() {
            if info.supports_ranges() {
                req = req.header(RANGE, format!("bytes={}", range));
            }
        }

        let reporter = (!options.suppress_progress).then(|| {
            ProgressReporter::spawn(display, path, info.total_size, self.config.sample_interval)
        });

        let transferred = transfer(req, url, &mut destination).await;

        if let Some(reporter) = reporter {
            reporter.stop().await;
        }
        if matches!(transferred?, Status::AlreadyComplete) {
            say(
                request,
                display,
                "The download was already completed previously",
            );
            return Ok(Status::AlreadyComplete);
        }

        let elapsed = state.elapsed().unwrap_or_default();
        debug!("Downloaded {} to {} in {:?}", url, path.display(), elapsed);
        say(
            request,
            display,
            &format!("Download completed in {:.2?}", elapsed),
        );

        Ok(Status::Success)
    }
}

/// Print an operator message unless debug output is suppressed.
fn say(request: &DownloadRequest, display: &ProgressDisplay, line: &str) {
    if !request.download_options().suppress_debug {
        display.println(line);
    }
}

/// Inspect the destination and record what is already on disk.
async fn prepare_file(
    path: &Path,
    options: DownloadOptions,
    state: &mut TransferState,
) -> Result<()> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            return Err(Error::DestinationIsDirectory(path.to_path_buf()));
        }
        Ok(_) if options.discard_existing && state.retries() == 0 => {
            debug!("Discarding existing {}", path.display());
            fs::remove_file(path).await?;
            state.file_exists = false;
            state.existing_size = 0;
        }
        Ok(meta) => {
            state.file_exists = true;
            state.existing_size = meta.len();
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            state.file_exists = false;
            state.existing_size = 0;
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!("Creating destination directory {:?}", parent);
        fs::create_dir_all(parent).await?;
    }

    Ok(())
}

/// Open the destination, appending to it when the download can resume and
/// replacing it otherwise.
async fn open_destination(
    path: &Path,
    info: &ProbeInfo,
    request: &DownloadRequest,
    state: &mut TransferState,
) -> Result<Destination> {
    let resume = can_resume(
        &info.accept_ranges,
        request.explicit_range().is_some(),
        state.existing_size,
    );

    if resume {
        debug!("Resuming {} at byte {}", path.display(), state.existing_size);
        let mut file = OpenOptions::new().append(true).open(path).await?;
        file.seek(SeekFrom::End(0)).await?;
        return Ok(Destination {
            file,
            offset: state.existing_size,
        });
    }

    if state.file_exists {
        debug!("Removing stale {}", path.display());
        match fs::remove_file(path).await {
            Ok(()) => (),
            Err(e) if e.kind() == ErrorKind::NotFound => (),
            Err(e) => return Err(e.into()),
        }
        state.file_exists = false;
        state.existing_size = 0;
    }

    debug!("Creating destination file {:?}", path);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await?;
    Ok(Destination { file, offset: 0 })
}

/// Send the body request and stream the response into the destination.
///
/// A resume request answered with `416` means the destination already ends
/// where the resource does; this happens when the size is unknown and the
/// probe could not tell.
async fn transfer(
    req: RequestBuilder,
    url: &Url,
    destination: &mut Destination,
) -> std::result::Result<Status, Failure> {
    let res = req.send().await.classified()?;

    let status = res.status();
    if destination.offset > 0 && status == StatusCode::RANGE_NOT_SATISFIABLE {
        debug!(
            "{} has nothing past byte {}, keeping the destination",
            url, destination.offset
        );
        return Ok(Status::AlreadyComplete);
    }
    if !status.is_success() {
        return Err(Failure::classify(Error::HttpStatus {
            status,
            url: url.to_string(),
        }));
    }

    if destination.offset > 0 && status != StatusCode::PARTIAL_CONTENT {
        warn!(
            "{} ignored the range request ({}), restarting from the first byte",
            url, status
        );
        destination.file.set_len(0).await.fatal()?;
        destination.file.seek(SeekFrom::Start(0)).await.fatal()?;
        destination.offset = 0;
    }

    debug!("Retrieving chunks...");
    let copied = copy_body(res, &mut destination.file).await;
    // Flush even when the copy failed.
    let flushed = destination.file.flush().await;
    copied.transient()?;
    flushed.transient()?;

    Ok(Status::Success)
}

/// Write the response body into `file` chunk by chunk.
async fn copy_body(res: Response, file: &mut File) -> Result<()> {
    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let mut chunk = item?;
        file.write_all_buf(&mut chunk).await?;
    }
    Ok(())
}
