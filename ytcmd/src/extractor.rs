use std::path::PathBuf;

use async_trait::async_trait;
use tokio_stream::StreamExt;
use yt_dlp::{DownloadEvent, DownloadOptions, DownloadProgress, VideoInfo, YtDlp};

use crate::models::SelectionExpression;

#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub selection: SelectionExpression,
    /// Output path template, e.g. `downloads/%(title)s.%(ext)s`.
    pub output_template: PathBuf,
    pub merge_output_format: Option<String>,
    pub rate_limit: Option<String>
}

/// Resolves URLs into stream metadata and performs the transfer.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn fetch_metadata(&self, url: &str) -> yt_dlp::Result<VideoInfo>;

    /// Downloads the selected streams and returns the final file path.
    async fn download(
        &self,
        request: &DownloadRequest,
        on_progress: &mut (dyn for<'p> FnMut(&'p DownloadProgress) + Send)
    ) -> yt_dlp::Result<PathBuf>;
}

#[async_trait]
impl Extractor for YtDlp {
    async fn fetch_metadata(&self, url: &str) -> yt_dlp::Result<VideoInfo> {
        self.get_video_info(url).await
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        on_progress: &mut (dyn for<'p> FnMut(&'p DownloadProgress) + Send)
    ) -> yt_dlp::Result<PathBuf> {
        let mut options = DownloadOptions::new().format(request.selection.as_str());
        if let Some(ref container) = request.merge_output_format {
            options = options.merge_output_format(container.clone());
        }
        if let Some(ref limit) = request.rate_limit {
            options = options.rate_limit(limit.clone());
        }

        let stream = self.download_with_progress(&request.url, &request.output_template, &options);
        tokio::pin!(stream);

        let mut final_filename: Option<String> = None;
        let mut error_message: Option<String> = None;

        while let Some(event) = stream.next().await {
            match event? {
                DownloadEvent::Progress(progress) => on_progress(&progress),
                DownloadEvent::DownloadStarted { filename } => {
                    tracing::info!("writing {}", filename);
                }
                DownloadEvent::MergingFormats => tracing::info!("merging audio and video streams"),
                DownloadEvent::PostProcessing { status } => {
                    tracing::info!("post-processing: {}", status);
                }
                DownloadEvent::Finished { filename } => final_filename = Some(filename),
                DownloadEvent::Error { message } => error_message = Some(message),
                event @ DownloadEvent::Extracting { .. } => {
                    tracing::debug!("download event: {:?}", event);
                }
            }
        }

        if let Some(message) = error_message {
            return Err(yt_dlp::Error::DownloadFailed(message));
        }

        final_filename.map(PathBuf::from).ok_or_else(|| {
            yt_dlp::Error::DownloadFailed("download finished but no file was reported".to_string())
        })
    }
}
