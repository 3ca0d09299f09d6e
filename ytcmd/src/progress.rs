use yt_dlp::{DownloadProgress, ProgressStatus};

const UNKNOWN: &str = "N/A";

/// Turns progress samples into the one-line status shown while downloading.
pub struct ProgressReporter;

impl ProgressReporter {
    /// Returns `None` outside the downloading phase or while the total size is unknown.
    pub fn render(progress: &DownloadProgress) -> Option<String> {
        if progress.status != ProgressStatus::Downloading {
            return None;
        }
        let percent = progress.percent()?;

        let speed = progress.format_speed();
        let eta = progress.format_eta();

        Some(format!(
            "Progress: {percent:.1}% | Speed: {} | ETA: {}",
            speed.as_deref().unwrap_or(UNKNOWN),
            eta.as_deref().unwrap_or(UNKNOWN)
        ))
    }
}
