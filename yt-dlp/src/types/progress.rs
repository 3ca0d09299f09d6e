#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStatus {
    Downloading,
    Finished,
    Error,
    Other(String)
}

impl From<&str> for ProgressStatus {
    fn from(s: &str) -> Self {
        match s {
            "downloading" => ProgressStatus::Downloading,
            "finished" => ProgressStatus::Finished,
            "error" => ProgressStatus::Error,
            other => ProgressStatus::Other(other.to_string())
        }
    }
}

/// One progress sample as reported by yt-dlp's progress hook.
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    pub status: ProgressStatus,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
    pub total_bytes_estimate: Option<u64>,
    pub speed: Option<f64>,
    pub eta: Option<f64>
}

impl DownloadProgress {
    pub fn downloading(downloaded_bytes: u64, total_bytes: Option<u64>) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            downloaded_bytes,
            total_bytes,
            total_bytes_estimate: None,
            speed: None,
            eta: None
        }
    }

    /// Exact total when yt-dlp knows it, otherwise its estimate. Zero counts as unknown.
    pub fn known_total(&self) -> Option<u64> {
        self.total_bytes
            .filter(|t| *t > 0)
            .or(self.total_bytes_estimate.filter(|t| *t > 0))
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> Option<f64> {
        self.known_total()
            .map(|total| self.downloaded_bytes as f64 / total as f64 * 100.0)
    }

    pub fn format_speed(&self) -> Option<String> {
        self.speed
            .filter(|s| *s > 0.0)
            .map(|s| format!("{}/s", format_bytes(s)))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn format_eta(&self) -> Option<String> {
        self.eta.filter(|e| *e >= 1.0).map(|e| {
            let secs = e as u64;
            format!("{:02}:{:02}", secs / 60, secs % 60)
        })
    }
}

/// Scales a byte count through B, KB, MB and GB in steps of 1024.
///
/// Values beyond the gigabyte range stay in GB.
pub fn format_bytes(bytes: f64) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];

    let mut value = bytes;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} GB")
}

#[derive(Debug, Clone)]
pub enum DownloadEvent {
    Extracting { url: String },
    DownloadStarted { filename: String },
    Progress(DownloadProgress),
    PostProcessing { status: String },
    MergingFormats,
    Finished { filename: String },
    Error { message: String }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

    #[test]
    fn test_format_bytes_scaling() {
        assert_eq!(format_bytes(0.0), "0.00 B");
        assert_eq!(format_bytes(1023.0), "1023.00 B");
        assert_eq!(format_bytes(1536.0), "1.50 KB");
        assert_eq!(format_bytes(1024.0 * 1024.0), "1.00 MB");
        assert_eq!(format_bytes(2.0 * GIB), "2.00 GB");
    }

    #[test]
    fn test_format_bytes_stops_at_gb() {
        assert_eq!(format_bytes(2048.0 * GIB), "2048.00 GB");
    }

    #[test]
    fn test_progress_status_from_str() {
        assert_eq!(ProgressStatus::from("downloading"), ProgressStatus::Downloading);
        assert_eq!(ProgressStatus::from("finished"), ProgressStatus::Finished);
        assert_eq!(ProgressStatus::from("error"), ProgressStatus::Error);
        assert_eq!(
            ProgressStatus::from("started"),
            ProgressStatus::Other("started".to_string())
        );
    }

    #[test]
    fn test_known_total_prefers_exact_then_estimate() {
        let mut progress = DownloadProgress::downloading(10, Some(100));
        progress.total_bytes_estimate = Some(120);
        assert_eq!(progress.known_total(), Some(100));

        progress.total_bytes = None;
        assert_eq!(progress.known_total(), Some(120));

        progress.total_bytes = Some(0);
        assert_eq!(progress.known_total(), Some(120));

        progress.total_bytes_estimate = None;
        assert_eq!(progress.known_total(), None);
        assert_eq!(progress.percent(), None);
    }

    #[test]
    fn test_percent() {
        let progress = DownloadProgress::downloading(50, Some(200));
        assert_eq!(progress.percent(), Some(25.0));
    }

    #[test]
    fn test_format_speed() {
        let mut progress = DownloadProgress::downloading(0, None);
        assert_eq!(progress.format_speed(), None);

        progress.speed = Some(0.0);
        assert_eq!(progress.format_speed(), None);

        progress.speed = Some(1536.0);
        assert_eq!(progress.format_speed(), Some("1.50 KB/s".to_string()));
    }

    #[test]
    fn test_format_eta() {
        let mut progress = DownloadProgress::downloading(0, None);
        assert_eq!(progress.format_eta(), None);

        progress.eta = Some(0.0);
        assert_eq!(progress.format_eta(), None);

        progress.eta = Some(7.0);
        assert_eq!(progress.format_eta(), Some("00:07".to_string()));

        progress.eta = Some(90.0);
        assert_eq!(progress.format_eta(), Some("01:30".to_string()));

        progress.eta = Some(3723.0);
        assert_eq!(progress.format_eta(), Some("62:03".to_string()));
    }
}
