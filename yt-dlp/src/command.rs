use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::types::DownloadOptions;

/// Progress line emitted through `--progress-template`; yt-dlp prints `NA` for missing fields.
pub(crate) const PROGRESS_PREFIX: &str = "[progress]";

const PROGRESS_TEMPLATE: &str = "download:[progress] %(progress.status)s \
    %(progress.downloaded_bytes)s %(progress.total_bytes)s \
    %(progress.total_bytes_estimate)s %(progress.speed)s %(progress.eta)s";

pub struct CommandBuilder {
    binary: PathBuf,
    args: Vec<String>
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        self.arg(url)
    }

    pub fn json_output(self) -> Self {
        self.arg("--dump-json")
    }

    pub fn skip_download(self) -> Self {
        self.arg("--skip-download")
    }

    pub fn no_playlist(self) -> Self {
        self.arg("--no-playlist")
    }

    pub fn output(self, path: impl AsRef<Path>) -> Self {
        self.arg("-o").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        self.arg("-f").arg(format)
    }

    pub fn merge_output_format(self, format: impl Into<String>) -> Self {
        self.arg("--merge-output-format").arg(format)
    }

    pub fn rate_limit(self, limit: impl Into<String>) -> Self {
        self.arg("-r").arg(limit)
    }

    pub fn cookies_file(self, path: impl AsRef<Path>) -> Self {
        self.arg("--cookies").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn cookies_file_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self.cookies_file(p),
            None => self
        }
    }

    pub fn ffmpeg_location(self, path: impl AsRef<Path>) -> Self {
        self.arg("--ffmpeg-location").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn ffmpeg_location_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self.ffmpeg_location(p),
            None => self
        }
    }

    /// Machine-readable progress, one line per update.
    pub fn progress_lines(self) -> Self {
        self.arg("--newline")
            .arg("--progress-template")
            .arg(PROGRESS_TEMPLATE)
    }

    pub fn with_options(mut self, options: &DownloadOptions) -> Self {
        if let Some(ref format) = options.format {
            self = self.format(format.clone());
        }

        if let Some(ref container) = options.merge_output_format {
            self = self.merge_output_format(container.clone());
        }

        if let Some(ref limit) = options.rate_limit {
            self = self.rate_limit(limit.clone());
        }

        self
    }

    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);
        cmd
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}
