use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use futures_core::Stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::{CommandBuilder, PROGRESS_PREFIX};
use crate::error::{Error, Result};
use crate::types::{DownloadEvent, DownloadOptions, DownloadProgress, ProgressStatus, VideoInfo};

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_file: Option<PathBuf>,
    ffmpeg_location: Option<PathBuf>
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self::with_binary("yt-dlp")
    }

    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: path.into(),
            cookies_file: None,
            ffmpeg_location: None
        }
    }

    pub fn set_cookies_file(&mut self, path: Option<PathBuf>) {
        self.cookies_file = path;
    }

    pub fn set_ffmpeg_location(&mut self, path: Option<PathBuf>) {
        self.ffmpeg_location = path;
    }

    pub async fn check_binary(&self) -> Result<String> {
        let output = CommandBuilder::new(&self.binary)
            .arg("--version")
            .build()
            .output()
            .await
            .map_err(|e| Error::spawn(&self.binary, e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::BinaryNotExecutable(self.binary.clone()))
        }
    }

    pub async fn get_video_info(&self, url: &str) -> Result<VideoInfo> {
        let builder = self
            .command()
            .json_output()
            .skip_download()
            .no_playlist()
            .url(url);

        tracing::debug!(
            binary = %self.binary.display(),
            args = ?builder.get_args(),
            "fetching video info"
        );

        let output = builder
            .build()
            .output()
            .await
            .map_err(|e| Error::spawn(&self.binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: error_summary(&stderr)
            });
        }

        let info: VideoInfo = serde_json::from_slice(&output.stdout)?;
        Ok(info)
    }

    /// Runs a download and streams its events. The stream ends with either
    /// `Finished` or `Error`.
    pub fn download_with_progress(
        &self,
        url: &str,
        output: impl AsRef<Path>,
        options: &DownloadOptions
    ) -> Pin<Box<dyn Stream<Item = Result<DownloadEvent>> + Send + 'static>> {
        let url = url.to_string();
        let binary = self.binary.clone();
        let builder = self
            .command()
            .with_options(options)
            .output(output.as_ref())
            .progress_lines()
            .url(&url);

        Box::pin(async_stream::try_stream! {
            yield DownloadEvent::Extracting { url: url.clone() };

            tracing::debug!(
                binary = %binary.display(),
                args = ?builder.get_args(),
                "spawning yt-dlp"
            );

            let mut cmd = builder.build();
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
            cmd.kill_on_drop(true);

            let mut child = cmd.spawn().map_err(|e| Error::spawn(&binary, e))?;

            let stderr = child
                .stderr
                .take()
                .ok_or_else(|| Error::DownloadFailed("stderr not captured".to_string()))?;
            let stderr_task = tokio::spawn(async move {
                let mut reader = BufReader::new(stderr).lines();
                let mut errors = Vec::new();
                while let Ok(Some(line)) = reader.next_line().await {
                    tracing::trace!(line = %line, "yt-dlp stderr");
                    if let Some(message) = line.strip_prefix("ERROR:") {
                        errors.push(message.trim().to_string());
                    } else if let Some(message) = line.strip_prefix("WARNING:") {
                        tracing::warn!("yt-dlp: {}", message.trim());
                    }
                }
                errors
            });

            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| Error::DownloadFailed("stdout not captured".to_string()))?;
            let mut reader = BufReader::new(stdout).lines();

            let mut current_filename: Option<String> = None;

            while let Some(line) = reader.next_line().await? {
                tracing::trace!(line = %line, "yt-dlp stdout");
                if let Some(event) = parse_output_line(&line, &mut current_filename) {
                    yield event;
                }
            }

            let status = child.wait().await?;
            let mut errors = stderr_task.await.unwrap_or_default();

            if status.success() {
                let filename = current_filename.ok_or_else(|| {
                    Error::DownloadFailed("yt-dlp did not report an output file".to_string())
                })?;
                yield DownloadEvent::Finished { filename };
            } else {
                let message = errors.pop().unwrap_or_else(|| {
                    format!("yt-dlp exited with code {}", status.code().unwrap_or(-1))
                });
                yield DownloadEvent::Error { message };
            }
        })
    }

    fn command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.binary)
            .cookies_file_opt(self.cookies_file.as_ref())
            .ffmpeg_location_opt(self.ffmpeg_location.as_ref())
    }
}

/// Last `ERROR:` line of yt-dlp's stderr, or the whole trimmed stderr when there is none.
fn error_summary(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix("ERROR:"))
        .map_or_else(|| stderr.trim().to_string(), |line| line.trim().to_string())
}

fn parse_output_line(line: &str, current_filename: &mut Option<String>) -> Option<DownloadEvent> {
    let line = line.trim();

    if let Some(fields) = line.strip_prefix(PROGRESS_PREFIX) {
        return parse_progress_fields(fields).map(DownloadEvent::Progress);
    }

    if let Some(filename) = line.strip_prefix("[download] Destination:") {
        let filename = filename.trim().to_string();
        *current_filename = Some(filename.clone());
        return Some(DownloadEvent::DownloadStarted { filename });
    }

    if line.starts_with("[download]") && line.ends_with("has already been downloaded") {
        let filename = line
            .trim_start_matches("[download]")
            .trim_end_matches("has already been downloaded")
            .trim();
        *current_filename = Some(filename.to_string());
        return None;
    }

    if line.starts_with("[Merger]") {
        if let Some(start) = line.find('"')
            && let Some(end) = line.rfind('"')
            && end > start
        {
            *current_filename = Some(line[start + 1..end].to_string());
        }
        return Some(DownloadEvent::MergingFormats);
    }

    if line.starts_with("[ffmpeg]") || line.starts_with("[Fixup") || line.starts_with("[ExtractAudio]") {
        return Some(DownloadEvent::PostProcessing {
            status: line.to_string()
        });
    }

    None
}

/// Parses `<status> <downloaded> <total> <estimate> <speed> <eta>`.
fn parse_progress_fields(fields: &str) -> Option<DownloadProgress> {
    let mut parts = fields.split_whitespace();

    let status = ProgressStatus::from(parts.next()?);
    let downloaded_bytes = parts.next().and_then(parse_number).map_or(0, to_bytes);
    let total_bytes = parts.next().and_then(parse_number).map(to_bytes);
    let total_bytes_estimate = parts.next().and_then(parse_number).map(to_bytes);
    let speed = parts.next().and_then(parse_number);
    let eta = parts.next().and_then(parse_number);

    Some(DownloadProgress {
        status,
        downloaded_bytes,
        total_bytes,
        total_bytes_estimate,
        speed,
        eta
    })
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bytes(value: f64) -> u64 {
    value as u64
}
