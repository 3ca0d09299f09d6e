use std::path::PathBuf;

use yt_dlp::DownloadProgress;

use crate::console::{InputProvider, OutputSink};
use crate::error::{Error, Result};
use crate::extractor::{DownloadRequest, Extractor};
use crate::models::{QualityCatalog, QualityLabel, build_selection, merge_container};
use crate::probe::{ToolProbe, TranscoderStatus};
use crate::progress::ProgressReporter;
use crate::prompt::resolve_quality;

const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ProbingTranscoder,
    FetchingMetadata,
    BuildingCatalog,
    ResolvingQuality,
    Downloading,
    Completed,
    Failed
}

#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub url: String,
    /// Preferred quality as typed by the user, e.g. `720p`.
    pub quality: Option<String>,
    pub output_dir: PathBuf,
    pub rate_limit: Option<String>
}

#[derive(Debug, Clone)]
pub struct Completed {
    pub title: String,
    pub quality: QualityLabel,
    pub path: PathBuf
}

/// Runs one download from transcoder probe to final report.
pub struct DownloadOrchestrator<E, P, I, O> {
    extractor: E,
    probe: P,
    input: I,
    output: O,
    history: Vec<Stage>,
    transcoder: Option<TranscoderStatus>
}

impl<E, P, I, O> DownloadOrchestrator<E, P, I, O>
where
    E: Extractor,
    P: ToolProbe,
    I: InputProvider,
    O: OutputSink
{
    pub fn new(extractor: E, probe: P, input: I, output: O) -> Self {
        Self {
            extractor,
            probe,
            input,
            output,
            history: vec![Stage::Idle],
            transcoder: None
        }
    }

    pub fn stage(&self) -> Stage {
        self.history.last().copied().unwrap_or(Stage::Idle)
    }

    /// Every stage entered so far, starting with `Idle`.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Failures are reported to the output sink before being returned.
    pub async fn run(&mut self, job: &DownloadJob) -> Result<Completed> {
        match self.execute(job).await {
            Ok(completed) => {
                self.enter(Stage::Completed);
                self.output.line("");
                self.output.line("Download completed successfully!");
                self.output.line(&format!("Saved to {}", completed.path.display()));
                Ok(completed)
            }
            Err(err) => {
                self.enter(Stage::Failed);
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    async fn execute(&mut self, job: &DownloadJob) -> Result<Completed> {
        self.enter(Stage::ProbingTranscoder);
        let status = self.probe.probe().await;
        self.announce_transcoder(&status);
        let transcoder_available = status.is_available();
        self.transcoder = Some(status);

        self.enter(Stage::FetchingMetadata);
        self.output.line("Fetching video information...");
        let info = self
            .extractor
            .fetch_metadata(&job.url)
            .await
            .map_err(Error::MetadataFetch)?;

        self.output.line("");
        self.output.line(&format!("Video Title: {}", info.title));
        self.output.line(&format!("Duration: {}", format_duration(info.duration)));

        self.enter(Stage::BuildingCatalog);
        let catalog = QualityCatalog::build(&info.formats, transcoder_available);
        tracing::info!(
            video_id = %info.id,
            formats = info.formats.len(),
            qualities = catalog.len(),
            transcoder_available,
            "built quality catalog"
        );

        self.enter(Stage::ResolvingQuality);
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        self.output.line("");
        self.output.line("Available qualities:");
        for (i, label) in catalog.labels().iter().enumerate() {
            self.output.line(&format!("{}. {label}", i + 1));
        }

        let requested = job.quality.as_deref().and_then(QualityLabel::parse);
        let quality = resolve_quality(&catalog, requested, &mut self.input, &mut self.output)?;

        self.enter(Stage::Downloading);
        tokio::fs::create_dir_all(&job.output_dir)
            .await
            .map_err(|source| Error::OutputDirectory {
                path: job.output_dir.clone(),
                source
            })?;

        let request = DownloadRequest {
            url: job.url.clone(),
            selection: build_selection(quality.height(), transcoder_available),
            output_template: job.output_dir.join(OUTPUT_TEMPLATE),
            merge_output_format: merge_container(transcoder_available).map(str::to_string),
            rate_limit: job.rate_limit.clone()
        };
        tracing::debug!(selection = %request.selection, "starting download");

        self.output.line("");
        self.output.line(&format!("Downloading video in {quality}..."));

        let output = &mut self.output;
        let mut on_progress = |progress: &DownloadProgress| {
            if let Some(status) = ProgressReporter::render(progress) {
                output.status(&status);
            }
        };
        let path = self
            .extractor
            .download(&request, &mut on_progress)
            .await
            .map_err(Error::Download)?;

        Ok(Completed {
            title: info.title,
            quality,
            path
        })
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(from = ?self.stage(), to = ?stage, "stage transition");
        self.history.push(stage);
    }

    fn transcoder_available(&self) -> bool {
        self.transcoder
            .as_ref()
            .is_some_and(TranscoderStatus::is_available)
    }

    fn announce_transcoder(&mut self, status: &TranscoderStatus) {
        let headline = match status {
            TranscoderStatus::Available { version } => {
                if let Some(version) = version {
                    tracing::info!("transcoder: {}", version);
                }
                return;
            }
            TranscoderStatus::NotFound => "Notice: FFmpeg is not installed. Some high-quality options may be limited.".to_string(),
            TranscoderStatus::Unusable { reason } => format!(
                "Notice: FFmpeg was found but could not be started ({reason}). Some high-quality options may be limited."
            )
        };
        self.output.line("");
        self.output.line(&headline);
        self.output.line("The best available compatible format will be selected automatically.");
        self.output.line("To enable all quality options, install FFmpeg and add it to your PATH.");
    }

    fn report_failure(&mut self, err: &Error) {
        self.output.line("");
        self.output.line(&format!("An error occurred: {err}"));

        if err.is_extraction_failure() {
            self.output.line("");
            self.output.line("Troubleshooting tips:");
            self.output.line("1. Check your internet connection");
            self.output.line("2. Verify the video URL is correct and accessible");
            self.output.line("3. Try updating yt-dlp");
            self.output.line("4. Make sure the video isn't private or age-restricted");
            if !self.transcoder_available() {
                self.output.line("5. Install FFmpeg to access all quality options");
            }
        } else if matches!(err, Error::EmptyCatalog) && !self.transcoder_available() {
            self.output.line("Only formats with audio can be offered without FFmpeg; installing it may help.");
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_duration(duration: Option<f64>) -> String {
    match duration.filter(|d| d.is_finite() && *d >= 0.0) {
        Some(d) => {
            let secs = d as u64;
            format!("{}:{:02}", secs / 60, secs % 60)
        }
        None => "Unknown".to_string()
    }
}
