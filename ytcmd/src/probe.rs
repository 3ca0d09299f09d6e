use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscoderStatus {
    /// The tool launched; its exit code is not considered.
    Available { version: Option<String> },
    NotFound,
    /// Present but could not be started, e.g. missing execute permission.
    Unusable { reason: String }
}

impl TranscoderStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, TranscoderStatus::Available { .. })
    }
}

#[async_trait]
pub trait ToolProbe: Send + Sync {
    async fn probe(&self) -> TranscoderStatus;
}

/// The external tool used to merge separate audio and video streams.
#[derive(Debug, Clone)]
pub struct Transcoder {
    program: PathBuf
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Transcoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into()
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl ToolProbe for Transcoder {
    async fn probe(&self) -> TranscoderStatus {
        let result = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(output) => {
                let version = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string);
                tracing::debug!(
                    program = %self.program.display(),
                    status = %output.status,
                    version = ?version,
                    "transcoder probe"
                );
                TranscoderStatus::Available { version }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(program = %self.program.display(), "transcoder not found");
                TranscoderStatus::NotFound
            }
            Err(e) => {
                tracing::warn!("transcoder {} could not be started: {}", self.program.display(), e);
                TranscoderStatus::Unusable {
                    reason: e.to_string()
                }
            }
        }
    }
}
