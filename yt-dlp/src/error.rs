use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("yt-dlp binary not found: {0}")]
    BinaryNotFound(PathBuf),

    #[error("yt-dlp binary not executable: {0}")]
    BinaryNotExecutable(PathBuf),

    #[error("failed to execute yt-dlp: {0}")]
    ExecutionFailed(#[from] std::io::Error),

    #[error("yt-dlp command failed with exit code {code}: {stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("failed to parse JSON output: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("download failed: {0}")]
    DownloadFailed(String)
}

impl Error {
    /// Maps a spawn failure to `BinaryNotFound` when the executable is missing.
    pub(crate) fn spawn(binary: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::BinaryNotFound(binary.to_path_buf())
        } else {
            Error::ExecutionFailed(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
