use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no video URL was given")]
    MissingUrl,

    #[error("could not fetch video information: {0}")]
    MetadataFetch(#[source] yt_dlp::Error),

    #[error("no playable quality is available for this video")]
    EmptyCatalog,

    #[error("input ended before a choice was made")]
    InputClosed,

    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error
    },

    #[error(transparent)]
    Download(yt_dlp::Error)
}

impl Error {
    /// Failures coming from yt-dlp itself, where network or site issues are the usual cause.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, Error::MetadataFetch(_) | Error::Download(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
