//! Async Rust wrapper for the yt-dlp CLI.
//!
//! Fetches video metadata as JSON and runs downloads while streaming
//! machine-readable progress events.
//!
//! # Example
//!
//! ```no_run
//! use yt_dlp::{DownloadEvent, DownloadOptions, YtDlp};
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> yt_dlp::Result<()> {
//!     let client = YtDlp::new();
//!
//!     let version = client.check_binary().await?;
//!     println!("yt-dlp version: {}", version);
//!
//!     let info = client.get_video_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     println!("Title: {}", info.title);
//!
//!     let options = DownloadOptions::new().format("best[height<=720]/best");
//!     let mut events = client.download_with_progress(
//!         "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
//!         "downloads/%(title)s.%(ext)s",
//!         &options
//!     );
//!     while let Some(event) = events.next().await {
//!         if let DownloadEvent::Progress(progress) = event? {
//!             println!("{:?}%", progress.percent());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod command;
pub mod error;
pub mod types;

pub use client::YtDlp;
pub use error::{Error, Result};
pub use types::{
    DownloadEvent, DownloadOptions, DownloadProgress, Format, ProgressStatus, VideoInfo,
    format_bytes
};
