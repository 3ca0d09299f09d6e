mod options;
mod progress;
mod video_info;

pub use options::DownloadOptions;
pub use progress::{DownloadEvent, DownloadProgress, ProgressStatus, format_bytes};
pub use video_info::{Format, VideoInfo};
