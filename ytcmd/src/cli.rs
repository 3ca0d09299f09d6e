use std::path::PathBuf;

use clap::{ArgAction, Parser};
use yt_dlp::YtDlp;

use crate::console::InputProvider;
use crate::error::{Error, Result};
use crate::orchestrator::DownloadJob;
use crate::probe::Transcoder;

const URL_PROMPT: &str = "Enter video URL: ";
const QUALITY_PROMPT: &str =
    "Enter preferred quality (e.g., 720p) or press Enter to see available options: ";

/// Download a single video at a chosen resolution.
#[derive(Debug, Parser)]
#[command(name = "ytcmd", version, about, long_about = None)]
pub struct Cli {
    /// Video URL. Asked for interactively when omitted.
    pub url: Option<String>,

    /// Preferred quality such as 720p. A menu is shown when it is missing or unavailable.
    pub quality: Option<String>,

    /// Directory the video is saved into.
    #[arg(short, long, env = "YTCMD_OUTPUT_DIR", default_value = "downloads")]
    pub output_dir: PathBuf,

    /// yt-dlp executable.
    #[arg(long = "yt-dlp", env = "YTCMD_YT_DLP", default_value = "yt-dlp", value_name = "PATH")]
    pub yt_dlp: PathBuf,

    /// FFmpeg executable used to merge separate audio and video streams.
    #[arg(long, env = "YTCMD_FFMPEG", value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Netscape-format cookies file passed to yt-dlp.
    #[arg(long, env = "YTCMD_COOKIES", value_name = "FILE")]
    pub cookies: Option<PathBuf>,

    /// Maximum download rate, e.g. 2M.
    #[arg(long, value_name = "RATE")]
    pub limit_rate: Option<String>,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "ytcmd=warn,yt_dlp=warn",
            1 => "ytcmd=info,yt_dlp=info",
            _ => "ytcmd=debug,yt_dlp=debug"
        }
    }

    pub fn client(&self) -> YtDlp {
        let mut client = YtDlp::with_binary(&self.yt_dlp);
        client.set_cookies_file(self.cookies.clone());
        client.set_ffmpeg_location(self.ffmpeg.clone());
        client
    }

    pub fn transcoder(&self) -> Transcoder {
        self.ffmpeg
            .as_ref()
            .map_or_else(Transcoder::default, Transcoder::new)
    }

    /// Builds the job from the arguments, prompting for the URL and quality when no URL was given.
    pub fn job(&self, input: &mut impl InputProvider) -> Result<DownloadJob> {
        let (url, quality) = match self.url {
            Some(ref url) => (url.clone(), self.quality.clone()),
            None => {
                let url = input
                    .read_line(URL_PROMPT)
                    .map_err(Error::Input)?
                    .ok_or(Error::InputClosed)?;
                let quality = input.read_line(QUALITY_PROMPT).map_err(Error::Input)?;
                (url, quality)
            }
        };

        let url = url.trim().to_string();
        if url.is_empty() {
            return Err(Error::MissingUrl);
        }

        Ok(DownloadJob {
            url,
            quality: quality
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            output_dir: self.output_dir.clone(),
            rate_limit: self.limit_rate.clone()
        })
    }
}
