use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub formats: Vec<Format>
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub acodec: Option<String>
}

impl Format {
    /// yt-dlp marks video-only streams with `acodec: "none"`; a missing codec is not that marker.
    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "abc123",
        "title": "Sample clip",
        "duration": 125.0,
        "uploader": "someone",
        "extractor_key": "Youtube",
        "formats": [
            {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2", "filesize": 1000},
            {"format_id": "137", "ext": "mp4", "height": 1080, "width": 1920, "vcodec": "avc1.640028", "acodec": "none"},
            {"format_id": "18", "ext": "mp4", "height": 360, "vcodec": "avc1.42001E", "acodec": "mp4a.40.2", "filesize_approx": 5000}
        ],
        "unused_field": [1, 2, 3]
    }"#;

    #[test]
    fn test_video_info_deserialize() {
        let info: VideoInfo = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(info.id, "abc123");
        assert_eq!(info.title, "Sample clip");
        assert_eq!(info.duration, Some(125.0));
        assert_eq!(info.formats.len(), 3);
        assert_eq!(info.formats[1].height, Some(1080));
        assert_eq!(info.formats[0].height, None);
    }

    #[test]
    fn test_video_info_minimal() {
        let info: VideoInfo = serde_json::from_str(r#"{"id": "x", "title": "t"}"#).unwrap();
        assert!(info.formats.is_empty());
        assert!(info.duration.is_none());
    }

    #[test]
    fn test_format_stream_kinds() {
        let info: VideoInfo = serde_json::from_str(SAMPLE).unwrap();
        let audio_only = &info.formats[0];
        let video_only = &info.formats[1];
        let muxed = &info.formats[2];

        assert!(audio_only.has_audio() && audio_only.height.is_none());
        assert!(!video_only.has_audio());
        assert!(muxed.has_audio());
        assert_eq!(muxed.ext.as_deref(), Some("mp4"));
    }

    #[test]
    fn test_missing_acodec_counts_as_audio() {
        let format = Format {
            format_id: "hls-720".to_string(),
            height: Some(720),
            ..Format::default()
        };
        assert!(format.has_audio());
    }
}
