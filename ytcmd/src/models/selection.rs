use std::fmt;

pub const PREFERRED_VIDEO_EXT: &str = "mp4";
pub const PREFERRED_AUDIO_EXT: &str = "m4a";

/// A yt-dlp `-f` expression. Alternatives separated by `/` are tried left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionExpression(String);

impl SelectionExpression {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn build_selection(target_height: u32, transcoder_available: bool) -> SelectionExpression {
    let expression = if transcoder_available {
        format!(
            "bestvideo[height<={target_height}][ext={PREFERRED_VIDEO_EXT}]+bestaudio[ext={PREFERRED_AUDIO_EXT}]\
             /best[height<={target_height}][ext={PREFERRED_VIDEO_EXT}]\
             /best"
        )
    } else {
        format!(
            "best[height<={target_height}][ext={PREFERRED_VIDEO_EXT}]\
             /best[ext={PREFERRED_VIDEO_EXT}]\
             /best"
        )
    };
    SelectionExpression(expression)
}

/// Container for merged output; only meaningful when separate streams can be merged.
pub fn merge_container(transcoder_available: bool) -> Option<&'static str> {
    transcoder_available.then_some(PREFERRED_VIDEO_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_with_transcoder() {
        assert_eq!(
            build_selection(720, true).as_str(),
            "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]/best"
        );
    }

    #[test]
    fn test_selection_without_transcoder() {
        assert_eq!(
            build_selection(480, false).to_string(),
            "best[height<=480][ext=mp4]/best[ext=mp4]/best"
        );
    }

    #[test]
    fn test_selection_branches_differ() {
        for height in [144, 360, 720, 1080, 2160] {
            let with = build_selection(height, true);
            let without = build_selection(height, false);
            assert_ne!(with, without);
            assert_eq!(with.as_str().split('/').count(), 3);
            assert_eq!(without.as_str().split('/').count(), 3);
            assert!(with.as_str().contains('+'));
            assert!(!without.as_str().contains('+'));
        }
    }

    #[test]
    fn test_merge_container() {
        assert_eq!(merge_container(true), Some("mp4"));
        assert_eq!(merge_container(false), None);
    }
}
