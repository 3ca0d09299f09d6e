use std::collections::BTreeSet;
use std::fmt;

use yt_dlp::Format;

/// A vertical resolution such as `720p`. Ordered by height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualityLabel {
    height: u32
}

impl QualityLabel {
    pub fn new(height: u32) -> Option<Self> {
        (height > 0).then_some(Self { height })
    }

    /// Accepts `720p`, `720P` or a bare `720`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let digits = input.strip_suffix(['p', 'P']).unwrap_or(input);
        digits.parse().ok().and_then(Self::new)
    }

    pub fn height(self) -> u32 {
        self.height
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.height)
    }
}

/// Distinct qualities offered for one video, lowest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityCatalog {
    labels: Vec<QualityLabel>
}

impl QualityCatalog {
    /// Without a transcoder only streams that already carry audio are playable,
    /// so video-only formats are left out.
    pub fn build(formats: &[Format], transcoder_available: bool) -> Self {
        let labels: BTreeSet<QualityLabel> = formats
            .iter()
            .filter(|f| transcoder_available || f.has_audio())
            .filter_map(|f| f.height.and_then(QualityLabel::new))
            .collect();

        Self {
            labels: labels.into_iter().collect()
        }
    }

    pub fn labels(&self) -> &[QualityLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: QualityLabel) -> bool {
        self.labels.binary_search(&label).is_ok()
    }
}
