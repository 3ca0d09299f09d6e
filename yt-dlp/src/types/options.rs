#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Format selection expression passed through `-f`.
    pub format: Option<String>,
    /// Container used when separate streams get merged.
    pub merge_output_format: Option<String>,
    pub rate_limit: Option<String>
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn merge_output_format(mut self, container: impl Into<String>) -> Self {
        self.merge_output_format = Some(container.into());
        self
    }

    pub fn rate_limit(mut self, limit: impl Into<String>) -> Self {
        self.rate_limit = Some(limit.into());
        self
    }
}
