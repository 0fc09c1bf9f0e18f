//! ScoreDisplay: a `{value}` template rendered as one or more text lines.

use crate::core::surface::ScoreSurface;

/// Placeholder replaced by the current value
pub const VALUE_TOKEN: &str = "{value}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDisplay {
    id: String,
    value: u32,
    format: String,
    /// Rendered text, split on `\n`; refreshed on every set
    lines: Vec<String>,
}

impl ScoreDisplay {
    pub fn new(id: impl Into<String>, value: u32, format: impl Into<String>) -> Self {
        let mut display = Self {
            id: id.into(),
            value,
            format: format.into(),
            lines: Vec::new(),
        };
        display.redisplay();
        display
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Format with the first `{value}` token substituted
    pub fn text(&self) -> String {
        self.format.replacen(VALUE_TOKEN, &self.value.to_string(), 1)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn redisplay(&mut self) {
        self.lines = self.text().split('\n').map(str::to_string).collect();
    }
}

impl ScoreSurface for ScoreDisplay {
    fn value(&self) -> u32 {
        self.value
    }

    fn set_value(&mut self, value: u32) {
        self.value = value;
        self.redisplay();
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn set_format(&mut self, format: &str) {
        self.format = format.to_string();
        self.redisplay();
    }
}
