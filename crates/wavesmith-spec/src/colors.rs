//! Drawing color scheme.

use serde::{Deserialize, Serialize};

/// Default background color.
pub const DEFAULT_BACKGROUND: &str = "#000000";
/// Default color for the positive half of the waveform.
pub const DEFAULT_POSITIVE: &str = "#00FF00";
/// Default color for the negative half of the waveform.
pub const DEFAULT_NEGATIVE: &str = "#00FFFF";

/// Caller-supplied colors for the waveform drawing.
///
/// Values are hex strings (`#RRGGBB` or `#RGB`, case-insensitive). They are
/// kept as strings here and parsed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Canvas background.
    #[serde(default = "default_background")]
    pub background: String,
    /// Color for samples at or above zero.
    #[serde(default = "default_positive")]
    pub positive: String,
    /// Color for samples below zero.
    #[serde(default = "default_negative")]
    pub negative: String,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn default_positive() -> String {
    DEFAULT_POSITIVE.to_string()
}

fn default_negative() -> String {
    DEFAULT_NEGATIVE.to_string()
}

impl ColorScheme {
    /// Creates a color scheme from three hex strings.
    pub fn new(
        background: impl Into<String>,
        positive: impl Into<String>,
        negative: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            positive: positive.into(),
            negative: negative.into(),
        }
    }

    /// Iterates `(field name, value)` pairs, for validation messages.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("background", self.background.as_str()),
            ("positive", self.positive.as_str()),
            ("negative", self.negative.as_str()),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND, DEFAULT_POSITIVE, DEFAULT_NEGATIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let scheme: ColorScheme = serde_json::from_str(r##"{"positive":"#ff0000"}"##).unwrap();
        assert_eq!(scheme.background, DEFAULT_BACKGROUND);
        assert_eq!(scheme.positive, "#ff0000");
        assert_eq!(scheme.negative, DEFAULT_NEGATIVE);
    }

    #[test]
    fn test_fields_order() {
        let names: Vec<_> = ColorScheme::default().fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["background", "positive", "negative"]);
    }
}
