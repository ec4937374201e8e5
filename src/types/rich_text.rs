use serde::{Deserialize, Serialize};

use super::Font;

/// A single run of text with optional font styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl RichTextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
        }
    }

    pub fn styled(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font: Some(font),
        }
    }
}

/// Concatenated plain text of a run list.
pub fn plain_text(runs: &[RichTextRun]) -> String {
    let total_len: usize = runs.iter().map(|r| r.text.len()).sum();
    let mut combined = String::with_capacity(total_len);
    for run in runs {
        combined.push_str(&run.text);
    }
    combined
}
