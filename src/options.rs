//! Viewer configuration.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ViewerError};
use crate::render::DEFAULT_CHUNK_SIZE;

/// Options accepted by the viewer entry points.
///
/// Callbacks are not part of this struct; they are carried by a
/// [`ViewerListener`](crate::listener::ViewerListener).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ViewerOptions {
    /// Sheet shown first. Negative and out-of-range values fall back to the
    /// first sheet.
    pub initial_sheet_index: i64,
    /// Rows appended per scheduling turn.
    #[serde(alias = "frameRenderSize")]
    pub chunk_size: usize,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            initial_sheet_index: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ViewerOptions {
    pub fn with_initial_sheet(mut self, index: i64) -> Self {
        self.initial_sheet_index = index;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Reject values that type-check but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ViewerError::InvalidOption {
                name: "chunkSize",
                expected: "a positive integer",
            });
        }
        Ok(())
    }

    /// Parse and validate options from a JSON object.
    ///
    /// Each field is type-checked on its own; any mismatch is reported as
    /// [`ViewerError::InvalidOption`] naming the field.
    pub fn from_json(json: &str) -> Result<Self> {
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(json) else {
            return Err(ViewerError::InvalidOption {
                name: "options",
                expected: "a JSON object",
            });
        };
        let mut options = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "initialSheetIndex" => {
                    options.initial_sheet_index = field(value, "initialSheetIndex", "an integer")?;
                }
                "chunkSize" | "frameRenderSize" => {
                    options.chunk_size = field(value, "chunkSize", "a positive integer")?;
                }
                _ => {
                    return Err(ViewerError::InvalidOption {
                        name: "options",
                        expected: "initialSheetIndex, chunkSize or frameRenderSize only",
                    })
                }
            }
        }
        options.validate()?;
        Ok(options)
    }
}

fn field<T: DeserializeOwned>(
    value: Value,
    name: &'static str,
    expected: &'static str,
) -> Result<T> {
    serde_json::from_value(value).map_err(|_| ViewerError::InvalidOption { name, expected })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let options = ViewerOptions::from_json("{}").unwrap();
        assert_eq!(options, ViewerOptions::default());
        assert_eq!(options.chunk_size, 500);
    }

    #[test]
    fn test_frame_render_size_alias() {
        let options = ViewerOptions::from_json(r#"{"frameRenderSize": 20}"#).unwrap();
        assert_eq!(options.chunk_size, 20);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        for json in [
            r#"{"initialSheetIndex": "1"}"#,
            r#"{"initialSheetIndex": -0.5}"#,
            r#"{"chunkSize": -4}"#,
            r#"{"frameRenderSize": true}"#,
            r#"{"unknown": 1}"#,
            "[]",
            "{",
        ] {
            let err = ViewerOptions::from_json(json).unwrap_err();
            assert!(err.is_validation(), "{json}: {err:?}");
        }
    }

    #[test]
    fn test_wrong_type_names_the_field() {
        let err = ViewerOptions::from_json(r#"{"initialSheetIndex": "1"}"#).unwrap_err();
        assert!(matches!(
            err,
            ViewerError::InvalidOption {
                name: "initialSheetIndex",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_initial_sheet_is_accepted() {
        let options = ViewerOptions::from_json(r#"{"initialSheetIndex": -1}"#).unwrap();
        assert_eq!(options.initial_sheet_index, -1);
    }

    #[test]
    fn test_zero_chunk_size_is_invalid() {
        let err = ViewerOptions::from_json(r#"{"chunkSize": 0}"#).unwrap_err();
        assert!(err.is_validation());
    }
}
