//! Structured error types for xltable.
//!
//! Validation errors are returned to the caller untouched; decode errors are
//! caught by the viewer and shown in the tip area instead.

/// All errors that can occur while loading and rendering a workbook.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// The workbook data is not bytes, a file or a blob.
    #[error("[xltable] error: {0} is not a file")]
    InvalidInput(String),

    /// The render target is not an element that can host the viewer.
    #[error("[xltable] error: {0} is not a element")]
    InvalidTarget(String),

    /// A configuration option has the wrong type or value.
    #[error("[xltable] error: option `{name}` must be {expected}")]
    InvalidOption {
        name: &'static str,
        expected: &'static str,
    },

    /// The decoding collaborator rejected the workbook bytes.
    #[error("{0}")]
    Decode(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The display surface refused an operation (DOM call failed).
    #[error("Surface error: {0}")]
    Surface(String),

    /// I/O error while reading the workbook source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ViewerError {
    /// True for errors caused by caller misuse (wrong input kind, target or option).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::InvalidTarget(_) | Self::InvalidOption { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(target_arch = "wasm32")]
impl From<ViewerError> for wasm_bindgen::JsValue {
    fn from(e: ViewerError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ViewerError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Surface(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}
