//! Input boundary: the kinds of workbook data the viewer accepts.

use crate::error::Result;
#[cfg(target_arch = "wasm32")]
use crate::error::ViewerError;

/// Workbook data handed to the viewer.
#[derive(Debug, Clone)]
pub enum WorkbookSource {
    /// Bytes already in memory.
    Bytes(Vec<u8>),
    /// A file on disk.
    #[cfg(not(target_arch = "wasm32"))]
    File(std::path::PathBuf),
    /// A browser `Blob` or `File`, read asynchronously.
    #[cfg(target_arch = "wasm32")]
    Blob(web_sys::Blob),
}

impl From<Vec<u8>> for WorkbookSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for WorkbookSource {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<std::path::PathBuf> for WorkbookSource {
    fn from(path: std::path::PathBuf) -> Self {
        Self::File(path)
    }
}

impl WorkbookSource {
    /// Read the source into a byte buffer.
    pub async fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(path) => Ok(std::fs::read(path)?),
            #[cfg(target_arch = "wasm32")]
            Self::Blob(blob) => {
                let buffer = wasm_bindgen_futures::JsFuture::from(blob.array_buffer()).await?;
                Ok(js_sys::Uint8Array::new(&buffer).to_vec())
            }
        }
    }

    /// Classify a host value: `ArrayBuffer`, `Uint8Array`, `Blob` or `File`.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: &wasm_bindgen::JsValue) -> Result<Self> {
        use wasm_bindgen::JsCast;

        if let Some(bytes) = value.dyn_ref::<js_sys::Uint8Array>() {
            return Ok(Self::Bytes(bytes.to_vec()));
        }
        if value.is_instance_of::<js_sys::ArrayBuffer>() {
            return Ok(Self::Bytes(js_sys::Uint8Array::new(value).to_vec()));
        }
        if let Some(blob) = value.dyn_ref::<web_sys::Blob>() {
            return Ok(Self::Blob(blob.clone()));
        }
        Err(ViewerError::InvalidInput(describe(value)))
    }
}

#[cfg(target_arch = "wasm32")]
fn describe(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.js_typeof().as_string())
        .unwrap_or_else(|| "value".to_string())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bytes_pass_through() {
        let bytes = WorkbookSource::from(&b"abc"[..]).into_bytes().await.unwrap();
        assert_eq!(bytes, b"abc");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = WorkbookSource::File("/definitely/not/here.json".into());
        let err = source.into_bytes().await.unwrap_err();
        assert!(matches!(err, crate::error::ViewerError::Io(_)));
    }
}
