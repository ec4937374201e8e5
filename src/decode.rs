//! Decoding collaborator: bytes in, [`Workbook`] out.
//!
//! The viewer never parses spreadsheet formats itself. A decoder turns the
//! raw input into the workbook object graph; any failure it reports becomes
//! [`ViewerError::Decode`] and is shown in the tip area.

use crate::error::{Result, ViewerError};
use crate::types::Workbook;

/// Turns workbook bytes into the decoded object graph.
#[allow(async_fn_in_trait)]
pub trait WorkbookDecoder {
    async fn decode(&self, bytes: &[u8]) -> Result<Workbook>;
}

/// Decoder for a JSON-serialized [`Workbook`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl WorkbookDecoder for JsonDecoder {
    async fn decode(&self, bytes: &[u8]) -> Result<Workbook> {
        serde_json::from_slice(bytes).map_err(|e| ViewerError::Decode(e.to_string()))
    }
}

/// Decoder backed by a host JavaScript function.
///
/// The function receives a `Uint8Array` and returns the workbook object, or a
/// `Promise` resolving to it.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct JsDecoder {
    decode: js_sys::Function,
}

#[cfg(target_arch = "wasm32")]
impl JsDecoder {
    pub fn new(decode: js_sys::Function) -> Self {
        Self { decode }
    }
}

#[cfg(target_arch = "wasm32")]
impl WorkbookDecoder for JsDecoder {
    async fn decode(&self, bytes: &[u8]) -> Result<Workbook> {
        use wasm_bindgen::{JsCast, JsValue};

        let input = js_sys::Uint8Array::from(bytes);
        let mut result = self
            .decode
            .call1(&JsValue::NULL, &input)
            .map_err(js_error)?;
        if let Some(promise) = result.dyn_ref::<js_sys::Promise>() {
            result = wasm_bindgen_futures::JsFuture::from(promise.clone())
                .await
                .map_err(js_error)?;
        }
        serde_wasm_bindgen::from_value(result).map_err(|e| ViewerError::Decode(e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(value: wasm_bindgen::JsValue) -> ViewerError {
    use wasm_bindgen::JsCast;

    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.to_string()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };
    ViewerError::Decode(message)
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
    async fn test_json_decoder_reads_sheets() {
        let json = br#"{"sheets":[{"id":1,"name":"Sheet1","rows":[{"number":1,"cells":[{"row":1,"col":1,"value":{"type":"number","value":3}}]}]}]}"#;
        let workbook = JsonDecoder.decode(json).await.unwrap();
        assert_eq!(workbook.sheets.len(), 1);
        assert_eq!(workbook.sheets[0].name, "Sheet1");
        assert_eq!(workbook.sheets[0].row_count(), 1);
    }

    #[tokio::test]
    async fn test_json_decoder_failure_is_decode_error() {
        let err = JsonDecoder.decode(b"PK\x03\x04").await.unwrap_err();
        assert!(matches!(err, ViewerError::Decode(_)));
        assert!(!err.is_validation());
    }
}
