//! Allocation of client-side display resources for binary results.

use tracing::{debug, warn};
use wasm_bindgen::JsValue;

use crate::error::SubmitError;
use crate::outcome::ImageHandle;

pub trait ResourceAllocator {
    /// Wrap `bytes` in a displayable handle. The handle releases itself on drop.
    fn allocate(&self, bytes: Vec<u8>, content_type: &str) -> Result<ImageHandle, SubmitError>;
}

/// Object URLs backed by in-memory `Blob`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobUrls;

impl ResourceAllocator for BlobUrls {
    fn allocate(&self, bytes: Vec<u8>, content_type: &str) -> Result<ImageHandle, SubmitError> {
        let data = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::of1(&data);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(content_type);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| SubmitError::Resource(js_error(&e)))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| SubmitError::Resource(js_error(&e)))?;

        debug!(%url, size = bytes.len(), "Created object URL");
        Ok(ImageHandle::new(url, |url| {
            if let Err(e) = web_sys::Url::revoke_object_url(url) {
                warn!("Failed to revoke {}: {}", url, js_error(&e));
            } else {
                debug!(%url, "Revoked object URL");
            }
        }))
    }
}

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
