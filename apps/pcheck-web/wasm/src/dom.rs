//! Embedding-page access through `document` and `location`

use pcheck_core::{BeaconError, BeaconResult, Diagnostics, EmbeddingContext};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

/// Reads the embedding `<script>` tag and the page location
pub struct DocumentEmbedding {
    window: Window,
    document: Document,
    diagnostics: Diagnostics,
}

impl DocumentEmbedding {
    pub fn new(window: Window, document: Document, diagnostics: Diagnostics) -> Self {
        Self {
            window,
            document,
            diagnostics,
        }
    }

    /// Unreadable location parts (sandboxed frames) are sent as empty strings
    fn location_part(&self, part: &str, value: Result<String, JsValue>) -> String {
        value.unwrap_or_else(|e| {
            let e = BeaconError::Dom(format!("location.{} unreadable: {:?}", part, e));
            tracing::warn!(error = %e, "location lookup failed");
            self.diagnostics.error(&e.to_string());
            String::new()
        })
    }
}

impl EmbeddingContext for DocumentEmbedding {
    fn element_attribute(
        &self,
        element_id: &str,
        attribute: &str,
    ) -> BeaconResult<Option<String>> {
        let element = self
            .document
            .get_element_by_id(element_id)
            .ok_or_else(|| BeaconError::ElementNotFound(element_id.to_string()))?;
        Ok(element.get_attribute(attribute))
    }

    fn page_path(&self) -> String {
        self.location_part("pathname", self.window.location().pathname())
    }

    fn page_host(&self) -> String {
        self.location_part("hostname", self.window.location().hostname())
    }
}
