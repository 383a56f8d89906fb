//! `fetch()`-backed transport

use pcheck_core::{BeaconError, BeaconResult, Transport, TransportResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    async fn post(&self, url: &str, body: &str) -> Result<TransportResponse, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let response = JsFuture::from(self.window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;

        let body = if response.ok() {
            JsFuture::from(response.text()?).await?.as_string()
        } else {
            None
        };

        Ok(TransportResponse::new(response.status(), body))
    }
}

impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> BeaconResult<TransportResponse> {
        self.post(url, &body)
            .await
            .map_err(|e| BeaconError::Network(describe(&e)))
    }
}

/// Readable text for a rejected fetch promise (usually a `TypeError`)
fn describe(error: &JsValue) -> String {
    if let Some(err) = error.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}
