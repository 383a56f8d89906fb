//! Single-shot delivery of a [`MetricRecord`]
//!
//! One call to [`Transmitter::send`] issues at most one POST. Failures are
//! logged through [`Diagnostics`] and otherwise dropped: no retry, nothing
//! surfaced to the caller beyond the [`Delivery`] outcome.

use crate::error::{BeaconError, BeaconResult};
use crate::log::Diagnostics;
use crate::record::MetricRecord;

/// What came back from the collection endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Body text; only read for success statuses
    pub body: Option<String>,
}

impl TransportResponse {
    pub fn new(status: u16, body: Option<String>) -> Self {
        Self { status, body }
    }

    /// Same range as `Response.ok`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client capable of one JSON POST
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// POST `body` to `url` with `Content-Type: application/json`.
    ///
    /// Network-level failures are `Err`; any HTTP status is `Ok`.
    async fn post_json(&self, url: &str, body: String) -> BeaconResult<TransportResponse>;
}

/// Outcome of one send attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// No tracking code; nothing was sent
    Skipped,
    /// 2xx response, with the parsed body when logging asked for it
    Delivered {
        status: u16,
        body: Option<serde_json::Value>,
    },
    /// Non-success status
    Rejected { status: u16 },
    /// Nothing delivered: no timing data, an unencodable record, or a
    /// request that never completed
    Failed(String),
}

pub struct Transmitter<T> {
    url: String,
    transport: T,
    diagnostics: Diagnostics,
}

impl<T: Transport> Transmitter<T> {
    pub fn new(url: impl Into<String>, transport: T, diagnostics: Diagnostics) -> Self {
        Self {
            url: url.into(),
            transport,
            diagnostics,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send(&self, record: &MetricRecord) -> Delivery {
        if record.deliverable_code().is_none() {
            tracing::debug!("skipping delivery: no tracking code");
            self.diagnostics.log(&skip_message());
            return Delivery::Skipped;
        }

        let body = match record.to_json() {
            Ok(body) => body,
            Err(e) => {
                let e = BeaconError::from(e);
                self.diagnostics
                    .error(&format!("Error sending performance data: {}", e));
                return Delivery::Failed(e.to_string());
            }
        };

        self.diagnostics
            .log(&format!("Sending performance data: {}", body));
        tracing::debug!(url = %self.url, bytes = body.len(), "posting metric record");

        match self.transport.post_json(&self.url, body).await {
            Ok(response) if response.is_success() => {
                let parsed = if self.diagnostics.enabled() {
                    response.body.as_deref().map(parse_body)
                } else {
                    None
                };
                if let Some(value) = &parsed {
                    self.diagnostics
                        .log(&format!("Performance data sent successfully: {}", value));
                }
                tracing::debug!(status = response.status, "metric record delivered");
                Delivery::Delivered {
                    status: response.status,
                    body: parsed,
                }
            }
            Ok(response) => {
                let e = BeaconError::HttpStatus(response.status);
                tracing::warn!(status = response.status, "collection endpoint rejected record");
                self.diagnostics.error(&e.to_string());
                Delivery::Rejected {
                    status: response.status,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "metric record not delivered");
                self.diagnostics
                    .error(&format!("Error sending performance data: {}", e));
                Delivery::Failed(e.to_string())
            }
        }
    }
}

pub(crate) fn skip_message() -> String {
    format!(
        "{}. Skipping performance data collection.",
        BeaconError::MissingTrackingCode
    )
}

/// JSON if it parses, the raw text otherwise
fn parse_body(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}
