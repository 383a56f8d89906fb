//! The metric record sent to the collection endpoint

use serde::{Deserialize, Serialize};

/// The ten timing fields, in milliseconds.
///
/// Every field except `dns_cache_time` (and `frontend_performance` for the
/// navigation-entry source) is the difference of two timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingMetrics {
    pub frontend_performance: f64,
    pub dns_time: f64,
    pub redirect_time: f64,
    pub dom_load_time: f64,
    pub ttfb_time: f64,
    pub content_load_time: f64,
    pub onload_callback_time: f64,
    pub dns_cache_time: f64,
    pub unload_time: f64,
    pub tcp_handshake_time: f64,
}

/// Where the record came from
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub tracking_code: Option<String>,
    /// Page path (`location.pathname`)
    pub request_uri: String,
    /// Page host name (`location.hostname`)
    pub tracking_domain: String,
}

impl PageContext {
    pub fn new(
        tracking_code: Option<String>,
        request_uri: impl Into<String>,
        tracking_domain: impl Into<String>,
    ) -> Self {
        Self {
            tracking_code,
            request_uri: request_uri.into(),
            tracking_domain: tracking_domain.into(),
        }
    }
}

/// One page view's worth of telemetry. Built once, sent once.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricRecord {
    #[serde(flatten)]
    timing: TimingMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracking_code: Option<String>,
    request_uri: String,
    tracking_domain: String,
}

impl MetricRecord {
    pub fn new(timing: TimingMetrics, context: PageContext) -> Self {
        Self {
            timing,
            tracking_code: context.tracking_code,
            request_uri: context.request_uri,
            tracking_domain: context.tracking_domain,
        }
    }

    pub fn timing(&self) -> &TimingMetrics {
        &self.timing
    }

    pub fn tracking_code(&self) -> Option<&str> {
        self.tracking_code.as_deref()
    }

    /// Tracking code if it is present and non-empty
    pub fn deliverable_code(&self) -> Option<&str> {
        self.tracking_code().filter(|code| !code.is_empty())
    }

    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn tracking_domain(&self) -> &str {
        &self.tracking_domain
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
