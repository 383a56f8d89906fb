//! Timing extraction from the two browser performance APIs
//!
//! | Source | Browser API | `frontend_performance` |
//! |--------|-------------|------------------------|
//! | [`NavigationEntry`] | `performance.getEntriesByType("navigation")[0]` | `duration` |
//! | [`LegacyTiming`] | `performance.timing` | `loadEventEnd - navigationStart` |
//!
//! Both report `dns_cache_time` as the raw `domainLookupStart` timestamp
//! rather than a duration. Collected data depends on that value, so it is
//! kept as is.
//!
//! Nothing here validates or clamps: zero, missing or out-of-order
//! timestamps produce zero or negative fields.

use serde::{Deserialize, Serialize};

use crate::error::BeaconResult;
use crate::record::TimingMetrics;

/// Something that can be turned into the ten timing fields
pub trait TimingSource {
    /// Short label for diagnostics
    fn kind(&self) -> &'static str;

    fn timing_metrics(&self) -> TimingMetrics;
}

/// A `PerformanceNavigationTiming` entry (relative timestamps).
///
/// Deserializes from the entry's `toJSON()` output; absent fields read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationEntry {
    pub duration: f64,
    pub unload_event_start: f64,
    pub unload_event_end: f64,
    pub redirect_start: f64,
    pub redirect_end: f64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
    pub dom_content_loaded_event_start: f64,
    pub dom_content_loaded_event_end: f64,
    pub load_event_start: f64,
    pub load_event_end: f64,
}

impl TimingSource for NavigationEntry {
    fn kind(&self) -> &'static str {
        "navigation"
    }

    fn timing_metrics(&self) -> TimingMetrics {
        TimingMetrics {
            frontend_performance: self.duration,
            dns_time: self.domain_lookup_end - self.domain_lookup_start,
            redirect_time: self.redirect_end - self.redirect_start,
            dom_load_time: self.dom_content_loaded_event_end - self.dom_content_loaded_event_start,
            ttfb_time: self.response_start - self.request_start,
            content_load_time: self.load_event_start - self.response_end,
            onload_callback_time: self.load_event_end - self.load_event_start,
            dns_cache_time: self.domain_lookup_start,
            unload_time: self.unload_event_end - self.unload_event_start,
            tcp_handshake_time: self.connect_end - self.connect_start,
        }
    }
}

/// The deprecated `performance.timing` object (epoch milliseconds)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyTiming {
    pub navigation_start: f64,
    pub unload_event_start: f64,
    pub unload_event_end: f64,
    pub redirect_start: f64,
    pub redirect_end: f64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
    pub dom_content_loaded_event_start: f64,
    pub dom_content_loaded_event_end: f64,
    pub load_event_start: f64,
    pub load_event_end: f64,
}

impl TimingSource for LegacyTiming {
    fn kind(&self) -> &'static str {
        "legacy"
    }

    fn timing_metrics(&self) -> TimingMetrics {
        TimingMetrics {
            frontend_performance: self.load_event_end - self.navigation_start,
            dns_time: self.domain_lookup_end - self.domain_lookup_start,
            redirect_time: self.redirect_end - self.redirect_start,
            dom_load_time: self.dom_content_loaded_event_end - self.dom_content_loaded_event_start,
            ttfb_time: self.response_start - self.request_start,
            content_load_time: self.load_event_start - self.response_end,
            onload_callback_time: self.load_event_end - self.load_event_start,
            dns_cache_time: self.domain_lookup_start,
            unload_time: self.unload_event_end - self.unload_event_start,
            tcp_handshake_time: self.connect_end - self.connect_start,
        }
    }
}

/// The source picked by [`detect_timing`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DetectedTiming {
    Navigation(NavigationEntry),
    Legacy(LegacyTiming),
}

impl TimingSource for DetectedTiming {
    fn kind(&self) -> &'static str {
        match self {
            DetectedTiming::Navigation(entry) => entry.kind(),
            DetectedTiming::Legacy(timing) => timing.kind(),
        }
    }

    fn timing_metrics(&self) -> TimingMetrics {
        match self {
            DetectedTiming::Navigation(entry) => entry.timing_metrics(),
            DetectedTiming::Legacy(timing) => timing.timing_metrics(),
        }
    }
}

/// Capability probe over the host's performance API
pub trait TimingProbe {
    /// Whether the environment exposes `PerformanceNavigationTiming`
    fn supports_navigation_timing(&self) -> bool;

    /// First entry of type `"navigation"`
    fn navigation_entry(&self) -> BeaconResult<NavigationEntry>;

    /// The legacy `performance.timing` snapshot
    fn legacy_timing(&self) -> BeaconResult<LegacyTiming>;
}

/// Probe the environment once and read from whichever API it offers.
///
/// Feature detection decides the branch; a modern environment that has no
/// navigation entry is an error, not a silent fallback.
pub fn detect_timing<P: TimingProbe + ?Sized>(probe: &P) -> BeaconResult<DetectedTiming> {
    if probe.supports_navigation_timing() {
        probe.navigation_entry().map(DetectedTiming::Navigation)
    } else {
        probe.legacy_timing().map(DetectedTiming::Legacy)
    }
}
