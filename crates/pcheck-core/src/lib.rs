//! Page-load telemetry beacon core
//!
//! Host-agnostic pipeline behind the pcheck browser beacon:
//!
//! 1. [`resolver`] reads the tracking code from the embedding `<script>` tag
//! 2. [`timing`] turns whichever performance API the page offers into
//!    [`TimingMetrics`]
//! 3. [`transmit`] POSTs the [`MetricRecord`] once, logging the outcome
//! 4. [`lifecycle`] runs all of it once per page view, after `load`
//!
//! The browser bindings live in `pcheck-wasm`; everything here talks to the
//! page through the [`EmbeddingContext`], [`TimingProbe`], [`Transport`],
//! [`PageHost`] and [`Console`] traits.

pub mod beacon;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod log;
pub mod record;
pub mod resolver;
pub mod timing;
pub mod transmit;

#[cfg(test)]
mod testing;

pub use beacon::Beacon;
pub use config::{
    config_or_defaults, BeaconConfig, COLLECTION_PATH, SCRIPT_ELEMENT_ID, TRACKING_CODE_ATTRIBUTE,
};
pub use error::{BeaconError, BeaconResult};
pub use lifecycle::{Callback, LifecycleTrigger, LocalTask, PageHost, ReadyState, TriggerMode};
pub use log::{Console, Diagnostics, LogSwitch, NullConsole};
pub use record::{MetricRecord, PageContext, TimingMetrics};
pub use resolver::{missing_id_hint, resolve_tracking_code, EmbeddingContext};
pub use timing::{
    detect_timing, DetectedTiming, LegacyTiming, NavigationEntry, TimingProbe, TimingSource,
};
pub use transmit::{Delivery, Transmitter, Transport, TransportResponse};
