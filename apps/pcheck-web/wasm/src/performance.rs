//! `window.performance` probe
//!
//! Feature detection mirrors what page scripts do: the presence of the
//! `PerformanceNavigationTiming` constructor on `window` selects the entry
//! API, otherwise the legacy `performance.timing` object is read.

use js_sys::{Function, Reflect};
use pcheck_core::{BeaconError, BeaconResult, LegacyTiming, NavigationEntry, TimingProbe};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Performance, Window};

pub struct BrowserTimingProbe {
    window: Window,
}

impl BrowserTimingProbe {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn performance(&self) -> BeaconResult<Performance> {
        self.window
            .performance()
            .ok_or_else(|| BeaconError::TimingUnavailable("window.performance missing".to_string()))
    }
}

impl TimingProbe for BrowserTimingProbe {
    fn supports_navigation_timing(&self) -> bool {
        Reflect::get(&self.window, &JsValue::from_str("PerformanceNavigationTiming"))
            .map(|ctor| ctor.is_truthy())
            .unwrap_or(false)
    }

    fn navigation_entry(&self) -> BeaconResult<NavigationEntry> {
        let entry = self.performance()?.get_entries_by_type("navigation").get(0);
        if entry.is_undefined() {
            return Err(BeaconError::TimingUnavailable(
                "no navigation entry recorded".to_string(),
            ));
        }

        // toJSON() flattens the prototype getters into plain own properties.
        let to_json = Reflect::get(&entry, &JsValue::from_str("toJSON"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| BeaconError::TimingUnavailable("entry has no toJSON".to_string()))?;
        let plain = to_json
            .call0(&entry)
            .map_err(|e| BeaconError::TimingUnavailable(format!("toJSON failed: {:?}", e)))?;

        serde_wasm_bindgen::from_value(plain)
            .map_err(|e| BeaconError::TimingUnavailable(format!("unreadable entry: {}", e)))
    }

    fn legacy_timing(&self) -> BeaconResult<LegacyTiming> {
        let timing = self.performance()?.timing();
        Ok(LegacyTiming {
            navigation_start: timing.navigation_start(),
            unload_event_start: timing.unload_event_start(),
            unload_event_end: timing.unload_event_end(),
            redirect_start: timing.redirect_start(),
            redirect_end: timing.redirect_end(),
            domain_lookup_start: timing.domain_lookup_start(),
            domain_lookup_end: timing.domain_lookup_end(),
            connect_start: timing.connect_start(),
            connect_end: timing.connect_end(),
            request_start: timing.request_start(),
            response_start: timing.response_start(),
            response_end: timing.response_end(),
            dom_content_loaded_event_start: timing.dom_content_loaded_event_start(),
            dom_content_loaded_event_end: timing.dom_content_loaded_event_end(),
            load_event_start: timing.load_event_start(),
            load_event_end: timing.load_event_end(),
        })
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use pcheck_core::{detect_timing, TimingSource};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn probe() -> BrowserTimingProbe {
        BrowserTimingProbe::new(web_sys::window().unwrap())
    }

    #[wasm_bindgen_test]
    fn test_modern_browsers_expose_navigation_timing() {
        assert!(probe().supports_navigation_timing());
    }

    #[wasm_bindgen_test]
    fn test_navigation_entry_is_readable() {
        let entry = probe().navigation_entry().unwrap();
        assert!(entry.response_end >= entry.request_start);
    }

    #[wasm_bindgen_test]
    fn test_legacy_timing_uses_epoch_timestamps() {
        let timing = probe().legacy_timing().unwrap();
        assert!(timing.navigation_start > 0.0);
    }

    #[wasm_bindgen_test]
    fn test_detection_picks_navigation_source() {
        let detected = detect_timing(&probe()).unwrap();
        assert_eq!(detected.kind(), "navigation");
    }
}
