//! pcheck - page-load timing beacon for the browser
//!
//! Loaded by the tracked page through a script tag:
//!
//! ```html
//! <script id="performance-check-script"
//!         src="//stats.example.com/static/pcheck.js"
//!         data-tracking-code="TRACKING_CODE"></script>
//! ```
//!
//! On instantiation the module waits for the page's `load` event, reads the
//! navigation timing, and POSTs one record to the collection endpoint.
//!
//! ## Build-time configuration
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `PCHECK_DOMAIN` | Collection host | `localhost` |
//! | `PCHECK_API_V1_STR` | API prefix | `/api/v1` |
//! | `PCHECK_ENABLE_LOG` | Initial diagnostics state | `false` |
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { setLogEnabled } from './pkg/pcheck_wasm.js';
//!
//! await init();
//! setLogEnabled(true); // print diagnostics for the rest of this page view
//! ```

pub mod dom;
pub mod fetch;
pub mod host;
pub mod performance;

use std::cell::RefCell;
use std::rc::Rc;

use pcheck_core::{
    config_or_defaults, Beacon, BeaconConfig, BeaconResult, Console, Diagnostics,
    LifecycleTrigger, LogSwitch,
};
use wasm_bindgen::prelude::*;

pub use dom::DocumentEmbedding;
pub use fetch::FetchTransport;
pub use host::WindowHost;
pub use performance::BrowserTimingProbe;

thread_local! {
    static LOG_SWITCH: RefCell<Option<LogSwitch>> = const { RefCell::new(None) };
    static TRIGGER: LifecycleTrigger = LifecycleTrigger::new();
}

/// `console.log` / `console.error`
#[derive(Debug, Default, Clone, Copy)]
pub struct WebConsole;

impl Console for WebConsole {
    fn log(&self, message: &str) {
        web_sys::console::log_1(&message.into());
    }

    fn error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
    }
}

/// Configuration baked in when the module was compiled
pub fn build_config() -> BeaconResult<BeaconConfig> {
    let defaults = BeaconConfig::default();
    let domain = option_env!("PCHECK_DOMAIN").unwrap_or(defaults.domain.as_str());
    let api_prefix = option_env!("PCHECK_API_V1_STR").unwrap_or(defaults.api_prefix.as_str());
    let enable_log = option_env!("PCHECK_ENABLE_LOG").unwrap_or("false");

    BeaconConfig::from_template_values(domain, api_prefix, enable_log)
}

/// Runs once when the module is instantiated
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let built = build_config();
    let enable_log = built.as_ref().map(|config| config.enable_log).unwrap_or(false);
    let switch = LOG_SWITCH.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| LogSwitch::new(enable_log))
            .clone()
    });
    let diagnostics = Diagnostics::new(switch, Rc::new(WebConsole));
    let config = config_or_defaults(built, &diagnostics);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        diagnostics.error("pcheck: no document; beacon disabled");
        return;
    };

    let host = Rc::new(WindowHost::new(
        window.clone(),
        document.clone(),
        diagnostics.clone(),
    ));
    let beacon = Rc::new(Beacon::new(
        &config,
        DocumentEmbedding::new(window.clone(), document, diagnostics.clone()),
        BrowserTimingProbe::new(window.clone()),
        FetchTransport::new(window),
        diagnostics,
    ));

    TRIGGER.with(|trigger| beacon.install(&host, trigger));
}

/// Turn diagnostics on or off for the rest of this page view
#[wasm_bindgen(js_name = setLogEnabled)]
pub fn set_log_enabled(enabled: bool) {
    LOG_SWITCH.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| LogSwitch::new(enabled))
            .set(enabled)
    });
}

/// Current diagnostics state
#[wasm_bindgen(js_name = isLogEnabled)]
pub fn is_log_enabled() -> bool {
    LOG_SWITCH.with(|slot| slot.borrow().as_ref().is_some_and(LogSwitch::is_enabled))
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_log_switch_toggles() {
        set_log_enabled(true);
        assert!(is_log_enabled());
        set_log_enabled(false);
        assert!(!is_log_enabled());
    }

    #[wasm_bindgen_test]
    fn test_build_config_is_valid() {
        let config = build_config().unwrap();
        assert!(config.validate().is_ok());
        assert!(config.collection_url().starts_with("//"));
    }

    #[wasm_bindgen_test]
    fn test_version() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }
}
