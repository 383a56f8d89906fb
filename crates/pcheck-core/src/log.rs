//! Integrator-facing diagnostics
//!
//! Everything the beacon prints to the page console goes through
//! [`Diagnostics`]. Output is gated by a [`LogSwitch`], except
//! [`Diagnostics::hint`] and [`Diagnostics::hint_error`] which always print.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared logging-enabled flag.
///
/// Clones observe the same flag, so a switch handed to the transmitter at
/// construction still reacts to `set` calls made later at the boundary.
#[derive(Debug, Clone, Default)]
pub struct LogSwitch {
    enabled: Arc<AtomicBool>,
}

impl LogSwitch {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

/// Sink for console output (`console.log` / `console.error` in a browser)
pub trait Console {
    fn log(&self, message: &str);
    fn error(&self, message: &str);
}

/// Console that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullConsole;

impl Console for NullConsole {
    fn log(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Gated console handle shared by the pipeline stages
#[derive(Clone)]
pub struct Diagnostics {
    switch: LogSwitch,
    console: Rc<dyn Console>,
}

impl Diagnostics {
    pub fn new(switch: LogSwitch, console: Rc<dyn Console>) -> Self {
        Self { switch, console }
    }

    /// Diagnostics that never print anything
    pub fn silent() -> Self {
        Self::new(LogSwitch::new(false), Rc::new(NullConsole))
    }

    pub fn switch(&self) -> &LogSwitch {
        &self.switch
    }

    pub fn enabled(&self) -> bool {
        self.switch.is_enabled()
    }

    pub fn log(&self, message: &str) {
        if self.enabled() {
            self.console.log(message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.enabled() {
            self.console.error(message);
        }
    }

    /// Integrator hint, printed whatever the switch says.
    pub fn hint(&self, message: &str) {
        self.console.log(message);
    }

    /// Error that accompanies an integrator hint; ungated as well.
    pub fn hint_error(&self, message: &str) {
        self.console.error(message);
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled())
            .finish_non_exhaustive()
    }
}
