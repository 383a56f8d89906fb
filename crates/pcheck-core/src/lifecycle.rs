//! When to run the pipeline
//!
//! The beacon runs once per page view, on the event-loop turn after the page
//! finished loading, so it never competes with the page's own load work.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "loading" => Some(ReadyState::Loading),
            "interactive" => Some(ReadyState::Interactive),
            "complete" => Some(ReadyState::Complete),
            _ => None,
        }
    }

    pub fn is_complete(self) -> bool {
        self == ReadyState::Complete
    }
}

pub type Callback = Box<dyn FnOnce()>;
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Event-loop services of the page hosting the beacon
pub trait PageHost {
    fn ready_state(&self) -> ReadyState;

    /// Run `callback` when the `load` event fires (listener registered once)
    fn on_load_once(&self, callback: Callback);

    /// Run `callback` on the next event-loop turn (`setTimeout(cb, 0)`)
    fn defer(&self, callback: Callback);

    /// Drive `task` to completion in the background; nobody awaits it
    fn spawn(&self, task: LocalTask);
}

/// How [`LifecycleTrigger::arm`] scheduled the job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Page already complete; job queued for the next turn
    Deferred,
    /// Waiting for the load event
    AwaitingLoad,
    /// Trigger was armed before; nothing registered
    AlreadyArmed,
}

/// Runs a job at most once per page load
#[derive(Debug, Clone, Default)]
pub struct LifecycleTrigger {
    armed: Rc<Cell<bool>>,
    fired: Rc<Cell<bool>>,
}

impl LifecycleTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    pub fn arm<H, F>(&self, host: &Rc<H>, job: F) -> TriggerMode
    where
        H: PageHost + ?Sized + 'static,
        F: FnOnce() + 'static,
    {
        if self.armed.replace(true) {
            tracing::debug!("lifecycle trigger already armed");
            return TriggerMode::AlreadyArmed;
        }

        let fired = self.fired.clone();
        let guarded: Callback = Box::new(move || {
            if !fired.replace(true) {
                job();
            }
        });

        if host.ready_state().is_complete() {
            host.defer(guarded);
            TriggerMode::Deferred
        } else {
            let deferring_host = Rc::clone(host);
            host.on_load_once(Box::new(move || deferring_host.defer(guarded)));
            TriggerMode::AwaitingLoad
        }
    }
}
