//! Page lifecycle and event loop bindings

use pcheck_core::{Callback, Diagnostics, LocalTask, PageHost, ReadyState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Window};

pub struct WindowHost {
    window: Window,
    document: Document,
    diagnostics: Diagnostics,
}

impl WindowHost {
    pub fn new(window: Window, document: Document, diagnostics: Diagnostics) -> Self {
        Self {
            window,
            document,
            diagnostics,
        }
    }
}

impl PageHost for WindowHost {
    fn ready_state(&self) -> ReadyState {
        ReadyState::parse(&self.document.ready_state()).unwrap_or(ReadyState::Loading)
    }

    fn on_load_once(&self, callback: Callback) {
        let listener = Closure::once_into_js(move || callback());
        let options = AddEventListenerOptions::new();
        options.set_once(true);

        if let Err(e) = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "load",
                listener.unchecked_ref(),
                &options,
            )
        {
            self.diagnostics
                .error(&format!("Failed to register load listener: {:?}", e));
        }
    }

    fn defer(&self, callback: Callback) {
        let handler = Closure::once_into_js(move || callback());
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(handler.unchecked_ref(), 0)
        {
            self.diagnostics
                .error(&format!("Failed to schedule collection: {:?}", e));
        }
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
