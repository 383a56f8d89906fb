//! In-memory hosts for unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::error::{BeaconError, BeaconResult};
use crate::lifecycle::{Callback, LocalTask, PageHost, ReadyState};
use crate::log::Console;
use crate::resolver::EmbeddingContext;
use crate::timing::{LegacyTiming, NavigationEntry, TimingProbe};
use crate::transmit::{Transport, TransportResponse};

#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: RefCell<Vec<String>>,
}

impl MemoryConsole {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Console for MemoryConsole {
    fn log(&self, message: &str) {
        self.lines.borrow_mut().push(format!("log: {}", message));
    }

    fn error(&self, message: &str) {
        self.lines.borrow_mut().push(format!("error: {}", message));
    }
}

#[derive(Debug, Clone)]
enum Tag {
    Missing,
    NoAttribute,
    Code(String),
}

#[derive(Debug, Clone)]
pub struct StaticEmbedding {
    tag: Tag,
    path: String,
    host: String,
}

impl StaticEmbedding {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            path: "/pricing".to_string(),
            host: "www.example.com".to_string(),
        }
    }

    pub fn with_code(code: &str) -> Self {
        Self::new(Tag::Code(code.to_string()))
    }

    pub fn without_attribute() -> Self {
        Self::new(Tag::NoAttribute)
    }

    pub fn without_element() -> Self {
        Self::new(Tag::Missing)
    }
}

impl EmbeddingContext for StaticEmbedding {
    fn element_attribute(
        &self,
        element_id: &str,
        _attribute: &str,
    ) -> BeaconResult<Option<String>> {
        match &self.tag {
            Tag::Missing => Err(BeaconError::ElementNotFound(element_id.to_string())),
            Tag::NoAttribute => Ok(None),
            Tag::Code(code) => Ok(Some(code.clone())),
        }
    }

    fn page_path(&self) -> String {
        self.path.clone()
    }

    fn page_host(&self) -> String {
        self.host.clone()
    }
}

#[derive(Debug, Default)]
pub struct StaticProbe {
    modern: bool,
    entry: Option<NavigationEntry>,
    legacy: Option<LegacyTiming>,
    navigation_reads: Cell<u32>,
    legacy_reads: Cell<u32>,
}

impl StaticProbe {
    pub fn modern(entry: NavigationEntry) -> Self {
        Self {
            modern: true,
            entry: Some(entry),
            ..Default::default()
        }
    }

    pub fn modern_without_entry() -> Self {
        Self {
            modern: true,
            ..Default::default()
        }
    }

    pub fn legacy(timing: LegacyTiming) -> Self {
        Self {
            legacy: Some(timing),
            ..Default::default()
        }
    }

    pub fn navigation_reads(&self) -> u32 {
        self.navigation_reads.get()
    }

    pub fn legacy_reads(&self) -> u32 {
        self.legacy_reads.get()
    }
}

impl TimingProbe for StaticProbe {
    fn supports_navigation_timing(&self) -> bool {
        self.modern
    }

    fn navigation_entry(&self) -> BeaconResult<NavigationEntry> {
        self.navigation_reads.set(self.navigation_reads.get() + 1);
        self.entry
            .ok_or_else(|| BeaconError::TimingUnavailable("no navigation entry".to_string()))
    }

    fn legacy_timing(&self) -> BeaconResult<LegacyTiming> {
        self.legacy_reads.set(self.legacy_reads.get() + 1);
        self.legacy
            .ok_or_else(|| BeaconError::TimingUnavailable("no performance.timing".to_string()))
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Status(u16, Option<String>),
    Unreachable(String),
}

/// Transport that records every request and answers from a script
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    requests: RefCell<Vec<(String, String)>>,
}

impl RecordingTransport {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::new(Reply::Status(200, Some(body.to_string())))
    }

    pub fn status(status: u16) -> Self {
        Self::new(Reply::Status(status, None))
    }

    pub fn unreachable(cause: &str) -> Self {
        Self::new(Reply::Unreachable(cause.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    async fn post_json(&self, url: &str, body: String) -> BeaconResult<TransportResponse> {
        self.requests.borrow_mut().push((url.to_string(), body));
        match &self.reply {
            Reply::Status(status, body) => Ok(TransportResponse::new(*status, body.clone())),
            Reply::Unreachable(cause) => Err(BeaconError::Network(cause.clone())),
        }
    }
}

/// Page host whose events are fired by hand
pub struct ScriptedHost {
    state: ReadyState,
    registered: Cell<u32>,
    load_listeners: RefCell<Vec<Callback>>,
    deferred: RefCell<VecDeque<Callback>>,
    tasks: RefCell<VecDeque<LocalTask>>,
}

impl ScriptedHost {
    pub fn new(state: ReadyState) -> Self {
        Self {
            state,
            registered: Cell::new(0),
            load_listeners: RefCell::new(Vec::new()),
            deferred: RefCell::new(VecDeque::new()),
            tasks: RefCell::new(VecDeque::new()),
        }
    }

    /// Number of load listeners ever registered
    pub fn load_listeners(&self) -> u32 {
        self.registered.get()
    }

    /// Dispatch `load`; one-shot listeners are dropped afterwards
    pub fn fire_load(&self) {
        let listeners = std::mem::take(&mut *self.load_listeners.borrow_mut());
        for listener in listeners {
            listener();
        }
    }

    /// Run every queued timeout, including ones queued while running
    pub fn run_deferred(&self) {
        loop {
            let next = self.deferred.borrow_mut().pop_front();
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Await every spawned task in order
    pub async fn run_tasks(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }
}

impl PageHost for ScriptedHost {
    fn ready_state(&self) -> ReadyState {
        self.state
    }

    fn on_load_once(&self, callback: Callback) {
        self.registered.set(self.registered.get() + 1);
        self.load_listeners.borrow_mut().push(callback);
    }

    fn defer(&self, callback: Callback) {
        self.deferred.borrow_mut().push_back(callback);
    }

    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}
