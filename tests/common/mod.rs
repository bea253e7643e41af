#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use routerlite::{Flow, Handler, Middleware, ResponseSink};

/// Shared log of controller/middleware invocations observed during a test.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Controller that records `name(arg1,arg2,...)` into the log.
pub fn recording_controller(log: &EventLog, name: &str) -> Arc<dyn Handler> {
    let log = Arc::clone(log);
    let name = name.to_string();
    Arc::new(move |args: &[String]| {
        log.lock().unwrap().push(format!("{name}({})", args.join(",")));
    })
}

/// Middleware that records its invocation and continues the chain.
pub fn passing_middleware(log: &EventLog, name: &str) -> Arc<dyn Middleware> {
    let log = Arc::clone(log);
    let name = name.to_string();
    Arc::new(move |args: &[String]| {
        log.lock().unwrap().push(format!("{name}({})", args.join(",")));
        Flow::Continue
    })
}

/// Middleware that records its invocation and stops the chain.
pub fn stopping_middleware(log: &EventLog, name: &str) -> Arc<dyn Middleware> {
    let log = Arc::clone(log);
    let name = name.to_string();
    Arc::new(move |args: &[String]| {
        log.lock().unwrap().push(format!("{name}({})", args.join(",")));
        Flow::Stop
    })
}

/// Response sink that records everything the dispatcher emits.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl ResponseSink for RecordingSink {
    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn write_body(&mut self, body: &str) {
        self.body.push_str(body);
    }
}

/// Install a test subscriber so `tracing` output lands in the captured
/// test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .try_init();
}
