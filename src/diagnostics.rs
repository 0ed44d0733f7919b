//! Diagnostic Channel
//!
//! A scoped sink for structured events emitted during a single conversion.
//! Modelled on the phase-error enums this crate already uses elsewhere
//! (see `facade::ConvertError`): plain data, `Display`/`Error` by hand, no
//! macros. The one piece of machinery here is the scope itself: a stack of
//! sinks held in a thread-local, pushed by [`diagnostic_context`] and popped
//! by the returned guard's `Drop`, so a conversion's diagnostics can never
//! leak into, or be polluted by, another conversion running elsewhere.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a [`DiagnosticEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Whether this severity should fail a strict conversion.
    pub fn is_blocking(self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        write!(f, "{s}")
    }
}

/// Source location of a diagnostic, when the producing stage can recover one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub end_column: Option<u32>,
    pub node_path: Option<String>,
}

/// A single structured event describing a problem (or notable fact) detected
/// during one conversion. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub code: String,
    pub category: String,
    pub severity: Severity,
    pub message: String,
    pub source_html: Option<String>,
    pub location: Option<Location>,
    pub context: BTreeMap<String, String>,
}

impl DiagnosticEvent {
    pub fn new(
        code: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            category: category.into(),
            severity,
            message: message.into(),
            source_html: None,
            location: None,
            context: BTreeMap::new(),
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_source_html(mut self, html: impl Into<String>) -> Self {
        self.source_html = Some(html.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// The `(code, location)` identity used to de-duplicate events within one scope.
    fn dedup_key(&self) -> (String, Option<Location>) {
        (self.code.clone(), self.location.clone())
    }
}

/// All error/fatal [`DiagnosticEvent`]s collected during a strict conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsError {
    pub events: Vec<DiagnosticEvent>,
}

impl fmt::Display for DiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conversion failed with {} diagnostic(s):", self.events.len())?;
        for event in &self.events {
            write!(f, "\n  [{}] {}: {}", event.severity, event.code, event.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticsError {}

struct Sink {
    events: Vec<DiagnosticEvent>,
    seen: HashSet<(String, Option<Location>)>,
}

impl Sink {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

thread_local! {
    static SINK_STACK: RefCell<Vec<Sink>> = const { RefCell::new(Vec::new()) };
}

/// RAII guard returned by [`diagnostic_context`]. Dropping it (including via
/// an early return or an unwinding panic) pops the sink it opened, so a
/// scope's lifetime can never outlive the call that created it.
pub struct DiagnosticScope {
    enabled: bool,
}

impl Drop for DiagnosticScope {
    fn drop(&mut self) {
        if self.enabled {
            SINK_STACK.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }
}

/// Open a diagnostic scope for the duration of this guard's lifetime. When
/// `enabled` is false, [`emit`] inside the scope is a no-op and [`take`]
/// returns an empty vector, but the stack bookkeeping is skipped entirely.
pub fn diagnostic_context(enabled: bool) -> DiagnosticScope {
    if enabled {
        SINK_STACK.with(|stack| stack.borrow_mut().push(Sink::new()));
    }
    DiagnosticScope { enabled }
}

/// Append `event` to the innermost open scope. A no-op if no scope is open,
/// or if an event with the same `(code, location)` was already emitted in
/// this scope.
pub fn emit(event: DiagnosticEvent) {
    SINK_STACK.with(|stack| {
        if let Some(sink) = stack.borrow_mut().last_mut() {
            let key = event.dedup_key();
            if sink.seen.insert(key) {
                sink.events.push(event);
            }
        }
    });
}

/// Drain and return every event emitted in the innermost open scope so far.
/// Does not close the scope.
pub fn peek() -> Vec<DiagnosticEvent> {
    SINK_STACK.with(|stack| {
        stack
            .borrow()
            .last()
            .map(|sink| sink.events.clone())
            .unwrap_or_default()
    })
}

/// Fail with [`DiagnosticsError`] carrying every error-or-fatal event in
/// `events`. Warnings and info events never trigger this.
pub fn enforce_strict(events: &[DiagnosticEvent]) -> Result<(), DiagnosticsError> {
    let blocking: Vec<DiagnosticEvent> = events
        .iter()
        .filter(|e| e.severity.is_blocking())
        .cloned()
        .collect();
    if blocking.is_empty() {
        Ok(())
    } else {
        Err(DiagnosticsError { events: blocking })
    }
}
