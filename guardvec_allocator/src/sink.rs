//! Destinations for allocation diagnostics.

use crate::event::{AllocationEvent, Encoder, EventKind};
use log::info;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives one call per allocation event. Implementations must not fail and must keep each
/// event's output atomic with respect to other threads.
pub trait DiagnosticSink {
    fn emit(&self, event: &AllocationEvent);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, event: &AllocationEvent) {
        (**self).emit(event)
    }
}

/// Writes each event as a line on standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout {
    encoder: Encoder,
}

impl Stdout {
    pub const fn new(encoder: Encoder) -> Self {
        Self { encoder }
    }
}

impl DiagnosticSink for Stdout {
    fn emit(&self, event: &AllocationEvent) {
        write_line(&mut std::io::stdout().lock(), self.encoder, event)
    }
}

/// Writes each event as a line on standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stderr {
    encoder: Encoder,
}

impl Stderr {
    pub const fn new(encoder: Encoder) -> Self {
        Self { encoder }
    }
}

impl DiagnosticSink for Stderr {
    fn emit(&self, event: &AllocationEvent) {
        write_line(&mut std::io::stderr().lock(), self.encoder, event)
    }
}

// Encode up front so the whole line reaches the stream in a single write.
fn write_line(dst: &mut impl Write, encoder: Encoder, event: &AllocationEvent) {
    let mut line = Vec::with_capacity(64);
    if encoder.encode(event, &mut line).is_ok() {
        let _ = dst.write_all(&line);
    }
}

/// Forwards each event to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log;

impl DiagnosticSink for Log {
    fn emit(&self, event: &AllocationEvent) {
        info!(target: "guardvec::alloc", "{} ({}, {} bytes)", event, event.type_name, event.bytes);
    }
}

/// Captures events in memory. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<AllocationEvent>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far, in emission order.
    pub fn events(&self) -> Vec<AllocationEvent> {
        self.with_events(|events| events.to_vec())
    }

    pub fn acquisitions(&self) -> usize {
        self.count(EventKind::Acquire)
    }

    pub fn releases(&self) -> usize {
        self.count(EventKind::Release)
    }

    pub fn acquired_elements(&self) -> usize {
        self.elements(EventKind::Acquire)
    }

    pub fn released_elements(&self) -> usize {
        self.elements(EventKind::Release)
    }

    /// True when every acquisition has a matching release.
    pub fn is_balanced(&self) -> bool {
        self.acquisitions() == self.releases() && self.acquired_elements() == self.released_elements()
    }

    fn count(&self, kind: EventKind) -> usize {
        self.with_events(|events| events.iter().filter(|event| event.kind == kind).count())
    }

    fn elements(&self, kind: EventKind) -> usize {
        self.with_events(|events| {
            events
                .iter()
                .filter(|event| event.kind == kind)
                .map(|event| event.elements)
                .sum()
        })
    }

    fn with_events<R>(&self, f: impl FnOnce(&[AllocationEvent]) -> R) -> R {
        f(&self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for Recorder {
    fn emit(&self, event: &AllocationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*event);
    }
}
