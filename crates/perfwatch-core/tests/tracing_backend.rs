//! Tracing adapter: gate follows the active subscriber's filter.
//!
//! Single test on purpose: callsite interest is process-global.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};

use perfwatch_core::{LogBackend, StopWatch, TracingBackend};
use tracing::Level;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn gate_and_emit_follow_subscriber() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let backend = TracingBackend::new("checkout");
        assert!(backend.is_enabled(Level::ERROR));
        assert!(backend.is_enabled(Level::WARN));
        assert!(!backend.is_enabled(Level::INFO));
        assert!(!backend.is_enabled(Level::TRACE));

        let mut quiet = StopWatch::new(backend.clone(), Level::INFO, Level::WARN).tagged("quiet");
        assert!(!quiet.stop().emitted);

        let mut loud = StopWatch::new(backend, Level::INFO, Level::WARN).tagged("loud");
        assert!(loud.stop_with(perfwatch_core::Outcome::Failed).emitted);
    });

    let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(out.contains("tag[loud]"));
    assert!(out.contains("checkout"));
    assert!(!out.contains("tag[quiet]"));
}
