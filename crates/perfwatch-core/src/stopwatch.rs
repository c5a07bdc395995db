//! Interval timer with gated emission.
//!
//! A [`StopWatch`] measures one interval at a time and, on completion, asks
//! its backend whether the effective severity is enabled before doing any
//! formatting. A filtered-out completion costs two clock reads and one gate
//! check. An interval under the time threshold never reaches the gate.
//!
//! Severities and the backend are plain mutable fields. Nothing about the
//! gate decision is cached, so every completion sees the severity and the
//! backend threshold as they are at that moment.
//!
//! A watch is owned by one thread between start and completion. Completing it
//! twice is allowed and simply records the same interval again.

use std::fmt;

use crate::backend::LogBackend;
use crate::clock::{Clock, SystemClock};
use crate::level::LevelMapper;
use crate::record;

/// Tag used when the caller never sets one.
pub const DEFAULT_TAG: &str = "[untagged]";

/// How the timed block ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Normal,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Constructed with a deferred start.
    Created,
    Running,
    Stopped,
}

/// Result of one `stop`/`lap` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub elapsed_ms: u64,
    /// Whether a line reached the backend.
    pub emitted: bool,
}

pub struct StopWatch<B: LogBackend, C: Clock = SystemClock> {
    start_time: u64,
    elapsed_time: Option<u64>,
    state: WatchState,
    tag: String,
    message: Option<String>,
    normal_level: B::Level,
    exception_level: B::Level,
    backend: B,
    clock: C,
    time_threshold: u64,
    slow_suffixes: bool,
}

impl<B: LogBackend> StopWatch<B, SystemClock> {
    /// Start timing now on the system clock.
    pub fn new(backend: B, normal_level: B::Level, exception_level: B::Level) -> Self {
        Self::with_clock(backend, SystemClock, normal_level, exception_level)
    }
}

impl<B: LogBackend + LevelMapper<Level = <B as LogBackend>::Level>> StopWatch<B, SystemClock> {
    /// Start timing now, resolving both severities from symbolic names.
    /// Unknown or missing names fall back to the informational tier.
    pub fn with_level_names(backend: B, normal: Option<&str>, exception: Option<&str>) -> Self {
        Self::new(backend, B::map(normal), B::map(exception))
    }
}

impl<B: LogBackend, C: Clock> StopWatch<B, C> {
    /// Start timing now on the given clock.
    pub fn with_clock(backend: B, clock: C, normal_level: B::Level, exception_level: B::Level) -> Self {
        let mut watch = Self::deferred(backend, clock, normal_level, exception_level);
        watch.start();
        watch
    }

    /// Build a watch that does not read the clock until [`StopWatch::start`].
    ///
    /// Completing a watch that was never started records a zero-length
    /// interval at the completion instant.
    pub fn deferred(backend: B, clock: C, normal_level: B::Level, exception_level: B::Level) -> Self {
        Self {
            start_time: 0,
            elapsed_time: None,
            state: WatchState::Created,
            tag: DEFAULT_TAG.to_string(),
            message: None,
            normal_level,
            exception_level,
            backend,
            clock,
            time_threshold: 0,
            slow_suffixes: false,
        }
    }

    #[must_use]
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Skip recording intervals shorter than `millis`.
    #[must_use]
    pub fn with_time_threshold(mut self, millis: u64) -> Self {
        self.time_threshold = millis;
        self
    }

    /// With a nonzero time threshold, record every interval and suffix the
    /// tag with `.normal` or `.slow` instead of dropping the fast ones.
    #[must_use]
    pub fn with_slow_suffixes(mut self, enabled: bool) -> Self {
        self.slow_suffixes = enabled;
        self
    }

    /// (Re)start timing. Allowed in any state.
    pub fn start(&mut self) {
        self.start_time = self.clock.now_millis();
        self.state = WatchState::Running;
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// `None` until the first completion.
    pub fn elapsed_time(&self) -> Option<u64> {
        self.elapsed_time
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn normal_level(&self) -> B::Level {
        self.normal_level
    }

    pub fn set_normal_level(&mut self, level: B::Level) {
        self.normal_level = level;
    }

    pub fn exception_level(&self) -> B::Level {
        self.exception_level
    }

    pub fn set_exception_level(&mut self, level: B::Level) {
        self.exception_level = level;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn set_backend(&mut self, backend: B) {
        self.backend = backend;
    }

    pub fn stop(&mut self) -> Completion {
        self.complete(Outcome::Normal, false)
    }

    pub fn stop_with(&mut self, outcome: Outcome) -> Completion {
        self.complete(outcome, false)
    }

    /// Replace the tag, then stop.
    pub fn stop_as(&mut self, tag: impl Into<String>, outcome: Outcome) -> Completion {
        self.tag = tag.into();
        self.complete(outcome, false)
    }

    /// Replace tag and message, then stop. `None` clears the message.
    pub fn stop_with_message(
        &mut self,
        tag: impl Into<String>,
        message: Option<String>,
        outcome: Outcome,
    ) -> Completion {
        self.tag = tag.into();
        self.message = message;
        self.complete(outcome, false)
    }

    /// Record the interval so far and keep running from now.
    pub fn lap(&mut self) -> Completion {
        self.complete(Outcome::Normal, true)
    }

    /// Replace the tag, then lap.
    pub fn lap_as(&mut self, tag: impl Into<String>) -> Completion {
        self.tag = tag.into();
        self.complete(Outcome::Normal, true)
    }

    /// Replace tag and message, then lap.
    pub fn lap_with_message(&mut self, tag: impl Into<String>, message: Option<String>) -> Completion {
        self.tag = tag.into();
        self.message = message;
        self.complete(Outcome::Normal, true)
    }

    /// Time `f`, stopping with the exception severity when it returns `Err`.
    pub fn time<T, E>(&mut self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        if self.state != WatchState::Running {
            self.start();
        }
        let res = f();
        let outcome = if res.is_ok() { Outcome::Normal } else { Outcome::Failed };
        self.complete(outcome, false);
        res
    }

    fn complete(&mut self, outcome: Outcome, restart: bool) -> Completion {
        let now = self.clock.now_millis();
        if self.state == WatchState::Created {
            self.start_time = now;
        }
        let elapsed = now.saturating_sub(self.start_time);
        self.elapsed_time = Some(elapsed);

        let level = match outcome {
            Outcome::Normal => self.normal_level,
            Outcome::Failed => self.exception_level,
        };

        // below the time threshold nothing reaches the backend, not even the gate
        let mut emitted = false;
        if let Some(suffix) = self.tag_suffix(elapsed) {
            if self.backend.is_enabled(level) {
                let tag = match suffix {
                    "" => self.tag.clone(),
                    s => format!("{}{s}", self.tag),
                };
                let line = record::format_line(self.start_time, elapsed, &tag, self.message.as_deref());
                self.backend.emit(level, &line);
                emitted = true;
            }
        }

        if restart {
            self.start_time = now;
            self.state = WatchState::Running;
        } else {
            self.state = WatchState::Stopped;
        }

        Completion { elapsed_ms: elapsed, emitted }
    }

    /// `None` drops the interval, otherwise the suffix to append to the tag.
    fn tag_suffix(&self, elapsed: u64) -> Option<&'static str> {
        if self.time_threshold == 0 {
            return Some("");
        }
        match (elapsed >= self.time_threshold, self.slow_suffixes) {
            (true, true) => Some(".slow"),
            (false, true) => Some(".normal"),
            (true, false) => Some(""),
            (false, false) => None,
        }
    }
}

impl<B, C> Clone for StopWatch<B, C>
where
    B: LogBackend + Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            start_time: self.start_time,
            elapsed_time: self.elapsed_time,
            state: self.state,
            tag: self.tag.clone(),
            message: self.message.clone(),
            normal_level: self.normal_level,
            exception_level: self.exception_level,
            backend: self.backend.clone(),
            clock: self.clock.clone(),
            time_threshold: self.time_threshold,
            slow_suffixes: self.slow_suffixes,
        }
    }
}

impl<B: LogBackend, C: Clock> fmt::Display for StopWatch<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = record::format_line(
            self.start_time,
            self.elapsed_time.unwrap_or(0),
            &self.tag,
            self.message.as_deref(),
        );
        f.write_str(&line)
    }
}
