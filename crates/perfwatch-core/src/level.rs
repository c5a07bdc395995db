//! Symbolic severity vocabulary and the per-backend mapping contract.
//!
//! Callers (config files, instrumented code) speak one backend-agnostic
//! vocabulary. Every backend supplies its own table from that vocabulary to
//! its native token through [`LevelMapper`].

/// Backend-agnostic severity names, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Notice,
    Warn,
    Error,
    Critical,
}

impl Severity {
    /// Tier used for unknown, empty or absent names.
    pub const DEFAULT: Severity = Severity::Info;

    /// Case-insensitive lookup. `WARNING` and `FATAL` are accepted aliases.
    pub fn parse(name: &str) -> Option<Severity> {
        let name = name.trim();
        let sev = if name.eq_ignore_ascii_case("trace") {
            Severity::Trace
        } else if name.eq_ignore_ascii_case("debug") {
            Severity::Debug
        } else if name.eq_ignore_ascii_case("info") {
            Severity::Info
        } else if name.eq_ignore_ascii_case("notice") {
            Severity::Notice
        } else if name.eq_ignore_ascii_case("warn") || name.eq_ignore_ascii_case("warning") {
            Severity::Warn
        } else if name.eq_ignore_ascii_case("error") {
            Severity::Error
        } else if name.eq_ignore_ascii_case("critical") || name.eq_ignore_ascii_case("fatal") {
            Severity::Critical
        } else {
            return None;
        };
        Some(sev)
    }

    /// Total variant of [`Severity::parse`].
    pub fn parse_or_default(name: Option<&str>) -> Severity {
        name.and_then(Severity::parse).unwrap_or(Severity::DEFAULT)
    }
}

/// Backend-specific table from symbolic names to a native severity token.
///
/// `map` never fails: a typo in configuration must not block instrumented
/// code, so anything unrecognized lands on the informational tier.
pub trait LevelMapper {
    /// Native severity token of the backend.
    type Level: Copy;

    /// Native token for a symbolic tier.
    fn native(severity: Severity) -> Self::Level;

    /// Map a symbolic name (any case) to the native token.
    fn map(name: Option<&str>) -> Self::Level {
        Self::native(Severity::parse_or_default(name))
    }
}
