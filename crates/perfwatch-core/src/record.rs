//! Timing line codec.
//!
//! A completed interval is written as
//! `start[<epoch ms>] time[<elapsed ms>] tag[<tag>]` with an optional trailing
//! ` message[<text>]`. Inside the tag, `]` and `\` are escaped with a
//! backslash; the message runs to the final `]` and needs no escaping.
//! Collectors read emitted lines back through [`TimingRecord::parse`], so
//! both directions live here.

use std::fmt::{self, Write};

/// One completed interval, as carried by a timing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRecord {
    pub start: u64,
    pub elapsed: u64,
    pub tag: String,
    pub message: Option<String>,
}

impl TimingRecord {
    /// Recover a record from a timing line.
    ///
    /// The line may carry a prefix (e.g. a channel name and level added by a
    /// backend). Returns `None` for anything that is not a timing line.
    pub fn parse(line: &str) -> Option<TimingRecord> {
        let line = line.trim_end();
        let rest = &line[line.find("start[")? + "start[".len()..];
        let (start, rest) = rest.split_once("] time[")?;
        let (elapsed, rest) = rest.split_once("] tag[")?;
        let (tag, rest) = read_tag(rest)?;
        let message = match rest {
            "" => None,
            _ => Some(rest.strip_prefix(" message[")?.strip_suffix(']')?),
        };

        Some(TimingRecord {
            start: start.parse().ok()?,
            elapsed: elapsed.parse().ok()?,
            tag,
            message: message.map(str::to_string),
        })
    }
}

impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_line(f, self.start, self.elapsed, &self.tag, self.message.as_deref())
    }
}

/// Format a timing line into a fresh `String`.
pub fn format_line(start: u64, elapsed: u64, tag: &str, message: Option<&str>) -> String {
    let mut out = String::with_capacity(48 + tag.len() + message.map_or(0, str::len));
    let _ = write_line(&mut out, start, elapsed, tag, message);
    out
}

fn write_line(out: &mut impl Write, start: u64, elapsed: u64, tag: &str, message: Option<&str>) -> fmt::Result {
    write!(out, "start[{start}] time[{elapsed}] tag[")?;
    for c in tag.chars() {
        if c == ']' || c == '\\' {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    out.write_char(']')?;
    if let Some(msg) = message {
        write!(out, " message[{msg}]")?;
    }
    Ok(())
}

/// Unescape a tag up to its closing `]`; returns the tag and what follows.
fn read_tag(s: &str) -> Option<(String, &str)> {
    let mut tag = String::with_capacity(s.len());
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => tag.push(chars.next()?.1),
            ']' => return Some((tag, &s[i + 1..])),
            _ => tag.push(c),
        }
    }
    None
}
