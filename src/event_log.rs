//! Ring buffer of lifecycle events for an on-device log view.
//!
//! The coordinator records surface, countdown and connection transitions here
//! so the host can show them without a debug probe attached. Oldest entries
//! are dropped once the buffer is full.
//!
//! # Log Levels
//!
//! - `Debug` (`D`): frame-level detail (skipped draws)
//! - `Info` (`I`): normal lifecycle transitions
//! - `Warn` (`W`): ignored or rejected requests

use core::fmt::{self, Write};

use heapless::{Deque, String};

/// Maximum number of entries kept.
pub const LOG_ENTRIES: usize = 16;

/// Maximum bytes per message.
pub const LOG_MSG_LEN: usize = 40;

/// Entry severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
}

impl LogLevel {
    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
        }
    }
}

/// One logged event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Message, truncated to [`LOG_MSG_LEN`] bytes.
    pub message: String<LOG_MSG_LEN>,
    /// Host clock at the time of the event.
    pub timestamp_ms: u64,
}

impl fmt::Display for LogEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {:>6} {}", self.level.prefix(), self.timestamp_ms, self.message)
    }
}

/// Writes characters until the string is full, then silently drops the rest.
///
/// Once a character does not fit, every later fragment is dropped too, even
/// one short enough to fit in the space left.
struct Truncating<'a> {
    out: &'a mut String<LOG_MSG_LEN>,
    full: bool,
}

impl<'a> Truncating<'a> {
    fn new(out: &'a mut String<LOG_MSG_LEN>) -> Self { Self { out, full: false } }
}

impl Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        if self.full {
            return Ok(());
        }
        for c in s.chars() {
            if self.out.push(c).is_err() {
                self.full = true;
                break;
            }
        }
        Ok(())
    }
}

/// Fixed-capacity event log.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Deque<LogEntry, LOG_ENTRIES>,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self { Self { entries: Deque::new() } }

    /// Append a formatted message, evicting the oldest entry if full.
    pub fn push(
        &mut self,
        level: LogLevel,
        timestamp_ms: u64,
        args: fmt::Arguments<'_>,
    ) {
        let mut message = String::new();
        Truncating::new(&mut message).write_fmt(args).ok();

        if self.entries.is_full() {
            self.entries.pop_front();
        }
        self.entries
            .push_back(LogEntry {
                level,
                message,
                timestamp_ms,
            })
            .ok();
    }

    /// Append a plain message.
    pub fn note(
        &mut self,
        level: LogLevel,
        timestamp_ms: u64,
        message: &str,
    ) {
        self.push(level, timestamp_ms, format_args!("{message}"));
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// Most recent entry.
    #[inline]
    pub fn latest(&self) -> Option<&LogEntry> { self.entries.back() }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn clear(&mut self) { self.entries.clear(); }

    /// Whether any entry's message contains `needle`.
    pub fn contains(
        &self,
        needle: &str,
    ) -> bool {
        self.iter().any(|entry| entry.message.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iterate_in_order() {
        let mut log = EventLog::new();
        log.note(LogLevel::Info, 10, "first");
        log.push(LogLevel::Warn, 20, format_args!("second {}", 2));
        let messages: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second 2"]);
        assert_eq!(log.latest().map(|e| e.level), Some(LogLevel::Warn));
    }

    #[test]
    fn test_full_log_drops_oldest() {
        let mut log = EventLog::new();
        for i in 0..(LOG_ENTRIES as u64 + 3) {
            log.push(LogLevel::Info, i, format_args!("entry {i}"));
        }
        assert_eq!(log.len(), LOG_ENTRIES);
        assert_eq!(log.iter().next().map(|e| e.timestamp_ms), Some(3));
        assert!(!log.contains("entry 2"));
        assert!(log.contains("entry 18"));
    }

    #[test]
    fn test_long_message_is_truncated() {
        let mut log = EventLog::new();
        log.note(LogLevel::Info, 0, "a message that is much longer than forty bytes in total");
        let entry = log.latest().unwrap();
        assert_eq!(entry.message.len(), LOG_MSG_LEN);
        assert!(entry.message.starts_with("a message that"));
    }

    #[test]
    fn test_truncation_drops_fragments_after_overflow() {
        let mut log = EventLog::new();
        let filler = "x".repeat(LOG_MSG_LEN - 1);
        // 'é' needs two bytes and only one is left; the trailing "!" must not slip in
        log.push(LogLevel::Info, 0, format_args!("{filler}{}{}", 'é', "!"));
        let entry = log.latest().unwrap();
        assert_eq!(entry.message.as_str(), filler);
    }

    #[test]
    fn test_entry_display() {
        let mut log = EventLog::new();
        log.note(LogLevel::Warn, 1234, "ignored");
        assert_eq!(log.latest().unwrap().to_string(), "W   1234 ignored");
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new();
        log.note(LogLevel::Debug, 0, "x");
        log.clear();
        assert!(log.is_empty());
    }
}
