//! Console scrollback storage.
//!
//! Completed lines are kept oldest first. Text written without a trailing
//! `\n` waits in a pending buffer until a terminator or an explicit
//! [`LineBuffer::write_line`] completes it.
//!
//! The buffer is a ring: once `limit` completed lines are stored, the oldest
//! line is evicted for every new one.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::diagnostics::{Diagnostics, LogSink, SinkRegistration};

#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: VecDeque<String>,
    pending: String,
    limit: Option<usize>,
    evicted: u64,
}

impl LineBuffer {
    /// Buffer that never evicts.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Buffer keeping at most `limit` completed lines (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Complete a line, prefixed by any pending partial text.
    pub fn write_line(&mut self, text: &str) {
        let line = if self.pending.is_empty() {
            text.to_string()
        } else {
            let mut line = std::mem::take(&mut self.pending);
            line.push_str(text);
            line
        };
        self.push(line);
    }

    /// Append raw text, flushing every complete `\n`-terminated segment.
    pub fn write(&mut self, text: &str) {
        self.pending.push_str(text);
        while let Some(idx) = self.pending.find('\n') {
            let line = self.pending[..idx].to_string();
            self.pending.drain(..=idx);
            self.push(line);
        }
    }

    /// Drop all completed lines. Pending text is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn push(&mut self, line: String) {
        if let Some(limit) = self.limit {
            while self.lines.len() >= limit {
                self.lines.pop_front();
                self.evicted += 1;
            }
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Number of lines dropped by the ring so far.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Completed lines, oldest first.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// Completed lines, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().rev().map(String::as_str)
    }
}

/// Line buffer shared between the console and diagnostics producers.
#[derive(Debug, Clone, Default)]
pub struct SharedLines(Arc<Mutex<LineBuffer>>);

impl SharedLines {
    pub fn new(buffer: LineBuffer) -> Self {
        Self(Arc::new(Mutex::new(buffer)))
    }

    /// Lock the buffer; a poisoned lock is recovered since lines stay valid.
    pub fn lock(&self) -> MutexGuard<'_, LineBuffer> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self, text: &str) {
        self.lock().write(text);
    }

    pub fn write_line(&self, text: &str) {
        self.lock().write_line(text);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of all completed lines, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().lines().map(str::to_string).collect()
    }
}

impl LogSink for SharedLines {
    fn write(&self, text: &str) {
        SharedLines::write(self, text);
    }

    fn write_line(&self, text: &str) {
        SharedLines::write_line(self, text);
    }
}

/// Holds diagnostics written before a console exists.
///
/// Call [`finish`](BootLog::finish) before attaching the console so lines
/// logged while it is being built are not collected twice.
#[derive(Debug)]
pub struct BootLog {
    lines: SharedLines,
    registration: SinkRegistration,
}

impl BootLog {
    pub fn capture(diagnostics: &Diagnostics) -> Self {
        let lines = SharedLines::new(LineBuffer::unbounded());
        let registration = diagnostics.register(Arc::new(lines.clone()));
        Self { lines, registration }
    }

    /// Stop capturing and return the collected lines, including any
    /// unterminated tail.
    pub fn finish(mut self) -> Vec<String> {
        self.registration.release();
        let buf = self.lines.lock();
        let mut out: Vec<String> = buf.lines().map(str::to_string).collect();
        if !buf.pending().is_empty() {
            out.push(buf.pending().to_string());
        }
        out
    }
}
