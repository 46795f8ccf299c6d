//! Line reconstruction state machine
//!
//! Feeds key press records through the decoder and segments the resulting
//! effects into finished lines:
//!
//! ```text
//!   RawEvent ──▶ skip non key_press / missing key
//!            ──▶ shift?          set pending shift, done
//!            ──▶ control bytes?  skip (pending shift kept)
//!            ──▶ decode(token, pending shift), clear pending shift
//!            ──▶ apply effect to the edit buffer
//!                  NewLine ──▶ finalize buffer into a line
//! ```
//!
//! Shift is single-shot: it affects exactly the next decoded key.

use crate::decode::{decode, Effect};
use crate::event::{KeyToken, RawEvent};
use crate::text::{self, EditBuffer};
use serde::Serialize;

/// Counters describing one reconstruction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructStats {
    /// Records fed to the reconstructor
    pub records: usize,
    /// Log lines that failed to parse (filled in by the input reader)
    pub malformed_lines: usize,
    /// Key press records with a usable key
    pub key_presses: usize,
    pub skipped_non_key: usize,
    pub skipped_missing_key: usize,
    pub shift_presses: usize,
    /// Keys dropped because the label contained raw control characters
    pub control_skipped: usize,
    /// Labels that matched no known key and were appended literally
    pub unrecognized_tokens: usize,
    pub lines_emitted: usize,
    /// Non-empty buffers dropped at finalization for being blank
    pub lines_discarded: usize,
}

/// Output of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub lines: Vec<String>,
    pub stats: ReconstructStats,
}

/// Rebuilds typed lines from a stream of key press records
///
/// Known quirk, kept for compatibility with existing recorder logs: a key
/// that decodes to nothing (an arrow key, say) still consumes a pending
/// shift, so `shift, left, a` yields `"a"` rather than `"A"`.
#[derive(Debug, Default)]
pub struct Reconstructor {
    buffer: EditBuffer,
    shift_pending: bool,
    lines: Vec<String>,
    stats: ReconstructStats,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one log record
    pub fn feed(&mut self, event: &RawEvent) {
        self.stats.records += 1;

        if !event.event_type.is_key_press() {
            tracing::trace!("Skipping {} record", event.event_type);
            self.stats.skipped_non_key += 1;
            return;
        }

        match event.key.as_deref() {
            Some(key) => self.press(key),
            None => self.stats.skipped_missing_key += 1,
        }
    }

    /// Consume a key press given only its raw label
    pub fn feed_key(&mut self, key: &str) {
        self.stats.records += 1;
        self.press(key);
    }

    fn press(&mut self, raw: &str) {
        self.stats.key_presses += 1;

        let token = KeyToken::parse(raw);
        if token.is_shift() {
            self.shift_pending = true;
            self.stats.shift_presses += 1;
            return;
        }

        if raw.chars().any(text::is_control_char) {
            tracing::trace!("Skipping control key {:?}", raw);
            self.stats.control_skipped += 1;
            return;
        }

        if let KeyToken::Unrecognized(label) = &token {
            tracing::debug!("Unrecognized key label {:?}, appending literally", label);
            self.stats.unrecognized_tokens += 1;
        }

        let effect = decode(&token, self.shift_pending);
        self.shift_pending = false;
        self.apply(effect);
    }

    /// Apply a decoded effect to the edit buffer
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::AppendChar(c) => self.buffer.push(c),
            Effect::AppendText(s) => self.buffer.push_unit(s),
            Effect::NewLine => self.flush(),
            Effect::DeleteLast => {
                self.buffer.pop();
            }
            Effect::Ignore => {}
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let raw = self.buffer.take();
        match text::finalize(&raw) {
            Some(line) => {
                tracing::trace!("Finalized line {:?}", line);
                self.lines.push(line);
                self.stats.lines_emitted += 1;
            }
            None => self.stats.lines_discarded += 1,
        }
    }

    /// Lines finalized so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The unfinished line
    pub fn pending(&self) -> String {
        self.buffer.contents()
    }

    pub fn shift_pending(&self) -> bool {
        self.shift_pending
    }

    pub fn stats(&self) -> &ReconstructStats {
        &self.stats
    }

    pub(crate) fn record_malformed(&mut self) {
        self.stats.malformed_lines += 1;
    }

    /// End the stream, capturing an unterminated final line
    pub fn finish(mut self) -> Reconstruction {
        self.flush();
        Reconstruction {
            lines: self.lines,
            stats: self.stats,
        }
    }
}

/// Reconstruct lines from an in-memory sequence of records
pub fn reconstruct<'a, I>(events: I) -> Reconstruction
where
    I: IntoIterator<Item = &'a RawEvent>,
{
    let mut reconstructor = Reconstructor::new();
    for event in events {
        reconstructor.feed(event);
    }
    reconstructor.finish()
}
