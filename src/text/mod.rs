//! Text handling for reconstructed lines
//!
//! Provides the in-progress edit buffer and the finalization rules that
//! turn a buffer into a committed line:
//! - Raw control characters (code points below 0x20) are stripped
//! - Lines that are blank after stripping are discarded
//! - Kept lines preserve their original spacing

/// True for raw control characters (code points below 0x20)
///
/// Narrower than `char::is_control`, which also covers DEL and C1 codes.
pub fn is_control_char(c: char) -> bool {
    (c as u32) < 0x20
}

/// Remove every raw control character, keeping everything else in order
pub fn strip_control(text: &str) -> String {
    text.chars().filter(|&c| !is_control_char(c)).collect()
}

/// True if the text has no content besides whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Clean a finished buffer into a committed line
///
/// Returns `None` when nothing but control characters and whitespace
/// remains. The returned line is not trimmed.
pub fn finalize(raw: &str) -> Option<String> {
    let cleaned = strip_control(raw);
    if is_blank(&cleaned) {
        None
    } else {
        Some(cleaned)
    }
}

/// The line currently being typed
///
/// Holds one unit per append: a typed character, or a whole literal label
/// such as `<65027>`. Backspace removes the last unit, never part of one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    units: Vec<String>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) {
        self.units.push(c.to_string());
    }

    /// Append text that a single backspace removes as a whole
    pub fn push_unit(&mut self, unit: impl Into<String>) {
        self.units.push(unit.into());
    }

    /// Remove the last unit; no-op on an empty buffer
    pub fn pop(&mut self) -> Option<String> {
        self.units.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Current contents as a string
    pub fn contents(&self) -> String {
        self.units.concat()
    }

    /// Take the contents, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.units).concat()
    }
}
