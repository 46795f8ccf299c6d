//! Recorder log records and key token classification
//!
//! A recorder log is newline-delimited JSON, one record per line:
//!
//! ```text
//! {"type": "key_press", "time": "2025-01-01T10:00:00.000000Z", "key": "h"}
//! {"type": "key_press", "time": "2025-01-01T10:00:00.120000Z", "key": "Key.space"}
//! {"type": "mouse_move", "time": "2025-01-01T10:00:00.300000Z", "pos": [10, 20]}
//! ```
//!
//! Only `key_press` records carry text. The `key` field is either a single
//! character, a named key (`"Key.enter"` as written by pynput, or the bare
//! `"enter"`), or some other label the recorder could not name.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Record type tag (the `type` field)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum EventType {
    KeyPress,
    KeyRelease,
    MouseMove,
    MouseClick,
    MouseScroll,
    Start,
    StopSignal,
    Stopped,
    /// Missing tag
    #[default]
    Untagged,
    /// Any tag this crate does not know about
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::KeyPress => "key_press",
            EventType::KeyRelease => "key_release",
            EventType::MouseMove => "mouse_move",
            EventType::MouseClick => "mouse_click",
            EventType::MouseScroll => "mouse_scroll",
            EventType::Start => "start",
            EventType::StopSignal => "stop_signal",
            EventType::Stopped => "stopped",
            EventType::Untagged => "",
            EventType::Other(tag) => tag,
        }
    }

    pub fn is_key_press(&self) -> bool {
        matches!(self, EventType::KeyPress)
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "key_press" => EventType::KeyPress,
            "key_release" => EventType::KeyRelease,
            "mouse_move" => EventType::MouseMove,
            "mouse_click" => EventType::MouseClick,
            "mouse_scroll" => EventType::MouseScroll,
            "start" => EventType::Start,
            "stop_signal" => EventType::StopSignal,
            "stopped" => EventType::Stopped,
            _ => EventType::Other(tag),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded log record
///
/// Fields other than `type` and `key` (timestamps, mouse positions) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type", default)]
    pub event_type: EventType,

    /// Raw key label; `None` when absent, null, or not a string
    #[serde(default, deserialize_with = "string_or_none")]
    pub key: Option<String>,
}

impl RawEvent {
    /// Build a key press record
    pub fn key_press(key: impl Into<String>) -> Self {
        Self {
            event_type: EventType::KeyPress,
            key: Some(key.into()),
        }
    }

    /// Parse one log line
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Named (non-printable) keys that affect text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedKey {
    Space,
    Enter,
    Backspace,
    /// Modifiers, navigation, function keys and anything else with a name
    Other(String),
}

/// A classified key label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyToken {
    /// Left, right or generic shift
    Shift,
    Named(NamedKey),
    /// A single printable character
    Char(char),
    /// A single raw control character (code point below 0x20)
    Control(char),
    /// A multi-character label that is not a known key name
    Unrecognized(String),
}

/// Prefix pynput puts on special keys (`Key.space`, `Key.shift_r`)
const PYNPUT_PREFIX: &str = "Key.";

/// Bare key names accepted without the pynput prefix
const KNOWN_NAMES: &[&str] = &[
    "shift",
    "shift_l",
    "shift_r",
    "space",
    "enter",
    "return",
    "backspace",
    "tab",
    "esc",
    "escape",
    "alt",
    "alt_l",
    "alt_r",
    "alt_gr",
    "ctrl",
    "ctrl_l",
    "ctrl_r",
    "cmd",
    "cmd_l",
    "cmd_r",
    "caps_lock",
    "delete",
    "home",
    "end",
    "page_up",
    "page_down",
    "up",
    "down",
    "left",
    "right",
    "arrowup",
    "arrowdown",
    "arrowleft",
    "arrowright",
    "insert",
    "menu",
    "num_lock",
    "pause",
    "print_screen",
    "scroll_lock",
    "media_play_pause",
    "media_volume_mute",
    "media_volume_down",
    "media_volume_up",
    "media_previous",
    "media_next",
];

impl KeyToken {
    /// Classify a raw key label
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(PYNPUT_PREFIX) {
            return Self::from_name(name);
        }

        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (None, _) => KeyToken::Named(NamedKey::Other(String::new())),
            (Some(c), None) if crate::text::is_control_char(c) => KeyToken::Control(c),
            (Some(c), None) => KeyToken::Char(c),
            _ if is_known_name(raw) => Self::from_name(raw),
            _ => KeyToken::Unrecognized(raw.to_string()),
        }
    }

    fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.starts_with("shift") {
            return KeyToken::Shift;
        }
        match name.as_str() {
            "space" => KeyToken::Named(NamedKey::Space),
            "enter" | "return" => KeyToken::Named(NamedKey::Enter),
            "backspace" => KeyToken::Named(NamedKey::Backspace),
            _ => KeyToken::Named(NamedKey::Other(name)),
        }
    }

    pub fn is_shift(&self) -> bool {
        matches!(self, KeyToken::Shift)
    }
}

fn is_known_name(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    KNOWN_NAMES.contains(&lower.as_str()) || is_function_key(&lower)
}

/// f1 through f24
fn is_function_key(name: &str) -> bool {
    name.strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=24).contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pynput_names() {
        assert_eq!(KeyToken::parse("Key.space"), KeyToken::Named(NamedKey::Space));
        assert_eq!(KeyToken::parse("Key.enter"), KeyToken::Named(NamedKey::Enter));
        assert_eq!(
            KeyToken::parse("Key.backspace"),
            KeyToken::Named(NamedKey::Backspace)
        );
        assert_eq!(
            KeyToken::parse("Key.left"),
            KeyToken::Named(NamedKey::Other("left".to_string()))
        );
    }

    #[test]
    fn test_parse_shift_variants() {
        assert!(KeyToken::parse("Key.shift").is_shift());
        assert!(KeyToken::parse("Key.shift_r").is_shift());
        assert!(KeyToken::parse("shift").is_shift());
        assert!(KeyToken::parse("shift_l").is_shift());
        assert!(!KeyToken::parse("s").is_shift());
    }

    #[test]
    fn test_parse_bare_names() {
        assert_eq!(KeyToken::parse("space"), KeyToken::Named(NamedKey::Space));
        assert_eq!(KeyToken::parse("enter"), KeyToken::Named(NamedKey::Enter));
        assert_eq!(
            KeyToken::parse("ArrowLeft"),
            KeyToken::Named(NamedKey::Other("arrowleft".to_string()))
        );
        assert_eq!(
            KeyToken::parse("f12"),
            KeyToken::Named(NamedKey::Other("f12".to_string()))
        );
    }

    #[test]
    fn test_parse_characters() {
        assert_eq!(KeyToken::parse("a"), KeyToken::Char('a'));
        assert_eq!(KeyToken::parse("\""), KeyToken::Char('"'));
        assert_eq!(KeyToken::parse("é"), KeyToken::Char('é'));
        assert_eq!(KeyToken::parse("\u{3}"), KeyToken::Control('\u{3}'));
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(
            KeyToken::parse("<65027>"),
            KeyToken::Unrecognized("<65027>".to_string())
        );
        assert_eq!(KeyToken::parse("f99"), KeyToken::Unrecognized("f99".to_string()));
    }

    #[test]
    fn test_raw_event_from_json() {
        let event =
            RawEvent::from_json(r#"{"type": "key_press", "time": "2025-01-01T00:00:00Z", "key": "a"}"#)
                .unwrap();
        assert_eq!(event, RawEvent::key_press("a"));

        let event = RawEvent::from_json(r#"{"type": "mouse_move", "pos": [1, 2]}"#).unwrap();
        assert_eq!(event.event_type, EventType::MouseMove);
        assert_eq!(event.key, None);
    }

    #[test]
    fn test_raw_event_lenient_fields() {
        let event = RawEvent::from_json(r#"{"type": "key_press", "key": null}"#).unwrap();
        assert_eq!(event.key, None);

        let event = RawEvent::from_json(r#"{"type": "key_press", "key": 42}"#).unwrap();
        assert_eq!(event.key, None);

        let event = RawEvent::from_json(r#"{"key": "a"}"#).unwrap();
        assert_eq!(event.event_type, EventType::Untagged);

        let event = RawEvent::from_json(r#"{"type": "gamepad", "key": "a"}"#).unwrap();
        assert_eq!(event.event_type, EventType::Other("gamepad".to_string()));
    }

    #[test]
    fn test_raw_event_rejects_non_objects() {
        assert!(RawEvent::from_json("not json").is_err());
        assert!(RawEvent::from_json("[1, 2, 3]").is_err());
        assert!(RawEvent::from_json(r#"{"type": 7}"#).is_err());
    }
}
