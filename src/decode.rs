//! Key token to text effect mapping
//!
//! `decode` is a pure function: the same token and shift state always
//! produce the same effect.

use crate::event::{KeyToken, NamedKey};

/// What one key press does to the line being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AppendChar(char),
    /// Literal text for labels that are not a known key, or for
    /// characters whose uppercase form spans several code points
    AppendText(String),
    NewLine,
    DeleteLast,
    Ignore,
}

/// Decode a key token given the current shift state
///
/// Shift only changes letters. Symbols are captured already shifted (a
/// literal `"` rather than `'`), so they pass through unchanged.
pub fn decode(token: &KeyToken, shift_active: bool) -> Effect {
    match token {
        // Shift is consumed by the reconstructor before decoding
        KeyToken::Shift => Effect::Ignore,
        KeyToken::Control(_) => Effect::Ignore,
        KeyToken::Named(NamedKey::Space) => Effect::AppendChar(' '),
        KeyToken::Named(NamedKey::Enter) => Effect::NewLine,
        KeyToken::Named(NamedKey::Backspace) => Effect::DeleteLast,
        KeyToken::Named(NamedKey::Other(_)) => Effect::Ignore,
        KeyToken::Char(c) if shift_active && is_letter(*c) => uppercase(*c),
        KeyToken::Char(c) => Effect::AppendChar(*c),
        KeyToken::Unrecognized(label) => Effect::AppendText(label.clone()),
    }
}

/// True for characters in the Unicode letter categories
///
/// `char::is_alphabetic` also accepts letter numbers such as `ⅰ`, circled
/// letters such as `ⓐ`, and combining marks; shift leaves those as typed.
fn is_letter(c: char) -> bool {
    c.is_alphabetic()
        && !c.is_numeric()
        && !matches!(c, '\u{24B6}'..='\u{24E9}' | '\u{0345}')
}

fn uppercase(c: char) -> Effect {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.len()) {
        (Some(u), 0) => Effect::AppendChar(u),
        _ => Effect::AppendText(c.to_uppercase().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> KeyToken {
        KeyToken::Named(NamedKey::Other(name.to_string()))
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            decode(&KeyToken::Named(NamedKey::Space), false),
            Effect::AppendChar(' ')
        );
        assert_eq!(decode(&KeyToken::Named(NamedKey::Enter), false), Effect::NewLine);
        assert_eq!(
            decode(&KeyToken::Named(NamedKey::Backspace), false),
            Effect::DeleteLast
        );
        assert_eq!(decode(&named("left"), false), Effect::Ignore);
        assert_eq!(decode(&named("ctrl_l"), true), Effect::Ignore);
    }

    #[test]
    fn test_shift_uppercases_letters() {
        assert_eq!(decode(&KeyToken::Char('a'), true), Effect::AppendChar('A'));
        assert_eq!(decode(&KeyToken::Char('a'), false), Effect::AppendChar('a'));
        assert_eq!(decode(&KeyToken::Char('é'), true), Effect::AppendChar('É'));
    }

    #[test]
    fn test_shift_leaves_symbols_alone() {
        assert_eq!(decode(&KeyToken::Char('"'), true), Effect::AppendChar('"'));
        assert_eq!(decode(&KeyToken::Char('1'), true), Effect::AppendChar('1'));
        assert_eq!(decode(&KeyToken::Char(' '), true), Effect::AppendChar(' '));
    }

    #[test]
    fn test_shift_skips_non_letter_alphabetics() {
        assert_eq!(decode(&KeyToken::Char('ⅰ'), true), Effect::AppendChar('ⅰ'));
        assert_eq!(decode(&KeyToken::Char('ⓐ'), true), Effect::AppendChar('ⓐ'));
        assert_eq!(decode(&KeyToken::Char('ж'), true), Effect::AppendChar('Ж'));
    }

    #[test]
    fn test_shift_multi_codepoint_uppercase() {
        assert_eq!(
            decode(&KeyToken::Char('ß'), true),
            Effect::AppendText("SS".to_string())
        );
    }

    #[test]
    fn test_control_and_shift_tokens_ignored() {
        assert_eq!(decode(&KeyToken::Control('\u{3}'), false), Effect::Ignore);
        assert_eq!(decode(&KeyToken::Shift, true), Effect::Ignore);
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(
            decode(&KeyToken::Unrecognized("<65027>".to_string()), true),
            Effect::AppendText("<65027>".to_string())
        );
    }
}
