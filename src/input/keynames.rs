// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Key name mappings.
//!
//! Mapping profiles refer to keyboard keys by a textual `K_*` identifier
//! (`"K_0"`, `"K_UP"`, `"K_SPACE"`). This module converts those identifiers
//! to terminal key codes and back.
//!
//! Single characters map onto [`KeyCode::Char`]; letters are normalised to
//! lower case since that is what the terminal delivers for an unshifted
//! press.

use crossterm::event::KeyCode;

/// Parses a `K_*` key identifier into a key code.
///
/// Returns `None` for identifiers outside the known vocabulary.
pub(crate) fn parse_key_name(name: &str) -> Option<KeyCode> {
    let suffix = name.strip_prefix("K_")?;

    // Single-character identifiers: digits, letters, punctuation
    let mut chars = suffix.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    let code = match suffix.to_ascii_uppercase().as_str() {
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "SPACE" => KeyCode::Char(' '),
        "RETURN" | "ENTER" => KeyCode::Enter,
        "ESCAPE" => KeyCode::Esc,
        "TAB" => KeyCode::Tab,
        "BACKSPACE" => KeyCode::Backspace,
        "DELETE" => KeyCode::Delete,
        "INSERT" => KeyCode::Insert,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "PAGEUP" => KeyCode::PageUp,
        "PAGEDOWN" => KeyCode::PageDown,
        "MINUS" => KeyCode::Char('-'),
        "EQUALS" => KeyCode::Char('='),
        "COMMA" => KeyCode::Char(','),
        "PERIOD" => KeyCode::Char('.'),
        "SLASH" => KeyCode::Char('/'),
        "BACKSLASH" => KeyCode::Char('\\'),
        "SEMICOLON" => KeyCode::Char(';'),
        "QUOTE" => KeyCode::Char('\''),
        "BACKQUOTE" => KeyCode::Char('`'),
        "LEFTBRACKET" => KeyCode::Char('['),
        "RIGHTBRACKET" => KeyCode::Char(']'),
        function if function.starts_with('F') => {
            let n: u8 = function[1..].parse().ok()?;
            if (1..=12).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
        _ => return None,
    };

    Some(code)
}

/// Formats a key code back into its `K_*` identifier, used for logging.
pub(crate) fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "K_SPACE".to_string(),
        KeyCode::Char(c) => format!("K_{}", c.to_ascii_uppercase()),
        KeyCode::Up => "K_UP".to_string(),
        KeyCode::Down => "K_DOWN".to_string(),
        KeyCode::Left => "K_LEFT".to_string(),
        KeyCode::Right => "K_RIGHT".to_string(),
        KeyCode::Enter => "K_RETURN".to_string(),
        KeyCode::Esc => "K_ESCAPE".to_string(),
        KeyCode::Tab => "K_TAB".to_string(),
        KeyCode::Backspace => "K_BACKSPACE".to_string(),
        KeyCode::Delete => "K_DELETE".to_string(),
        KeyCode::Insert => "K_INSERT".to_string(),
        KeyCode::Home => "K_HOME".to_string(),
        KeyCode::End => "K_END".to_string(),
        KeyCode::PageUp => "K_PAGEUP".to_string(),
        KeyCode::PageDown => "K_PAGEDOWN".to_string(),
        KeyCode::F(n) => format!("K_F{}", n),
        _ => return None,
    };

    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digits_and_letters() {
        assert_eq!(parse_key_name("K_0"), Some(KeyCode::Char('0')));
        assert_eq!(parse_key_name("K_z"), Some(KeyCode::Char('z')));
        assert_eq!(parse_key_name("K_Z"), Some(KeyCode::Char('z')));
    }

    #[test]
    fn parses_named_keys() {
        assert_eq!(parse_key_name("K_UP"), Some(KeyCode::Up));
        assert_eq!(parse_key_name("K_SPACE"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key_name("K_RETURN"), Some(KeyCode::Enter));
        assert_eq!(parse_key_name("K_F5"), Some(KeyCode::F(5)));
    }

    #[test]
    fn rejects_unknown_identifiers() {
        assert_eq!(parse_key_name("K_WHATEVER"), None);
        assert_eq!(parse_key_name("K_F13"), None);
        assert_eq!(parse_key_name("UP"), None);
    }

    #[test]
    fn round_trips_through_key_name() {
        for id in ["K_0", "K_UP", "K_SPACE", "K_F2"] {
            let code = parse_key_name(id).unwrap();
            assert_eq!(key_name(code).as_deref(), Some(id));
        }
    }
}
