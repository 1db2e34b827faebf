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

//! Physical input devices and event translation.
//!
//! This module decouples the physical input hardware (keyboard, joystick,
//! arcade controller) from the rest of the application. Each device is
//! wrapped in an [`EventSource`] that is polled once per tick and yields
//! [`RawInputEvent`]s; the [`mapper::InputMapper`] then translates those
//! events into application commands using the active mapping table.
//!
//! # Organization
//!
//! * [`keyboard`]: Terminal keyboard source (also covers arcade controllers
//!   in keyboard-emulation mode, which present as a keyboard).
//! * [`joystick`]: Gamepad/joystick source backed by `gilrs`.
//! * [`composite`]: Aggregates several sources into one ordered stream.
//! * [`mapper`]: Configuration-driven translation from raw events to
//!   commands.
//! * [`keynames`]: The `K_*` textual key vocabulary used by mapping
//!   profiles.

pub(crate) mod composite;
pub(crate) mod joystick;
pub(crate) mod keyboard;
pub(crate) mod keynames;
pub(crate) mod mapper;

use crossterm::event::KeyCode;

/// A hat (d-pad) direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum HatDirection {
    Up,
    Down,
    Left,
    Right,
}

impl HatDirection {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            HatDirection::Up => "up",
            HatDirection::Down => "down",
            HatDirection::Left => "left",
            HatDirection::Right => "right",
        }
    }

    fn from_identifier(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Some(HatDirection::Up),
            "down" => Some(HatDirection::Down),
            "left" => Some(HatDirection::Left),
            "right" => Some(HatDirection::Right),
            _ => None,
        }
    }
}

/// A single physical input transition, produced once per press edge.
///
/// Events are created and consumed within one poll cycle; they are never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawInputEvent {
    /// A keyboard key press.
    KeyPress(KeyCode),

    /// A joystick button transition.
    JoystickButton {
        device: usize,
        button: u8,
        pressed: bool,
    },

    /// A joystick hat moved into a direction.
    JoystickHat {
        device: usize,
        hat: u8,
        direction: HatDirection,
    },
}

impl RawInputEvent {
    /// Derives the lookup identity for this event.
    ///
    /// Button releases carry no identity; only press edges are mappable.
    pub(crate) fn mapping_key(&self) -> Option<MappingKey> {
        match *self {
            RawInputEvent::KeyPress(code) => Some(MappingKey::Key(code)),
            RawInputEvent::JoystickButton {
                device,
                button,
                pressed,
            } => pressed.then_some(MappingKey::Button { device, button }),
            RawInputEvent::JoystickHat {
                device, direction, ..
            } => Some(MappingKey::Hat { device, direction }),
        }
    }
}

/// The identity a raw event is looked up under in a mapping table.
///
/// Keyboard keys are identified by key code alone; joystick inputs by the
/// device they came from plus the button index or hat direction. These are
/// plain values: two keys constructed from the same parts compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum MappingKey {
    Key(KeyCode),
    Button { device: usize, button: u8 },
    Hat { device: usize, direction: HatDirection },
}

impl MappingKey {
    /// Parses the textual identifier used in mapping profile files.
    ///
    /// Keyboard keys use the `K_*` vocabulary. Joystick identifiers render
    /// the (kind, device, input) triple as `JOY<device>_BUTTON<index>` or
    /// `JOY<device>_HAT_<DIRECTION>`.
    pub(crate) fn parse_identifier(id: &str) -> Option<MappingKey> {
        if let Some(rest) = id.strip_prefix("JOY") {
            let (device, input) = rest.split_once('_')?;
            let device: usize = device.parse().ok()?;

            if let Some(button) = input.strip_prefix("BUTTON") {
                let button: u8 = button.parse().ok()?;
                return Some(MappingKey::Button { device, button });
            }

            if let Some(direction) = input.strip_prefix("HAT_") {
                let direction = HatDirection::from_identifier(direction)?;
                return Some(MappingKey::Hat { device, direction });
            }

            return None;
        }

        keynames::parse_key_name(id).map(MappingKey::Key)
    }

    /// The textual identifier for this key, used for logging.
    pub(crate) fn identifier(&self) -> String {
        match self {
            MappingKey::Key(code) => {
                keynames::key_name(*code).unwrap_or_else(|| format!("{:?}", code))
            }
            MappingKey::Button { device, button } => format!("JOY{}_BUTTON{}", device, button),
            MappingKey::Hat { device, direction } => {
                format!("JOY{}_HAT_{}", device, direction.as_str().to_uppercase())
            }
        }
    }
}

/// One pollable input device.
///
/// `poll` is called once per tick and must not block; it returns an empty
/// list when no transitions occurred since the previous call. A source whose
/// underlying device has disconnected keeps returning empty rather than
/// failing, and picks the device back up if it reappears.
pub(crate) trait EventSource {
    fn poll(&mut self) -> Vec<RawInputEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keyboard_identifiers() {
        assert_eq!(
            MappingKey::parse_identifier("K_0"),
            Some(MappingKey::Key(KeyCode::Char('0')))
        );
        assert_eq!(
            MappingKey::parse_identifier("K_UP"),
            Some(MappingKey::Key(KeyCode::Up))
        );
    }

    #[test]
    fn parses_joystick_identifiers() {
        assert_eq!(
            MappingKey::parse_identifier("JOY0_BUTTON3"),
            Some(MappingKey::Button {
                device: 0,
                button: 3
            })
        );
        assert_eq!(
            MappingKey::parse_identifier("JOY1_HAT_UP"),
            Some(MappingKey::Hat {
                device: 1,
                direction: HatDirection::Up
            })
        );
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert_eq!(MappingKey::parse_identifier("JOY_BUTTON3"), None);
        assert_eq!(MappingKey::parse_identifier("JOYX_BUTTON3"), None);
        assert_eq!(MappingKey::parse_identifier("JOY0_HAT_DIAGONAL"), None);
        assert_eq!(MappingKey::parse_identifier("BUTTON3"), None);
    }

    #[test]
    fn identifier_round_trips() {
        for id in ["K_0", "K_UP", "JOY0_BUTTON3", "JOY1_HAT_LEFT"] {
            let key = MappingKey::parse_identifier(id).unwrap();
            assert_eq!(key.identifier(), id);
        }
    }

    #[test]
    fn joystick_keys_compare_by_value() {
        let a = MappingKey::Button {
            device: 0,
            button: 2,
        };
        let b = MappingKey::parse_identifier("JOY0_BUTTON2").unwrap();
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn button_release_has_no_mapping_key() {
        let release = RawInputEvent::JoystickButton {
            device: 0,
            button: 1,
            pressed: false,
        };
        assert_eq!(release.mapping_key(), None);

        let press = RawInputEvent::JoystickButton {
            device: 0,
            button: 1,
            pressed: true,
        };
        assert_eq!(
            press.mapping_key(),
            Some(MappingKey::Button {
                device: 0,
                button: 1
            })
        );
    }
}
