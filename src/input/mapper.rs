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

//! Translation of raw input events into commands.
//!
//! The [`InputMapper`] holds the active [`MappingTable`] and turns each
//! polled [`RawInputEvent`] into at most one [`Command`]. An event with no
//! table entry produces nothing; unbound keys are the normal case, not an
//! error.
//!
//! Both the table and the channel-key list are read as snapshots from
//! [`SwapCell`]s, so a reload from the web administration side can swap them
//! out while a translation is in flight without ever exposing a
//! half-updated table.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    actions::commands::Command,
    input::{MappingKey, RawInputEvent},
    reload::SwapCell,
};

/// The active configuration mapping raw input identities to command names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct MappingTable {
    entries: HashMap<MappingKey, String>,
}

impl MappingTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Binds a key to a command name. Rebinding an existing key replaces the
    /// previous entry.
    pub(crate) fn insert(&mut self, key: MappingKey, command_name: String) {
        self.entries.insert(key, command_name);
    }

    pub(crate) fn get(&self, key: &MappingKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translates raw device events into application commands.
pub(crate) struct InputMapper {
    table: SwapCell<MappingTable>,
    channel_keys: SwapCell<Vec<String>>,
}

impl InputMapper {
    pub(crate) fn new(table: SwapCell<MappingTable>, channel_keys: SwapCell<Vec<String>>) -> Self {
        Self {
            table,
            channel_keys,
        }
    }

    /// Looks up the event's mapping key in the active table and builds the
    /// corresponding command.
    ///
    /// Returns `None` for events without a mapping key (button releases) and
    /// for unbound inputs.
    pub(crate) fn translate(&self, event: &RawInputEvent) -> Option<Command> {
        let key = event.mapping_key()?;

        let table = self.table.load();
        let Some(command_name) = table.get(&key) else {
            debug!("unbound input {}", key.identifier());
            return None;
        };

        let channel_keys = self.channel_keys.load();
        Some(Command::from_name(command_name, &channel_keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyCode;

    use crate::actions::commands::ChannelDirection;

    fn mapper_with(pairs: &[(&str, &str)], channels: &[&str]) -> InputMapper {
        let mut table = MappingTable::new();
        for (id, name) in pairs {
            table.insert(MappingKey::parse_identifier(id).unwrap(), name.to_string());
        }
        InputMapper::new(
            SwapCell::new(table),
            SwapCell::new(channels.iter().map(|c| c.to_string()).collect()),
        )
    }

    #[test]
    fn unbound_events_translate_to_nothing() {
        let mapper = mapper_with(&[("K_0", "ball")], &[]);

        let unbound = RawInputEvent::KeyPress(KeyCode::Char('x'));
        assert_eq!(mapper.translate(&unbound), None);
    }

    #[test]
    fn bound_key_press_translates_to_content() {
        let mapper = mapper_with(&[("K_0", "ball")], &[]);

        let event = RawInputEvent::KeyPress(KeyCode::Char('0'));
        assert_eq!(
            mapper.translate(&event),
            Some(Command::Content {
                action: "ball".to_string()
            })
        );
    }

    #[test]
    fn video_name_with_matching_channel_translates_to_channel_step() {
        let mapper = mapper_with(&[("K_UP", "video_squirrels")], &["squirrels"]);

        let event = RawInputEvent::KeyPress(KeyCode::Up);
        assert_eq!(
            mapper.translate(&event),
            Some(Command::VideoChannel {
                direction: ChannelDirection::Next
            })
        );
    }

    #[test]
    fn joystick_button_press_translates_release_does_not() {
        let mapper = mapper_with(&[("JOY0_BUTTON3", "treat")], &[]);

        let press = RawInputEvent::JoystickButton {
            device: 0,
            button: 3,
            pressed: true,
        };
        let release = RawInputEvent::JoystickButton {
            device: 0,
            button: 3,
            pressed: false,
        };

        assert_eq!(
            mapper.translate(&press),
            Some(Command::Content {
                action: "treat".to_string()
            })
        );
        assert_eq!(mapper.translate(&release), None);
    }

    #[test]
    fn hat_direction_translates_through_structured_key() {
        let mapper = mapper_with(&[("JOY0_HAT_UP", "channel_next")], &[]);

        let event = RawInputEvent::JoystickHat {
            device: 0,
            hat: 0,
            direction: crate::input::HatDirection::Up,
        };
        assert_eq!(
            mapper.translate(&event),
            Some(Command::VideoChannel {
                direction: ChannelDirection::Next
            })
        );
    }

    #[test]
    fn table_swap_changes_behaviour_for_later_events() {
        let table = SwapCell::new(MappingTable::new());
        let mapper = InputMapper::new(table.clone(), SwapCell::new(vec![]));
        let event = RawInputEvent::KeyPress(KeyCode::Char('0'));

        assert_eq!(mapper.translate(&event), None);

        let mut bound = MappingTable::new();
        bound.insert(
            MappingKey::parse_identifier("K_0").unwrap(),
            "ball".to_string(),
        );
        table.replace(bound);

        assert_eq!(
            mapper.translate(&event),
            Some(Command::Content {
                action: "ball".to_string()
            })
        );
    }
}
