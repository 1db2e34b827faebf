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

//! Joystick and gamepad event source.
//!
//! Backed by `gilrs`, which owns the platform gamepad queue; one source
//! therefore covers every connected pad, tagging each event with the pad it
//! came from. Arcade controllers in native gamepad mode arrive here.
//!
//! D-pad buttons are reported as hat directions to match the mapping
//! vocabulary. Analog stick deflections past a deadzone are edge-converted
//! into hat directions as well, so a stick flick behaves like a d-pad press:
//! one event on crossing the threshold, re-armed once the stick returns to
//! centre.
//!
//! Disconnects are transient: the pad's events simply stop, and gilrs picks
//! the device back up when it reappears.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use gilrs::{Axis, Button, EventType, Gilrs};
use tracing::{debug, info};

use crate::input::{EventSource, HatDirection, RawInputEvent};

/// Deflection beyond which an analog axis counts as a direction press.
const AXIS_DEADZONE: f32 = 0.5;

/// Gamepad-backed [`EventSource`] for all connected pads.
pub(crate) struct GamepadSource {
    gilrs: Gilrs,
    axis_sign: HashMap<(usize, Axis), i8>,
}

impl GamepadSource {
    /// Initialises the gamepad backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform gamepad subsystem is unavailable;
    /// the caller is expected to carry on keyboard-only.
    pub(crate) fn new() -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| anyhow!("failed to initialise gamepads: {e}"))?;

        for (id, gamepad) in gilrs.gamepads() {
            info!("gamepad {} connected: {}", usize::from(id), gamepad.name());
        }

        Ok(Self {
            gilrs,
            axis_sign: HashMap::new(),
        })
    }

    fn convert(&mut self, device: usize, event: EventType) -> Option<RawInputEvent> {
        match event {
            EventType::ButtonPressed(button, _) => {
                if let Some(direction) = dpad_direction(button) {
                    return Some(RawInputEvent::JoystickHat {
                        device,
                        hat: 0,
                        direction,
                    });
                }
                button_index(button).map(|button| RawInputEvent::JoystickButton {
                    device,
                    button,
                    pressed: true,
                })
            }
            EventType::ButtonReleased(button, _) => {
                // Hat releases are not transitions we map
                if dpad_direction(button).is_some() {
                    return None;
                }
                button_index(button).map(|button| RawInputEvent::JoystickButton {
                    device,
                    button,
                    pressed: false,
                })
            }
            EventType::AxisChanged(axis, value, _) => self.axis_edge(device, axis, value),
            EventType::Connected => {
                info!("gamepad {device} connected");
                None
            }
            EventType::Disconnected => {
                info!("gamepad {device} disconnected");
                None
            }
            _ => None,
        }
    }

    // Emits a hat event when an axis crosses the deadzone, once per
    // deflection.
    fn axis_edge(&mut self, device: usize, axis: Axis, value: f32) -> Option<RawInputEvent> {
        let direction = axis_direction(axis, value)?;

        let sign = if value > AXIS_DEADZONE {
            1
        } else if value < -AXIS_DEADZONE {
            -1
        } else {
            0
        };

        let previous = self.axis_sign.insert((device, axis), sign).unwrap_or(0);
        if sign == previous || sign == 0 {
            return None;
        }

        debug!("axis {:?} on gamepad {device} crossed deadzone", axis);
        Some(RawInputEvent::JoystickHat {
            device,
            hat: 0,
            direction,
        })
    }
}

impl EventSource for GamepadSource {
    fn poll(&mut self) -> Vec<RawInputEvent> {
        let mut events = Vec::new();

        while let Some(event) = self.gilrs.next_event() {
            let device = usize::from(event.id);
            if let Some(raw) = self.convert(device, event.event) {
                events.push(raw);
            }
        }

        events
    }
}

fn dpad_direction(button: Button) -> Option<HatDirection> {
    match button {
        Button::DPadUp => Some(HatDirection::Up),
        Button::DPadDown => Some(HatDirection::Down),
        Button::DPadLeft => Some(HatDirection::Left),
        Button::DPadRight => Some(HatDirection::Right),
        _ => None,
    }
}

fn axis_direction(axis: Axis, value: f32) -> Option<HatDirection> {
    match axis {
        Axis::LeftStickX | Axis::RightStickX | Axis::DPadX => {
            if value > 0.0 {
                Some(HatDirection::Right)
            } else {
                Some(HatDirection::Left)
            }
        }
        // gilrs reports up as positive
        Axis::LeftStickY | Axis::RightStickY | Axis::DPadY => {
            if value > 0.0 {
                Some(HatDirection::Up)
            } else {
                Some(HatDirection::Down)
            }
        }
        _ => None,
    }
}

/// Stable button numbering used by mapping profiles, following the common
/// joystick layout (0 = south face button).
fn button_index(button: Button) -> Option<u8> {
    let index = match button {
        Button::South => 0,
        Button::East => 1,
        Button::West => 2,
        Button::North => 3,
        Button::LeftTrigger => 4,
        Button::RightTrigger => 5,
        Button::LeftTrigger2 => 6,
        Button::RightTrigger2 => 7,
        Button::Select => 8,
        Button::Start => 9,
        Button::Mode => 10,
        Button::LeftThumb => 11,
        Button::RightThumb => 12,
        Button::C => 13,
        Button::Z => 14,
        _ => return None,
    };
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_have_stable_indices() {
        assert_eq!(button_index(Button::South), Some(0));
        assert_eq!(button_index(Button::East), Some(1));
        assert_eq!(button_index(Button::Start), Some(9));
        assert_eq!(button_index(Button::Unknown), None);
    }

    #[test]
    fn dpad_maps_to_hat_not_buttons() {
        assert_eq!(dpad_direction(Button::DPadUp), Some(HatDirection::Up));
        assert_eq!(dpad_direction(Button::South), None);
    }

    #[test]
    fn axis_direction_follows_sign() {
        assert_eq!(
            axis_direction(Axis::LeftStickX, 0.9),
            Some(HatDirection::Right)
        );
        assert_eq!(
            axis_direction(Axis::LeftStickX, -0.9),
            Some(HatDirection::Left)
        );
        assert_eq!(
            axis_direction(Axis::LeftStickY, 0.9),
            Some(HatDirection::Up)
        );
        assert_eq!(axis_direction(Axis::LeftZ, 0.9), None);
    }
}
