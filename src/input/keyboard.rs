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

//! Terminal keyboard event source.
//!
//! Reads key presses from the terminal event queue without blocking. Arcade
//! controllers wired as keyboard emulators (X-Arcade and the like) arrive
//! through this same source; they differ only in which mapping profile is
//! active, not in code path.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::warn;

use crate::input::{EventSource, RawInputEvent};

/// Keyboard-backed [`EventSource`].
///
/// The terminal is expected to be in raw mode so that key presses are
/// delivered immediately; without it the source still works but only sees
/// input after a newline.
pub(crate) struct KeyboardSource;

impl KeyboardSource {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl EventSource for KeyboardSource {
    fn poll(&mut self) -> Vec<RawInputEvent> {
        let mut events = Vec::new();

        // Drain everything queued since the previous tick. Press edges only;
        // repeats and releases are not mappable inputs.
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        events.push(RawInputEvent::KeyPress(key.code));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("failed to read terminal event: {e}");
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    warn!("failed to poll terminal events: {e}");
                    break;
                }
            }
        }

        events
    }
}
