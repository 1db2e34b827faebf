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

//! Application state and command execution.
//!
//! [`AppState`] is the single mutable store of what the appliance is doing:
//! the current video channel, the current content, the pause flag. It is
//! owned by the main loop and changes only through [`AppState::execute`];
//! the action registry it resolves commands against is a snapshot that the
//! reload gateway may replace between commands.

pub(crate) mod registry;

use tracing::{debug, info, warn};

use crate::{
    actions::commands::{ChannelDirection, Command},
    model::registry::ActionRegistry,
    player::MediaPlayer,
    reload::SwapCell,
    speech::Speaker,
};

/// The mutable application state, single-writer from the main loop.
pub(crate) struct AppState {
    registry: SwapCell<ActionRegistry>,
    current_channel_index: usize,
    current_content_name: Option<String>,
    paused: bool,
    shutdown_requested: bool,

    media: MediaPlayer,
    speech: Speaker,
}

impl AppState {
    pub(crate) fn new(
        registry: SwapCell<ActionRegistry>,
        media: MediaPlayer,
        speech: Speaker,
    ) -> Self {
        Self {
            registry,
            current_channel_index: 0,
            current_content_name: None,
            paused: false,
            shutdown_requested: false,
            media,
            speech,
        }
    }

    /// Executes a command against the current state.
    ///
    /// Execution never fails: a command whose target cannot be resolved is
    /// logged and leaves the state untouched. Repeating a content command
    /// restarts the same content from the beginning; repeated triggering is
    /// the expected interaction pattern for a physical button.
    pub(crate) fn execute(&mut self, command: Command) {
        match command {
            Command::Content { action } => self.execute_content(action),
            Command::VideoChannel { direction } => self.execute_channel(direction),
            Command::TogglePause => {
                self.paused = !self.paused;
                self.media.toggle_pause();
                info!(paused = self.paused, "toggled pause");
            }
            Command::Exit => {
                // Only raises the intent; the main loop owns the actual
                // termination sequence.
                info!("shutdown requested");
                self.shutdown_requested = true;
            }
        }
    }

    fn execute_content(&mut self, action: String) {
        let registry = self.registry.load();
        let Some(entry) = registry.get(&action) else {
            warn!("no registered action for command '{action}'");
            return;
        };

        self.current_content_name = Some(action.clone());
        self.paused = false;

        if let Some(sound) = &entry.sound {
            self.media.play_sound(sound);
        }
        match (&entry.video, &entry.image) {
            (Some(video), _) => self.media.show_video(video),
            (None, Some(image)) => self.media.show_image(image),
            (None, None) => {}
        }
        self.speech.speak(&spoken_form(&action));

        info!("presenting '{action}'");
    }

    fn execute_channel(&mut self, direction: ChannelDirection) {
        let registry = self.registry.load();
        let count = registry.channels().len();
        if count == 0 {
            debug!("channel change ignored, no video channels configured");
            return;
        }

        self.current_channel_index = match direction {
            ChannelDirection::Next => (self.current_channel_index + 1) % count,
            ChannelDirection::Previous => (self.current_channel_index + count - 1) % count,
        };

        let channel = &registry.channels()[self.current_channel_index];
        self.current_content_name = Some(channel.video.clone());
        self.paused = false;

        if let Some(video) = registry
            .channel_action(self.current_channel_index)
            .and_then(|action| action.video.as_deref())
        {
            self.media.show_video(video);
        }
        self.speech.speak(&channel.name);

        info!(
            "switched to channel '{}' ({} of {count})",
            channel.name,
            self.current_channel_index + 1
        );
    }

    pub(crate) fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Stops playback; called by the main loop during its termination
    /// sequence.
    pub(crate) fn stop_playback(&self) {
        self.media.stop();
    }

    pub(crate) fn current_channel_index(&self) -> usize {
        self.current_channel_index
    }

    pub(crate) fn current_content_name(&self) -> Option<&str> {
        self.current_content_name.as_deref()
    }

    pub(crate) fn paused(&self) -> bool {
        self.paused
    }
}

/// Human-readable form of an action name for speech output.
fn spoken_form(action: &str) -> String {
    action.replace('_', " ")
}
