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

//! Media playback control.
//!
//! This module provides the [`MediaPlayer`] handle used by command execution
//! to present sounds, images and videos. It manages a background worker
//! thread that interfaces with the underlying playback library (MPV),
//! ensuring that heavy media operations never block the input poll loop.
//!
//! Playback is fire-and-forget: a missing or unloadable asset is logged by
//! the worker and otherwise ignored, so a dead button never takes down the
//! appliance.

mod commands;

pub(crate) use commands::MediaCommand;

use std::{path::Path, sync::mpsc};

use tracing::warn;

/// A handle to the media playback engine.
///
/// This struct acts as a command proxy; it does not perform playback itself
/// but instead sends instructions to a background worker thread.
pub(crate) struct MediaPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<MediaCommand>,
}

impl MediaPlayer {
    /// Spawns the playback worker thread and returns a new player handle.
    pub(crate) fn spawn() -> Self {
        let (command_tx, command_rx) = mpsc::channel::<MediaCommand>();

        commands::spawn_media_worker(command_rx);

        Self { command_tx }
    }

    /// Creates a handle over an existing command channel, leaving the
    /// receiving end to the caller. Used by tests to observe playback
    /// requests.
    pub(crate) fn new(command_tx: mpsc::Sender<MediaCommand>) -> Self {
        Self { command_tx }
    }

    /// Plays a sound file alongside whatever is currently displayed.
    pub(crate) fn play_sound(&self, path: &Path) {
        self.send(MediaCommand::PlaySound(path.to_path_buf()));
    }

    /// Shows a video, replacing the current visual content.
    pub(crate) fn show_video(&self, path: &Path) {
        self.send(MediaCommand::ShowVideo(path.to_path_buf()));
    }

    /// Shows a still image, replacing the current visual content.
    pub(crate) fn show_image(&self, path: &Path) {
        self.send(MediaCommand::ShowImage(path.to_path_buf()));
    }

    /// Toggles playback between paused and playing.
    pub(crate) fn toggle_pause(&self) {
        self.send(MediaCommand::TogglePause);
    }

    /// Stops all playback.
    pub(crate) fn stop(&self) {
        self.send(MediaCommand::Stop);
    }

    fn send(&self, command: MediaCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("media worker is no longer running");
        }
    }
}
