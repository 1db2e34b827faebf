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

//! MPV-backed playback engine.
//!
//! The worker owns two MPV contexts: a video-capable one for visual content
//! (videos and still images, fullscreen) and an audio-only one so that
//! effect sounds can play over a running video. Commands arrive over an
//! mpsc channel from the [`MediaPlayer`](crate::player::MediaPlayer)
//! handle.
//!
//! Per-command failures (typically a missing asset) are logged and
//! swallowed; only a failure to bring up MPV itself ends the worker.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{Receiver, TryRecvError},
    thread,
};

use anyhow::{Context, Result};
use tracing::{error, warn};

#[derive(Debug)]
pub(crate) enum MediaCommand {
    PlaySound(PathBuf),
    ShowVideo(PathBuf),
    ShowImage(PathBuf),
    TogglePause,
    Stop,
}

/// Spawns the media worker thread to process playback commands.
///
/// If the worker fails to initialise its MPV contexts the error is logged
/// and the thread ends; subsequent playback requests are dropped by the
/// handle.
pub(crate) fn spawn_media_worker(command_rx: Receiver<MediaCommand>) {
    thread::spawn(move || {
        if let Err(e) = media_worker(command_rx) {
            error!("media worker failure: {:?}", e);
        }
    });
}

fn media_worker(command_rx: Receiver<MediaCommand>) -> Result<()> {
    let mut visual = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("fullscreen", "yes")
            .context("Failed to set fullscreen")?;
        builder
            .set_option("image-display-duration", "inf")
            .context("Failed to set image display duration")?;
        builder
            .set_option("loop-file", "inf")
            .context("Failed to set file looping")?;
        builder.build().context("Failed to build visual MPV handler")
    })()?;

    let mut audio = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build audio MPV handler")
    })()?;

    loop {
        // A closed channel means the application is shutting down
        if !process_commands(&mut visual, &mut audio, &command_rx) {
            return Ok(());
        }

        // Drain both event queues; the visual wait doubles as loop pacing.
        while audio.wait_event(0.0).is_some() {}
        visual.wait_event(0.05);
    }
}

/// Drains and executes all pending commands from the application channel.
///
/// Returns `false` once the sending side has gone away.
fn process_commands(
    visual: &mut mpv::MpvHandler,
    audio: &mut mpv::MpvHandler,
    command_rx: &Receiver<MediaCommand>,
) -> bool {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        };

        match command {
            MediaCommand::PlaySound(path) => {
                load(audio, &path);
            }
            MediaCommand::ShowVideo(path) | MediaCommand::ShowImage(path) => {
                load(visual, &path);
            }
            MediaCommand::TogglePause => {
                if let Err(e) = visual.command(&["cycle", "pause"]) {
                    warn!("failed to toggle pause: {e}");
                }
            }
            MediaCommand::Stop => {
                for handler in [&mut *visual, &mut *audio] {
                    if let Err(e) = handler.command(&["stop"]) {
                        warn!("failed to stop playback: {e}");
                    }
                }
            }
        }
    }
}

fn load(handler: &mut mpv::MpvHandler, path: &Path) {
    let Some(path_str) = path.to_str() else {
        warn!("media path is not valid UTF-8: {}", path.display());
        return;
    };

    if let Err(e) = handler.command(&["loadfile", path_str, "replace"]) {
        warn!("failed to load {}: {e}", path.display());
        return;
    }
    if let Err(e) = handler.set_property("pause", false) {
        warn!("failed to resume after load: {e}");
    }
}
