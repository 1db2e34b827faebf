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

//! Spoken feedback.
//!
//! Fire-and-forget text-to-speech behind a worker thread, so command
//! execution never waits on the speech engine. The worker shells out to
//! `espeak`; an absent or failing engine is logged and speech is silently
//! skipped.

use std::{process, sync::mpsc, thread};

use tracing::warn;

/// Speech rate in words per minute, kept slow for clarity.
const SPEECH_RATE: &str = "150";

/// A handle to the speech worker.
pub(crate) struct Speaker {
    text_tx: mpsc::Sender<String>,
}

impl Speaker {
    /// Spawns the speech worker thread and returns a new handle.
    pub(crate) fn spawn() -> Self {
        let (text_tx, text_rx) = mpsc::channel::<String>();

        thread::spawn(move || speech_worker(text_rx));

        Self { text_tx }
    }

    /// Creates a handle over an existing channel, leaving the receiving end
    /// to the caller. Used by tests to observe speech requests.
    pub(crate) fn new(text_tx: mpsc::Sender<String>) -> Self {
        Self { text_tx }
    }

    /// Queues a phrase for speaking. Returns immediately.
    pub(crate) fn speak(&self, text: &str) {
        if self.text_tx.send(text.to_string()).is_err() {
            warn!("speech worker is no longer running");
        }
    }
}

fn speech_worker(text_rx: mpsc::Receiver<String>) {
    while let Ok(text) = text_rx.recv() {
        match process::Command::new("espeak")
            .args(["-s", SPEECH_RATE])
            .arg(&text)
            .status()
        {
            Ok(status) if !status.success() => {
                warn!("espeak exited with {status} for '{text}'");
            }
            Err(e) => {
                warn!("speech unavailable: {e}");
            }
            Ok(_) => {}
        }
    }
}
