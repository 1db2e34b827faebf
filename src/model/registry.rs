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

//! Action registry and media discovery.
//!
//! An [`Action`] is a named bundle of media assets. The registry is built by
//! scanning the media root: action `X` exists if any of `sounds/X.wav`,
//! `images/X.jpg` or `videos/X.mp4` is present. Video channels are declared
//! separately in the channel-list configuration and overlaid onto the
//! registry with their position in the ordered channel list.
//!
//! The registry is rebuilt from scratch whenever the media directories or
//! the channel configuration change and swapped in wholesale; it is never
//! patched in place.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use walkdir::WalkDir;

/// One entry in the ordered video channel list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct VideoChannel {
    pub(crate) name: String,
    pub(crate) video: String,
}

impl VideoChannel {
    /// The key this channel is addressed by in command names
    /// (`video_<key>`): the file stem of its video.
    pub(crate) fn key(&self) -> String {
        Path::new(&self.video)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.video.clone())
    }
}

/// A named behaviour with its resolved media paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Action {
    pub(crate) name: String,
    pub(crate) sound: Option<PathBuf>,
    pub(crate) image: Option<PathBuf>,
    pub(crate) video: Option<PathBuf>,
    /// Index into the channel list for video-channel actions.
    pub(crate) channel: Option<usize>,
}

impl Action {
    fn named(name: String) -> Self {
        Self {
            name,
            sound: None,
            image: None,
            video: None,
            channel: None,
        }
    }

    pub(crate) fn is_video_channel(&self) -> bool {
        self.channel.is_some()
    }
}

/// All currently available command targets, keyed by command name.
#[derive(Debug, Clone, Default)]
pub(crate) struct ActionRegistry {
    actions: HashMap<String, Action>,
    channels: Vec<VideoChannel>,
}

impl ActionRegistry {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Builds the registry from the media root and the channel list.
    ///
    /// Unreadable directories are treated as empty; discovery is
    /// best-effort, and a referenced file that later goes missing is the
    /// playback layer's problem, not the registry's.
    pub(crate) fn build(media_root: &Path, channels: Vec<VideoChannel>) -> Self {
        let mut actions: HashMap<String, Action> = HashMap::new();

        let mut collect = |dir: &str, extension: &str, assign: fn(&mut Action, PathBuf)| {
            for entry in WalkDir::new(media_root.join(dir))
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
            {
                let path = entry.path();
                let Some(stem) = path.file_stem() else {
                    continue;
                };
                let name = stem.to_string_lossy().into_owned();
                let action = actions
                    .entry(name.clone())
                    .or_insert_with(|| Action::named(name));
                assign(action, path.to_path_buf());
            }
        };

        collect("sounds", "wav", |action, path| action.sound = Some(path));
        collect("images", "jpg", |action, path| action.image = Some(path));
        collect("videos", "mp4", |action, path| action.video = Some(path));

        for (index, channel) in channels.iter().enumerate() {
            let key = channel.key();
            let action = actions
                .entry(key.clone())
                .or_insert_with(|| Action::named(key));
            action.video = Some(media_root.join("videos").join(&channel.video));
            action.channel = Some(index);
        }

        Self { actions, channels }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.actions.len()
    }

    pub(crate) fn channels(&self) -> &[VideoChannel] {
        &self.channels
    }

    /// The channel keys, in channel order.
    pub(crate) fn channel_keys(&self) -> Vec<String> {
        self.channels.iter().map(VideoChannel::key).collect()
    }

    /// The action overlaid for the channel at `index`.
    pub(crate) fn channel_action(&self, index: usize) -> Option<&Action> {
        self.channels
            .get(index)
            .and_then(|channel| self.actions.get(&channel.key()))
    }
}
