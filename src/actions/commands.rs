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

//! Application commands.
//!
//! A [`Command`] is an abstract unit of intent, decoupled from whichever
//! physical input produced it. Commands are plain values; they cause no side
//! effects until handed to [`crate::model::AppState::execute`].
//!
//! The translation from a configured command name (the strings found in
//! mapping profiles, e.g. `"ball"` or `"video_squirrels"`) to a command
//! variant lives in [`Command::from_name`] and nowhere else, so the web
//! administration layer and this core cannot drift apart on the naming
//! convention.

/// Relative navigation through the video channel list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChannelDirection {
    Next,
    Previous,
}

/// An executable unit of intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Present the named action's media (sound, image or video).
    Content { action: String },

    /// Step through the video channel list.
    VideoChannel { direction: ChannelDirection },

    /// Pause or resume whatever is currently playing.
    TogglePause,

    /// Request cooperative shutdown of the application.
    Exit,
}

impl Command {
    /// Builds a command from a configured command name.
    ///
    /// The naming convention:
    ///
    /// * `"exit"` exits the application;
    /// * `"pause"` / `"toggle_pause"` toggles playback;
    /// * `"channel_next"` / `"channel_prev"` step through the channel list;
    /// * `"video_<channel>"`, where `<channel>` is a registered channel key,
    ///   also steps the channel rotation;
    /// * every other name selects content by that name.
    ///
    /// `channel_keys` holds the keys of the currently configured video
    /// channels; a `video_` name whose suffix is not among them falls
    /// through to content selection.
    pub(crate) fn from_name(name: &str, channel_keys: &[String]) -> Command {
        match name {
            "exit" => Command::Exit,
            "pause" | "toggle_pause" => Command::TogglePause,
            "channel_next" => Command::VideoChannel {
                direction: ChannelDirection::Next,
            },
            "channel_prev" => Command::VideoChannel {
                direction: ChannelDirection::Previous,
            },
            _ => {
                if let Some(suffix) = name.strip_prefix("video_") {
                    if channel_keys.iter().any(|key| key == suffix) {
                        return Command::VideoChannel {
                            direction: ChannelDirection::Next,
                        };
                    }
                }

                Command::Content {
                    action: name.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels() -> Vec<String> {
        vec!["squirrels".to_string(), "birds".to_string()]
    }

    #[test]
    fn literal_names_build_fixed_variants() {
        assert_eq!(Command::from_name("exit", &channels()), Command::Exit);
        assert_eq!(
            Command::from_name("pause", &channels()),
            Command::TogglePause
        );
        assert_eq!(
            Command::from_name("toggle_pause", &channels()),
            Command::TogglePause
        );
    }

    #[test]
    fn channel_navigation_names() {
        assert_eq!(
            Command::from_name("channel_next", &channels()),
            Command::VideoChannel {
                direction: ChannelDirection::Next
            }
        );
        assert_eq!(
            Command::from_name("channel_prev", &channels()),
            Command::VideoChannel {
                direction: ChannelDirection::Previous
            }
        );
    }

    #[test]
    fn video_prefix_matching_a_channel_is_channel_navigation() {
        assert_eq!(
            Command::from_name("video_squirrels", &channels()),
            Command::VideoChannel {
                direction: ChannelDirection::Next
            }
        );
    }

    #[test]
    fn video_prefix_without_matching_channel_is_content() {
        assert_eq!(
            Command::from_name("video_lectures", &channels()),
            Command::Content {
                action: "video_lectures".to_string()
            }
        );
    }

    #[test]
    fn other_names_are_content() {
        assert_eq!(
            Command::from_name("ball", &channels()),
            Command::Content {
                action: "ball".to_string()
            }
        );
    }
}
