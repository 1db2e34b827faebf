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

//! Application configuration.
//!
//! Two layers of configuration exist: the application settings file managed
//! by `confy` (directories, active mapping profile, joystick enablement),
//! and the externally edited JSON files the web administration service also
//! writes — mapping profiles under `<configs>/keymappings/` and the video
//! channel list at `<configs>/channels.json`.
//!
//! A mapping profile is a flat JSON object from input identifier to command
//! name, e.g.
//!
//! ```json
//! { "K_0": "ball", "K_UP": "video_squirrels", "JOY0_BUTTON3": "treat" }
//! ```
//!
//! Parsing is all-or-nothing: any unknown identifier or malformed entry
//! rejects the whole file, so a half-usable profile is never loaded.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    input::{MappingKey, mapper::MappingTable},
    model::registry::VideoChannel,
};

const CONFIG_NAME: &str = "pawtv";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) media_dir: String,
    pub(crate) configs_dir: String,
    /// Name of the active mapping profile (file stem under
    /// `<configs>/keymappings/`). Arcade keyboard-mode setups just select a
    /// different profile here.
    pub(crate) keymap_profile: String,
    pub(crate) use_joystick: bool,
    pub(crate) tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dir: "media".to_string(),
            configs_dir: "configs".to_string(),
            keymap_profile: "development".to_string(),
            use_joystick: true,
            tick_rate_ms: 16,
        }
    }
}

impl AppConfig {
    pub(crate) fn media_root(&self) -> PathBuf {
        PathBuf::from(&self.media_dir)
    }

    pub(crate) fn keymap_file(&self) -> PathBuf {
        PathBuf::from(&self.configs_dir)
            .join("keymappings")
            .join(format!("{}.json", self.keymap_profile))
    }

    pub(crate) fn channels_file(&self) -> PathBuf {
        PathBuf::from(&self.configs_dir).join("channels.json")
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

/// A configuration file that could not be loaded.
///
/// Surfaced to reload callers so a bad edit keeps the previous
/// configuration active instead of being applied in part.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown input identifier '{identifier}' in {path}")]
    UnknownIdentifier { path: PathBuf, identifier: String },

    #[error("command for '{identifier}' in {path} is not a string")]
    InvalidCommand { path: PathBuf, identifier: String },
}

/// Loads a mapping profile file into a [`MappingTable`].
///
/// # Errors
///
/// Fails on unreadable files, malformed JSON, identifiers outside the key
/// vocabulary, and non-string command names. No partial table is ever
/// returned.
pub(crate) fn load_mapping_table(path: &Path) -> Result<MappingTable, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut table = MappingTable::new();
    for (identifier, value) in raw {
        let key = MappingKey::parse_identifier(&identifier).ok_or_else(|| {
            ConfigError::UnknownIdentifier {
                path: path.to_path_buf(),
                identifier: identifier.clone(),
            }
        })?;
        let command_name = value.as_str().ok_or_else(|| ConfigError::InvalidCommand {
            path: path.to_path_buf(),
            identifier: identifier.clone(),
        })?;
        table.insert(key, command_name.to_string());
    }

    Ok(table)
}

/// Loads the ordered video channel list.
pub(crate) fn load_video_channels(path: &Path) -> Result<Vec<VideoChannel>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    use crossterm::event::KeyCode;

    fn profile(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn loads_keyboard_and_joystick_bindings() {
        let file = profile(
            r#"{
                "K_0": "ball",
                "K_UP": "video_squirrels",
                "JOY0_BUTTON3": "treat",
                "JOY0_HAT_LEFT": "channel_prev"
            }"#,
        );

        let table = load_mapping_table(file.path()).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.get(&MappingKey::Key(KeyCode::Char('0'))),
            Some("ball")
        );
        assert_eq!(
            table.get(&MappingKey::Button {
                device: 0,
                button: 3
            }),
            Some("treat")
        );
    }

    #[test]
    fn rejects_malformed_json_in_full() {
        let file = profile("{ this is not json");
        assert!(matches!(
            load_mapping_table(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_unknown_identifiers() {
        let file = profile(r#"{ "K_0": "ball", "WHEEL_3": "spin" }"#);
        assert!(matches!(
            load_mapping_table(file.path()),
            Err(ConfigError::UnknownIdentifier { identifier, .. }) if identifier == "WHEEL_3"
        ));
    }

    #[test]
    fn rejects_non_string_commands() {
        let file = profile(r#"{ "K_0": 7 }"#);
        assert!(matches!(
            load_mapping_table(file.path()),
            Err(ConfigError::InvalidCommand { .. })
        ));
    }

    #[test]
    fn missing_profile_is_an_io_error() {
        let result = load_mapping_table(Path::new("/nonexistent/profile.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn loads_ordered_channel_list() {
        let file = profile(
            r#"[
                { "name": "Squirrels", "video": "squirrels.mp4" },
                { "name": "Birds", "video": "birds.mp4" }
            ]"#,
        );

        let channels = load_video_channels(file.path()).unwrap();

        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "Squirrels");
        assert_eq!(channels[0].key(), "squirrels");
        assert_eq!(channels[1].video, "birds.mp4");
    }

    #[test]
    fn config_paths_follow_profile_selection() {
        let config = AppConfig {
            keymap_profile: "xarcade".to_string(),
            ..AppConfig::default()
        };

        assert_eq!(
            config.keymap_file(),
            PathBuf::from("configs/keymappings/xarcade.json")
        );
        assert_eq!(config.channels_file(), PathBuf::from("configs/channels.json"));
    }
}
