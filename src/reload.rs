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

//! Hot reload of mapping tables and the action registry.
//!
//! The web administration service runs outside this process's main loop and
//! edits configuration on disk: mapping profiles when buttons are re-bound,
//! media directories and the channel list when new content is uploaded. The
//! [`ReloadGateway`] is the only way those changes reach the running
//! application: each structure is rebuilt in full off the main loop and then
//! published with a single reference swap, so a translation or execution in
//! flight sees either the old structure or the new one, never a mixture.
//!
//! A rejected reload (malformed file) leaves the previous structures active.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
    thread,
    time::{Duration, SystemTime},
};

use tracing::{debug, info, warn};

use crate::{
    config::{self, ConfigError},
    input::mapper::MappingTable,
    model::registry::ActionRegistry,
};

/// A shared slot holding an immutable snapshot.
///
/// Readers take a cheap [`Arc`] clone of the current snapshot and keep using
/// it for as long as they like; a writer replaces the whole reference in one
/// assignment. Snapshots themselves are never edited in place.
pub(crate) struct SwapCell<T> {
    inner: Arc<RwLock<Arc<T>>>,
}

impl<T> SwapCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(value))),
        }
    }

    /// Returns the current snapshot.
    pub(crate) fn load(&self) -> Arc<T> {
        Arc::clone(&self.inner.read().unwrap())
    }

    /// Publishes a new snapshot, replacing the previous one wholesale.
    pub(crate) fn replace(&self, value: T) {
        *self.inner.write().unwrap() = Arc::new(value);
    }
}

impl<T> Clone for SwapCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Accepts replacement configuration structures from outside the main loop.
///
/// This is the seam the web administration service drives. Reloads only
/// affect events arriving after the swap completes; nothing is re-executed
/// retroactively.
#[derive(Clone)]
pub(crate) struct ReloadGateway {
    mapping_table: SwapCell<MappingTable>,
    channel_keys: SwapCell<Vec<String>>,
    registry: SwapCell<ActionRegistry>,
}

impl ReloadGateway {
    pub(crate) fn new(
        mapping_table: SwapCell<MappingTable>,
        channel_keys: SwapCell<Vec<String>>,
        registry: SwapCell<ActionRegistry>,
    ) -> Self {
        Self {
            mapping_table,
            channel_keys,
            registry,
        }
    }

    /// Replaces the active mapping table.
    pub(crate) fn reload_mapping_table(&self, table: MappingTable) {
        info!(entries = table.len(), "mapping table reloaded");
        self.mapping_table.replace(table);
    }

    /// Replaces the action registry and the channel list together.
    ///
    /// The channel keys the input mapper matches `video_*` names against are
    /// refreshed from the same registry, so both sides of the dispatch agree
    /// on the channel vocabulary within one tick.
    pub(crate) fn reload_action_registry(&self, registry: ActionRegistry) {
        info!(
            actions = registry.len(),
            channels = registry.channels().len(),
            "action registry reloaded"
        );
        self.channel_keys.replace(registry.channel_keys());
        self.registry.replace(registry);
    }

    /// Parses the given profile file and swaps it in.
    ///
    /// On a parse failure nothing is swapped and the error is returned; the
    /// previously loaded table stays active.
    pub(crate) fn reload_mapping_table_from(&self, path: &Path) -> Result<(), ConfigError> {
        let table = config::load_mapping_table(path)?;
        self.reload_mapping_table(table);
        Ok(())
    }

    /// Rebuilds the action registry from the media root and channel list
    /// file and swaps it in.
    pub(crate) fn reload_action_registry_from(
        &self,
        media_root: &Path,
        channels_file: &Path,
    ) -> Result<(), ConfigError> {
        let channels = config::load_video_channels(channels_file)?;
        let registry = ActionRegistry::build(media_root, channels);
        self.reload_action_registry(registry);
        Ok(())
    }
}

/// The files and directories the watcher keeps an eye on.
pub(crate) struct WatchPaths {
    pub(crate) keymap_file: PathBuf,
    pub(crate) channels_file: PathBuf,
    pub(crate) media_root: PathBuf,
}

impl WatchPaths {
    // Modification-time fingerprint across everything watched. A missing
    // file simply contributes None until it appears.
    fn fingerprint(&self) -> Vec<Option<SystemTime>> {
        let mut stamps = vec![modified(&self.keymap_file), modified(&self.channels_file)];
        for sub in ["sounds", "images", "videos"] {
            stamps.push(modified(&self.media_root.join(sub)));
        }
        stamps
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Spawns the background thread that picks up external configuration edits.
///
/// The thread polls modification times at `interval` and pushes rebuilt
/// structures through the gateway when something changed. Failures are
/// logged and the previous structures remain active; the thread never gives
/// up.
pub(crate) fn spawn_config_watcher(gateway: ReloadGateway, paths: WatchPaths, interval: Duration) {
    thread::spawn(move || {
        let mut last = paths.fingerprint();

        loop {
            thread::sleep(interval);

            let current = paths.fingerprint();
            if current == last {
                continue;
            }

            debug!("configuration change detected");

            if current[0] != last[0] {
                if let Err(e) = gateway.reload_mapping_table_from(&paths.keymap_file) {
                    warn!(
                        "rejected mapping table from {}: {e}",
                        paths.keymap_file.display()
                    );
                }
            }

            if current[1..] != last[1..] {
                if let Err(e) =
                    gateway.reload_action_registry_from(&paths.media_root, &paths.channels_file)
                {
                    warn!(
                        "rejected action registry rebuild from {}: {e}",
                        paths.channels_file.display()
                    );
                }
            }

            last = current;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    use crate::input::MappingKey;

    fn table_of(pairs: &[(&str, &str)]) -> MappingTable {
        let mut table = MappingTable::new();
        for (id, name) in pairs {
            table.insert(MappingKey::parse_identifier(id).unwrap(), name.to_string());
        }
        table
    }

    #[test]
    fn swap_cell_replaces_whole_snapshots() {
        let cell = SwapCell::new(1);
        let before = cell.load();
        cell.replace(2);

        assert_eq!(*before, 1);
        assert_eq!(*cell.load(), 2);
    }

    #[test]
    fn concurrent_reloads_never_interleave() {
        let cell = SwapCell::new(table_of(&[]));
        let gateway = ReloadGateway::new(
            cell.clone(),
            SwapCell::new(vec![]),
            SwapCell::new(ActionRegistry::empty()),
        );

        let a = table_of(&[("K_0", "ball"), ("K_1", "rope")]);
        let b = table_of(&[("K_0", "treat"), ("K_2", "walk")]);

        let g1 = gateway.clone();
        let g2 = gateway.clone();
        let t1 = thread::spawn(move || g1.reload_mapping_table(a));
        let t2 = thread::spawn(move || g2.reload_mapping_table(b));
        t1.join().unwrap();
        t2.join().unwrap();

        let table = cell.load();
        let k0 = MappingKey::parse_identifier("K_0").unwrap();
        let k1 = MappingKey::parse_identifier("K_1").unwrap();
        let k2 = MappingKey::parse_identifier("K_2").unwrap();

        // The winner must be one table in full, never a merge of both.
        match table.get(&k0) {
            Some("ball") => {
                assert_eq!(table.get(&k1), Some("rope"));
                assert_eq!(table.get(&k2), None);
            }
            Some("treat") => {
                assert_eq!(table.get(&k1), None);
                assert_eq!(table.get(&k2), Some("walk"));
            }
            other => panic!("unexpected K_0 binding: {:?}", other),
        }
    }

    #[test]
    fn malformed_profile_keeps_previous_table() {
        let cell = SwapCell::new(table_of(&[("K_0", "ball")]));
        let gateway = ReloadGateway::new(
            cell.clone(),
            SwapCell::new(vec![]),
            SwapCell::new(ActionRegistry::empty()),
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = gateway.reload_mapping_table_from(file.path());
        assert!(result.is_err());

        let table = cell.load();
        let k0 = MappingKey::parse_identifier("K_0").unwrap();
        assert_eq!(table.get(&k0), Some("ball"));
    }

    #[test]
    fn registry_reload_refreshes_channel_keys() {
        let keys = SwapCell::new(vec![]);
        let gateway = ReloadGateway::new(
            SwapCell::new(MappingTable::new()),
            keys.clone(),
            SwapCell::new(ActionRegistry::empty()),
        );

        let dir = tempfile::tempdir().unwrap();
        let registry = ActionRegistry::build(
            dir.path(),
            vec![crate::model::registry::VideoChannel {
                name: "Squirrels".to_string(),
                video: "squirrels.mp4".to_string(),
            }],
        );
        gateway.reload_action_registry(registry);

        assert_eq!(*keys.load(), vec!["squirrels".to_string()]);
    }
}
