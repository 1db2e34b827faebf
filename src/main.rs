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

//! # Pet Media Appliance.
//!
//! An interactive appliance that turns physical button, joystick and arcade
//! controller presses into media playback and spoken feedback for a pet.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** polls the input devices once per tick, translates
//!   raw events into commands and executes them against the application
//!   state.
//! * **Background Workers** handle media playback and speech via
//!   asynchronous command processing.
//! * A **Configuration Watcher** picks up mapping and media edits made by
//!   the companion web administration service and publishes them through
//!   the reload gateway.
//!
//! ## Architecture
//!
//! The main loop is single-threaded and cooperative: device polling,
//! translation and execution are all synchronous and bounded, so one slow
//! frame can never wedge input handling. Communication with the workers is
//! handled via `std::sync::mpsc` channels; configuration reloads cross into
//! the loop only through atomic snapshot swaps.

mod actions;
mod config;
mod input;
mod model;
mod player;
mod reload;
mod speech;

use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{info, warn};

use crate::{
    input::{
        EventSource,
        composite::CompositeEventSource,
        joystick::GamepadSource,
        keyboard::KeyboardSource,
        mapper::{InputMapper, MappingTable},
    },
    model::{AppState, registry::ActionRegistry},
    player::MediaPlayer,
    reload::{ReloadGateway, SwapCell, WatchPaths, spawn_config_watcher},
    speech::Speaker,
};

/// How often the watcher checks for external configuration edits.
const RELOAD_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// The entry point of the application.
///
/// Loads configuration, builds the dispatch pipeline and the background
/// workers, and hands control to [`run`] until shutdown is requested.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::load_config();

    let mapping_table = match config::load_mapping_table(&config.keymap_file()) {
        Ok(table) => {
            info!(
                "loaded mapping profile '{}' ({} bindings)",
                config.keymap_profile,
                table.len()
            );
            table
        }
        Err(e) => {
            warn!("starting with an empty mapping table: {e}");
            MappingTable::new()
        }
    };

    let channels = match config::load_video_channels(&config.channels_file()) {
        Ok(channels) => channels,
        Err(e) => {
            warn!("starting without video channels: {e}");
            Vec::new()
        }
    };

    let registry = ActionRegistry::build(&config.media_root(), channels);
    info!(
        actions = registry.len(),
        channels = registry.channels().len(),
        "action registry built"
    );

    // Swappable snapshots shared between the main loop and the reload side
    let table_cell = SwapCell::new(mapping_table);
    let channel_keys_cell = SwapCell::new(registry.channel_keys());
    let registry_cell = SwapCell::new(registry);

    let mapper = InputMapper::new(table_cell.clone(), channel_keys_cell.clone());

    let gateway = ReloadGateway::new(table_cell, channel_keys_cell, registry_cell.clone());
    spawn_config_watcher(
        gateway,
        WatchPaths {
            keymap_file: config.keymap_file(),
            channels_file: config.channels_file(),
            media_root: config.media_root(),
        },
        RELOAD_POLL_INTERVAL,
    );

    let mut state = AppState::new(registry_cell, MediaPlayer::spawn(), Speaker::spawn());

    let mut sources = CompositeEventSource::new();
    sources.add_source(Box::new(KeyboardSource::new()));
    if config.use_joystick {
        match GamepadSource::new() {
            Ok(source) => sources.add_source(Box::new(source)),
            Err(e) => warn!("continuing keyboard-only: {e}"),
        }
    }

    // Raw mode delivers key presses immediately. Without a usable terminal
    // (e.g. started from a boot service) the appliance still runs on
    // joystick input alone.
    let raw_mode = enable_raw_mode().is_ok();
    if !raw_mode {
        warn!("raw mode unavailable, keyboard input may be line-buffered");
    }

    let res = run(
        &mut sources,
        &mapper,
        &mut state,
        Duration::from_millis(config.tick_rate_ms),
    );

    if raw_mode {
        disable_raw_mode().ok();
    }

    res.context("Application error occurred")
}

/// The main poll loop.
///
/// Once per tick: drain the composite event source, translate each raw
/// event, execute the resulting commands, then check the cooperative
/// shutdown flag. This is the only place the loop may terminate; there is
/// no forced interruption mid-tick.
fn run(
    sources: &mut CompositeEventSource,
    mapper: &InputMapper,
    state: &mut AppState,
    tick: Duration,
) -> Result<()> {
    info!("ready for input");

    loop {
        let frame_start = Instant::now();

        for event in sources.poll() {
            if let Some(command) = mapper.translate(&event) {
                state.execute(command);
            }
        }

        if state.shutdown_requested() {
            break;
        }

        if let Some(remaining) = tick.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    info!("shutting down");
    state.stop_playback();

    Ok(())
}
