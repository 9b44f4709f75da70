// SPDX-License-Identifier: MPL-2.0
//! Config and data directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** passed to a `_with_override()` function
//! 2. **CLI arguments** (`--config-dir`, `--data-dir`) registered through
//!    [`init_cli_overrides`]
//! 3. **Environment variables** (`SPIN_DECK_CONFIG_DIR`, `SPIN_DECK_DATA_DIR`)
//! 4. **Platform default** from `dirs`, with `SpinDeck` appended
//!
//! The config directory holds `settings.toml`; the data directory holds the
//! custom cover and the built-in track.

use std::path::PathBuf;
use std::sync::OnceLock;

const APP_NAME: &str = "SpinDeck";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "SPIN_DECK_CONFIG_DIR";

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "SPIN_DECK_DATA_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers the directories given on the command line.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_overrides(config_dir: Option<String>, data_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        log::warn!("CLI config dir override already initialized");
    }
    if CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_err() {
        log::warn!("CLI data dir override already initialized");
    }
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Directory holding `settings.toml`.
///
/// - Linux: `~/.config/SpinDeck/`
/// - macOS: `~/Library/Application Support/SpinDeck/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\SpinDeck\`
#[must_use]
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}

/// Directory holding the custom cover and bundled media.
///
/// - Linux: `~/.local/share/SpinDeck/`
#[must_use]
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

#[must_use]
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}
