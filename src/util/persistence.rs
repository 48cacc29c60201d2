//! Durable UI preferences (watch list, order-filter preset) under the
//! platform config directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use directories::ProjectDirs;
use thiserror::Error;

use crate::domain::PersistedState;

const STATE_FILENAME: &str = "ui_state.json";

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("no writable config directory on this platform")]
    NoConfigDir,
    #[error("could not write state file: {0}")]
    Write(#[from] io::Error),
    #[error("could not encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

fn state_file() -> Option<&'static Path> {
    static PATH: OnceLock<Option<PathBuf>> = OnceLock::new();
    PATH.get_or_init(|| {
        ProjectDirs::from("dev", "KTradeDashboard", "KTradeDashboard")
            .map(|dirs| dirs.config_dir().join(STATE_FILENAME))
    })
    .as_deref()
}

pub fn load_ui_state() -> Option<PersistedState> {
    load_from(state_file()?)
}

pub fn store_ui_state(state: &PersistedState) -> Result<(), StateStoreError> {
    let path = state_file().ok_or(StateStoreError::NoConfigDir)?;
    save_to(path, state)
}

fn load_from(path: &Path) -> Option<PersistedState> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(err) => {
            // Unreadable state is dropped, not fatal; defaults take over.
            println!("[state] ignoring unreadable {}: {err}", path.display());
            None
        }
    }
}

fn save_to(path: &Path, state: &PersistedState) -> Result<(), StateStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    // Write-then-rename so a crash mid-write cannot truncate the file.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::DatePreset;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ktrade-{tag}-{}", std::process::id()))
    }

    #[test]
    fn state_round_trips_through_disk() {
        let dir = scratch_dir("state-roundtrip");
        let path = dir.join(STATE_FILENAME);

        let state = PersistedState {
            watch_codes: vec!["005930".to_string(), "000660".to_string()],
            order_preset: DatePreset::Week,
        };
        save_to(&path, &state).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.watch_codes, state.watch_codes);
        assert_eq!(loaded.order_preset, DatePreset::Week);
        assert!(!path.with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_or_corrupt_file_yields_none() {
        let dir = scratch_dir("state-corrupt");
        let path = dir.join(STATE_FILENAME);
        assert!(load_from(&path).is_none());

        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "not json {").unwrap();
        assert!(load_from(&path).is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
