//! Platform-specific preset locations.
//!
//! - **User presets**: `~/.config/sfera/presets/` (Linux),
//!   `~/Library/Application Support/sfera/presets/` (macOS),
//!   `%APPDATA%\sfera\presets\` (Windows)
//! - **System presets**: `/usr/share/sfera/presets/` (Linux),
//!   `/Library/Application Support/sfera/presets/` (macOS),
//!   the platform data directory elsewhere
//!
//! User presets shadow system presets of the same name.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "sfera";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Preset file extension.
const PRESET_EXT: &str = "toml";

/// The user configuration directory, falling back to `./sfera`.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// The user presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// The system-wide, usually read-only, presets directory.
pub fn system_presets_dir() -> PathBuf {
    let base = if cfg!(target_os = "linux") {
        PathBuf::from("/usr/share")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Application Support")
    } else {
        dirs::data_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    base.join(APP_NAME).join(PRESETS_SUBDIR)
}

/// Directories searched for presets, highest precedence first.
pub fn search_dirs() -> [PathBuf; 2] {
    [user_presets_dir(), system_presets_dir()]
}

/// Find a preset file by path or name.
///
/// An existing file path is returned as-is. Otherwise `name` (with `.toml`
/// appended if missing) is looked up in [`search_dirs`].
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &search_dirs())
}

fn find_preset_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if path.extension().is_some_and(|ext| ext == PRESET_EXT) {
        path
    } else {
        PathBuf::from(format!("{name}.{PRESET_EXT}"))
    };

    dirs.iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Preset files in the user presets directory, sorted by path.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Preset files in the system presets directory, sorted by path.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// `.toml` files directly inside `dir`, sorted. Missing or unreadable
/// directories yield an empty list.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == PRESET_EXT))
        .collect();
    presets.sort();
    presets
}

/// The preset name for a file: its stem.
///
/// ```rust
/// use sfera_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/presets/hall_left.toml"));
/// assert_eq!(name.as_deref(), Some("hall_left"));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
