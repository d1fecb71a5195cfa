//! Shared CLI helpers used across multiple commands.

use sfera_config::{Preset, find_preset, get_factory_preset};

/// Load a preset by name or path.
///
/// Searches in this order:
/// 1. Factory presets (by id or display name)
/// 2. A file path, then user and system preset directories
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        tracing::debug!(path = %path.display(), "loading preset file");
        return Ok(Preset::load(&path)?);
    }

    anyhow::bail!("Preset '{name}' not found. Use 'sfera presets list' to see available presets.")
}

/// Accept only the bit depths the WAV writer supports.
pub fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        Ok(bits) => Err(format!("unsupported bit depth {bits} (expected 16, 24 or 32)")),
        Err(e) => Err(e.to_string()),
    }
}
