//! CLI command implementations.

pub mod common;
pub mod encode;
pub mod generate;
pub mod info;
pub mod presets;
pub mod weights;
