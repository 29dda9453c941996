//! Command-line frontend for sweepy_core
//!
//! This crate provides:
//! - A plain-text renderer for line plots and heatmaps, drawn with ratatui
//! - The built-in model catalogue
//! - YAML sweep files
//! - The commands behind the `sweepy` binary

pub mod catalogue;
pub mod commands;
pub mod logging;
pub mod render;
pub mod sweep_file;

pub use commands::{RunOptions, format_outcome, run_file, show};
pub use logging::init_logging;
pub use render::{RenderStyle, TextRenderer};
pub use sweep_file::SweepFile;
