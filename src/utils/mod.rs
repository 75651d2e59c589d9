//! Output helpers shared by the CLI and the interactive menu

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter, GridSnapshot};
