pub mod cell;
pub mod components;
pub mod config;
pub mod game_logic;
pub mod plugins;
pub mod resources;

// Selective re-exports for external consumers

// Plugins - main.rs needs all plugins
pub use plugins::*;

// Game logic - binaries need errors and the layout type
pub use cell::{CellLayout, MicrotubulePlacement};
pub use game_logic::errors::{CamkiiError, CamkiiResult};
