pub mod debug_overlay;
pub mod docking;
pub mod environment;
pub mod player;
pub mod ui;

pub use debug_overlay::*;
pub use docking::*;
pub use environment::*;
pub use player::*;
pub use ui::*;

use bevy::prelude::*;

/// Per-frame ordering: the player moves and is pushed out of obstacles,
/// then docking reads the settled position, then visuals follow.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellSystems {
    Movement,
    Docking,
    Presentation,
}
