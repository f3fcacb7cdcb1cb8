pub mod camera;
pub mod collision;
pub mod docking;
pub mod errors;
pub mod movement;
pub mod obstacles;

pub use camera::*;
pub use collision::*;
pub use docking::*;
pub use errors::*;
pub use movement::*;
pub use obstacles::*;
