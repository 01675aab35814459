//! Reference grid world backing the visibility collaborators.

mod grid;
mod terrain;

pub use grid::{Creature, GridWorld};
pub use terrain::{MapDimensions, TerrainKind, TerrainMap};
