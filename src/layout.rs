//! Coordinates for scenes and lineages.

mod engine;
pub mod generation;
mod placement;
mod types;

pub use engine::LayoutEngine;
pub use generation::{GenerationSpacing, LineageLayout, PlacedPerson, generations};
pub use types::{EdgePath, Layout, LayoutEdge, LayoutNode, NodeKind};
