//! Megaverse domain types
//!
//! Goal-map cells, the classifier, and the placement commands it produces.

mod command;
mod goal;

pub use command::{
    Attribute, Color, Direction, Entity, EntityKind, PlacementCommand, PlacementRequest,
};
pub use goal::{classify, GoalCell, GoalMap, EMPTY_MARKER};
