//! Placement commands and their wire representation.

use serde::Serialize;
use std::fmt;

use crate::orchestrator::CandidateId;

/// Soloon colors accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Purple,
    White,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Purple, Color::White];

    /// Parse the uppercase prefix used in goal-map labels (`RED` in `RED_SOLOON`)
    pub fn from_label(prefix: &str) -> Option<Self> {
        match prefix {
            "RED" => Some(Color::Red),
            "BLUE" => Some(Color::Blue),
            "PURPLE" => Some(Color::Purple),
            "WHITE" => Some(Color::White),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::White => "white",
        }
    }
}

/// Cometh directions accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn from_label(prefix: &str) -> Option<Self> {
        match prefix {
            "UP" => Some(Direction::Up),
            "RIGHT" => Some(Direction::Right),
            "DOWN" => Some(Direction::Down),
            "LEFT" => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// The three placeable entity kinds, without their attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Polyanet,
    Soloon,
    Cometh,
}

impl EntityKind {
    /// Path segment of the creation endpoint, relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            EntityKind::Polyanet => "polyanets",
            EntityKind::Soloon => "soloons",
            EntityKind::Cometh => "comeths",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Polyanet => write!(f, "Polyanet"),
            EntityKind::Soloon => write!(f, "Soloon"),
            EntityKind::Cometh => write!(f, "Cometh"),
        }
    }
}

/// An entity together with the attribute it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Polyanet,
    Soloon(Color),
    Cometh(Direction),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Polyanet => EntityKind::Polyanet,
            Entity::Soloon(_) => EntityKind::Soloon,
            Entity::Cometh(_) => EntityKind::Cometh,
        }
    }

    /// Lowercase color or direction, if any
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Entity::Polyanet => None,
            Entity::Soloon(color) => Some(color.as_str()),
            Entity::Cometh(direction) => Some(direction.as_str()),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Polyanet => write!(f, "polyanet"),
            Entity::Soloon(color) => write!(f, "{} soloon", color.as_str()),
            Entity::Cometh(direction) => write!(f, "{} cometh", direction.as_str()),
        }
    }
}

/// One entity to create at one coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementCommand {
    pub row: usize,
    pub column: usize,
    pub entity: Entity,
}

impl PlacementCommand {
    pub fn new(row: usize, column: usize, entity: Entity) -> Self {
        Self { row, column, entity }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }

    pub fn attribute(&self) -> Option<&'static str> {
        self.entity.attribute()
    }

    /// Build the request body for this command on behalf of `candidate_id`
    pub fn request<'a>(&self, candidate_id: &'a CandidateId) -> PlacementRequest<'a> {
        let attribute = match self.entity {
            Entity::Polyanet => None,
            Entity::Soloon(color) => Some(Attribute::Color(color)),
            Entity::Cometh(direction) => Some(Attribute::Direction(direction)),
        };

        PlacementRequest {
            row: self.row,
            column: self.column,
            candidate_id: candidate_id.as_str(),
            attribute,
        }
    }
}

/// Kind-specific body field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Color(Color),
    Direction(Direction),
}

/// JSON body of a creation request
///
/// Serializes as `{"row", "column", "candidateId"}` plus `"color"` or
/// `"direction"` when the entity carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest<'a> {
    pub row: usize,
    pub column: usize,
    pub candidate_id: &'a str,
    #[serde(flatten)]
    pub attribute: Option<Attribute>,
}
