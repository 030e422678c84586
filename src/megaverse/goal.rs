//! Goal Map
//!
//! The target layout returned by `GET /map/{candidateId}/goal`, and the
//! classifier that turns each cell label into a placement command.

use serde::Deserialize;
use tracing::warn;

use super::command::{Color, Direction, Entity, PlacementCommand};

/// Label the API uses for an empty cell
pub const EMPTY_MARKER: &str = "SPACE";

/// A single goal-map cell, parsed by exact match against the known labels
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum GoalCell {
    Space,
    Polyanet,
    Soloon(Color),
    Cometh(Direction),
    /// A label outside the closed set; never placed
    Unrecognized(String),
}

impl GoalCell {
    pub fn parse(label: &str) -> Self {
        if label == EMPTY_MARKER {
            return GoalCell::Space;
        }
        if label == "POLYANET" {
            return GoalCell::Polyanet;
        }
        if let Some(color) = label.strip_suffix("_SOLOON").and_then(Color::from_label) {
            return GoalCell::Soloon(color);
        }
        if let Some(direction) = label.strip_suffix("_COMETH").and_then(Direction::from_label) {
            return GoalCell::Cometh(direction);
        }
        GoalCell::Unrecognized(label.to_string())
    }

    pub fn entity(&self) -> Option<Entity> {
        match self {
            GoalCell::Polyanet => Some(Entity::Polyanet),
            GoalCell::Soloon(color) => Some(Entity::Soloon(*color)),
            GoalCell::Cometh(direction) => Some(Entity::Cometh(*direction)),
            GoalCell::Space | GoalCell::Unrecognized(_) => None,
        }
    }

    /// Classify this cell at `(row, column)`. Empty and unrecognized cells
    /// produce no command; unrecognized ones are logged.
    pub fn command(&self, row: usize, column: usize) -> Option<PlacementCommand> {
        if let GoalCell::Unrecognized(label) = self {
            warn!(
                "Ignoring unrecognized goal label '{}' at row: {}, column: {}",
                label, row, column
            );
        }
        self.entity().map(|entity| PlacementCommand::new(row, column, entity))
    }
}

impl From<String> for GoalCell {
    fn from(label: String) -> Self {
        GoalCell::parse(&label)
    }
}

impl From<&str> for GoalCell {
    fn from(label: &str) -> Self {
        GoalCell::parse(label)
    }
}

/// Classify a raw goal-map label. `None` means no-op.
pub fn classify(label: &str) -> Option<Entity> {
    GoalCell::parse(label).entity()
}

/// Rows of goal cells, indexed `[row][column]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct GoalMap {
    rows: Vec<Vec<GoalCell>>,
}

impl GoalMap {
    pub fn new(rows: Vec<Vec<GoalCell>>) -> Self {
        Self { rows }
    }

    pub fn from_labels<R, L>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = L>,
        L: Into<GoalCell>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// True when the map holds no cells at all
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&GoalCell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Every cell with its coordinate, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &GoalCell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(column, cell)| (row, column, cell))
        })
    }
}
