//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the grid, addressed as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn add(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Apply toroidal wrapping for a square grid of the given side length.
    ///
    /// Uses euclidean remainder so negative coordinates land in `0..size`.
    pub fn wrap(&self, size: i32) -> Self {
        Self {
            row: self.row.rem_euclid(size),
            col: self.col.rem_euclid(size),
        }
    }

    /// Position one step in the given direction (unwrapped)
    pub fn step(&self, direction: Direction) -> Self {
        let (drow, dcol) = direction.to_delta();
        self.add(drow, dcol)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction on the grid. Diagonals are not neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Tree,
    Fire,
    Ash,
}

impl CellState {
    pub fn all() -> [CellState; 4] {
        [
            CellState::Empty,
            CellState::Tree,
            CellState::Fire,
            CellState::Ash,
        ]
    }

    /// Fixed display color used by renderers
    pub fn color(&self) -> &'static str {
        match self {
            CellState::Empty => "black",
            CellState::Tree => "green",
            CellState::Fire => "red",
            CellState::Ash => "grey",
        }
    }

    /// Single-character glyph for text rendering
    pub fn glyph(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Tree => 'T',
            CellState::Fire => '*',
            CellState::Ash => '#',
        }
    }

    pub fn is_burning(&self) -> bool {
        matches!(self, CellState::Fire)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Empty => "empty",
            CellState::Tree => "tree",
            CellState::Fire => "fire",
            CellState::Ash => "ash",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrap(10), Position::new(5, 5));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(10), Position::new(9, 9));

        let pos = Position::new(10, 10);
        assert_eq!(pos.wrap(10), Position::new(0, 0));

        // Far negative values still land inside the grid
        let pos = Position::new(-23, 47);
        assert_eq!(pos.wrap(10), Position::new(7, 7));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.to_delta(), (-1, 0));
        assert_eq!(Direction::Down.to_delta(), (1, 0));
        assert_eq!(Direction::Left.to_delta(), (0, -1));
        assert_eq!(Direction::Right.to_delta(), (0, 1));
    }

    #[test]
    fn test_position_step() {
        let pos = Position::new(0, 0);
        assert_eq!(pos.step(Direction::Up), Position::new(-1, 0));
        assert_eq!(pos.step(Direction::Right), Position::new(0, 1));
    }

    #[test]
    fn test_cell_colors() {
        assert_eq!(CellState::Empty.color(), "black");
        assert_eq!(CellState::Tree.color(), "green");
        assert_eq!(CellState::Fire.color(), "red");
        assert_eq!(CellState::Ash.color(), "grey");
    }

    #[test]
    fn test_cell_state_default_is_empty() {
        assert_eq!(CellState::default(), CellState::Empty);
        assert!(CellState::Fire.is_burning());
        assert!(!CellState::Ash.is_burning());
    }

    #[test]
    fn test_cell_state_serialization() {
        let json = serde_json::to_string(&CellState::Ash).unwrap();
        assert_eq!(json, "\"Ash\"");
        let state: CellState = serde_json::from_str("\"Tree\"").unwrap();
        assert_eq!(state, CellState::Tree);
    }
}
