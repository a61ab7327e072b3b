//! 2D toroidal forest grid.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wildfire_core::{CellState, Direction, Error, PopulationCounts, Position, Result};

/// A square toroidal grid of cell states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: i32,
    cells: Vec<CellState>,
}

/// Unchecked wire form, validated on deserialize
#[derive(Deserialize)]
struct RawGrid {
    size: i32,
    cells: Vec<CellState>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = Error;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Grid::from_cells(raw.size, raw.cells)
    }
}

impl Grid {
    /// Create a `size` x `size` grid with every cell empty
    pub fn new(size: i32) -> Result<Self> {
        if size <= 0 {
            return Err(Error::InvalidDimension {
                size: i64::from(size),
            });
        }
        let len = (size as usize) * (size as usize);
        Ok(Self {
            size,
            cells: vec![CellState::Empty; len],
        })
    }

    /// Build a grid from row-major cell states
    pub fn from_cells(size: i32, cells: Vec<CellState>) -> Result<Self> {
        let mut grid = Self::new(size)?;
        if cells.len() != grid.cells.len() {
            return Err(Error::Config(format!(
                "expected {} cells for a {size}x{size} grid, got {}",
                grid.cells.len(),
                cells.len()
            )));
        }
        grid.cells = cells;
        Ok(grid)
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Number of cells (`size * size`)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get cell state at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> CellState {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set cell state at position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, state: CellState) {
        let index = self.pos_to_index(pos);
        self.cells[index] = state;
    }

    /// Plant `count` trees at distinct uniformly chosen positions.
    ///
    /// Shuffles every position and takes the first `min(count, size * size)`.
    /// A non-positive count leaves the grid untouched. Returns how many cells
    /// were set to `Tree`.
    pub fn plant_trees<R: Rng + ?Sized>(&mut self, count: i64, rng: &mut R) -> usize {
        if count <= 0 {
            return 0;
        }
        let planted = usize::try_from(count).map_or(self.cells.len(), |c| c.min(self.cells.len()));

        let mut indices: Vec<usize> = (0..self.cells.len()).collect();
        indices.shuffle(rng);
        for &index in &indices[..planted] {
            self.cells[index] = CellState::Tree;
        }

        debug!(requested = count, planted, size = self.size, "Planted trees");
        planted
    }

    /// Set one uniformly chosen tree on fire.
    ///
    /// Returns the ignited position, or `None` when the grid has no trees.
    pub fn ignite_random_tree<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        let trees: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Tree)
            .map(|(i, _)| i)
            .collect();

        let index = *trees.choose(rng)?;
        self.cells[index] = CellState::Fire;
        let pos = self.index_to_pos(index);
        debug!(row = pos.row, col = pos.col, candidates = trees.len(), "Ignited tree");
        Some(pos)
    }

    /// The four orthogonal neighbors (up, down, left, right), wrapped
    pub fn orthogonal_neighbors(&self, pos: Position) -> [Position; 4] {
        Direction::all().map(|direction| pos.step(direction).wrap(self.size))
    }

    pub fn has_fire(&self) -> bool {
        self.cells.iter().any(CellState::is_burning)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Tally every cell by state
    pub fn census(&self) -> PopulationCounts {
        self.cells.iter().copied().collect()
    }

    /// Positions currently in the given state, row-major
    pub fn positions_of(&self, state: CellState) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(move |(_, s)| *s == state)
            .map(|(pos, _)| pos)
    }

    /// Iterator over all cells with positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, state)| (self.index_to_pos(i), *state))
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.size as usize)
    }

    /// Swap in a freshly computed matrix of the same shape
    pub(crate) fn replace_cells(&mut self, cells: Vec<CellState>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }

    // Computed in usize; size * size can exceed i32::MAX
    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.size);
        wrapped.row as usize * self.size as usize + wrapped.col as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let size = self.size as usize;
        Position::new((index / size) as i32, (index % size) as i32)
    }
}
