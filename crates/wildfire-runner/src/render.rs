//! Text rendering of the forest grid.

use std::fmt;
use wildfire_core::CellState;
use wildfire_world::Grid;

/// Borrowed view that formats a grid one glyph per cell, rows top to bottom
pub struct GridView<'a> {
    grid: &'a Grid,
    color: bool,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, color: false }
    }

    /// Wrap each glyph in the ANSI color of its state
    pub fn colored(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

fn ansi_code(state: CellState) -> &'static str {
    match state {
        CellState::Empty => "\x1b[30m",
        CellState::Tree => "\x1b[32m",
        CellState::Fire => "\x1b[31m",
        CellState::Ash => "\x1b[90m",
    }
}

const ANSI_RESET: &str = "\x1b[0m";

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.rows() {
            for &state in row {
                if self.color {
                    write!(f, "{}{}{}", ansi_code(state), state.glyph(), ANSI_RESET)?;
                } else {
                    write!(f, "{}", state.glyph())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildfire_core::Position;

    #[test]
    fn test_plain_render() {
        let mut grid = Grid::new(3).unwrap();
        grid.set(Position::new(0, 0), CellState::Tree);
        grid.set(Position::new(1, 1), CellState::Fire);
        grid.set(Position::new(2, 2), CellState::Ash);

        let text = GridView::new(&grid).to_string();
        assert_eq!(text, "T..\n.*.\n..#\n");
    }

    #[test]
    fn test_colored_render() {
        let mut grid = Grid::new(1).unwrap();
        grid.set(Position::new(0, 0), CellState::Fire);

        let text = GridView::new(&grid).colored(true).to_string();
        assert_eq!(text, "\x1b[31m*\x1b[0m\n");
    }

    #[test]
    fn test_codes_follow_color_map() {
        let expected = [
            ("black", "\x1b[30m"),
            ("green", "\x1b[32m"),
            ("red", "\x1b[31m"),
            ("grey", "\x1b[90m"),
        ];
        for state in CellState::all() {
            let (_, code) = expected
                .iter()
                .find(|(name, _)| *name == state.color())
                .unwrap();
            assert_eq!(ansi_code(state), *code, "{state:?}");
        }
    }

    #[test]
    fn test_every_state_has_distinct_code() {
        let codes: Vec<&str> = CellState::all().into_iter().map(ansi_code).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
