//! Grid model: rows × cols of coloured dots, neighbour queries, removal and cascade.

use crate::dot::{Dot, DotColor, Position};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Playfield of dots. `cells[row][col]`; row 0 is the top.
/// Every cell is occupied between moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Number of palette entries new dots are drawn from.
    colors: usize,
    cells: Vec<Vec<DotColor>>,
}

impl Grid {
    /// Fresh grid with every cell coloured from `rng`.
    pub fn random<R: Rng>(rows: usize, cols: usize, colors: usize, rng: &mut R) -> Self {
        let colors = colors.clamp(1, DotColor::ALL.len());
        let cells: Vec<Vec<DotColor>> = (0..rows)
            .map(|_| (0..cols).map(|_| random_color(colors, rng)).collect::<Vec<_>>())
            .collect();
        Self {
            rows,
            cols,
            colors,
            cells,
        }
    }

    /// Build a grid from rows of colour symbols (`"RBG"`, see [`DotColor::symbol`]).
    /// Whitespace inside a row is ignored. Returns `None` for ragged or unknown input.
    /// Refills draw from the colours present, or at least `min_colors`.
    pub fn from_rows(rows: &[&str], min_colors: usize) -> Option<Self> {
        let cells: Vec<Vec<DotColor>> = rows
            .iter()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(DotColor::from_symbol)
                    .collect::<Option<Vec<_>>>()
            })
            .collect::<Option<_>>()?;
        let cols = cells.first().map(Vec::len)?;
        if cols == 0 || cells.iter().any(|row| row.len() != cols) {
            return None;
        }
        let max_index = cells.iter().flatten().map(DotColor::index).max().unwrap_or(0);
        Some(Self {
            rows: cells.len(),
            cols,
            colors: (max_index + 1).max(min_colors).min(DotColor::ALL.len()),
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn colors(&self) -> usize {
        self.colors
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    pub fn color_at(&self, row: usize, col: usize) -> Option<DotColor> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn dot_at(&self, row: usize, col: usize) -> Option<Dot> {
        self.color_at(row, col).map(|color| Dot::new(row, col, color))
    }

    /// The up-to-four edge-adjacent dots of `pos`.
    pub fn neighbors_of(&self, pos: Position) -> Vec<Dot> {
        const NEIGHBOURS_4: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        if !self.contains(pos) {
            return Vec::new();
        }
        NEIGHBOURS_4
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = pos.row.checked_add_signed(dr)?;
                let col = pos.col.checked_add_signed(dc)?;
                self.dot_at(row, col)
            })
            .collect()
    }

    /// All dots, row-major.
    pub fn dots(&self) -> impl Iterator<Item = Dot> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &color)| Dot::new(row, col, color))
        })
    }

    pub fn positions_of_color(&self, color: DotColor) -> HashSet<Position> {
        self.dots()
            .filter(|d| d.color == color)
            .map(|d| d.pos)
            .collect()
    }

    /// Recolour every cell.
    pub fn refill<R: Rng>(&mut self, rng: &mut R) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = random_color(self.colors, rng);
            }
        }
    }

    /// Remove `removed` and let each column fall: survivors keep their
    /// top-to-bottom order and settle at the bottom, vacated cells at the top
    /// get new colours from `rng`. Columns with nothing removed are untouched.
    /// Out-of-range positions are skipped. Returns the refilled cells.
    pub fn remove_and_cascade<R: Rng>(
        &mut self,
        removed: &HashSet<Position>,
        rng: &mut R,
    ) -> Vec<Position> {
        let mut refilled = Vec::new();
        for col in 0..self.cols {
            if !(0..self.rows).any(|row| removed.contains(&Position::new(row, col))) {
                continue;
            }
            // Survivors, bottom-up.
            let survivors: Vec<DotColor> = (0..self.rows)
                .rev()
                .filter(|&row| !removed.contains(&Position::new(row, col)))
                .map(|row| self.cells[row][col])
                .collect();
            let gap = self.rows - survivors.len();
            for (offset, color) in survivors.into_iter().enumerate() {
                self.cells[self.rows - 1 - offset][col] = color;
            }
            // Fill top-down so the same rng sequence gives the same board.
            for row in 0..gap {
                self.cells[row][col] = random_color(self.colors, rng);
                refilled.push(Position::new(row, col));
            }
        }
        refilled
    }
}

fn random_color<R: Rng>(colors: usize, rng: &mut R) -> DotColor {
    DotColor::from_index(rng.random_range(0..colors.max(1)))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(DotColor::symbol).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
