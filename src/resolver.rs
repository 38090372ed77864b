//! Move resolution: which dots a finished gesture removes, and what it scores.

use crate::dot::{DotColor, Position};
use crate::grid::Grid;
use crate::scoring::ScoreTable;
use crate::selection::SelectionPath;
use rand::Rng;
use std::collections::HashSet;

/// Removal a finished gesture would apply. Built before the clear animation
/// plays, applied when the UI reports it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub color: DotColor,
    /// Distinct dots on the selection path.
    pub path_len: usize,
    pub is_loop: bool,
    pub removal: HashSet<Position>,
}

impl PendingMove {
    /// Removal positions in row-major order.
    pub fn sorted_removal(&self) -> Vec<Position> {
        let mut out: Vec<Position> = self.removal.iter().copied().collect();
        out.sort();
        out
    }
}

/// What a committed move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub color: DotColor,
    pub is_loop: bool,
    pub path_len: usize,
    /// Cleared cells, row-major.
    pub removed: Vec<Position>,
    /// Cells that received new dots during the cascade.
    pub refilled: Vec<Position>,
    pub points: u32,
    pub score: u32,
    pub moves_left: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveResolver {
    scoring: ScoreTable,
}

impl MoveResolver {
    pub fn new(scoring: ScoreTable) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &ScoreTable {
        &self.scoring
    }

    /// Removal set for `path`: every dot of the loop's colour for a closed
    /// loop, otherwise exactly the path. `None` for paths shorter than two.
    pub fn plan(&self, grid: &Grid, path: &SelectionPath) -> Option<PendingMove> {
        if path.len() < 2 {
            return None;
        }
        let color = path.color()?;
        let removal = if path.is_closed() {
            let mut all = grid.positions_of_color(color);
            all.extend(path.dots().iter().map(|d| d.pos));
            all
        } else {
            path.dots().iter().map(|d| d.pos).collect()
        };
        Some(PendingMove {
            color,
            path_len: path.len(),
            is_loop: path.is_closed(),
            removal,
        })
    }

    pub fn points_for(&self, pending: &PendingMove) -> u32 {
        self.scoring.points(pending.removal.len(), pending.is_loop)
    }

    /// Clear and cascade. Returns (points, refilled cells); score and move
    /// bookkeeping belong to the session.
    pub fn apply<R: Rng>(
        &self,
        pending: &PendingMove,
        grid: &mut Grid,
        rng: &mut R,
    ) -> (u32, Vec<Position>) {
        let points = self.points_for(pending);
        let refilled = grid.remove_and_cascade(&pending.removal, rng);
        (points, refilled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::Dot;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn select(grid: &Grid, cells: &[(usize, usize)]) -> SelectionPath {
        let mut path = SelectionPath::default();
        for &(row, col) in cells {
            let dot: Dot = grid.dot_at(row, col).unwrap();
            path.process(dot);
        }
        path
    }

    #[test]
    fn test_single_dot_plans_nothing() {
        let grid = Grid::from_rows(&["RR", "RR"], 2).unwrap();
        let path = select(&grid, &[(0, 0)]);
        assert!(MoveResolver::default().plan(&grid, &path).is_none());
    }

    #[test]
    fn test_open_path_removes_path_only() {
        let grid = Grid::from_rows(&["RRR", "BBB", "RGR"], 3).unwrap();
        let path = select(&grid, &[(0, 0), (0, 1), (0, 2)]);
        let pending = MoveResolver::default().plan(&grid, &path).unwrap();
        assert!(!pending.is_loop);
        assert_eq!(
            pending.sorted_removal(),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }

    #[test]
    fn test_loop_removes_every_dot_of_colour() {
        let grid = Grid::from_rows(&["RRB", "RRB", "BGR"], 3).unwrap();
        let path = select(&grid, &[(0, 0), (0, 1), (1, 1), (1, 0), (0, 0)]);
        assert!(path.is_closed());
        let resolver = MoveResolver::default();
        let pending = resolver.plan(&grid, &path).unwrap();
        assert!(pending.is_loop);
        assert_eq!(pending.removal.len(), 5);
        assert!(pending.removal.contains(&Position::new(2, 2)));
        // Superset of the path.
        assert!(path.dots().iter().all(|d| pending.removal.contains(&d.pos)));
        assert!(resolver.points_for(&pending) >= ScoreTable::default().points(4, false));
    }

    #[test]
    fn test_apply_refills_removed_count() {
        let mut grid = Grid::from_rows(&["RRB", "RRB", "BGR"], 3).unwrap();
        let path = select(&grid, &[(1, 0), (1, 1)]);
        let resolver = MoveResolver::default();
        let pending = resolver.plan(&grid, &path).unwrap();
        let (points, refilled) = resolver.apply(&pending, &mut grid, &mut StdRng::seed_from_u64(5));
        assert_eq!(points, 2);
        assert_eq!(refilled.len(), 2);
        assert_eq!(grid.dots().count(), 9);
        // Row 0 fell into row 1.
        assert_eq!(grid.color_at(1, 0), Some(DotColor::Red));
        assert_eq!(grid.color_at(1, 1), Some(DotColor::Red));
    }
}
