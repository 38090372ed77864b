//! Move finder: hints for a UI and the autoplay driver in the binary.

use crate::dot::Position;
use crate::grid::Grid;
use crate::scoring::ScoreTable;
use crate::session::GameSession;
use rand::Rng;

/// Longest path the search will follow.
const MAX_DEPTH: usize = 12;
/// Cap on DFS expansions per search; large single-colour regions have
/// exponentially many simple paths.
const MAX_EXPANSIONS: usize = 50_000;

/// A candidate move: the dots to touch in order. A loop ends by repeating its first dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub path: Vec<Position>,
    pub points: u32,
    pub is_loop: bool,
}

/// Highest-scoring move on the current board, or `None` if no two
/// adjacent dots share a colour (or the game is over).
pub fn best_move<R: Rng>(session: &GameSession<R>) -> Option<Hint> {
    if session.is_game_over() {
        return None;
    }
    let config = session.config();
    Search::new(session.grid(), &config.scoring, config.min_loop_len).run()
}

struct Search<'a> {
    grid: &'a Grid,
    scoring: &'a ScoreTable,
    min_loop_len: usize,
    expansions: usize,
    best: Option<Hint>,
}

impl<'a> Search<'a> {
    fn new(grid: &'a Grid, scoring: &'a ScoreTable, min_loop_len: usize) -> Self {
        Self {
            grid,
            scoring,
            min_loop_len,
            expansions: 0,
            best: None,
        }
    }

    fn run(mut self) -> Option<Hint> {
        let starts: Vec<Position> = self.grid.dots().map(|d| d.pos).collect();
        for start in starts {
            let mut path = vec![start];
            self.extend(&mut path);
        }
        self.best
    }

    fn extend(&mut self, path: &mut Vec<Position>) {
        self.expansions += 1;
        let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
            return;
        };
        let color = self.grid.color_at(first.row, first.col);

        if path.len() >= 2 {
            self.offer(path.clone(), path.len(), false);
        }
        if path.len() >= self.min_loop_len && last.is_adjacent(&first) {
            let removed = color.map_or(path.len(), |c| self.grid.positions_of_color(c).len());
            let mut closed = path.clone();
            closed.push(first);
            self.offer(closed, removed, true);
        }
        if path.len() >= MAX_DEPTH || self.expansions >= MAX_EXPANSIONS {
            return;
        }

        for next in self.grid.neighbors_of(last) {
            if Some(next.color) != color || path.contains(&next.pos) {
                continue;
            }
            path.push(next.pos);
            self.extend(path);
            path.pop();
        }
    }

    fn offer(&mut self, path: Vec<Position>, removed: usize, is_loop: bool) {
        let points = self.scoring.points(removed, is_loop);
        if self.best.as_ref().is_none_or(|b| points > b.points) {
            self.best = Some(Hint {
                path,
                points,
                is_loop,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(rows: &[&str]) -> GameSession {
        let grid = Grid::from_rows(rows, 5).unwrap();
        GameSession::with_grid(GameConfig::default(), grid, StdRng::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn test_prefers_loop() {
        let s = session(&["RRB", "RRG", "BGY"]);
        let hint = best_move(&s).unwrap();
        assert!(hint.is_loop);
        assert_eq!(hint.path.len(), 5);
        assert_eq!(hint.path.first(), hint.path.last());
    }

    #[test]
    fn test_longest_open_path() {
        let s = session(&["RRRB", "GBYG", "YGBY"]);
        let hint = best_move(&s).unwrap();
        assert!(!hint.is_loop);
        assert_eq!(hint.path.len(), 3);
    }

    #[test]
    fn test_no_move_on_checkerboard() {
        let s = session(&["RB", "BR"]);
        assert!(best_move(&s).is_none());
    }

    #[test]
    fn test_hint_is_playable() {
        let mut s = session(&["RRB", "RRG", "BGY"]);
        let hint = best_move(&s).unwrap();
        for pos in &hint.path {
            s.select(pos.row, pos.col);
        }
        let outcome = s.finish_move().unwrap();
        assert_eq!(outcome.points, hint.points);
    }
}
