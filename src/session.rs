//! Game session: grid, selection path, score and move budget as one owned unit.
//!
//! The UI drives it with [`GameSession::process_dot`] while the gesture is in
//! progress and [`GameSession::finish_move`] once the clear animation has
//! played. Nothing here waits on the UI; a commit happens when the call arrives.

use crate::config::{ConfigError, GameConfig};
use crate::dot::{Dot, Position};
use crate::grid::Grid;
use crate::resolver::{MoveOutcome, MoveResolver, PendingMove};
use crate::selection::{SelectionAddStatus, SelectionPath, SelectionState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

#[derive(Debug)]
pub struct GameSession<R: Rng = StdRng> {
    config: GameConfig,
    grid: Grid,
    selection: SelectionPath,
    resolver: MoveResolver,
    rng: R,
    score: u32,
    moves_left: u32,
    moves_made: u32,
}

impl GameSession<StdRng> {
    /// New session seeded from `config.seed`, or from the thread RNG when unset.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// New session drawing every dot colour from `rng`.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::random(config.rows, config.cols, config.colors, &mut rng);
        let session = Self::assemble(config, grid, rng);
        info!(
            rows = session.grid.rows(),
            cols = session.grid.cols(),
            moves = session.moves_left,
            "new game"
        );
        Ok(session)
    }

    /// Session over a prepared board. Grid dimensions override `config`.
    /// The board is only used for the first game; [`Self::new_game`] deals a random one.
    pub fn with_grid(config: GameConfig, grid: Grid, rng: R) -> Result<Self, ConfigError> {
        let config = GameConfig {
            rows: grid.rows(),
            cols: grid.cols(),
            colors: grid.colors(),
            ..config
        };
        config.validate()?;
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: GameConfig, grid: Grid, rng: R) -> Self {
        Self {
            selection: SelectionPath::new(config.min_loop_len),
            resolver: MoveResolver::new(config.scoring),
            moves_left: config.move_budget,
            config,
            grid,
            rng,
            score: 0,
            moves_made: 0,
        }
    }

    /// Fresh board, zero score, full move budget, empty selection.
    pub fn new_game(&mut self) {
        self.grid.refill(&mut self.rng);
        self.selection.clear();
        self.score = 0;
        self.moves_left = self.config.move_budget;
        self.moves_made = 0;
        info!(moves = self.moves_left, "new game");
    }

    /// Offer a touched dot to the selection. Stale dots (colour no longer
    /// matches the board), off-board dots and any input after game over are
    /// [`SelectionAddStatus::Ignored`].
    pub fn process_dot(&mut self, dot: Dot) -> SelectionAddStatus {
        if self.is_game_over() {
            return SelectionAddStatus::Ignored;
        }
        match self.grid.dot_at(dot.row(), dot.col()) {
            Some(current) if current == dot => {}
            _ => return SelectionAddStatus::Ignored,
        }
        let status = self.selection.process(dot);
        if status == SelectionAddStatus::LoopClosed {
            debug!(color = ?dot.color, len = self.selection.len(), "loop closed");
        }
        status
    }

    /// [`Self::process_dot`] by coordinate.
    pub fn select(&mut self, row: usize, col: usize) -> SelectionAddStatus {
        match self.grid.dot_at(row, col) {
            Some(dot) => self.process_dot(dot),
            None => SelectionAddStatus::Ignored,
        }
    }

    /// Abandon the gesture. No effect on score or moves.
    pub fn clear_selected_dots(&mut self) {
        self.selection.clear();
    }

    /// Removal the next [`Self::finish_move`] would apply, if any.
    pub fn pending_removal(&self) -> Option<PendingMove> {
        if self.is_game_over() {
            return None;
        }
        self.resolver.plan(&self.grid, &self.selection)
    }

    /// Commit the selected path: clear, cascade, score, spend one move.
    /// Returns `None` without touching state for an empty or one-dot
    /// selection, or after game over.
    pub fn finish_move(&mut self) -> Option<MoveOutcome> {
        let pending = self.pending_removal()?;
        let (points, refilled) = self.resolver.apply(&pending, &mut self.grid, &mut self.rng);
        self.score = self.score.saturating_add(points);
        self.moves_left = self.moves_left.saturating_sub(1);
        self.moves_made += 1;
        self.selection.clear();

        debug!(
            color = ?pending.color,
            is_loop = pending.is_loop,
            removed = pending.removal.len(),
            points,
            score = self.score,
            moves_left = self.moves_left,
            "move committed"
        );
        if self.is_game_over() {
            info!(score = self.score, moves = self.moves_made, "game over");
        }

        Some(MoveOutcome {
            color: pending.color,
            is_loop: pending.is_loop,
            path_len: pending.path_len,
            removed: pending.sorted_removal(),
            refilled,
            points,
            score: self.score,
            moves_left: self.moves_left,
        })
    }

    #[inline]
    pub fn selected_dots(&self) -> &[Dot] {
        self.selection.dots()
    }

    #[inline]
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Moves committed since the last new game.
    #[inline]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.moves_left == 0
    }

    pub fn dot_at(&self, row: usize, col: usize) -> Option<Dot> {
        self.grid.dot_at(row, col)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn resolver(&self) -> &MoveResolver {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::DotColor;

    fn session(rows: &[&str], moves: u32) -> GameSession {
        let config = GameConfig {
            move_budget: moves,
            ..GameConfig::default()
        };
        let grid = Grid::from_rows(rows, 5).unwrap();
        GameSession::with_grid(config, grid, StdRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn test_stale_dot_is_ignored() {
        let mut s = session(&["RB", "GY"], 5);
        assert_eq!(s.process_dot(Dot::new(0, 0, DotColor::Blue)), SelectionAddStatus::Ignored);
        assert_eq!(s.process_dot(Dot::new(5, 5, DotColor::Red)), SelectionAddStatus::Ignored);
        assert_eq!(s.process_dot(Dot::new(0, 0, DotColor::Red)), SelectionAddStatus::Started);
    }

    #[test]
    fn test_finish_move_commits_once() {
        let mut s = session(&["RRB", "GBY", "YGB"], 5);
        s.select(0, 0);
        s.select(0, 1);
        let outcome = s.finish_move().unwrap();
        assert_eq!(outcome.removed, vec![Position::new(0, 0), Position::new(0, 1)]);
        assert_eq!(outcome.moves_left, 4);
        assert_eq!(s.score(), outcome.points);
        assert!(s.selected_dots().is_empty());
        // Second call without a new selection is a no-op.
        assert!(s.finish_move().is_none());
        assert_eq!(s.moves_left(), 4);
    }

    #[test]
    fn test_pending_removal_matches_outcome() {
        let mut s = session(&["RRB", "RRY", "YGR"], 5);
        for (r, c) in [(0, 0), (0, 1), (1, 1), (1, 0), (0, 0)] {
            s.select(r, c);
        }
        let pending = s.pending_removal().unwrap();
        assert!(pending.is_loop);
        let outcome = s.finish_move().unwrap();
        assert_eq!(outcome.removed, pending.sorted_removal());
        assert_eq!(outcome.removed.len(), 5);
    }

    #[test]
    fn test_new_game_resets() {
        let mut s = session(&["RRB", "GBY", "YGB"], 1);
        s.select(0, 0);
        s.select(0, 1);
        s.finish_move();
        assert!(s.is_game_over());
        s.new_game();
        assert!(!s.is_game_over());
        assert_eq!(s.score(), 0);
        assert_eq!(s.moves_left(), 1);
        assert_eq!(s.moves_made(), 0);
        assert_eq!(s.grid().dots().count(), 9);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let config = GameConfig {
            seed: Some(1234),
            ..GameConfig::default()
        };
        let a = GameSession::new(config.clone()).unwrap();
        let b = GameSession::new(config).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            colors: 9,
            ..GameConfig::default()
        };
        assert!(GameSession::new(config).is_err());
    }
}
