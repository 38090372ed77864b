//! Point table for committed moves.

/// Points awarded per move.
///
/// An open path of `n` dots scores `n * points_per_dot`, plus
/// `long_path_bonus` for every dot beyond `long_path_threshold`.
/// A loop clear scores the same formula over every dot it removes,
/// multiplied by `loop_multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTable {
    pub points_per_dot: u32,
    pub long_path_threshold: u32,
    pub long_path_bonus: u32,
    pub loop_multiplier: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            points_per_dot: 1,
            long_path_threshold: 4,
            long_path_bonus: 1,
            loop_multiplier: 2,
        }
    }
}

impl ScoreTable {
    /// Points for clearing `removed` dots. Strictly increasing in `removed`
    /// while `points_per_dot >= 1`.
    pub fn points(&self, removed: usize, is_loop: bool) -> u32 {
        let n = u32::try_from(removed).unwrap_or(u32::MAX);
        let base = n.saturating_mul(self.points_per_dot);
        let bonus = n
            .saturating_sub(self.long_path_threshold)
            .saturating_mul(self.long_path_bonus);
        let open = base.saturating_add(bonus);
        if is_loop {
            open.saturating_mul(self.loop_multiplier.max(1))
        } else {
            open
        }
    }
}
