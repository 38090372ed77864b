//! Selection path: the dots picked during one gesture.
//!
//! The path only observes dots; it never touches the grid. Callers are
//! expected to pass dots that reflect the current board (see
//! [`crate::session::GameSession::process_dot`]).

use crate::dot::{Dot, DotColor};
use tracing::trace;

/// Smallest closed cycle on a square grid (a 2×2 square).
pub const MIN_LOOP_LEN: usize = 4;

/// Result of offering one dot to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAddStatus {
    /// Path was empty; the dot starts it.
    Started,
    /// Dot appended.
    Added,
    /// User backtracked; last dot dropped (or a closed loop reopened).
    Removed,
    /// Dot revisited the first dot and closed a loop.
    LoopClosed,
    /// Same dot as last time; nothing to do.
    Unchanged,
    /// Not a legal extension.
    Ignored,
}

/// Gesture lifecycle of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Active,
    Closed,
}

#[derive(Debug, Clone)]
pub struct SelectionPath {
    /// Distinct dots in selection order. A closed loop does not repeat the first dot.
    dots: Vec<Dot>,
    closed: bool,
    min_loop_len: usize,
}

impl Default for SelectionPath {
    fn default() -> Self {
        Self::new(MIN_LOOP_LEN)
    }
}

impl SelectionPath {
    pub fn new(min_loop_len: usize) -> Self {
        Self {
            dots: Vec::new(),
            closed: false,
            min_loop_len: min_loop_len.max(MIN_LOOP_LEN),
        }
    }

    pub fn state(&self) -> SelectionState {
        if self.dots.is_empty() {
            SelectionState::Empty
        } else if self.closed {
            SelectionState::Closed
        } else {
            SelectionState::Active
        }
    }

    #[inline]
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Colour fixed by the first dot, if any.
    pub fn color(&self) -> Option<DotColor> {
        self.dots.first().map(|d| d.color)
    }

    pub fn contains(&self, dot: &Dot) -> bool {
        self.dots.iter().any(|d| d.pos == dot.pos)
    }

    /// Offer `dot` to the path. Rules, in order:
    /// start an empty path; repeat of the last dot is a no-op; an adjacent,
    /// same-coloured, unvisited dot extends; the first dot closes a loop when
    /// the path is long enough and adjacent; the second-to-last dot backtracks.
    /// Anything else is ignored.
    pub fn process(&mut self, dot: Dot) -> SelectionAddStatus {
        let status = if self.closed {
            self.process_closed(dot)
        } else {
            self.process_open(dot)
        };
        trace!(pos = %dot.pos, ?status, len = self.dots.len(), "selection");
        status
    }

    fn process_open(&mut self, dot: Dot) -> SelectionAddStatus {
        let (first, last) = match (self.dots.first(), self.dots.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                self.dots.push(dot);
                return SelectionAddStatus::Started;
            }
        };

        if dot.pos == last.pos {
            return SelectionAddStatus::Unchanged;
        }
        let extends = dot.is_adjacent(&last) && dot.color == first.color;
        if extends && !self.contains(&dot) {
            self.dots.push(dot);
            return SelectionAddStatus::Added;
        }
        if extends && dot.pos == first.pos && self.dots.len() >= self.min_loop_len {
            self.closed = true;
            return SelectionAddStatus::LoopClosed;
        }
        if self.dots.len() >= 2 && dot.pos == self.dots[self.dots.len() - 2].pos {
            self.dots.pop();
            return SelectionAddStatus::Removed;
        }
        SelectionAddStatus::Ignored
    }

    /// Closed loop: the gesture currently rests on the first dot.
    fn process_closed(&mut self, dot: Dot) -> SelectionAddStatus {
        match (self.dots.first(), self.dots.last()) {
            (Some(first), _) if first.pos == dot.pos => SelectionAddStatus::Unchanged,
            (_, Some(last)) if last.pos == dot.pos => {
                self.closed = false;
                SelectionAddStatus::Removed
            }
            _ => SelectionAddStatus::Ignored,
        }
    }

    /// Drop the path. Safe from any state.
    pub fn clear(&mut self) {
        self.dots.clear();
        self.closed = false;
    }
}
