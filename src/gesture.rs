//! Touch-gesture bridge between a UI and the session.
//!
//! A UI reports each dot its pointer passes over, tagged with where in the
//! gesture it happened. The bridge forwards to the session and tells the UI
//! what to do next: redraw, or play the clear animation and call back
//! [`GestureBridge::on_animation_finished`] when it is done. That callback
//! commits the move, and commits at most once per gesture.

use crate::dot::Dot;
use crate::resolver::{MoveOutcome, PendingMove};
use crate::selection::SelectionAddStatus;
use crate::session::GameSession;
use rand::Rng;
use tracing::trace;

/// Where a touched dot falls in the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotSelectionStatus {
    /// Pointer went down on this dot.
    First,
    /// Pointer dragged onto this dot.
    Additional,
    /// Pointer lifted on this dot.
    Last,
}

/// What the UI should do after a touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureResponse {
    /// Nothing changed (game over, or a clear animation is still playing).
    Ignored,
    /// Selection may have changed; redraw.
    Redraw(SelectionAddStatus),
    /// Gesture ended with a committable path; animate these dots, then call back.
    AnimateClear(PendingMove),
}

#[derive(Debug, Default)]
pub struct GestureBridge {
    animating: bool,
}

impl GestureBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between [`GestureResponse::AnimateClear`] and the matching callback.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn on_dot_selected<R: Rng>(
        &mut self,
        session: &mut GameSession<R>,
        dot: Dot,
        status: DotSelectionStatus,
    ) -> GestureResponse {
        if self.animating || session.is_game_over() {
            return GestureResponse::Ignored;
        }
        if status == DotSelectionStatus::First {
            session.clear_selected_dots();
        }

        let add_status = session.process_dot(dot);
        trace!(?status, ?add_status, "touch");

        if status != DotSelectionStatus::Last {
            return GestureResponse::Redraw(add_status);
        }
        match session.pending_removal() {
            Some(pending) => {
                self.animating = true;
                GestureResponse::AnimateClear(pending)
            }
            None => {
                session.clear_selected_dots();
                GestureResponse::Redraw(add_status)
            }
        }
    }

    /// Pointer left the board or the gesture was interrupted before lifting.
    pub fn on_gesture_cancelled<R: Rng>(&mut self, session: &mut GameSession<R>) {
        if !self.animating {
            session.clear_selected_dots();
        }
    }

    /// Clear animation finished: commit the pending move. Extra callbacks
    /// without a pending animation return `None`.
    pub fn on_animation_finished<R: Rng>(
        &mut self,
        session: &mut GameSession<R>,
    ) -> Option<MoveOutcome> {
        if !std::mem::take(&mut self.animating) {
            return None;
        }
        session.finish_move()
    }

    /// Drop any in-flight animation state and start over.
    pub fn new_game<R: Rng>(&mut self, session: &mut GameSession<R>) {
        self.animating = false;
        session.new_game();
    }
}
