//! Dotty: Dots-style tile-matching puzzle engine.
//!
//! Connect same-coloured, edge-adjacent dots to clear them; close a loop to
//! clear every dot of that colour. Each committed gesture spends one move.

pub mod bot;
pub mod config;
pub mod dot;
pub mod gesture;
pub mod grid;
pub mod resolver;
pub mod scoring;
pub mod selection;
pub mod session;

pub use config::{ConfigError, GameConfig};
pub use dot::{Dot, DotColor, Position};
pub use gesture::{DotSelectionStatus, GestureBridge, GestureResponse};
pub use grid::Grid;
pub use resolver::{MoveOutcome, PendingMove};
pub use scoring::ScoreTable;
pub use selection::{SelectionAddStatus, SelectionState};
pub use session::GameSession;
