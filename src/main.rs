//! Dotty: headless driver that plays the Dots engine with the built-in move finder.

use anyhow::{Context, Result, bail};
use clap::Parser;
use dotty::bot::{self, Hint};
use dotty::{DotSelectionStatus, GameConfig, GameSession, GestureBridge, GestureResponse};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.game_config()?;
    let mut session = GameSession::new(config).context("invalid game configuration")?;
    let mut bridge = GestureBridge::new();

    for game in 1..=args.games {
        if game > 1 {
            bridge.new_game(&mut session);
        }
        play(&mut session, &mut bridge, args.quiet)?;
        println!(
            "game {game}: score {} in {} moves",
            session.score(),
            session.moves_made()
        );
    }
    Ok(())
}

/// Play one game to the end of its move budget, or until no move is left.
fn play(session: &mut GameSession, bridge: &mut GestureBridge, quiet: bool) -> Result<()> {
    if !quiet {
        print!("{}", session.grid());
    }
    while !session.is_game_over() {
        let Some(hint) = bot::best_move(session) else {
            warn!(moves_left = session.moves_left(), "no connectable dots left");
            break;
        };
        let Some(outcome) = gesture(session, bridge, &hint)? else {
            bail!("move finder suggested an uncommittable path: {:?}", hint.path);
        };
        if !quiet {
            println!(
                "\n{:?} {} x{} -> +{} (score {}, {} left)",
                outcome.color,
                if outcome.is_loop { "loop" } else { "path" },
                outcome.removed.len(),
                outcome.points,
                outcome.score,
                outcome.moves_left
            );
            print!("{}", session.grid());
        }
    }
    Ok(())
}

/// Replay `hint` as a pointer gesture and acknowledge the clear animation.
fn gesture(
    session: &mut GameSession,
    bridge: &mut GestureBridge,
    hint: &Hint,
) -> Result<Option<dotty::MoveOutcome>> {
    let last = hint.path.len().saturating_sub(1);
    for (i, pos) in hint.path.iter().enumerate() {
        let dot = session
            .dot_at(pos.row, pos.col)
            .with_context(|| format!("hint left the board at {pos}"))?;
        let status = match i {
            0 => DotSelectionStatus::First,
            i if i == last => DotSelectionStatus::Last,
            _ => DotSelectionStatus::Additional,
        };
        if let GestureResponse::AnimateClear(_) = bridge.on_dot_selected(session, dot, status) {
            return Ok(bridge.on_animation_finished(session));
        }
    }
    Ok(None)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Dots puzzle engine, played by the built-in move finder.
#[derive(Debug, Parser)]
#[command(
    name = "dotty",
    version,
    about = "Dots-style puzzle engine: connect same-coloured dots, close loops to clear a whole colour.",
    long_about = "Dotty plays the Dots puzzle engine headlessly.\n\n\
        Each move connects edge-adjacent dots of one colour; closing a loop clears every dot \
        of that colour. Dots above a clear fall down and new dots fill from the top. The game \
        ends when the move budget is spent.\n\n\
        Settings come from defaults, then --config, then the flags below."
)]
pub struct Args {
    /// Config file of game[key]="value" lines (rows, cols, colors, moves, min_loop_len,
    /// points_per_dot, long_path_threshold, long_path_bonus, loop_multiplier, seed).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// Grid rows.
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Grid columns.
    #[arg(long, value_name = "N")]
    pub cols: Option<usize>,

    /// Number of dot colours (2..=6).
    #[arg(long, value_name = "N")]
    pub colors: Option<usize>,

    /// Move budget per game.
    #[arg(short, long, value_name = "N")]
    pub moves: Option<u32>,

    /// Seed for reproducible boards.
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Games to play back to back in one session.
    #[arg(short, long, default_value = "1", value_name = "N")]
    pub games: u32,

    /// Only print the final score of each game.
    #[arg(short, long)]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::load(self.config.as_deref())
            .with_context(|| format!("loading config {:?}", self.config))?;
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(colors) = self.colors {
            config.colors = colors;
        }
        if let Some(moves) = self.moves {
            config.move_budget = moves;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}
