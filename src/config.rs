//! Game configuration: defaults, validation, and `game[key]="value"` files.

use crate::dot::DotColor;
use crate::scoring::ScoreTable;
use crate::selection::MIN_LOOP_LEN;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SIZE: usize = 6;
pub const DEFAULT_COLORS: usize = 5;
pub const DEFAULT_MOVES: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("{field} out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Palette size; dots use the first `colors` entries of [`DotColor::ALL`].
    pub colors: usize,
    pub move_budget: u32,
    pub min_loop_len: usize,
    pub scoring: ScoreTable,
    /// Fixed seed for reproducible boards; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SIZE,
            cols: DEFAULT_SIZE,
            colors: DEFAULT_COLORS,
            move_budget: DEFAULT_MOVES,
            min_loop_len: MIN_LOOP_LEN,
            scoring: ScoreTable::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let out_of_range = |field, reason: String| Err(ConfigError::OutOfRange { field, reason });
        if self.rows < 2 || self.cols < 2 {
            return out_of_range(
                "grid",
                format!("need at least 2x2, got {}x{}", self.rows, self.cols),
            );
        }
        if !(2..=DotColor::ALL.len()).contains(&self.colors) {
            return out_of_range(
                "colors",
                format!("must be 2..={}, got {}", DotColor::ALL.len(), self.colors),
            );
        }
        if self.move_budget == 0 {
            return out_of_range("moves", "must be at least 1".to_string());
        }
        if self.min_loop_len < MIN_LOOP_LEN {
            return out_of_range(
                "min_loop_len",
                format!("must be at least {MIN_LOOP_LEN}, got {}", self.min_loop_len),
            );
        }
        if self.scoring.points_per_dot == 0 {
            return out_of_range("points_per_dot", "must be at least 1".to_string());
        }
        if self.scoring.loop_multiplier == 0 {
            return out_of_range("loop_multiplier", "must be at least 1".to_string());
        }
        Ok(())
    }

    /// Load from a file of `game[key]="value"` lines, on top of defaults.
    /// A missing path yields defaults; unknown keys are ignored.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        let config = Self::from_map(&parse_config_file(&s))?;
        config.validate()?;
        Ok(config)
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut c = Self::default();
        set(map, "rows", &mut c.rows)?;
        set(map, "cols", &mut c.cols)?;
        set(map, "colors", &mut c.colors)?;
        set(map, "moves", &mut c.move_budget)?;
        set(map, "min_loop_len", &mut c.min_loop_len)?;
        set(map, "points_per_dot", &mut c.scoring.points_per_dot)?;
        set(map, "long_path_threshold", &mut c.scoring.long_path_threshold)?;
        set(map, "long_path_bonus", &mut c.scoring.long_path_bonus)?;
        set(map, "loop_multiplier", &mut c.scoring.loop_multiplier)?;
        if let Some(v) = map.get("seed") {
            c.seed = Some(parse_value("seed", v)?);
        }
        Ok(c)
    }
}

fn set<T: FromStr>(
    map: &HashMap<String, String>,
    key: &str,
    slot: &mut T,
) -> Result<(), ConfigError> {
    if let Some(v) = map.get(key) {
        *slot = parse_value(key, v)?;
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parse `game[key]="value"` lines into key -> value. Blank and `#` lines are skipped.
fn parse_config_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("game[") {
            if let Some(end) = stripped.find(']') {
                let key = stripped[..end].trim();
                let rest = stripped[end + 1..].trim();
                if let Some(value) = rest.strip_prefix('=') {
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if !value.is_empty() {
                        map.insert(key.to_string(), value.to_string());
                    }
                }
            }
        }
    }
    map
}
