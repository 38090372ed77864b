//! Dots: grid position, palette colour, and the value handed to the UI.

use std::fmt;

/// Grid coordinate. `row` 0 is the top row; dots fall towards higher rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if `other` shares an edge with this cell (no diagonals).
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Dot colours. Games use the first `colors` entries of [`DotColor::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl DotColor {
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
    ];

    /// Palette index 0..6; wraps out-of-range indices.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Red => 0,
            Self::Blue => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Purple => 4,
            Self::Orange => 5,
        }
    }

    /// Single-letter tag used by the text board dump and test fixtures.
    pub fn symbol(&self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Purple => 'P',
            Self::Orange => 'O',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.symbol() == c.to_ascii_uppercase())
    }
}

/// One grid cell as seen by the UI. The position is the dot's identity;
/// the colour is whatever currently sits in that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dot {
    pub pos: Position,
    pub color: DotColor,
}

impl Dot {
    pub const fn new(row: usize, col: usize, color: DotColor) -> Self {
        Self {
            pos: Position::new(row, col),
            color,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.pos.col
    }

    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.pos.is_adjacent(&other.pos)
    }
}
