use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Largest adjacency count a cell can hold.
pub const MAX_ADJACENT: u8 = 8;

/// What a cell holds once the board has been generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    /// Placeholder before mine placement and counting have run.
    #[default]
    Unset,
    /// Number of mines among the surrounding cells, `0..=8`.
    Adjacent(u8),
    Bomb,
}

impl CellValue {
    pub const fn is_valid(self) -> bool {
        match self {
            Self::Unset | Self::Bomb => true,
            Self::Adjacent(count) => count <= MAX_ADJACENT,
        }
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    pub const fn adjacent(self) -> Option<u8> {
        match self {
            Self::Adjacent(count) => Some(count),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("."),
            Self::Adjacent(count) => write!(f, "{count}"),
            Self::Bomb => f.write_str("*"),
        }
    }
}

/// A single grid position: its value plus the player-visible open and flag marks.
///
/// Only the owning [`crate::Board`] mutates cells; everyone else gets a shared reference.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: CellValue,
    is_open: bool,
    is_flagged: bool,
}

impl Cell {
    pub const fn value(&self) -> CellValue {
        self.value
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn is_bomb(&self) -> bool {
        self.value.is_bomb()
    }

    /// Closed and not flagged, i.e. a cell a reveal may still open.
    pub const fn is_hidden(&self) -> bool {
        !self.is_open && !self.is_flagged
    }

    /// Assigns the cell's value. Bombs are final once placed.
    pub(crate) fn set_value(&mut self, value: CellValue) -> Result<()> {
        if !value.is_valid() || (self.value.is_bomb() && value != CellValue::Bomb) {
            return Err(GameError::InvalidValue(value));
        }
        self.value = value;
        Ok(())
    }

    /// Opens the cell, returning whether anything changed.
    ///
    /// Flagged cells stay closed; the board unflags before it ever opens.
    pub(crate) fn open(&mut self) -> bool {
        if self.is_open || self.is_flagged {
            return false;
        }
        self.is_open = true;
        true
    }

    /// Flips the flag on a closed cell, returning whether anything changed.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.is_open {
            return false;
        }
        self.is_flagged = !self.is_flagged;
        true
    }
}
