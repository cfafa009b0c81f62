use thiserror::Error;

use crate::{CellCount, CellValue, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration: {rows}x{cols} with {mines} mines")]
    InvalidConfig {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Invalid cell value {0}")]
    InvalidValue(CellValue),
    #[error("Position ({row}, {col}) is outside the board")]
    IndexOutOfRange { row: Coord, col: Coord },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
