use thiserror::Error;

use crate::Symbol;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board has an odd number of cells, cards cannot be paired")]
    OddBoardSize,
    #[error("Symbol count does not match the board size")]
    SymbolCountMismatch,
    #[error("Symbol {0} does not appear exactly twice")]
    UnpairedSymbol(Symbol),
    #[error("Both picks refer to the same cell")]
    SameCell,
    #[error("Cell is not face up")]
    CellNotFlipped,
    #[error("Operation is not valid in the current turn phase")]
    OutOfPhase,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is still in progress")]
    NotFinished,
}

pub type Result<T> = core::result::Result<T, GameError>;
