//! Game-state model and turn resolution for a two-player memory game.
//!
//! [`CardLayout`] fixes which symbol sits on which cell, [`Game`] tracks the
//! mutable per-session state (flips, matches, scores, turn), and
//! [`Dealer`] implementations produce shuffled layouts. All I/O lives in the
//! driver crate.

use std::collections::HashMap;
use std::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use dealer::*;
pub use engine::*;
pub use error::*;
pub use types::*;

mod card;
mod dealer;
mod engine;
mod error;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
}

impl GameConfig {
    pub const fn new(size: Coord2) -> Self {
        Self { size }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Number of symbol pairs a full board holds.
    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }
}

/// Immutable symbol assignment for every cell, fixed at deal time.
///
/// Construction validates the pairing invariant: every symbol on the grid
/// appears on exactly two cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLayout {
    symbols: Array2<Symbol>,
}

impl CardLayout {
    pub fn from_symbol_grid(symbols: Array2<Symbol>) -> Result<Self> {
        let mut copies: HashMap<Symbol, CellCount> = HashMap::new();
        for &symbol in &symbols {
            *copies.entry(symbol).or_default() += 1;
        }
        for (&symbol, &count) in &copies {
            if count != 2 {
                return Err(GameError::UnpairedSymbol(symbol));
            }
        }
        Ok(Self { symbols })
    }

    /// Builds a layout from a row-major symbol sequence.
    pub fn from_symbols(size: Coord2, symbols: &[Symbol]) -> Result<Self> {
        let grid = Array2::from_shape_vec(size.to_nd_index(), symbols.to_vec())
            .map_err(|_| GameError::SymbolCountMismatch)?;
        Self::from_symbol_grid(grid)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig { size: self.size() }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.symbols.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.symbols.len().try_into().unwrap()
    }

    pub fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub fn symbol_at(&self, coords: Coord2) -> Symbol {
        self[coords]
    }
}

impl Index<Coord2> for CardLayout {
    type Output = Symbol;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.symbols[coords.to_nd_index()]
    }
}

/// Outcome of flipping a single card face up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already face up or matched; nothing changed.
    AlreadyRevealed,
    Revealed,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::AlreadyRevealed => false,
            Self::Revealed => true,
        }
    }
}

/// Outcome of resolving the two face-up cards of a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Symbols differed; both cells went back face down.
    NotMatched,
    Matched,
    /// The match completed the board and ended the game.
    Won,
}

impl MatchOutcome {
    pub const fn is_match(self) -> bool {
        match self {
            Self::NotMatched => false,
            Self::Matched => true,
            Self::Won => true,
        }
    }
}
