use serde::{Deserialize, Serialize};

use crate::CellCount;

/// Face symbol printed on a card. Every symbol appears on exactly two cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub char);

impl Symbol {
    /// The first `count` uppercase ASCII letters, or `None` if the alphabet
    /// cannot supply that many distinct symbols.
    pub fn alphabet(count: CellCount) -> Option<Vec<Symbol>> {
        if count > 26 {
            return None;
        }
        Some(
            ('A'..='Z')
                .take(count as usize)
                .map(Symbol)
                .collect(),
        )
    }
}

impl core::fmt::Display for Symbol {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical per-cell state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    /// Temporarily face up, pending pair resolution.
    Flipped,
    /// Permanently face up. A matched cell is never re-hidden.
    Matched,
}

impl CellState {
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What an observer is allowed to see at one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Revealed(Symbol),
}
