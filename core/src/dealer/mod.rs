use crate::*;
pub use random::*;

mod random;

/// Produces the symbol layout a new game is played on.
pub trait Dealer {
    /// Lays out `symbols` doubled across the board described by `config`.
    ///
    /// The caller supplies exactly `config.pair_count()` distinct symbols;
    /// each ends up on exactly two cells.
    fn deal(self, config: GameConfig, symbols: &[Symbol]) -> Result<CardLayout>;
}
