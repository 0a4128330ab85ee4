use super::*;

/// Deals a uniformly random permutation of the doubled symbol multiset,
/// reproducible from its seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomDealer {
    seed: u64,
}

impl RandomDealer {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Dealer for RandomDealer {
    fn deal(self, config: GameConfig, symbols: &[Symbol]) -> Result<CardLayout> {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        if total_cells % 2 != 0 {
            return Err(GameError::OddBoardSize);
        }
        if symbols.len() != config.pair_count() as usize {
            log::warn!(
                "Dealer given {} symbols for {} pairs",
                symbols.len(),
                config.pair_count()
            );
            return Err(GameError::SymbolCountMismatch);
        }

        let mut deck: Vec<Symbol> = symbols.iter().flat_map(|&s| [s, s]).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        deck.shuffle(&mut rng);

        // Catches duplicate input symbols as well, via the pairing check.
        CardLayout::from_symbols(config.size, &deck)
    }
}
