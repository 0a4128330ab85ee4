use core::num::Saturating;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One of the two participants. `Player::One` always picks first in a new
/// game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl core::fmt::Display for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::One => write!(f, "player1"),
            Self::Two => write!(f, "player2"),
        }
    }
}

/// Where the current turn stands.
///
/// Picks are only accepted in `FirstPick`/`SecondPick`, resolution only in
/// `Resolving`, and a turn hand-over only in `TurnOver`. `GameOver` is
/// terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    FirstPick,
    SecondPick,
    Resolving,
    TurnOver,
    GameOver,
}

impl TurnPhase {
    pub const fn is_pick(self) -> bool {
        matches!(self, Self::FirstPick | Self::SecondPick)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for TurnPhase {
    fn default() -> Self {
        Self::FirstPick
    }
}

/// One successful flip, in the order it happened. Recorded for audit/replay;
/// nothing in the engine reads it back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub coords: Coord2,
}

/// Final result of a completed game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// `None` means the players tied.
    pub winner: Option<Player>,
    /// Pairs found by player 1 and player 2, in that order.
    pub scores: [CellCount; 2],
}

impl GameOutcome {
    pub const fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}

/// Mutable state of one game session: the dealt layout plus every cell's
/// visibility, both scores, whose turn it is, and the move history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    layout: CardLayout,
    board: Array2<CellState>,
    scores: [Saturating<CellCount>; 2],
    matched_pairs: Saturating<CellCount>,
    turn: Player,
    phase: TurnPhase,
    history: Vec<MoveRecord>,
}

impl Game {
    pub fn new(layout: CardLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            board: Array2::default(size.to_nd_index()),
            scores: [Saturating(0), Saturating(0)],
            matched_pairs: Saturating(0),
            turn: Player::One,
            phase: TurnPhase::FirstPick,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn total_cells(&self) -> CellCount {
        self.layout.total_cells()
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Pairs found so far by `player`.
    pub fn score(&self, player: Player) -> CellCount {
        self.scores[player.index()].0
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    /// Rendering contract: the symbol when the cell is face up or matched,
    /// masked otherwise.
    pub fn view_at(&self, coords: Coord2) -> CellView {
        if self.cell_at(coords).is_visible() {
            CellView::Revealed(self.layout[coords])
        } else {
            CellView::Hidden
        }
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Flips one card face up for the current player.
    ///
    /// A cell that is already face up or matched is left untouched and
    /// reported as [`RevealOutcome::AlreadyRevealed`]; the caller picks
    /// again. A successful flip advances the turn phase towards resolution.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;
        if !self.phase.is_pick() {
            return Err(GameError::OutOfPhase);
        }

        match self.board[coords.to_nd_index()] {
            CellState::Flipped | CellState::Matched => Ok(RevealOutcome::AlreadyRevealed),
            CellState::Hidden => {
                self.board[coords.to_nd_index()] = CellState::Flipped;
                self.history.push(MoveRecord {
                    player: self.turn,
                    coords,
                });
                self.phase = match self.phase {
                    TurnPhase::FirstPick => TurnPhase::SecondPick,
                    TurnPhase::SecondPick => TurnPhase::Resolving,
                    // is_pick() ruled the rest out
                    _ => self.phase,
                };
                Ok(RevealOutcome::Revealed)
            }
        }
    }

    /// Resolves the two face-up cards of this turn.
    ///
    /// The sole mutation site for matched flags and scores. A match keeps the
    /// turn with the acting player; a mismatch re-hides both cells and moves
    /// the game to [`TurnPhase::TurnOver`].
    pub fn resolve_pair(&mut self, first: Coord2, second: Coord2) -> Result<MatchOutcome> {
        let first = self.layout.validate_coords(first)?;
        let second = self.layout.validate_coords(second)?;
        self.check_not_finished()?;
        if self.phase != TurnPhase::Resolving {
            return Err(GameError::OutOfPhase);
        }
        if first == second {
            return Err(GameError::SameCell);
        }
        for coords in [first, second] {
            if self.board[coords.to_nd_index()] != CellState::Flipped {
                return Err(GameError::CellNotFlipped);
            }
        }

        if self.layout[first] == self.layout[second] {
            self.board[first.to_nd_index()] = CellState::Matched;
            self.board[second.to_nd_index()] = CellState::Matched;
            self.scores[self.turn.index()] += 1;
            self.matched_pairs += 1;
            log::debug!(
                "{} matched {} at {:?} / {:?}",
                self.turn,
                self.layout[first],
                first,
                second
            );

            if self.matched_pairs.0 == self.layout.pair_count() {
                self.phase = TurnPhase::GameOver;
                log::debug!("all pairs found, game over");
                Ok(MatchOutcome::Won)
            } else {
                // Turn retention: a match lets the same player pick again.
                self.phase = TurnPhase::FirstPick;
                Ok(MatchOutcome::Matched)
            }
        } else {
            self.board[first.to_nd_index()] = CellState::Hidden;
            self.board[second.to_nd_index()] = CellState::Hidden;
            self.phase = TurnPhase::TurnOver;
            Ok(MatchOutcome::NotMatched)
        }
    }

    /// Hands the turn to the other player after a mismatch.
    pub fn advance_turn(&mut self) -> Result<()> {
        self.check_not_finished()?;
        if self.phase != TurnPhase::TurnOver {
            return Err(GameError::OutOfPhase);
        }
        self.turn = self.turn.other();
        self.phase = TurnPhase::FirstPick;
        Ok(())
    }

    /// Final standings. Only available once every pair has been found.
    pub fn outcome(&self) -> Result<GameOutcome> {
        if !self.is_finished() {
            return Err(GameError::NotFinished);
        }
        let scores = [self.scores[0].0, self.scores[1].0];
        let winner = match scores[0].cmp(&scores[1]) {
            core::cmp::Ordering::Greater => Some(Player::One),
            core::cmp::Ordering::Less => Some(Player::Two),
            core::cmp::Ordering::Equal => None,
        };
        Ok(GameOutcome { winner, scores })
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, symbols: &str) -> CardLayout {
        let symbols: Vec<Symbol> = symbols.chars().map(Symbol).collect();
        CardLayout::from_symbols(size, &symbols).unwrap()
    }

    // 2x2 board:  A B
    //             B A
    fn small_game() -> Game {
        Game::new(layout((2, 2), "ABBA"))
    }

    // 4x4 board:  A B C D
    //             E F G H
    //             H G F E
    //             D C B A
    fn full_game() -> Game {
        Game::new(layout((4, 4), "ABCDEFGHHGFEDCBA"))
    }

    #[test]
    fn players_print_with_their_console_names() {
        assert_eq!(Player::One.to_string(), "player1");
        assert_eq!(Player::Two.to_string(), "player2");
    }

    #[test]
    fn new_game_is_fully_hidden() {
        let game = full_game();

        assert_eq!(game.size(), (4, 4));
        assert_eq!(game.total_cells(), 16);
        assert_eq!(game.phase(), TurnPhase::FirstPick);
        assert_eq!(game.turn(), Player::One);
        assert_eq!(game.score(Player::One), 0);
        assert_eq!(game.score(Player::Two), 0);
        assert!(game.history().is_empty());
        assert!(!game.is_finished());
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(game.cell_at((r, c)), CellState::Hidden);
                assert_eq!(game.view_at((r, c)), CellView::Hidden);
            }
        }
    }

    #[test]
    fn reveal_flips_the_cell_and_advances_the_phase() {
        let mut game = full_game();

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Revealed));
        assert_eq!(game.cell_at((0, 0)), CellState::Flipped);
        assert_eq!(game.view_at((0, 0)), CellView::Revealed(Symbol('A')));
        assert_eq!(game.phase(), TurnPhase::SecondPick);

        assert_eq!(game.reveal((0, 1)), Ok(RevealOutcome::Revealed));
        assert_eq!(game.phase(), TurnPhase::Resolving);
    }

    #[test]
    fn reveal_on_a_face_up_cell_changes_nothing() {
        let mut game = full_game();
        game.reveal((0, 0)).unwrap();

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::AlreadyRevealed));
        assert_eq!(game.phase(), TurnPhase::SecondPick);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.score(Player::One), 0);
    }

    #[test]
    fn reveal_rejects_out_of_bounds_coords() {
        let mut game = full_game();

        assert_eq!(game.reveal((4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(game.reveal((0, 4)), Err(GameError::InvalidCoords));
        assert_eq!(game.phase(), TurnPhase::FirstPick);
    }

    #[test]
    fn reveal_is_rejected_while_a_pair_awaits_resolution() {
        let mut game = full_game();
        game.reveal((0, 0)).unwrap();
        game.reveal((0, 1)).unwrap();

        assert_eq!(game.reveal((0, 2)), Err(GameError::OutOfPhase));
    }

    #[test]
    fn mismatch_rehides_both_cells_and_passes_the_turn() {
        let mut game = full_game();
        game.reveal((0, 0)).unwrap(); // A
        game.reveal((0, 1)).unwrap(); // B

        assert_eq!(game.resolve_pair((0, 0), (0, 1)), Ok(MatchOutcome::NotMatched));
        assert_eq!(game.cell_at((0, 0)), CellState::Hidden);
        assert_eq!(game.cell_at((0, 1)), CellState::Hidden);
        assert_eq!(game.score(Player::One), 0);
        // The turn only switches once the driver acknowledges the mismatch.
        assert_eq!(game.turn(), Player::One);
        assert_eq!(game.phase(), TurnPhase::TurnOver);

        game.advance_turn().unwrap();
        assert_eq!(game.turn(), Player::Two);
        assert_eq!(game.phase(), TurnPhase::FirstPick);
    }

    #[test]
    fn match_marks_cells_scores_and_retains_the_turn() {
        let mut game = full_game();
        game.reveal((0, 0)).unwrap(); // A
        game.reveal((3, 3)).unwrap(); // A

        assert_eq!(game.resolve_pair((0, 0), (3, 3)), Ok(MatchOutcome::Matched));
        assert_eq!(game.cell_at((0, 0)), CellState::Matched);
        assert_eq!(game.cell_at((3, 3)), CellState::Matched);
        assert_eq!(game.score(Player::One), 1);
        assert_eq!(game.score(Player::Two), 0);
        assert_eq!(game.turn(), Player::One);
        assert_eq!(game.phase(), TurnPhase::FirstPick);
        assert!(!game.is_finished());
    }

    #[test]
    fn matched_cells_stay_face_up_for_the_rest_of_the_game() {
        let mut game = full_game();
        game.reveal((0, 0)).unwrap();
        game.reveal((3, 3)).unwrap();
        game.resolve_pair((0, 0), (3, 3)).unwrap();

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::AlreadyRevealed));
        assert_eq!(game.cell_at((0, 0)), CellState::Matched);
        assert_eq!(game.view_at((0, 0)), CellView::Revealed(Symbol('A')));
    }

    #[test]
    fn resolving_requires_two_distinct_face_up_cells() {
        let mut game = full_game();

        assert_eq!(game.resolve_pair((0, 0), (0, 1)), Err(GameError::OutOfPhase));

        game.reveal((0, 0)).unwrap();
        game.reveal((0, 1)).unwrap();
        assert_eq!(game.resolve_pair((0, 0), (0, 0)), Err(GameError::SameCell));
        assert_eq!(game.resolve_pair((0, 0), (0, 2)), Err(GameError::CellNotFlipped));
        assert_eq!(game.resolve_pair((9, 0), (0, 1)), Err(GameError::InvalidCoords));

        // The flipped pair is still intact and resolvable.
        assert_eq!(game.resolve_pair((0, 0), (0, 1)), Ok(MatchOutcome::NotMatched));
    }

    #[test]
    fn advance_turn_is_only_legal_after_a_mismatch() {
        let mut game = full_game();
        assert_eq!(game.advance_turn(), Err(GameError::OutOfPhase));

        game.reveal((0, 0)).unwrap();
        game.reveal((3, 3)).unwrap();
        game.resolve_pair((0, 0), (3, 3)).unwrap();
        assert_eq!(game.advance_turn(), Err(GameError::OutOfPhase));
        assert_eq!(game.turn(), Player::One);
    }

    #[test]
    fn finding_the_last_pair_ends_the_game() {
        let mut game = small_game();
        game.reveal((0, 0)).unwrap(); // A
        game.reveal((1, 1)).unwrap(); // A
        assert_eq!(game.resolve_pair((0, 0), (1, 1)), Ok(MatchOutcome::Matched));

        game.reveal((0, 1)).unwrap(); // B
        game.reveal((1, 0)).unwrap(); // B
        assert_eq!(game.resolve_pair((0, 1), (1, 0)), Ok(MatchOutcome::Won));

        assert!(game.is_finished());
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert_eq!(game.reveal((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.advance_turn(), Err(GameError::AlreadyEnded));
        assert_eq!(
            game.resolve_pair((0, 0), (0, 1)),
            Err(GameError::AlreadyEnded)
        );

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner, Some(Player::One));
        assert_eq!(outcome.scores, [2, 0]);
        assert!(!outcome.is_tie());
    }

    #[test]
    fn outcome_is_unavailable_mid_game() {
        let game = full_game();
        assert_eq!(game.outcome(), Err(GameError::NotFinished));
    }

    // 2x4 board:  A B B A
    //             C D D C
    #[test]
    fn full_game_can_end_in_a_tie() {
        let mut game = Game::new(layout((2, 4), "ABBACDDC"));

        // Player 1 opens with a mismatch.
        game.reveal((0, 0)).unwrap(); // A
        game.reveal((0, 1)).unwrap(); // B
        assert_eq!(game.resolve_pair((0, 0), (0, 1)), Ok(MatchOutcome::NotMatched));
        game.advance_turn().unwrap();

        // Player 2 collects A and B, then mismatches across C/D.
        game.reveal((0, 0)).unwrap();
        game.reveal((0, 3)).unwrap();
        assert_eq!(game.resolve_pair((0, 0), (0, 3)), Ok(MatchOutcome::Matched));
        game.reveal((0, 1)).unwrap();
        game.reveal((0, 2)).unwrap();
        assert_eq!(game.resolve_pair((0, 1), (0, 2)), Ok(MatchOutcome::Matched));
        game.reveal((1, 0)).unwrap(); // C
        game.reveal((1, 1)).unwrap(); // D
        assert_eq!(game.resolve_pair((1, 0), (1, 1)), Ok(MatchOutcome::NotMatched));
        game.advance_turn().unwrap();

        // Player 1 sweeps the remaining two pairs.
        game.reveal((1, 0)).unwrap();
        game.reveal((1, 3)).unwrap();
        assert_eq!(game.resolve_pair((1, 0), (1, 3)), Ok(MatchOutcome::Matched));
        game.reveal((1, 1)).unwrap();
        game.reveal((1, 2)).unwrap();
        assert_eq!(game.resolve_pair((1, 1), (1, 2)), Ok(MatchOutcome::Won));

        let outcome = game.outcome().unwrap();
        assert!(outcome.is_tie());
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.scores, [2, 2]);
    }

    #[test]
    fn history_lists_successful_flips_in_order() {
        let mut game = full_game();
        game.reveal((0, 0)).unwrap();
        game.reveal((0, 0)).unwrap(); // no-op, not recorded
        game.reveal((0, 1)).unwrap();
        game.resolve_pair((0, 0), (0, 1)).unwrap();
        game.advance_turn().unwrap();
        game.reveal((1, 2)).unwrap();

        let history = game.history();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history[0],
            MoveRecord {
                player: Player::One,
                coords: (0, 0)
            }
        );
        assert_eq!(
            history[1],
            MoveRecord {
                player: Player::One,
                coords: (0, 1)
            }
        );
        assert_eq!(
            history[2],
            MoveRecord {
                player: Player::Two,
                coords: (1, 2)
            }
        );
    }

    #[test]
    fn game_state_survives_a_serde_round_trip() {
        let mut game = full_game();
        game.reveal((0, 0)).unwrap();
        game.reveal((3, 3)).unwrap();
        game.resolve_pair((0, 0), (3, 3)).unwrap();
        game.reveal((1, 0)).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
        assert_eq!(restored.phase(), TurnPhase::SecondPick);
        assert_eq!(restored.score(Player::One), 1);
    }
}
