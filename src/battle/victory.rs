//! Win condition evaluation.

use log::info;

use super::Battle;
use crate::core::PlayerId;
use crate::rules::{Victory, WinReason};

impl Battle {
    /// Check whether the game is over, logging the winner if it is.
    ///
    /// Conditions are checked in a fixed order and the first match wins:
    ///
    /// 1. A player with no prize cards left wins.
    /// 2. A player with an empty deck loses.
    /// 3. A player with no Pokémon in play loses.
    ///
    /// Within each step player 1 is checked before player 2. A verdict is
    /// logged the first time it is reached, however often this is called.
    pub fn check_win_condition(&mut self) -> Option<Victory> {
        let victory = self.evaluate_win_condition()?;
        if self.declared != Some(victory) {
            let winner = self.players[victory.winner].name().to_string();
            info!("{winner} wins: {}", victory.reason);
            self.note(format!("{winner} wins!"));
            self.declared = Some(victory);
        }
        Some(victory)
    }

    /// Same as `check_win_condition` without touching the log.
    #[must_use]
    pub fn evaluate_win_condition(&self) -> Option<Victory> {
        if let Some(id) = PlayerId::both().find(|&id| self.players[id].prize_count() == 0) {
            return Some(Victory::new(id, WinReason::AllPrizesTaken));
        }
        if let Some(id) = PlayerId::both().find(|&id| self.players[id].deck_size() == 0) {
            return Some(Victory::new(id.opponent(), WinReason::DeckOut));
        }
        PlayerId::both()
            .find(|&id| !self.players[id].has_pokemon_in_play())
            .map(|id| Victory::new(id.opponent(), WinReason::NoPokemonInPlay))
    }

    /// The verdict a driver should act on.
    ///
    /// Matches `evaluate_win_condition`, except that an empty board is not
    /// treated as final while players are still making their opening
    /// placements.
    pub(super) fn driver_verdict(&self) -> Option<Victory> {
        self.evaluate_win_condition()
            .filter(|v| !(self.opening && v.reason == WinReason::NoPokemonInPlay))
    }
}
