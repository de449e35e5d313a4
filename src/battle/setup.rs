//! Game setup: shuffle, prizes, opening hands, mulligan check.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::Battle;
use crate::core::PlayerId;

/// Which players opened without a Basic Pokémon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupResult {
    pub player1_mulligan: bool,
    pub player2_mulligan: bool,
}

impl SetupResult {
    #[must_use]
    pub fn mulligan(&self, player: PlayerId) -> bool {
        if player == PlayerId::ONE {
            self.player1_mulligan
        } else {
            self.player2_mulligan
        }
    }
}

impl Battle {
    /// Prepare both players for the first turn.
    ///
    /// Shuffles each deck, sets aside the prize cards, and deals the opening
    /// hands. A hand without a Basic Pokémon is reported as a mulligan but
    /// not redrawn; the driver decides what to do about it.
    ///
    /// The starting player only draws a turn card here when
    /// `skip_first_draw` is off.
    pub fn setup(&mut self) -> SetupResult {
        let prize_count = self.config.prize_count;
        let hand_size = self.config.opening_hand_size;
        let mut result = SetupResult::default();

        for id in PlayerId::both() {
            let player = &mut self.players[id];
            player.shuffle(&mut self.rng);

            let dealt = player.deal_prizes(prize_count);
            if dealt < prize_count {
                warn!("{} only had {} cards for prizes", player.name(), dealt);
            }
            for _ in 0..hand_size {
                if player.draw_card().is_err() {
                    warn!("{} ran out of cards while drawing an opening hand", player.name());
                    break;
                }
            }

            let mulligan = !player.has_basic_in_hand();
            if mulligan {
                let message = format!("{} must mulligan!", player.name());
                self.note(message);
            }
            match id {
                PlayerId::ONE => result.player1_mulligan = mulligan,
                _ => result.player2_mulligan = mulligan,
            }
        }

        if !self.config.skip_first_draw {
            let starter = self.current;
            if self.players[starter].draw_card().is_err() {
                warn!("{starter} has no card to draw for the first turn");
            }
        }

        info!(
            "setup complete (mulligans: {}, {})",
            result.player1_mulligan, result.player2_mulligan
        );
        result
    }
}
