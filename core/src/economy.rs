use serde::{Deserialize, Serialize};

use crate::*;

/// Prices and allowances of the points economy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Points earned for every safe cell the player opens.
    pub reveal_reward: u32,
    pub hints_per_game: u8,
    pub extra_flag_cost: u32,
    pub reveal_mine_cost: u32,
    pub undo_cost: u32,
    pub small_bomb_cost: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            reveal_reward: 10,
            hints_per_game: 3,
            extra_flag_cost: 200,
            reveal_mine_cost: 500,
            undo_cost: 999,
            small_bomb_cost: 599,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub board: GameConfig,
    pub economy: EconomyConfig,
}

/// Scores, timer and per-game entitlements.
///
/// Everything except `total_points` is reset by a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub points: u32,
    pub total_points: i64,
    pub timer_seconds: u32,
    /// Can go below zero when power-ups place flags.
    pub flags_remaining: i32,
    pub hints_remaining: u8,
    pub undo_available: bool,
    pub small_bomb_available: bool,
}

impl Counters {
    pub fn new(economy: &EconomyConfig, mines: CellCount, total_points: i64) -> Self {
        Self {
            points: 0,
            total_points,
            timer_seconds: 0,
            flags_remaining: mines.into(),
            hints_remaining: economy.hints_per_game,
            undo_available: true,
            small_bomb_available: true,
        }
    }

    pub fn reset(&mut self, economy: &EconomyConfig, mines: CellCount) {
        *self = Self::new(economy, mines, self.total_points);
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.total_points >= i64::from(cost)
    }

    pub(crate) fn require_funds(&self, cost: u32) -> Result<()> {
        if self.can_afford(cost) {
            Ok(())
        } else {
            Err(GameError::InsufficientFunds {
                needed: cost.into(),
                available: self.total_points,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_total_points() {
        let economy = EconomyConfig::default();
        let mut counters = Counters::new(&economy, 60, 1234);
        counters.points = 50;
        counters.hints_remaining = 0;
        counters.undo_available = false;
        counters.flags_remaining = -2;

        counters.reset(&economy, 60);

        assert_eq!(counters, Counters::new(&economy, 60, 1234));
    }

    #[test]
    fn funds_check_is_inclusive() {
        let counters = Counters::new(&EconomyConfig::default(), 1, 200);

        assert!(counters.can_afford(200));
        assert_eq!(
            counters.require_funds(201),
            Err(GameError::InsufficientFunds {
                needed: 201,
                available: 200
            })
        );
    }

    #[test]
    fn rules_deserialize_from_json() {
        let rules: Rules = serde_json::from_str(
            r#"{
                "board": { "size": [9, 9], "mines": 10 },
                "economy": {
                    "reveal_reward": 5,
                    "hints_per_game": 1,
                    "extra_flag_cost": 100,
                    "reveal_mine_cost": 250,
                    "undo_cost": 500,
                    "small_bomb_cost": 300
                }
            }"#,
        )
        .unwrap();

        assert_eq!(rules.board, GameConfig::new((9, 9), 10));
        assert_eq!(rules.economy.hints_per_game, 1);
    }
}
