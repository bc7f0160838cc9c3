use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// A spend the player has to confirm before the engine carries on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingDecision {
    /// A mine was hit at `index` while the undo power-up was affordable.
    Rescue {
        index: CellIndex,
        cost: u32,
        /// Cells a chord still has to open once this is settled.
        remaining: Vec<CellIndex>,
    },
    /// Arming the small bomb, the next reveal picks its target.
    SmallBomb { cost: u32 },
}

impl PendingDecision {
    pub fn message(&self) -> String {
        match self {
            Self::Rescue { cost, .. } => format!(
                "You hit a mine! Would you like to use Undo Mine for {cost} points to save yourself? (Can only be used once per game)"
            ),
            Self::SmallBomb { cost } => format!(
                "Would you like to use the Small Bomb for {cost} points? It will reveal a 3x3 area and flag mines. (Can only be used once per game)"
            ),
        }
    }
}
