use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications queued by the engine for the presentation layer, drained with
/// [`Game::drain_events`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Every cell went back to hidden, redraw the whole board.
    BoardReset,
    CellChanged(CellIndex),
    CountersChanged,
    /// A [`PendingDecision`] needs an answer before play continues.
    DecisionRequested,
    GameEnded { won: bool },
}
