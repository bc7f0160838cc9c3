use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    Hidden,
    Revealed(u8),
    Flagged,
    /// A mine exposed once the game is over.
    Mine,
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Everything a presentation layer needs to draw a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub is_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub triggering: bool,
    pub adjacent_mines: u8,
}
