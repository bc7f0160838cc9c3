use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("A decision is pending and must be resolved first")]
    DecisionPending,
    #[error("No decision is pending")]
    NoDecisionPending,
    #[error("Not enough points, {needed} needed but only {available} available")]
    InsufficientFunds { needed: i64, available: i64 },
    #[error("Power-up was already used this game")]
    AlreadyUsed,
    #[error("No hints left")]
    NoHintsLeft,
    #[error("No flags left")]
    NoFlagsLeft,
    #[error("No safe cell left to hint")]
    NoHintTarget,
    #[error("No unrevealed mine left to mark")]
    NoEligibleMine,
    #[error("No mine hit to undo")]
    NothingToUndo,
    #[error("Small bomb is not armed")]
    BombNotArmed,
}

pub type Result<T> = core::result::Result<T, GameError>;
