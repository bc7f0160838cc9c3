//! Services the engine consumes but does not implement.

/// Persistent home of the cross-session currency.
///
/// Read once when a [`Game`](crate::Game) is built and written after every change
/// to its total points. Write failures are the implementor's business.
pub trait CurrencyStore {
    fn get(&self) -> i64;
    fn set(&mut self, total_points: i64);
}

/// Keeps the currency in memory, for tests and headless play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    total_points: i64,
}

impl MemoryStore {
    pub const fn new(total_points: i64) -> Self {
        Self { total_points }
    }
}

impl CurrencyStore for MemoryStore {
    fn get(&self) -> i64 {
        self.total_points
    }

    fn set(&mut self, total_points: i64) {
        self.total_points = total_points;
    }
}

/// Yes/no prompt used to gate irreversible spends.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}
