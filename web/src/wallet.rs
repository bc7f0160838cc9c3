use mineshop_core::CurrencyStore;
use serde::{Deserialize, Serialize};

use crate::utils::*;

/// Total points kept in the browser across games and reloads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct LocalStorageWallet {
    total_points: i64,
}

impl StorageKey for LocalStorageWallet {
    const KEY: &'static str = "mineshop:points";
}

impl CurrencyStore for LocalStorageWallet {
    fn get(&self) -> i64 {
        self.total_points
    }

    fn set(&mut self, total_points: i64) {
        self.total_points = total_points;
        self.local_save();
    }
}
