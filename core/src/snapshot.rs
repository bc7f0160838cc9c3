use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Full, self-contained view of a game for rendering or saving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    /// Row-major, `cells[index]` describes the cell at `index`.
    pub cells: Vec<CellSnapshot>,
    pub counters: Counters,
    pub status: GameStatus,
    pub pending: Option<PendingDecision>,
    pub bomb_armed: bool,
}

impl BoardSnapshot {
    pub fn from_game<S: CurrencyStore>(game: &Game<S>) -> Self {
        let size = game.size();
        let (rows, cols) = size;
        let mut cells = Vec::with_capacity(mult(rows, cols).into());
        for row in 0..rows {
            for col in 0..cols {
                cells.push(game.snapshot_at((row, col)));
            }
        }

        Self {
            size,
            cells,
            counters: *game.counters(),
            status: game.status(),
            pending: game.pending().cloned(),
            bomb_armed: game.is_bomb_armed(),
        }
    }

    pub fn cell(&self, index: CellIndex) -> Option<&CellSnapshot> {
        self.cells.get(usize::from(index))
    }

    pub fn triggering_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.triggering).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_game_maps_revealed_and_flagged_cells() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut game = Game::with_layout(Rules::default(), layout, MemoryStore::default(), 0);

        game.reveal(3).unwrap();
        game.toggle_flag(0).unwrap();

        let snapshot = BoardSnapshot::from_game(&game);

        assert_eq!(snapshot.cells.len(), 4);
        assert_eq!(
            snapshot.cell(3),
            Some(&CellSnapshot {
                is_mine: false,
                revealed: true,
                flagged: false,
                triggering: false,
                adjacent_mines: 1,
            })
        );
        assert!(snapshot.cell(0).unwrap().flagged);
        assert!(snapshot.cell(0).unwrap().is_mine);
        assert_eq!(snapshot.counters.flags_remaining, 0);
        assert_eq!(snapshot.status, GameStatus::Active);
    }

    #[test]
    fn snapshot_serializes() {
        let layout = MineLayout::from_mine_coords((1, 2), &[(0, 1)]).unwrap();
        let game = Game::with_layout(Rules::default(), layout, MemoryStore::new(5), 0);

        let json = serde_json::to_string(&BoardSnapshot::from_game(&game)).unwrap();
        let back: BoardSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back, BoardSnapshot::from_game(&game));
        assert_eq!(back.counters.total_points, 5);
    }
}
