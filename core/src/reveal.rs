use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Cells a reveal at `start` opens: `start` itself and, when it has no adjacent
/// mines, the connected zero region together with its numbered border.
///
/// Flagged and already revealed cells are never entered and no cell is visited
/// twice. Empty when `start` is not a hidden safe cell.
pub fn flood_region(layout: &MineLayout, board: &Array2<EngineCell>, start: Coord2) -> Vec<Coord2> {
    if board[start.to_nd_index()] != EngineCell::Hidden || layout[start] {
        return Vec::new();
    }

    let mut region = Vec::new();
    let mut visited = BTreeSet::from([start]);
    let mut to_visit = VecDeque::from([start]);

    while let Some(visit_coords) = to_visit.pop_front() {
        region.push(visit_coords);

        if layout.adjacent_mine_count(visit_coords) > 0 {
            continue;
        }

        for pos in layout.iter_neighbors(visit_coords) {
            if board[pos.to_nd_index()] == EngineCell::Hidden && !layout[pos] && visited.insert(pos)
            {
                to_visit.push_back(pos);
            }
        }
    }

    log::trace!("flood from {:?} opens {} cells", start, region.len());
    region
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_board(layout: &MineLayout) -> Array2<EngineCell> {
        Array2::default(layout.size().to_nd_index())
    }

    #[test]
    fn numbered_start_opens_only_itself() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        let board = hidden_board(&layout);

        assert_eq!(flood_region(&layout, &board, (1, 1)), [(1, 1)]);
    }

    #[test]
    fn zero_start_opens_region_and_border() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        let board = hidden_board(&layout);

        let region = flood_region(&layout, &board, (0, 0));

        assert_eq!(region.len(), 8);
        assert!(!region.contains(&(2, 2)));
    }

    #[test]
    fn flags_and_revealed_cells_stop_the_flood() {
        let layout = MineLayout::from_mine_coords((1, 5), &[]).unwrap();
        let mut board = hidden_board(&layout);
        board[[0, 2]] = EngineCell::Flagged;
        board[[0, 4]] = EngineCell::Revealed(0);

        assert_eq!(flood_region(&layout, &board, (0, 0)), [(0, 0), (0, 1)]);
        assert_eq!(flood_region(&layout, &board, (0, 3)), [(0, 3)]);
        assert!(flood_region(&layout, &board, (0, 4)).is_empty());
    }

    #[test]
    fn mine_start_opens_nothing() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let board = hidden_board(&layout);

        assert!(flood_region(&layout, &board, (0, 0)).is_empty());
    }

    #[test]
    fn open_board_is_visited_once_per_cell() {
        let layout = MineLayout::from_mine_coords((20, 20), &[]).unwrap();
        let board = hidden_board(&layout);

        let region = flood_region(&layout, &board, (10, 10));
        let unique: BTreeSet<_> = region.iter().copied().collect();

        assert_eq!(region.len(), 400);
        assert_eq!(unique.len(), 400);
    }
}
