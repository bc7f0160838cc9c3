//! Hints and everything bought with points.

use alloc::vec::Vec;
use rand::seq::IndexedRandom;

use crate::*;

impl<S: CurrencyStore> Game<S> {
    /// Reveals a safe cell chosen by [`Game::hint_index`].
    pub fn use_hint(&mut self) -> Result<RevealOutcome> {
        self.check_active()?;
        if self.counters.hints_remaining == 0 {
            return Err(GameError::NoHintsLeft);
        }

        let coords = self.hint_target().ok_or(GameError::NoHintTarget)?;
        self.counters.hints_remaining -= 1;
        self.emit(EngineEvent::CountersChanged);

        log::debug!("hint opens {}", self.index_of(coords));
        Ok(self.reveal_cell(coords))
    }

    /// The cell the next hint would open, if any.
    pub fn hint_index(&self) -> Option<CellIndex> {
        self.hint_target().map(|coords| self.index_of(coords))
    }

    /// Prefers hidden safe cells on the revealed frontier that will show a 2 or
    /// a 3 and still have at least 3 hidden safe neighbors, weighting 2s double.
    /// Ties go to the lowest index. Without such a cell, the lowest-index
    /// hidden safe cell.
    fn hint_target(&self) -> Option<Coord2> {
        let (rows, cols) = self.size();
        let mut best: Option<(usize, Coord2)> = None;
        let mut fallback = None;

        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !self.is_hidden_safe(coords) {
                    continue;
                }
                fallback.get_or_insert(coords);

                let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
                if !(2..=3).contains(&adjacent_mines) {
                    continue;
                }

                let empty_neighbors = self
                    .mine_layout
                    .iter_neighbors(coords)
                    .filter(|&pos| self.is_hidden_safe(pos))
                    .count();
                let on_frontier = self
                    .board
                    .iter_neighbor_cells(coords)
                    .any(|cell| matches!(cell, EngineCell::Revealed(_)));
                if empty_neighbors < 3 || !on_frontier {
                    continue;
                }

                let weight = if adjacent_mines == 2 { 2 } else { 1 };
                let score = weight * empty_neighbors;
                if best.is_none_or(|(best_score, _)| score > best_score) {
                    best = Some((score, coords));
                }
            }
        }

        best.map(|(_, coords)| coords).or(fallback)
    }

    fn is_hidden_safe(&self, coords: Coord2) -> bool {
        self.board[coords.to_nd_index()] == EngineCell::Hidden && !self.mine_layout[coords]
    }

    /// Accepts a pending rescue. There is nothing else to undo during play, so
    /// without one this fails after checking the usual entitlements.
    pub fn use_undo(&mut self) -> Result<RevealOutcome> {
        if matches!(self.pending, Some(PendingDecision::Rescue { .. })) {
            return self.resolve(true);
        }

        self.check_active()?;
        if !self.counters.undo_available {
            return Err(GameError::AlreadyUsed);
        }
        self.counters.require_funds(self.rules.economy.undo_cost)?;
        Err(GameError::NothingToUndo)
    }

    /// Pays for the undo, turns the mine at `coords` into a safe cell, opens it
    /// and then carries on with whatever a chord still had queued.
    pub(crate) fn rescue(&mut self, coords: Coord2, remaining: Vec<CellIndex>) -> RevealOutcome {
        self.debit(self.rules.economy.undo_cost);
        self.counters.undo_available = false;
        self.mine_layout.remove_mine(coords);
        self.refresh_numbers_around(coords);
        log::info!("undo saved the player at {}", self.index_of(coords));

        let outcome = self.reveal_cell(coords);
        let remaining = remaining
            .into_iter()
            .map(|index| self.coords_of(index))
            .collect();
        outcome | self.reveal_sequence(remaining)
    }

    /// Revealed neighbors of a removed mine now show one less.
    fn refresh_numbers_around(&mut self, coords: Coord2) {
        let neighbors: Vec<Coord2> = self.mine_layout.iter_neighbors(coords).collect();
        for pos in neighbors {
            if let EngineCell::Revealed(_) = self.board[pos.to_nd_index()] {
                let adjacent_mines = self.mine_layout.adjacent_mine_count(pos);
                self.board[pos.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
                let index = self.index_of(pos);
                self.emit(EngineEvent::CellChanged(index));
            }
        }
    }

    /// Adds one to the flag allowance, no flag is placed.
    pub fn buy_extra_flag(&mut self) -> Result<MarkOutcome> {
        self.check_active()?;
        let cost = self.rules.economy.extra_flag_cost;
        self.counters.require_funds(cost)?;

        self.debit(cost);
        self.counters.flags_remaining += 1;
        log::debug!("bought an extra flag for {}", cost);
        Ok(MarkOutcome::Changed)
    }

    /// Flags a random hidden mine and returns its index. Only charged when
    /// such a mine exists.
    pub fn buy_reveal_mine(&mut self) -> Result<CellIndex> {
        self.check_active()?;
        let cost = self.rules.economy.reveal_mine_cost;
        self.counters.require_funds(cost)?;

        let candidates: Vec<CellIndex> = self
            .mine_layout
            .mine_indices()
            .into_iter()
            .filter(|&index| {
                self.board[self.coords_of(index).to_nd_index()] == EngineCell::Hidden
            })
            .collect();
        let &index = candidates
            .choose(&mut self.rng)
            .ok_or(GameError::NoEligibleMine)?;

        self.debit(cost);
        let coords = self.coords_of(index);
        self.board[coords.to_nd_index()] = EngineCell::Flagged;
        self.counters.flags_remaining -= 1;
        self.emit(EngineEvent::CellChanged(index));
        log::debug!("bought mine location {}", index);
        Ok(index)
    }

    /// Asks to arm the small bomb, see [`PendingDecision::SmallBomb`]. Once
    /// accepted the next [`Game::reveal`] detonates instead.
    pub fn arm_small_bomb(&mut self) -> Result<MarkOutcome> {
        self.check_active()?;
        if !self.counters.small_bomb_available {
            return Err(GameError::AlreadyUsed);
        }
        if self.bomb_armed {
            return Ok(MarkOutcome::NoChange);
        }
        let cost = self.rules.economy.small_bomb_cost;
        self.counters.require_funds(cost)?;

        self.pending = Some(PendingDecision::SmallBomb { cost });
        self.emit(EngineEvent::DecisionRequested);
        Ok(MarkOutcome::Changed)
    }

    pub fn cancel_small_bomb(&mut self) -> Result<MarkOutcome> {
        self.check_active()?;
        if !self.bomb_armed {
            return Ok(MarkOutcome::NoChange);
        }
        self.bomb_armed = false;
        Ok(MarkOutcome::Changed)
    }

    pub fn detonate_small_bomb(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let coords = self.resolve_index(index)?;
        self.check_active()?;
        if !self.bomb_armed {
            return Err(GameError::BombNotArmed);
        }
        self.detonate_at(coords)
    }

    /// Flags every hidden mine in the 3×3 block around `center` and reveals
    /// the rest. Flags may run negative here.
    pub(crate) fn detonate_at(&mut self, center: Coord2) -> Result<RevealOutcome> {
        let cost = self.rules.economy.small_bomb_cost;
        self.counters.require_funds(cost)?;

        self.bomb_armed = false;
        self.counters.small_bomb_available = false;
        self.debit(cost);
        log::info!("small bomb detonated at {}", self.index_of(center));

        let area: Vec<Coord2> = self.board.iter_area(center).collect();
        let mut outcome = RevealOutcome::NoChange;
        for pos in area {
            if self.status.is_finished() {
                break;
            }

            if !self.mine_layout[pos] {
                outcome = outcome | self.reveal_cell(pos);
            } else if self.board[pos.to_nd_index()] == EngineCell::Hidden {
                self.board[pos.to_nd_index()] = EngineCell::Flagged;
                self.counters.flags_remaining -= 1;
                let index = self.index_of(pos);
                self.emit(EngineEvent::CellChanged(index));
            }
        }

        Ok(outcome)
    }
}
