use alloc::vec::Vec;
use core::mem;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Rules engine for one minefield plus the points economy around it.
///
/// Commands either succeed, returning what changed, or fail with a
/// [`GameError`] and leave the game untouched. Every change is also queued as
/// an [`EngineEvent`] for the presentation layer.
#[derive(Clone, Debug)]
pub struct Game<S = MemoryStore> {
    pub(crate) rules: Rules,
    pub(crate) mine_layout: MineLayout,
    pub(crate) board: Array2<EngineCell>,
    pub(crate) revealed_count: CellCount,
    pub(crate) counters: Counters,
    pub(crate) status: GameStatus,
    pub(crate) triggered_mine: Option<Coord2>,
    pub(crate) pending: Option<PendingDecision>,
    pub(crate) bomb_armed: bool,
    pub(crate) rng: SmallRng,
    pub(crate) events: Vec<EngineEvent>,
    pub(crate) store: S,
}

impl<S: CurrencyStore> Game<S> {
    /// Starts a game with a random layout, reading the banked points from `store`.
    pub fn new(rules: Rules, store: S, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mine_layout = RandomLayoutGenerator::new(rng.random()).generate(rules.board);
        Self::from_parts(rules, mine_layout, store, rng)
    }

    /// Starts a game on a known layout, the board rules are taken from it.
    pub fn with_layout(mut rules: Rules, mine_layout: MineLayout, store: S, seed: u64) -> Self {
        rules.board = mine_layout.game_config();
        Self::from_parts(rules, mine_layout, store, SmallRng::seed_from_u64(seed))
    }

    fn from_parts(rules: Rules, mine_layout: MineLayout, store: S, rng: SmallRng) -> Self {
        let total_points = store.get();
        log::info!(
            "new game {:?} with {} mines, {} points banked",
            mine_layout.size(),
            mine_layout.mine_count(),
            total_points
        );

        Self {
            counters: Counters::new(&rules.economy, mine_layout.mine_count(), total_points),
            board: Array2::default(mine_layout.size().to_nd_index()),
            mine_layout,
            rules,
            revealed_count: 0,
            status: GameStatus::Active,
            triggered_mine: None,
            pending: None,
            bomb_armed: false,
            rng,
            events: Vec::new(),
            store,
        }
    }

    pub fn new_game(&mut self) {
        let mine_layout = RandomLayoutGenerator::new(self.rng.random()).generate(self.rules.board);
        self.start(mine_layout);
    }

    /// Starts over on a known layout, later [`Game::new_game`] calls keep its
    /// size and mine count.
    pub fn new_game_with_layout(&mut self, mine_layout: MineLayout) {
        self.rules.board = mine_layout.game_config();
        self.start(mine_layout);
    }

    fn start(&mut self, mine_layout: MineLayout) {
        log::info!(
            "new game {:?} with {} mines, {} points banked",
            mine_layout.size(),
            mine_layout.mine_count(),
            self.counters.total_points
        );

        self.board = Array2::default(mine_layout.size().to_nd_index());
        self.counters.reset(&self.rules.economy, mine_layout.mine_count());
        self.mine_layout = mine_layout;
        self.revealed_count = 0;
        self.status = GameStatus::Active;
        self.triggered_mine = None;
        self.pending = None;
        self.bomb_armed = false;
        self.events.clear();
        self.emit(EngineEvent::BoardReset);
        self.emit(EngineEvent::CountersChanged);
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending(&self) -> Option<&PendingDecision> {
        self.pending.as_ref()
    }

    pub fn is_bomb_armed(&self) -> bool {
        self.bomb_armed
    }

    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine.map(|coords| self.index_of(coords))
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<EngineCell> {
        let coords = self.resolve_index(index)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn cell_snapshot(&self, index: CellIndex) -> Result<CellSnapshot> {
        let coords = self.resolve_index(index)?;
        Ok(self.snapshot_at(coords))
    }

    pub(crate) fn snapshot_at(&self, coords: Coord2) -> CellSnapshot {
        let cell = self.board[coords.to_nd_index()];
        CellSnapshot {
            is_mine: self.mine_layout[coords],
            revealed: matches!(cell, EngineCell::Revealed(_) | EngineCell::Mine),
            flagged: cell == EngineCell::Flagged,
            triggering: self.triggered_mine == Some(coords),
            adjacent_mines: self.mine_layout.adjacent_mine_count(coords),
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_game(self)
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.events)
    }

    pub fn can_chord_at(&self, index: CellIndex) -> bool {
        let Ok(coords) = self.resolve_index(index) else {
            return false;
        };
        if self.check_active().is_err() {
            return false;
        }

        match self.board[coords.to_nd_index()] {
            EngineCell::Revealed(_) => {
                self.mine_layout.adjacent_mine_count(coords) == self.count_flagged_neighbors(coords)
            }
            _ => false,
        }
    }

    /// Advances the clock by one second, only while the game is active.
    pub fn tick(&mut self) -> bool {
        if self.status.is_finished() {
            return false;
        }

        self.counters.timer_seconds = self.counters.timer_seconds.saturating_add(1);
        self.emit(EngineEvent::CountersChanged);
        true
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let coords = self.resolve_index(index)?;
        self.check_active()?;

        if self.bomb_armed {
            log::debug!("reveal at {} redirected to the armed bomb", index);
            return self.detonate_at(coords);
        }

        log::debug!("reveal {}", index);
        Ok(self.reveal_cell(coords))
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        use EngineCell::*;
        use MarkOutcome::*;

        let coords = self.resolve_index(index)?;
        self.check_active()?;

        let outcome = match self.board[coords.to_nd_index()] {
            Hidden if self.counters.flags_remaining <= 0 => return Err(GameError::NoFlagsLeft),
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.counters.flags_remaining -= 1;
                Changed
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.counters.flags_remaining += 1;
                Changed
            }
            Revealed(_) | Mine => NoChange,
        };

        if outcome.has_update() {
            self.emit(EngineEvent::CellChanged(index));
            self.emit(EngineEvent::CountersChanged);
        }
        Ok(outcome)
    }

    /// Opens every hidden neighbor of a revealed cell whose flag count matches
    /// its mine count. A misplaced flag makes this hit the real mine.
    pub fn chord(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let coords = self.resolve_index(index)?;
        self.check_active()?;

        if !matches!(self.board[coords.to_nd_index()], EngineCell::Revealed(_)) {
            return Ok(RevealOutcome::NoChange);
        }
        if self.mine_layout.adjacent_mine_count(coords) != self.count_flagged_neighbors(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        let targets: Vec<Coord2> = self
            .board
            .iter_neighbor_cells_with_index(coords)
            .filter(|&(_, cell)| cell == EngineCell::Hidden)
            .map(|(pos, _)| pos)
            .collect();

        log::debug!("chord {} opens {} neighbors", index, targets.len());
        Ok(self.reveal_sequence(targets))
    }

    /// Answers the pending decision.
    pub fn resolve(&mut self, accept: bool) -> Result<RevealOutcome> {
        self.check_not_finished()?;
        let decision = self.pending.take().ok_or(GameError::NoDecisionPending)?;
        log::debug!("decision {:?} accepted: {}", decision, accept);

        Ok(match decision {
            PendingDecision::Rescue {
                index, remaining, ..
            } => {
                let coords = self.coords_of(index);
                if accept {
                    self.rescue(coords, remaining)
                } else {
                    self.lose_at(coords)
                }
            }
            PendingDecision::SmallBomb { .. } => {
                self.bomb_armed = accept;
                RevealOutcome::NoChange
            }
        })
    }

    /// Answers the pending decision by asking `prompt`.
    pub fn resolve_with(&mut self, prompt: &mut impl Confirm) -> Result<RevealOutcome> {
        let message = self
            .pending
            .as_ref()
            .ok_or(GameError::NoDecisionPending)?
            .message();
        let accept = prompt.confirm(&message);
        self.resolve(accept)
    }

    /// Debug action: ends the game as if the first unflagged mine was hit.
    pub fn trigger_instant_loss(&mut self) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        let mines = self.mine_layout.mine_indices();
        let target = mines
            .iter()
            .copied()
            .find(|&index| {
                self.board[self.coords_of(index).to_nd_index()] != EngineCell::Flagged
            })
            .or_else(|| mines.first().copied());

        log::debug!("instant loss on {:?}", target);
        match target {
            Some(index) => Ok(self.lose_at(self.coords_of(index))),
            None => {
                self.end_game(false);
                Ok(RevealOutcome::HitMine)
            }
        }
    }

    pub(crate) fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        match (self.board[coords.to_nd_index()], self.mine_layout[coords]) {
            (EngineCell::Hidden, true) => self.hit_mine(coords, Vec::new()),
            (EngineCell::Hidden, false) => self.open_safe(coords),
            _ => RevealOutcome::NoChange,
        }
    }

    /// Reveals `targets` one after the other, stopping once the game ends or a
    /// rescue is offered. The unvisited rest rides along with the offer.
    pub(crate) fn reveal_sequence(&mut self, targets: Vec<Coord2>) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut targets = targets.into_iter();

        while let Some(coords) = targets.next() {
            if self.status.is_finished() || self.pending.is_some() {
                break;
            }

            let step = if self.board[coords.to_nd_index()] == EngineCell::Hidden
                && self.mine_layout[coords]
            {
                let remaining: Vec<CellIndex> =
                    targets.by_ref().map(|pos| self.index_of(pos)).collect();
                self.hit_mine(coords, remaining)
            } else {
                self.reveal_cell(coords)
            };
            outcome = outcome | step;
        }

        outcome
    }

    fn hit_mine(&mut self, coords: Coord2, remaining: Vec<CellIndex>) -> RevealOutcome {
        let cost = self.rules.economy.undo_cost;

        if self.counters.undo_available && self.counters.can_afford(cost) {
            let index = self.index_of(coords);
            log::debug!("mine hit at {}, offering rescue", index);
            self.pending = Some(PendingDecision::Rescue {
                index,
                cost,
                remaining,
            });
            self.emit(EngineEvent::DecisionRequested);
            RevealOutcome::RescueOffered
        } else {
            self.lose_at(coords)
        }
    }

    pub(crate) fn lose_at(&mut self, coords: Coord2) -> RevealOutcome {
        self.triggered_mine = Some(coords);
        self.end_game(false);
        RevealOutcome::HitMine
    }

    fn open_safe(&mut self, coords: Coord2) -> RevealOutcome {
        let region = flood_region(&self.mine_layout, &self.board, coords);
        if region.is_empty() {
            return RevealOutcome::NoChange;
        }

        for &pos in &region {
            let adjacent_mines = self.mine_layout.adjacent_mine_count(pos);
            self.board[pos.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
            self.revealed_count += 1;
            let index = self.index_of(pos);
            self.emit(EngineEvent::CellChanged(index));
        }

        // a region never exceeds the cell count
        let reward = self
            .rules
            .economy
            .reveal_reward
            .saturating_mul(region.len() as u32);
        self.counters.points = self.counters.points.saturating_add(reward);
        self.credit(reward);

        if self.revealed_count >= self.mine_layout.safe_cell_count() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub(crate) fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        if won {
            self.triggered_mine = None;
        }
        self.pending = None;
        self.bomb_armed = false;
        self.expose_board();

        log::info!(
            "game {} after {}s with {} points",
            if won { "won" } else { "lost" },
            self.counters.timer_seconds,
            self.counters.points
        );
        self.emit(EngineEvent::GameEnded { won });
    }

    /// Shows every mine, unflagged, and every safe cell with its number.
    fn expose_board(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let exposed = if self.mine_layout[coords] {
                    EngineCell::Mine
                } else {
                    EngineCell::Revealed(self.mine_layout.adjacent_mine_count(coords))
                };

                if self.board[coords.to_nd_index()] != exposed {
                    self.board[coords.to_nd_index()] = exposed;
                    let index = self.index_of(coords);
                    self.emit(EngineEvent::CellChanged(index));
                }
            }
        }
    }

    pub(crate) fn credit(&mut self, amount: u32) {
        self.set_total_points(self.counters.total_points + i64::from(amount));
    }

    pub(crate) fn debit(&mut self, amount: u32) {
        self.set_total_points(self.counters.total_points - i64::from(amount));
    }

    fn set_total_points(&mut self, total_points: i64) {
        self.counters.total_points = total_points;
        self.store.set(total_points);
        self.emit(EngineEvent::CountersChanged);
    }

    /// Queues `event`, `CountersChanged` at most once per drain.
    pub(crate) fn emit(&mut self, event: EngineEvent) {
        if event == EngineEvent::CountersChanged && self.events.contains(&event) {
            return;
        }
        self.events.push(event);
    }

    pub(crate) fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.board
            .iter_neighbor_cells(coords)
            .filter(|&cell| cell == EngineCell::Flagged)
            .count() as u8
    }

    pub(crate) fn resolve_index(&self, index: CellIndex) -> Result<Coord2> {
        self.mine_layout.validate_index(index)
    }

    pub(crate) fn index_of(&self, coords: Coord2) -> CellIndex {
        self.mine_layout.index_of(coords)
    }

    pub(crate) fn coords_of(&self, index: CellIndex) -> Coord2 {
        to_coords(index, self.size().1)
    }

    pub(crate) fn check_active(&self) -> Result<()> {
        self.check_not_finished()?;
        if self.pending.is_some() {
            Err(GameError::DecisionPending)
        } else {
            Ok(())
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[CellIndex]) -> Game {
        game_with_points(size, mines, 0)
    }

    fn game_with_points(size: Coord2, mines: &[CellIndex], points: i64) -> Game {
        let layout = MineLayout::from_mine_indices(size, mines).unwrap();
        Game::with_layout(Rules::default(), layout, MemoryStore::new(points), 0)
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggering_cell() {
        let mut game = game((2, 2), &[0]);

        let outcome = game.reveal(0).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), Some(0));
        assert_eq!(game.snapshot().triggering_count(), 1);
    }

    #[test]
    fn reveal_awards_points_per_opened_cell() {
        let mut game = game_with_points((3, 3), &[8], 100);

        assert_eq!(game.reveal(7).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.counters().points, 10);
        assert_eq!(game.counters().total_points, 110);
        assert_eq!(game.store().get(), 110);
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut game = game((3, 3), &[8]);

        let outcome = game.reveal(0).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(game.counters().points, 80);
        assert_eq!(game.cell_at(0).unwrap(), EngineCell::Revealed(0));
        assert_eq!(game.cell_at(4).unwrap(), EngineCell::Revealed(1));
        assert_eq!(game.cell_at(8).unwrap(), EngineCell::Mine);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut game = game((3, 3), &[0, 8]);

        assert_eq!(game.reveal(4).unwrap(), RevealOutcome::Revealed);
        let counters = *game.counters();

        assert_eq!(game.reveal(4).unwrap(), RevealOutcome::NoChange);
        assert_eq!(*game.counters(), counters);
    }

    #[test]
    fn reveal_ignores_flagged_cells() {
        let mut game = game((2, 2), &[0]);

        game.toggle_flag(0).unwrap();

        assert_eq!(game.reveal(0).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.status(), GameStatus::Active);
    }

    #[test]
    fn reveal_rejects_out_of_range_index() {
        let mut game = game((2, 2), &[0]);

        assert_eq!(game.reveal(4), Err(GameError::InvalidIndex));
    }

    #[test]
    fn winning_small_board() {
        let mut game = game((2, 2), &[3]);

        assert_eq!(game.reveal(0).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.reveal(1).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.reveal(2).unwrap(), RevealOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.triggered_mine(), None);
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut game = game((2, 2), &[3]);
        game.reveal(3).unwrap();

        assert_eq!(game.reveal(0), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag(0), Err(GameError::AlreadyEnded));
        assert_eq!(game.chord(0), Err(GameError::AlreadyEnded));
        assert!(!game.tick());
    }

    #[test]
    fn losing_exposes_board_and_drops_flags() {
        let mut game = game((3, 3), &[0, 2]);
        game.toggle_flag(2).unwrap();
        game.toggle_flag(5).unwrap();

        game.reveal(0).unwrap();

        let snapshot = game.snapshot();
        for cell in &snapshot.cells {
            assert!(cell.revealed);
            assert!(!cell.flagged);
        }
        assert!(snapshot.cells[2].is_mine);
        assert_eq!(snapshot.cells[5].adjacent_mines, 1);
        assert_eq!(snapshot.triggering_count(), 1);
    }

    #[test]
    fn toggle_flag_tracks_remaining_flags() {
        let mut game = game((2, 2), &[0]);

        assert_eq!(game.toggle_flag(1).unwrap(), MarkOutcome::Changed);
        assert_eq!(game.counters().flags_remaining, 0);
        assert_eq!(game.toggle_flag(2), Err(GameError::NoFlagsLeft));
        assert_eq!(game.toggle_flag(1).unwrap(), MarkOutcome::Changed);
        assert_eq!(game.counters().flags_remaining, 1);
    }

    #[test]
    fn toggle_flag_ignores_revealed_cells() {
        let mut game = game((2, 2), &[0]);
        game.reveal(3).unwrap();

        assert_eq!(game.toggle_flag(3).unwrap(), MarkOutcome::NoChange);
    }

    #[test]
    fn chord_reveal_uses_flagged_neighbors() {
        // mines left and right of the center
        let mut game = game((3, 3), &[3, 5]);

        game.reveal(4).unwrap();
        game.toggle_flag(3).unwrap();
        game.toggle_flag(5).unwrap();

        assert!(game.can_chord_at(4));
        let outcome = game.chord(4).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(game.cell_at(1).unwrap(), EngineCell::Revealed(2));
        assert_eq!(game.cell_at(7).unwrap(), EngineCell::Revealed(2));
    }

    #[test]
    fn chord_with_misplaced_flag_loses() {
        let mut game = game((3, 3), &[0]);

        game.reveal(4).unwrap();
        game.toggle_flag(2).unwrap();

        let outcome = game.chord(4).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), Some(0));
    }

    #[test]
    fn chord_needs_matching_flag_count() {
        let mut game = game((3, 3), &[0, 8]);

        game.reveal(4).unwrap();
        game.toggle_flag(0).unwrap();

        assert!(!game.can_chord_at(4));
        assert_eq!(game.chord(4).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.chord(1).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn tick_counts_seconds_while_active() {
        let mut game = game((2, 2), &[0]);

        assert!(game.tick());
        assert!(game.tick());
        assert_eq!(game.counters().timer_seconds, 2);

        game.trigger_instant_loss().unwrap();

        assert!(!game.tick());
        assert_eq!(game.counters().timer_seconds, 2);
    }

    #[test]
    fn instant_loss_marks_first_unflagged_mine() {
        let mut game = game((3, 3), &[1, 4, 7]);
        game.toggle_flag(1).unwrap();

        assert_eq!(game.trigger_instant_loss().unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.triggered_mine(), Some(4));
        assert_eq!(game.trigger_instant_loss(), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn instant_loss_with_every_mine_flagged_uses_first_mine() {
        let mut game = game((2, 2), &[2]);
        game.toggle_flag(2).unwrap();

        game.trigger_instant_loss().unwrap();

        assert_eq!(game.triggered_mine(), Some(2));
    }

    #[test]
    fn new_game_resets_entitlements_but_keeps_total_points() {
        let mut game = Game::new(Rules::default(), MemoryStore::new(300), 42);
        game.tick();
        game.buy_extra_flag().unwrap();
        game.trigger_instant_loss().unwrap();

        game.new_game();

        let counters = game.counters();
        assert_eq!(counters.total_points, 100);
        assert_eq!(counters.points, 0);
        assert_eq!(counters.timer_seconds, 0);
        assert_eq!(counters.flags_remaining, 60);
        assert_eq!(counters.hints_remaining, 3);
        assert!(counters.undo_available);
        assert!(counters.small_bomb_available);
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.mine_layout().mine_count(), 60);
    }

    #[test]
    fn events_report_changes_in_order() {
        let mut game = game((2, 2), &[3]);
        game.drain_events();

        game.toggle_flag(3).unwrap();
        game.reveal(0).unwrap();

        assert_eq!(
            game.drain_events(),
            [
                EngineEvent::CellChanged(3),
                EngineEvent::CountersChanged,
                EngineEvent::CellChanged(0),
            ]
        );

        game.reveal(1).unwrap();
        game.reveal(2).unwrap();
        let events = game.drain_events();

        assert_eq!(events.last(), Some(&EngineEvent::GameEnded { won: true }));
        assert!(events.contains(&EngineEvent::CellChanged(3)));
    }

    #[test]
    fn new_game_with_layout_adopts_its_board() {
        let mut game = Game::new(Rules::default(), MemoryStore::new(30), 5);
        let layout = MineLayout::from_mine_indices((3, 4), &[0, 11]).unwrap();

        game.new_game_with_layout(layout);

        assert_eq!(game.size(), (3, 4));
        assert_eq!(game.rules().board, GameConfig::new((3, 4), 2));
        assert_eq!(game.counters().flags_remaining, 2);
        assert_eq!(game.counters().total_points, 30);

        game.new_game();

        assert_eq!(game.size(), (3, 4));
        assert_eq!(game.mine_layout().mine_count(), 2);
    }
}
