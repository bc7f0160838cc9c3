use crate::settings;
use crate::utils::*;
use crate::wallet::LocalStorageWallet;
use bitflags::bitflags;
use clap::Args;
use gloo::dialogs::{alert, confirm};
use gloo::timers::callback::{Interval, Timeout};
use mineshop_core as game;
use game::{CellIndex, CurrencyStore, EngineCell, GameError, GameStatus, PendingDecision};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Revealed(u8),
    Flagged,
    TriggeredMine,
    Mine,
}

fn view_cell_state<S: CurrencyStore>(game: &game::Game<S>, index: CellIndex) -> ViewCellState {
    if game.triggered_mine() == Some(index) {
        return ViewCellState::TriggeredMine;
    }

    match game.cell_at(index) {
        Ok(EngineCell::Revealed(count)) => ViewCellState::Revealed(count),
        Ok(EngineCell::Flagged) => ViewCellState::Flagged,
        Ok(EngineCell::Mine) => ViewCellState::Mine,
        Ok(EngineCell::Hidden) | Err(_) => ViewCellState::Hidden,
    }
}

/// Which buttons can be pressed right now.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Controls {
    hint: bool,
    extra_flag: bool,
    reveal_mine: bool,
    undo: bool,
    small_bomb: bool,
    instant_loss: bool,
}

impl Controls {
    fn of<S: CurrencyStore>(game: &game::Game<S>) -> Self {
        let playable = game.status().is_active() && game.pending().is_none();
        let counters = game.counters();
        let economy = &game.rules().economy;

        Self {
            hint: playable && counters.hints_remaining > 0,
            extra_flag: playable && counters.can_afford(economy.extra_flag_cost),
            reveal_mine: playable && counters.can_afford(economy.reveal_mine_cost),
            undo: playable && counters.undo_available && counters.can_afford(economy.undo_cost),
            // an armed bomb can always be called off
            small_bomb: playable
                && (game.is_bomb_armed()
                    || (counters.small_bomb_available
                        && counters.can_afford(economy.small_bomb_cost))),
            instant_loss: !game.is_finished(),
        }
    }
}

/// The configured mine count, unchanged by a rescue.
fn mines_label<S: CurrencyStore>(game: &game::Game<S>) -> String {
    format!("Mines: {}", game.rules().board.mines)
}

/// What to tell the player once they said yes to `decision`.
fn acceptance_notice(decision: &PendingDecision) -> String {
    match decision {
        PendingDecision::Rescue { cost, .. } => {
            format!("Undo power used! You were saved from a mine! 🛡️\n-{cost} points")
        }
        PendingDecision::SmallBomb { .. } => {
            "Click where you want to drop the small bomb!".to_string()
        }
    }
}

fn refusal_notice(err: GameError) -> Option<&'static str> {
    match err {
        GameError::NoEligibleMine => Some("No unrevealed mines to show!"),
        GameError::NothingToUndo => {
            Some("Nothing to undo yet, you will be offered Undo Mine when you hit a mine.")
        }
        _ => None,
    }
}

/// Shows `message` after the pending render instead of blocking it.
fn notify(message: String) {
    Timeout::new(0, move || alert(&message)).forget();
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    index: CellIndex,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
    DoubleClick(CellIndex),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Tick,
    NewGame,
    Hint,
    BuyExtraFlag,
    BuyRevealMine,
    Undo,
    SmallBomb,
    InstantLoss,
    ToggleDoubleClick,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: CellIndex,
    cell_state: ViewCellState,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        index,
        cell_state,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell_state {
            Hidden => classes!(),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Flagged => classes!("flag"),
            TriggeredMine => classes!("open", "mine", "oops"),
            Mine => classes!("open", "mine"),
        }
    );
    if pressed {
        class.push("open");
    }
    let label = match cell_state {
        Revealed(count @ 1..) => count.to_string(),
        _ => String::new(),
    };

    let pointer_callback = |kind: &'static str| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Update(CellPointerState { index, buttons }));
            log::trace!("{} mouse {} ({:?})", index, kind, buttons);
        })
    };
    let onmousedown = pointer_callback("down");
    let onmouseup = pointer_callback("up");
    let onmouseenter = pointer_callback("enter");

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(CellMsg::Leave))
    };

    let ondblclick = Callback::from(move |_: MouseEvent| callback.emit(CellMsg::DoubleClick(index)));

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave} {ondblclick}>{label}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    game: game::Game<LocalStorageWallet>,
    current_cell_state: Option<CellPointerState>,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::Tick))
    }

    fn reveal_cell(&mut self, index: CellIndex) -> bool {
        let was_armed = self.game.is_bomb_armed();
        let result = self.game.reveal(index);
        if was_armed && result.is_ok() {
            notify("Small Bomb detonated! 3x3 area revealed and mines flagged! 💣".to_string());
        }
        self.settle("reveal", result)
    }

    fn chord_cell(&mut self, index: CellIndex) -> bool {
        if !self.settings.double_click_chord {
            return false;
        }
        let result = self.game.chord(index);
        self.settle("chord", result)
    }

    /// Logs the result, asks the player about anything left pending and
    /// reports whether the board needs a redraw.
    fn settle<T: std::fmt::Debug>(&mut self, action: &str, result: game::Result<T>) -> bool {
        match result {
            Ok(outcome) => log::debug!("{}: {:?}", action, outcome),
            Err(err) => {
                log::debug!("{} refused: {}", action, err);
                if let Some(notice) = refusal_notice(err) {
                    notify(notice.to_string());
                }
            }
        }

        self.answer_decisions();
        self.flush_events()
    }

    fn answer_decisions(&mut self) {
        while let Some(decision) = self.game.pending().cloned() {
            let mut accepted = false;
            let result = self.game.resolve_with(&mut |message: &str| {
                accepted = confirm(message);
                accepted
            });

            match result {
                Ok(outcome) => {
                    log::debug!("{:?} accepted: {}, {:?}", decision, accepted, outcome);
                    if accepted {
                        notify(acceptance_notice(&decision));
                    }
                }
                Err(err) => {
                    log::error!("could not settle {:?}: {}", decision, err);
                    break;
                }
            }
        }
    }

    fn flush_events(&mut self) -> bool {
        let events = self.game.drain_events();
        for event in &events {
            if let game::EngineEvent::GameEnded { won } = event {
                log::info!("game ended, won: {}", won);
                notify(if *won { "Congratulations! You won! 🎉" } else { "Game Over! 💥" }.to_string());
            }
        }
        !events.is_empty()
    }

    fn is_pressed(&self, index: CellIndex, cell_state: ViewCellState) -> bool {
        const fn is_neighbor(a: game::Coord2, b: game::Coord2) -> bool {
            (a.0.abs_diff(b.0) <= 1) && (a.1.abs_diff(b.1) <= 1)
        }
        let cols = self.game.size().1;

        match (self.current_cell_state, cell_state) {
            (_, _) if !self.game.status().is_active() => false,
            (
                Some(CellPointerState {
                    index: pressed,
                    buttons: MouseButtons::LEFT,
                }),
                ViewCellState::Hidden,
            ) if pressed == index => true,
            (
                Some(CellPointerState {
                    index: pressed,
                    buttons: MouseButtons::LEFT,
                }),
                ViewCellState::Hidden,
            ) if is_neighbor(game::to_coords(pressed, cols), game::to_coords(index, cols)) => {
                self.settings.double_click_chord && self.game.can_chord_at(pressed)
            }
            _ => false,
        }
    }

    fn get_game_state_class(&self) -> Classes {
        classes!(match self.game.status() {
            GameStatus::Active if self.game.is_bomb_armed() => "armed",
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let wallet = LocalStorageWallet::local_or_default();
        let mut game = game::Game::new(game::Rules::default(), wallet, seed);
        game.drain_events();

        Self {
            settings: LocalOrDefault::local_or_default(),
            game,
            current_cell_state: None,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Leave) => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            CellEvent(DoubleClick(index)) => self.chord_cell(index),
            CellEvent(Update(cell_state)) => {
                log::trace!("cell update: {:?}", cell_state);
                if cell_state.buttons.is_empty() {
                    match self.current_cell_state.take() {
                        None => false,
                        Some(CellPointerState { index, buttons }) => match buttons {
                            MouseButtons::LEFT => {
                                self.reveal_cell(index);
                                true
                            }
                            MouseButtons::RIGHT => {
                                let result = self.game.toggle_flag(index);
                                self.settle("flag", result);
                                true
                            }
                            _ => true,
                        },
                    }
                } else {
                    match self.current_cell_state.replace(cell_state) {
                        None => true,
                        Some(previous) => previous != cell_state,
                    }
                }
            }
            Tick => {
                self.game.tick();
                self.flush_events()
            }
            NewGame => {
                self.game.new_game();
                self.flush_events()
            }
            Hint => {
                let result = self.game.use_hint();
                self.settle("hint", result)
            }
            BuyExtraFlag => {
                let result = self.game.buy_extra_flag();
                self.settle("extra flag", result)
            }
            BuyRevealMine => {
                let result = self.game.buy_reveal_mine();
                self.settle("reveal mine", result)
            }
            Undo => {
                let result = self.game.use_undo();
                self.settle("undo", result)
            }
            SmallBomb => {
                let result = if self.game.is_bomb_armed() {
                    self.game.cancel_small_bomb()
                } else {
                    self.game.arm_small_bomb()
                };
                self.settle("small bomb", result);
                true
            }
            InstantLoss => {
                let result = self.game.trigger_instant_loss();
                self.settle("instant loss", result)
            }
            ToggleDoubleClick => {
                self.settings.toggle_double_click_chord();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.game.size();
        let counters = self.game.counters();
        let economy = &self.game.rules().economy;
        let controls = Controls::of(&self.game);
        let link = ctx.link();

        let hint_label = format!("Hint ({})", counters.hints_remaining);
        let extra_flag_label = format!("Buy Extra Flag ({} pts)", economy.extra_flag_cost);
        let reveal_mine_label = format!("Reveal Mine ({} pts)", economy.reveal_mine_cost);
        let undo_label = if counters.undo_available {
            format!("Undo Mine ({} points)", economy.undo_cost)
        } else {
            "Undo Mine (Used)".to_string()
        };
        let small_bomb_label = if self.game.is_bomb_armed() {
            "Cancel Small Bomb".to_string()
        } else if counters.small_bomb_available {
            format!("Small Bomb ({} pts)", economy.small_bomb_cost)
        } else {
            "Small Bomb (Used)".to_string()
        };
        let double_click_label = if self.settings.double_click_chord {
            "Disable Double Click"
        } else {
            "Enable Double Click"
        };

        html! {
            <div class={classes!("mineshop", self.get_game_state_class())} oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <button onclick={link.callback(|_| ToggleDoubleClick)}>{double_click_label}</button>
                    <button onclick={link.callback(|_| NewGame)}>{"New Game"}</button>
                    <button onclick={link.callback(|_| Hint)} disabled={!controls.hint}>{hint_label}</button>
                </nav>
                <aside>
                    <span>{mines_label(&self.game)}</span>
                    <span>{format!("Flags: {}", format_for_counter(counters.flags_remaining.into()))}</span>
                    <span>{format!("Total Points: {}", counters.total_points)}</span>
                </aside>
                <nav>
                    <button onclick={link.callback(|_| BuyExtraFlag)} disabled={!controls.extra_flag}>{extra_flag_label}</button>
                    <button onclick={link.callback(|_| BuyRevealMine)} disabled={!controls.reveal_mine}>{reveal_mine_label}</button>
                    <button onclick={link.callback(|_| Undo)} disabled={!controls.undo}>{undo_label}</button>
                    <button onclick={link.callback(|_| SmallBomb)} disabled={!controls.small_bomb}>{small_bomb_label}</button>
                    <button onclick={link.callback(|_| InstantLoss)} disabled={!controls.instant_loss}>{"Instant Loss"}</button>
                </nav>
                <table>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let index = game::to_index((row, col), cols);
                                        let cell_state = view_cell_state(&self.game, index);
                                        let pressed = self.is_pressed(index, cell_state);
                                        let callback = link.callback(Msg::CellEvent);
                                        html! {
                                            <CellView {index} {cell_state} {callback} {pressed}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <footer>
                    <span>{format!("Time: {}s", counters.timer_seconds)}</span>
                    <span>{format!("Points: {}", counters.points)}</span>
                </footer>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{Game, MemoryStore, MineLayout, Rules};

    fn game_on(size: game::Coord2, mines: &[CellIndex], points: i64) -> Game {
        let layout = MineLayout::from_mine_indices(size, mines).unwrap();
        Game::with_layout(Rules::default(), layout, MemoryStore::new(points), 0)
    }

    #[test]
    fn lost_board_marks_the_trigger() {
        let mut game = game_on((2, 2), &[0, 1], 0);
        game.reveal(3).unwrap();
        game.reveal(0).unwrap();

        assert_eq!(view_cell_state(&game, 0), ViewCellState::TriggeredMine);
        assert_eq!(view_cell_state(&game, 1), ViewCellState::Mine);
        assert_eq!(view_cell_state(&game, 3), ViewCellState::Revealed(2));
    }

    #[test]
    fn controls_follow_funds_and_entitlements() {
        let game = game_on((3, 3), &[0], 250);
        let controls = Controls::of(&game);

        assert!(controls.hint);
        assert!(controls.extra_flag);
        assert!(!controls.reveal_mine);
        assert!(!controls.undo);
        assert!(!controls.small_bomb);
        assert!(controls.instant_loss);
    }

    #[test]
    fn finished_game_disables_everything() {
        let mut game = game_on((3, 3), &[0], 5000);
        game.trigger_instant_loss().unwrap();

        assert_eq!(Controls::of(&game), Controls::default());
    }

    #[test]
    fn mine_count_ignores_rescued_mines() {
        let mut game = game_on((3, 3), &[0, 4], 2000);
        game.reveal(0).unwrap();
        game.resolve(true).unwrap();

        assert_eq!(game.mine_layout().mine_count(), 1);
        assert_eq!(mines_label(&game), "Mines: 2");
    }

    #[test]
    fn notices_quote_the_cost() {
        let decision = PendingDecision::Rescue {
            index: 0,
            cost: 999,
            remaining: Vec::new(),
        };

        assert!(acceptance_notice(&decision).ends_with("-999 points"));
        assert_eq!(refusal_notice(GameError::NoHintsLeft), None);
    }
}
