/// Game trait and game selection logic.

pub mod budget;
pub mod clicker;
pub mod detective;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::bank::StorageBank;
use crate::config::AppConfig;
use crate::input::{ClickState, InputEvent};
use crate::storage::SharedStore;

/// Trait that all games implement.
pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Advance game logic by `delta_ticks` discrete ticks.
    fn tick(&mut self, delta_ticks: u32);

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}

/// Which game the player has selected (or is choosing).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameChoice {
    Clicker,
    Budget,
    Detective,
}

impl GameChoice {
    pub fn all() -> &'static [GameChoice] {
        &[GameChoice::Clicker, GameChoice::Budget, GameChoice::Detective]
    }

    pub fn name(&self) -> &str {
        match self {
            GameChoice::Clicker => "Coin Clicker",
            GameChoice::Budget => "Budget Challenge",
            GameChoice::Detective => "Scam Detective",
        }
    }

    pub fn blurb(&self) -> &str {
        match self {
            GameChoice::Clicker => "tap to earn real coins, buy upgrades",
            GameChoice::Budget => "split your income with 50/30/20",
            GameChoice::Detective => "spot the scam before it spots you",
        }
    }

    pub fn key(&self) -> char {
        match self {
            GameChoice::Clicker => '1',
            GameChoice::Budget => '2',
            GameChoice::Detective => '3',
        }
    }
}

/// Top-level application state.
pub enum AppState {
    /// Showing game selection menu.
    Menu,
    /// Playing a game.
    Playing {
        game: Box<dyn Game>,
    },
}

/// Everything a game needs from its surroundings.
pub struct GameContext {
    pub config: AppConfig,
    pub store: SharedStore,
    /// Nonce for the next game's balance operations. Refresh before every
    /// launch.
    pub session: u32,
    pub today: fn() -> chrono::NaiveDate,
}

/// Create a game instance from a choice.
pub fn create_game(choice: &GameChoice, ctx: &GameContext) -> Box<dyn Game> {
    match choice {
        GameChoice::Clicker => {
            let config = &ctx.config;
            let state = clicker::state::ClickerState::new(config.user.clone(), config.economy.clone())
                .with_session(ctx.session);
            let store = clicker::save::LocalStatsStore::new(ctx.store.clone(), config.economy.clone());
            let bank = StorageBank::new(ctx.store.clone(), config.opening_balance);
            Box::new(clicker::ClickerGame::new(
                state,
                Box::new(store),
                Box::new(bank),
                Box::new(ctx.today),
            ))
        }
        GameChoice::Budget => Box::new(budget::BudgetGame::new(Box::new(ctx.store.clone()))),
        GameChoice::Detective => Box::new(detective::DetectiveGame::new(Box::new(ctx.store.clone()))),
    }
}
