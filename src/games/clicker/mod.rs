//! Coin Clicker: tap for coins, spend them on upgrades.
//!
//! Coins land in the player's real account balance, so every earning or
//! spending step goes through a [`BalanceService`] before local stats move.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::bank::BalanceService;
use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use save::StatsStore;
use state::{ClickerState, UpgradeKind};

/// Source of the player's current local calendar day.
pub type Today = Box<dyn Fn() -> NaiveDate>;

pub struct ClickerGame {
    pub state: ClickerState,
    store: Box<dyn StatsStore>,
    bank: Box<dyn BalanceService>,
    today: Today,
    /// Last bonus day known to be written to `store`.
    saved_bonus: Option<NaiveDate>,
}

impl ClickerGame {
    /// Restore saved progress for `state.user` and read the account balance.
    pub fn new(
        mut state: ClickerState,
        store: Box<dyn StatsStore>,
        mut bank: Box<dyn BalanceService>,
        today: Today,
    ) -> Self {
        if let Some(stats) = store.load(&state.user) {
            state.stats = stats;
            state.add_log("Welcome back! Progress restored.", false);
        }
        state.last_bonus = store.last_bonus(&state.user);
        // A failed read is logged in state; upgrades stay locked until a
        // later operation reports the balance.
        let _ = logic::sync_balance(&mut state, bank.as_mut());

        let saved_bonus = state.last_bonus;
        Self {
            state,
            store,
            bank,
            today,
            saved_bonus,
        }
    }

    fn tap(&mut self) {
        let _ = logic::click(&mut self.state, self.bank.as_mut());
    }

    fn claim_bonus(&mut self) {
        let today = (self.today)();
        let _ = logic::claim_daily_bonus(&mut self.state, self.bank.as_mut(), today);
    }

    fn buy(&mut self, index: usize) -> bool {
        match UpgradeKind::all().get(index) {
            Some(kind) => {
                let _ = logic::buy_upgrade(&mut self.state, self.bank.as_mut(), *kind);
                true
            }
            None => false,
        }
    }

    /// Write out anything the last operation changed.
    fn persist(&mut self) {
        if self.state.dirty {
            self.state.dirty = false;
            if let Err(e) = self.store.save(&self.state.user, &self.state.stats) {
                crate::console::warn(&format!("could not save clicker stats: {e}"));
            }
        }
        if self.state.last_bonus != self.saved_bonus {
            if let Some(day) = self.state.last_bonus {
                match self.store.record_bonus(&self.state.user, day) {
                    Ok(()) => self.saved_bonus = Some(day),
                    Err(e) => crate::console::warn(&format!("could not record bonus date: {e}")),
                }
            }
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            TAP_COIN => {
                self.tap();
                true
            }
            CLAIM_BONUS => {
                self.claim_bonus();
                true
            }
            id if id >= BUY_UPGRADE_BASE => self.buy((id - BUY_UPGRADE_BASE) as usize),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'c' | ' ' => {
                self.tap();
                true
            }
            'b' => {
                self.claim_bonus();
                true
            }
            _ => match UpgradeKind::all().iter().position(|k| k.key() == key) {
                Some(index) => self.buy(index),
                None => false,
            },
        }
    }
}

impl Game for ClickerGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let consumed = match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        };
        self.persist();
        consumed
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
        self.persist();
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        let bonus_ready = self.state.bonus_available((self.today)());
        render::render(&self.state, f, area, click_state, bonus_ready);
    }
}
