//! Budget Challenge: split a monthly income using the 50/30/20 rule.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};
use crate::storage::KeyValueStore;

use actions::*;
use state::{BudgetState, Category};

pub struct BudgetGame {
    pub state: BudgetState,
    store: Box<dyn KeyValueStore>,
}

impl BudgetGame {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let mut state = BudgetState::new();
        if let Some(alloc) = save::load_plan(&*store) {
            state.alloc = alloc;
        }
        state.best = save::load_best(&*store);
        Self { state, store }
    }

    fn save_plan(&mut self) {
        if let Err(e) = save::save_plan(&mut *self.store, &self.state.alloc) {
            crate::console::warn(&format!("could not save budget plan: {e}"));
        }
    }

    fn select(&mut self, index: usize) -> bool {
        match Category::all().get(index) {
            Some(cat) => {
                self.state.selected = *cat;
                true
            }
            None => false,
        }
    }

    fn nudge(&mut self, up: bool) {
        logic::nudge(&mut self.state, up);
        self.save_plan();
    }

    fn check(&mut self) {
        if logic::check(&mut self.state) {
            if let Err(e) = save::save_best(&mut *self.store, self.state.best) {
                crate::console::warn(&format!("could not save budget best score: {e}"));
            }
        }
    }

    fn reset(&mut self) {
        logic::reset(&mut self.state);
        self.save_plan();
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            id if (SELECT_CATEGORY_BASE..SELECT_CATEGORY_BASE + 4).contains(&id) => {
                self.select((id - SELECT_CATEGORY_BASE) as usize)
            }
            ADD_PERCENT => {
                self.nudge(true);
                true
            }
            REMOVE_PERCENT => {
                self.nudge(false);
                true
            }
            INCOME_UP => {
                logic::change_income(&mut self.state, true);
                true
            }
            INCOME_DOWN => {
                logic::change_income(&mut self.state, false);
                true
            }
            CHECK_PLAN => {
                self.check();
                true
            }
            RESET_PLAN => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            '1'..='4' => self.select((key as u8 - b'1') as usize),
            '+' | '=' => self.handle_click(ADD_PERCENT),
            '-' => self.handle_click(REMOVE_PERCENT),
            '>' => self.handle_click(INCOME_UP),
            '<' => self.handle_click(INCOME_DOWN),
            'v' => self.handle_click(CHECK_PLAN),
            'r' => self.handle_click(RESET_PLAN),
            _ => false,
        }
    }
}

impl Game for BudgetGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
