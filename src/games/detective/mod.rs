//! Scam Detective: read a case and decide whether it is a scam.

pub mod actions;
pub mod logic;
pub mod questions;
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
use state::{Answer, QuizState};

pub struct DetectiveGame {
    pub state: QuizState,
    store: Box<dyn KeyValueStore>,
}

impl DetectiveGame {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let mut state = QuizState::new(questions::QUESTIONS);
        state.best = save::load_best(&*store);
        Self { state, store }
    }

    fn answer(&mut self, given: Answer) -> bool {
        let before = self.state.best;
        if logic::answer(&mut self.state, given).is_none() {
            return false;
        }
        if self.state.best > before {
            crate::console::log(&format!("new scam detective best: {}", self.state.best));
            if let Err(e) = save::save_best(&mut *self.store, self.state.best) {
                crate::console::warn(&format!("could not save detective best score: {e}"));
            }
        }
        true
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            ANSWER_YES => self.answer(Answer::YesNo(true)),
            ANSWER_NO => self.answer(Answer::YesNo(false)),
            id if (CHOOSE_OPTION_BASE..RESTART_QUIZ).contains(&id) => {
                self.answer(Answer::Choice((id - CHOOSE_OPTION_BASE) as usize))
            }
            RESTART_QUIZ => {
                logic::reset(&mut self.state);
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'y' => self.handle_click(ANSWER_YES),
            'n' => self.handle_click(ANSWER_NO),
            '1'..='9' => self.answer(Answer::Choice((key as u8 - b'1') as usize)),
            'r' => self.handle_click(RESTART_QUIZ),
            _ => false,
        }
    }
}

impl Game for DetectiveGame {
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
