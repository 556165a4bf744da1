mod bank;
mod config;
mod console;
mod games;
mod input;
mod storage;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::{create_game, AppState, GameChoice, GameContext};
use input::{ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::{Frame, Terminal};
use ratzilla::{DomBackend, WebRenderer};
use widgets::ClickableList;

/// Tap target of the footer bar while a game is running. A game may
/// consume it to close an inner screen first.
pub const BACK_TO_MENU: u16 = 999;

/// Menu entries are `MENU_PICK_BASE + index` into [`GameChoice::all`].
const MENU_PICK_BASE: u16 = 1;

const TICKS_PER_SEC: u32 = 10;

struct App {
    state: AppState,
    ctx: GameContext,
}

impl App {
    fn new(ctx: GameContext) -> Self {
        Self {
            state: AppState::Menu,
            ctx,
        }
    }

    fn launch(&mut self, choice: GameChoice) {
        self.ctx.session = bank::session_nonce();
        console::log(&format!("starting {} for {}", choice.name(), self.ctx.config.user));
        self.state = AppState::Playing {
            game: create_game(&choice, &self.ctx),
        };
    }

    fn back_to_menu(&mut self) {
        self.state = AppState::Menu;
    }

    fn handle_input(&mut self, event: InputEvent) {
        match &mut self.state {
            AppState::Menu => {
                let picked = match event {
                    InputEvent::Key(c) => GameChoice::all().iter().find(|g| g.key() == c).copied(),
                    InputEvent::Click(id) => id
                        .checked_sub(MENU_PICK_BASE)
                        .and_then(|i| GameChoice::all().get(i as usize))
                        .copied(),
                };
                if let Some(choice) = picked {
                    self.launch(choice);
                }
            }
            AppState::Playing { game } => {
                if game.handle_input(&event) {
                    return;
                }
                if matches!(event, InputEvent::Key('q') | InputEvent::Click(BACK_TO_MENU)) {
                    self.back_to_menu();
                }
            }
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        if let AppState::Playing { game } = &mut self.state {
            game.tick(delta_ticks);
        }
    }
}

/// Pointer position to a tap target, using the DOM grid's bounding rect.
fn dom_hit_test(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend renders the grid as the first <div> in <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    cs.hit_test_pixels(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    )
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let store = storage::open_default();
    let config = config::AppConfig::resolve(config::query_user().as_deref(), &*store.borrow());
    console::log(&format!("arcade ready for {}", config.user));

    let app = Rc::new(RefCell::new(App::new(GameContext {
        config,
        store,
        session: 0,
        today: time::local_today,
    })));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let hit = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_hit_test(mouse_event.x, mouse_event.y, &cs)
            };
            if let Some(action_id) = hit {
                app.borrow_mut().handle_input(InputEvent::Click(action_id));
            }
        }
    });

    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let mut app = app.borrow_mut();
            match key_event.code {
                KeyCode::Esc => app.back_to_menu(),
                KeyCode::Char(c) => app.handle_input(InputEvent::Key(c.to_ascii_lowercase())),
                _ => {}
            }
        }
    });

    let game_time = RefCell::new(time::GameTime::new(TICKS_PER_SEC));
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = game_time.borrow_mut().update(time::now_ms());
            let mut app = app.borrow_mut();
            app.tick(ticks);

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(10),
                    Constraint::Length(3),
                ])
                .split(size);

            render_title(f, chunks[0]);
            match &app.state {
                AppState::Menu => render_menu(f, &app.ctx, chunks[1], &click_state),
                AppState::Playing { game } => game.render(f, chunks[1], &click_state),
            }
            render_footer(f, &app, chunks[2], &click_state);
        }
    });

    Ok(())
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Kids Bank Arcade",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_menu(f: &mut Frame, ctx: &GameContext, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(" Hi, ", Style::default().fg(Color::Gray)),
        Span::styled(
            ctx.config.user.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("! Pick a game:", Style::default().fg(Color::Gray)),
    ]));
    cl.push(Line::from(""));
    for (i, choice) in GameChoice::all().iter().enumerate() {
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", choice.key()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    choice.name().to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", choice.blurb()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            MENU_PICK_BASE + i as u16,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Games ");
    cl.register_targets(
        area,
        &mut click_state.borrow_mut(),
        1,
        1,
        0,
        area.width.saturating_sub(2),
    );
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_footer(f: &mut Frame, app: &App, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let text = match app.state {
        AppState::Menu => "Tap a game or press its number",
        AppState::Playing { .. } => "[Esc] Back to menu",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(footer, area);

    if let AppState::Playing { .. } = app.state {
        click_state
            .borrow_mut()
            .add_click_target(area, BACK_TO_MENU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, SharedStore};

    fn app() -> App {
        let store: SharedStore = Rc::new(RefCell::new(MemoryStore::new()));
        let config = config::AppConfig::resolve(Some("kid"), &*store.borrow());
        App::new(GameContext {
            config,
            store,
            session: 0,
            today: || chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
        })
    }

    fn playing(app: &App) -> bool {
        matches!(app.state, AppState::Playing { .. })
    }

    #[test]
    fn menu_key_launches_game() {
        let mut app = app();
        app.handle_input(InputEvent::Key('2'));
        assert!(playing(&app));
    }

    #[test]
    fn menu_click_launches_game() {
        let mut app = app();
        app.handle_input(InputEvent::Click(MENU_PICK_BASE + 2));
        assert!(playing(&app));
    }

    #[test]
    fn unknown_menu_input_stays_on_menu() {
        let mut app = app();
        app.handle_input(InputEvent::Key('9'));
        app.handle_input(InputEvent::Click(0));
        app.handle_input(InputEvent::Click(MENU_PICK_BASE + 3));
        assert!(!playing(&app));
    }

    #[test]
    fn back_bar_and_q_return_to_menu() {
        let mut app = app();
        app.handle_input(InputEvent::Key('1'));
        app.handle_input(InputEvent::Click(BACK_TO_MENU));
        assert!(!playing(&app));

        app.handle_input(InputEvent::Key('3'));
        app.handle_input(InputEvent::Key('q'));
        assert!(!playing(&app));
    }

    #[test]
    fn game_keys_do_not_leave_game() {
        let mut app = app();
        app.handle_input(InputEvent::Key('1'));
        app.handle_input(InputEvent::Key('c'));
        app.tick(5);
        assert!(playing(&app));
    }

    #[test]
    fn relaunching_clicker_keeps_crediting() {
        let mut app = app();
        for _ in 0..2 {
            app.handle_input(InputEvent::Key('1'));
            app.handle_input(InputEvent::Key('c'));
            app.handle_input(InputEvent::Key('q'));
        }
        let raw = app.ctx.store.borrow().get("account_kid").unwrap_or_default();
        let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(record["balance"], 2);
    }
}
