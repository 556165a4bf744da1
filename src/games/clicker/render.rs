//! Coin Clicker rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::logic::format_number;
use super::state::{ClickerState, UpgradeKind};

/// Coin art, 3 lines. Second frame is the pressed coin.
const COIN_ART: &[&str] = &["  ╭─────╮  ", "  │  $  │  ", "  ╰─────╯  "];
const COIN_PRESSED_ART: &[&str] = &["           ", "   ╭───╮   ", "   ╰─$─╯   "];

const SPARKLE: &[char] = &['·', '✦', '✧', '✦'];

pub fn render(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    bonus_ready: bool,
) {
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], h_chunks[1])
    } else {
        let v_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(18), Constraint::Length(6)])
            .split(area);
        (v_chunks[0], v_chunks[1])
    };

    let coin_height = if bonus_ready { 8 } else { 7 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(coin_height),
            Constraint::Min(5),
        ])
        .split(main_area);

    render_header(state, f, chunks[0]);
    render_coin(state, f, chunks[1], click_state, bonus_ready);
    render_upgrades(state, f, chunks[2], click_state);
    render_log(state, f, log_area);
}

fn render_header(state: &ClickerState, f: &mut Frame, area: Rect) {
    let is_narrow = is_narrow_layout(area.width);
    let bar_width = if is_narrow { 12 } else { 24 };

    let balance = match state.balance {
        Some(b) => format!("{} coins", format_number(b)),
        None => "loading…".to_string(),
    };

    let ratio = state.stats.energy_ratio();
    let filled = (ratio * bar_width as f64).round() as usize;
    let bar = "█".repeat(filled) + &"░".repeat(bar_width - filled.min(bar_width));
    let energy_color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Balance: ", Style::default().fg(Color::Gray)),
            Span::styled(
                balance,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  x{}/tap", state.stats.multiplier),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Energy:  ", Style::default().fg(Color::Gray)),
            Span::styled(bar, Style::default().fg(energy_color)),
            Span::styled(
                format!(" {}/{}", state.stats.energy, state.stats.max_energy),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Taps: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_number(state.stats.total_clicks),
                Style::default().fg(Color::White),
            ),
            Span::styled("  Earned: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_number(state.stats.total_earned),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    let title = if is_narrow {
        " Coin Clicker "
    } else {
        " Coin Clicker - tap to earn "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_coin(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    bonus_ready: bool,
) {
    let art = if state.click_flash > 0 {
        COIN_PRESSED_ART
    } else {
        COIN_ART
    };
    let coin_style = if state.stats.energy == 0 {
        Style::default().fg(Color::DarkGray)
    } else if state.click_flash > 0 {
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let sparkle = SPARKLE[(state.anim_frame / 3) as usize % SPARKLE.len()];
    let popup = if state.earn_popup > 0 {
        format!("  +{}", state.stats.multiplier)
    } else {
        String::new()
    };

    let mut cl = ClickableList::new();
    for (i, row) in art.iter().enumerate() {
        let mut spans = vec![Span::styled(*row, coin_style)];
        if i == 1 {
            spans.push(Span::styled(
                popup.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        cl.push_clickable(Line::from(spans), TAP_COIN);
    }

    let tap_label = if state.stats.energy == 0 {
        " [C] Recharging…".to_string()
    } else {
        format!(" [C] Tap the coin {}", sparkle)
    };
    cl.push_clickable(
        Line::from(Span::styled(
            tap_label,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        TAP_COIN,
    );

    if bonus_ready {
        let bonus_style = if state.purchase_flash > 0 {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [B] Daily bonus ready! +{} coins", state.config.daily_bonus),
                bonus_style,
            )),
            CLAIM_BONUS,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_upgrades(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();

    for (i, kind) in UpgradeKind::all().iter().enumerate() {
        let cost = state.upgrade_cost(*kind);
        let affordable = state.can_afford(*kind);
        let color = if affordable { Color::White } else { Color::DarkGray };
        let key_style = if affordable {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled(format!(" [{}] ", kind.key()), key_style),
            Span::styled(kind.name(), Style::default().fg(color)),
            Span::styled(
                format!("  {} coins", format_number(cost)),
                Style::default().fg(if affordable { Color::Yellow } else { Color::DarkGray }),
            ),
        ];
        if !is_narrow {
            spans.push(Span::styled(
                format!("  ({})", kind.effect_label(&state.stats, &state.config)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        cl.push_clickable(Line::from(spans), BUY_UPGRADE_BASE + i as u16);
    }

    let border_color = if state.purchase_flash > 0 {
        Color::Green
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Upgrades ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(state: &ClickerState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Activity ");
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
