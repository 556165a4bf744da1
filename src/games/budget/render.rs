//! Budget Challenge rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::games::clicker::logic::format_number;
use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::logic::{allocated_amount, remaining, score};
use super::state::{BudgetState, Category, Verdict, ADJUST_STEP};

const TIPS: &[&str] = &[
    "Pay yourself first: save at least 10-20%.",
    "Check your needs: can any bill get smaller?",
    "Wants are great, just not at the cost of goals.",
    "Giving a little teaches sharing and planning.",
];

pub fn render(
    state: &BudgetState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let (plan_area, side_area) = if area.width >= 80 {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h[0], h[1])
    } else {
        let v = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(17), Constraint::Min(6)])
            .split(area);
        (v[0], v[1])
    };

    render_plan(state, f, plan_area, click_state, is_narrow);
    render_result(state, f, side_area, is_narrow);
}

fn render_plan(
    state: &BudgetState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    is_narrow: bool,
) {
    let bar_width: usize = if is_narrow { 10 } else { 20 };
    let mut cl = ClickableList::new();

    cl.push(Line::from(vec![
        Span::styled(" Monthly income: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} coins", format_number(state.income)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push_clickable(
        Line::from(Span::styled(" [>] More income", Style::default().fg(Color::White))),
        INCOME_UP,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [<] Less income", Style::default().fg(Color::White))),
        INCOME_DOWN,
    );
    cl.push(Line::from(""));

    for (i, cat) in Category::all().iter().enumerate() {
        let pct = state.alloc.get(*cat);
        let selected = *cat == state.selected;
        let filled = (pct as usize * bar_width) / 100;
        let bar = "█".repeat(filled) + &"░".repeat(bar_width - filled);
        let marker = if selected { "▶" } else { " " };
        let name_style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let mut spans = vec![
            Span::styled(format!("{}{} ", marker, i + 1), Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<8}", cat.name()), name_style),
            Span::styled(format!(" {}", bar), Style::default().fg(Color::Green)),
            Span::styled(format!(" {:>3}%", pct), Style::default().fg(Color::White)),
            Span::styled(
                format!(" {}", format_number(allocated_amount(state.income, pct))),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if !is_narrow {
            spans.push(Span::styled(
                format!("  {}", cat.hint()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        cl.push_clickable(Line::from(spans), SELECT_CATEGORY_BASE + cat.index() as u16);
    }

    cl.push(Line::from(""));
    let left = remaining(&state.alloc);
    let left_color = if left == 0 { Color::Green } else { Color::Yellow };
    cl.push(Line::from(vec![
        Span::styled(" Left to give out: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}%", left),
            Style::default().fg(left_color).add_modifier(Modifier::BOLD),
        ),
    ]));

    let add_label = format!(" [+] Add {}% to {}", ADJUST_STEP, state.selected.name());
    let remove_label = format!(" [-] Take {}% from {}", ADJUST_STEP, state.selected.name());
    cl.push_clickable(Line::from(Span::styled(add_label, Style::default().fg(Color::White))), ADD_PERCENT);
    cl.push_clickable(
        Line::from(Span::styled(remove_label, Style::default().fg(Color::White))),
        REMOVE_PERCENT,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            " [V] Check my plan",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        CHECK_PLAN,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [R] Reset to 50/30/20", Style::default().fg(Color::DarkGray))),
        RESET_PLAN,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Budget Challenge ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_result(state: &BudgetState, f: &mut Frame, area: Rect, is_narrow: bool) {
    let current = score(&state.alloc);
    let bar_width: usize = if is_narrow { 12 } else { 20 };
    let filled = (current as usize * bar_width) / 100;
    let score_color = if current >= 85 {
        Color::Green
    } else if current >= 70 {
        Color::Yellow
    } else {
        Color::Red
    };

    let best_style = if state.best_flash > 0 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/100", current),
                Style::default()
                    .fg(score_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                " {}{}",
                "█".repeat(filled),
                "░".repeat(bar_width - filled)
            ),
            Style::default().fg(score_color),
        )),
        Line::from(vec![
            Span::styled(" Best:  ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}/100", state.best), best_style),
        ]),
        Line::from(""),
    ];

    if let Some(v) = state.verdict {
        let color = match v {
            Verdict::Master => Color::Green,
            Verdict::Good => Color::Yellow,
            Verdict::KeepTrying => Color::Magenta,
            Verdict::Incomplete => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            format!(" {}", v.message()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        " Aim for 50% needs, 30% wants, 20% savings. Charity is up to you (5% is free).",
        Style::default().fg(Color::DarkGray),
    )));
    if !is_narrow {
        lines.push(Line::from(""));
        for tip in TIPS {
            lines.push(Line::from(Span::styled(
                format!(" • {}", tip),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Result ");
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
