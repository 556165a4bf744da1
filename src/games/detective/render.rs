//! Scam Detective rendering.

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
use super::logic::{progress_percent, rank};
use super::state::{QuestionKind, QuizState, STARTING_LIVES};

fn hearts(lives: u32) -> String {
    "♥".repeat(lives as usize) + &"♡".repeat(STARTING_LIVES.saturating_sub(lives) as usize)
}

pub fn render(
    state: &QuizState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let feedback_height = if state.last_feedback.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(feedback_height),
            Constraint::Min(8),
        ])
        .split(area);

    render_progress(state, f, chunks[0]);
    if feedback_height > 0 {
        render_feedback(state, f, chunks[1]);
    }
    if state.finished {
        render_summary(state, f, chunks[2], click_state);
    } else {
        render_case(state, f, chunks[2], click_state);
    }
}

fn render_progress(state: &QuizState, f: &mut Frame, area: Rect) {
    let is_narrow = is_narrow_layout(area.width);
    let bar_width: usize = if is_narrow { 14 } else { 30 };
    let pct = progress_percent(state);
    let filled = (pct as usize * bar_width) / 100;
    let total = state.questions.len();
    let shown = (state.index + 1).min(total);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" Case {} of {}  ", shown, total),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                "█".repeat(filled) + &"░".repeat(bar_width - filled),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(format!(" {}%", pct), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" Points: ", Style::default().fg(Color::Gray)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::Gray)),
            Span::styled(hearts(state.lives), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled(" Rank: ", Style::default().fg(Color::Gray)),
            Span::styled(
                rank(state.score).label().to_string(),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                format!("  Best: {}", state.best),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let title = if is_narrow {
        " Scam Detective "
    } else {
        " Scam Detective - spot the trick "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_feedback(state: &QuizState, f: &mut Frame, area: Rect) {
    let Some(outcome) = &state.last_feedback else {
        return;
    };
    let (headline, color) = if outcome.correct {
        (format!(" Correct! +{} points", outcome.points), Color::Green)
    } else {
        (" Not quite. You lost a life.".to_string(), Color::Red)
    };
    let head_style = if state.feedback_flash > 0 {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(Span::styled(headline, head_style))];
    if !outcome.correct {
        lines.push(Line::from(Span::styled(
            format!(" {}", outcome.explanation),
            Style::default().fg(Color::White),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_case(
    state: &QuizState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(q) = state.current() else {
        return;
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {}", q.story),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(" {}", q.question),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    match q.kind {
        QuestionKind::Binary { .. } => {
            cl.push_clickable(
                Line::from(vec![
                    Span::styled(" [Y] ", key_style),
                    Span::styled("Yes", Style::default().fg(Color::White)),
                ]),
                ANSWER_YES,
            );
            cl.push_clickable(
                Line::from(vec![
                    Span::styled(" [N] ", key_style),
                    Span::styled("No", Style::default().fg(Color::White)),
                ]),
                ANSWER_NO,
            );
        }
        QuestionKind::Single { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                cl.push_clickable(
                    Line::from(vec![
                        Span::styled(format!(" [{}] ", i + 1), key_style),
                        Span::styled(*option, Style::default().fg(Color::White)),
                    ]),
                    CHOOSE_OPTION_BASE + i as u16,
                );
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ({} pts) ", q.title, q.points()));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, area.width.saturating_sub(2));
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_summary(
    state: &QuizState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let headline = if state.lives == 0 {
        " Out of lives! The scammers got away this time."
    } else {
        " Case closed! You made it through every file."
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        headline,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(vec![
        Span::styled(" Final score: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} / {}", state.score, state.max_score()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Rank: ", Style::default().fg(Color::Gray)),
        Span::styled(
            rank(state.score).label().to_string(),
            Style::default().fg(Color::Magenta),
        ),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Best: ", Style::default().fg(Color::Gray)),
        Span::styled(state.best.to_string(), Style::default().fg(Color::Yellow)),
    ]));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [R] Play again",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        RESTART_QUIZ,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Report ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, area.width.saturating_sub(2));
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
