//! Clickable panel content.
//!
//! Every interactive panel in the arcade (the menu, the coin, the upgrade
//! shop, the budget plan, the case card) is a bordered `Paragraph` whose
//! rows double as tap targets. [`ClickableList`] keeps the rendered lines
//! and their action IDs together so the row math lives in one place.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// Lines of a panel, some of them bound to an action ID.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from(" Balance: 1,250 coins"));
/// cl.push_clickable(Line::from(" [1] Multiplier x2"), BUY_UPGRADE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0, area.width.saturating_sub(2));
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when tapped. The target follows
    /// the line if rows are added above it.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every visual row a clickable line covers.
    ///
    /// `top_offset`/`bottom_offset` are the border rows of `area`, `scroll`
    /// is in visual rows. With `inner_width == 0` each line is taken to be
    /// exactly one row (no `Wrap`); otherwise lines wider than
    /// `inner_width` are counted as wrapping.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let w = inner_width as usize;
        let mut starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            starts.push(cumulative);
            let lw = line.width();
            let h = if w == 0 || lw <= w {
                1
            } else {
                lw.div_ceil(w) as u16
            };
            heights.push(h);
            cumulative = cumulative.saturating_add(h);
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            let (Some(&start), Some(&height)) = (starts.get(li), heights.get(li)) else {
                continue;
            };
            for r in 0..height {
                let vr = start + r;
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}
