//! Clickable UI building blocks: each one renders and registers its own
//! click targets, so a row and its action can never drift apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A single row of labels, each bound to an action.
///
/// ```ignore
/// TabBar::new("│")
///     .tab("Tools", style, TAB_TOOLS)
///     .tab("Zones", style, TAB_ZONES)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let sep_width = Line::from(self.separator).width() as u16;

        let mut spans = Vec::new();
        let mut widths = Vec::new();
        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            let padded = format!(" {} ", label);
            widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let paragraph = Paragraph::new(Line::from(spans));
        match self.block {
            Some(block) => f.render_widget(paragraph.block(block), area),
            None => f.render_widget(paragraph, area),
        }

        for (x, w, action_id) in tab_spans(&widths, sep_width, inner.width) {
            cs.add_click_target(Rect::new(inner.x + x, area.y, w, area.height.max(1)), action_id);
        }
    }
}

/// Horizontal hit spans `(x, width, action)` for tabs laid out left to
/// right. Each separator is split between its neighbours; the first tab
/// reaches the left edge and the last one the right edge.
fn tab_spans(widths: &[(u16, u16)], sep: u16, total: u16) -> Vec<(u16, u16, u16)> {
    let mut starts = Vec::with_capacity(widths.len());
    let mut cursor = 0u16;
    for (i, (w, _)) in widths.iter().enumerate() {
        if i > 0 {
            cursor = cursor.saturating_add(sep);
        }
        starts.push(cursor);
        cursor = cursor.saturating_add(*w);
    }

    let n = widths.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let left = if i == 0 { 0 } else { starts[i] - sep + sep / 2 };
        let right = if i + 1 == n {
            total
        } else {
            starts[i] + widths[i].0 + sep / 2
        };
        let right = right.min(total);
        if right > left {
            out.push((left, right - left, widths[i].1));
        }
    }
    out
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a bordered panel, some of them bound to actions.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Header"));
/// cl.push_clickable(Line::from("[1] Buy"), BUY_TOOL_BASE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Bind every clickable line to the row it lands on inside `area`.
    /// `top` and `bottom` are the rows taken by borders or padding. Lines
    /// pushed past the visible height get no target.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top: u16, bottom: u16) {
        let first = area.y + top;
        let end = area.bottom().saturating_sub(bottom);
        for &(idx, action_id) in &self.actions {
            let row = first as usize + idx;
            if row < end as usize {
                cs.add_row_target(area, row as u16, action_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_spans_split_separators() {
        // "  A  " | " BB " with a 3-wide separator
        let spans = tab_spans(&[(5, 10), (4, 11)], 3, 40);
        assert_eq!(spans, vec![(0, 6, 10), (6, 34, 11)]);
    }

    #[test]
    fn tab_spans_cover_without_gaps() {
        let spans = tab_spans(&[(6, 1), (11, 2), (12, 3)], 1, 60);
        let mut expected_x = 0;
        for (x, w, _) in &spans {
            assert_eq!(*x, expected_x);
            expected_x += w;
        }
        assert_eq!(expected_x, 60);
    }

    #[test]
    fn tab_spans_clip_to_width() {
        let spans = tab_spans(&[(10, 1), (10, 2), (10, 3)], 1, 15);
        assert!(spans.iter().all(|(x, w, _)| x + w <= 15));
        assert!(spans.iter().all(|(_, _, id)| *id != 3));
    }

    #[test]
    fn tab_spans_empty() {
        assert!(tab_spans(&[], 1, 80).is_empty());
    }

    #[test]
    fn list_registers_clickable_rows_only() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("title"));
        cl.push_clickable(Line::from("one"), 100);
        cl.push(Line::from(""));
        cl.push_clickable(Line::from("two"), 101);

        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 5, 30, 10), &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 7), Some(100));
        assert_eq!(cs.hit_test(3, 9), Some(101));
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cl.len(), 4);
    }

    #[test]
    fn list_skips_rows_below_the_panel() {
        let mut cl = ClickableList::new();
        for i in 0..10 {
            cl.push_clickable(Line::from(format!("row {}", i)), i);
        }
        let mut cs = ClickState::new();
        // 5 rows tall with borders: 3 visible lines
        cl.register_targets(Rect::new(0, 0, 30, 5), &mut cs, 1, 1);
        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 3), Some(2));
        assert_eq!(cs.hit_test(0, 4), None);
    }
}
