//! Input plumbing shared by the shell and the game: normalized events,
//! clickable screen regions and pixel-to-cell conversion.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input, normalized for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A press on a registered target, carrying its action id.
    Click(u16),
}

/// A screen region bound to an action id.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered by the last frame, plus the grid size they were
/// laid out for. Rebuilt on every draw.
#[derive(Debug, Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame at the given grid size.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.targets.clear();
        self.terminal_cols = cols;
        self.terminal_rows = rows;
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Bind one full row of `area`. Rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.bottom() {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action id under a cell. Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.right() && row >= r.y && row < r.bottom()
            })
            .map(|t| t.action_id)
    }
}

/// Below this width the log panel moves under the main column.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 80
}

/// Map a pixel offset inside the grid element to a `(col, row)` cell.
///
/// Offsets are relative to the grid's top-left corner; `None` when the
/// point falls outside the grid or the grid has no size yet.
pub fn pixel_to_cell(
    x: f64,
    y: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / (grid_width / cols as f64)) as u16;
    let row = (y / (grid_height / rows as f64)) as u16;
    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 3, 40, 1), 7);
        cs.add_click_target(Rect::new(0, 4, 40, 2), 8);
        assert_eq!(cs.hit_test(10, 3), Some(7));
        assert_eq!(cs.hit_test(10, 5), Some(8));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(40, 3), None);
    }

    #[test]
    fn later_targets_win() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 80, 1), 1);
        cs.add_click_target(Rect::new(10, 0, 5, 1), 2);
        assert_eq!(cs.hit_test(12, 0), Some(2));
        assert_eq!(cs.hit_test(2, 0), Some(1));
    }

    #[test]
    fn empty_rects_are_dropped() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 0, 1), 1);
        cs.add_click_target(Rect::new(0, 0, 4, 0), 2);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn row_target_respects_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(2, 10, 20, 3);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 13, 2);
        cs.add_row_target(area, 12, 3);
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(2, 12), Some(3));
        assert_eq!(cs.hit_test(1, 12), None);
    }

    #[test]
    fn reset_clears_targets_and_resizes() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 5, 5), 1);
        cs.reset(100, 40);
        assert!(cs.targets.is_empty());
        assert_eq!((cs.terminal_cols, cs.terminal_rows), (100, 40));
    }

    #[test]
    fn narrow_threshold() {
        assert!(is_narrow_layout(79));
        assert!(!is_narrow_layout(80));
    }

    #[test]
    fn pixel_to_cell_maps_centres() {
        // 80x30 grid of 10x15 px cells
        for row in [0u16, 11, 29] {
            for col in [0u16, 40, 79] {
                let x = col as f64 * 10.0 + 5.0;
                let y = row as f64 * 15.0 + 7.5;
                assert_eq!(pixel_to_cell(x, y, 800.0, 450.0, 80, 30), Some((col, row)));
            }
        }
    }

    #[test]
    fn pixel_to_cell_rejects_outside() {
        assert_eq!(pixel_to_cell(-1.0, 5.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(5.0, 450.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(800.0, 5.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(5.0, 5.0, 0.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(5.0, 5.0, 800.0, 450.0, 0, 30), None);
    }

    #[test]
    fn click_pipeline() {
        let mut cs = ClickState::new();
        cs.reset(60, 20);
        cs.add_row_target(Rect::new(0, 0, 60, 20), 8, 42);
        let (col, row) = pixel_to_cell(300.0, 8.0 * 15.0 + 1.0, 600.0, 300.0, 60, 20).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(42));
    }
}
