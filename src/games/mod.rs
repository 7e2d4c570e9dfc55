/// Game trait: the seam between the browser shell and a game.

pub mod dust;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Advance the game by `delta_ticks` fixed ticks.
    fn tick(&mut self, delta_ticks: u32);

    /// Render into `area`, registering click targets for this frame.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}
