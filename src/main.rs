mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::dust::catalog::{MAX_OFFLINE_SECONDS, TICK_INTERVAL_MS};
use games::dust::save::SaveStorage;
use games::dust::DustGame;
use games::Game;
use input::{pixel_to_cell, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::TickClock;

/// Query the grid container's bounding rect and convert a page pixel to a
/// terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let cell = pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    );
    log::debug!(
        "click: pixel=({}, {}) cell={:?} targets={}",
        mouse_x,
        mouse_y,
        cell,
        cs.targets.len()
    );
    cell
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger unavailable: {}", e).into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    env_logger::init();
}

#[cfg(target_arch = "wasm32")]
fn open_storage() -> Box<dyn SaveStorage> {
    Box::new(games::dust::save::LocalStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn open_storage() -> Box<dyn SaveStorage> {
    Box::new(games::dust::save::MemoryStorage::new())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging();

    let mut game = DustGame::new(open_storage(), now_ms);
    game.restore_on_start();
    let game = Rc::new(RefCell::new(game));

    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            let action = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                .and_then(|(col, row)| cs.hit_test(col, row));
            drop(cs);

            if let Some(action) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Char(c) => c,
                KeyCode::Enter => 'c',
                KeyCode::Left => 'b',
                KeyCode::Right => 'n',
                _ => return,
            };
            game.borrow_mut().handle_input(&InputEvent::Key(key));
        }
    });

    let clock = RefCell::new(TickClock::new(TICK_INTERVAL_MS, MAX_OFFLINE_SECONDS));
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = clock.borrow_mut().update(now_ms());
            game.borrow_mut().tick(ticks);

            let size = f.area();
            click_state.borrow_mut().reset(size.width, size.height);
            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
