/// Galactic Dust Sweeper: an incremental dust-clicking game across eight zones.

pub mod achievements;
pub mod actions;
pub mod catalog;
pub mod error;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::{
    PrestigeUpgradeId, ToolId, UpgradeTrack, AUTOSAVE_INTERVAL_SECS, PRESTIGE_UPGRADES,
    SHOP_PER_PAGE, TICK_INTERVAL_MS, TOOLS, TOOLS_PER_PAGE,
};
use error::GameError;
use logic::format_number;
use save::SaveStorage;
use state::{DustState, Tab};

pub struct DustGame {
    pub state: DustState,
    storage: Box<dyn SaveStorage>,
    /// Epoch milliseconds source.
    clock: fn() -> f64,
    secs_since_save: f64,
}

impl DustGame {
    pub fn new(storage: Box<dyn SaveStorage>, clock: fn() -> f64) -> Self {
        let mut state = DustState::new();
        state.last_update_ms = clock();
        Self {
            state,
            storage,
            clock,
            secs_since_save: 0.0,
        }
    }

    fn now(&self) -> f64 {
        (self.clock)()
    }

    // ── Action surface ──────────────────────────────────────────

    pub fn click(&mut self) {
        logic::click(&mut self.state);
        self.settle();
    }

    pub fn buy_tool(&mut self, id: ToolId) -> Result<(), GameError> {
        logic::buy_tool(&mut self.state, id)?;
        self.settle();
        Ok(())
    }

    pub fn buy_upgrade(&mut self, id: ToolId, track: UpgradeTrack) -> Result<(), GameError> {
        logic::buy_upgrade(&mut self.state, id, track)?;
        self.settle();
        Ok(())
    }

    pub fn unlock_zone(&mut self) -> Result<Option<usize>, GameError> {
        let entered = logic::unlock_zone(&mut self.state)?;
        if entered.is_none() {
            self.state.add_log("Every zone is already unlocked.", false);
        }
        self.settle();
        Ok(entered)
    }

    /// Prestige, then save right away so the reset cannot be lost.
    pub fn prestige(&mut self) -> Result<u64, GameError> {
        let gain = logic::do_prestige(&mut self.state)?;
        self.settle();
        if let Err(e) = self.persist() {
            self.report(e);
        }
        Ok(gain)
    }

    pub fn buy_prestige_upgrade(&mut self, id: PrestigeUpgradeId) -> Result<(), GameError> {
        logic::buy_prestige_upgrade(&mut self.state, id)?;
        self.settle();
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), GameError> {
        self.persist()?;
        self.state.add_log("Game saved.", false);
        Ok(())
    }

    /// Replace the running game with the stored one. `Ok(false)` when there
    /// is nothing stored.
    pub fn load(&mut self) -> Result<bool, GameError> {
        let now = self.now();
        let report = match save::load_game(&mut self.state, self.storage.as_ref(), now)? {
            Some(r) => r,
            None => return Ok(false),
        };
        self.secs_since_save = 0.0;
        if report.offline_gain > 0.0 {
            self.state.add_log(
                &format!(
                    "Idle gains: +{} dust over {}.",
                    format_number(report.offline_gain, 0),
                    format_duration(report.offline_seconds)
                ),
                true,
            );
        } else {
            self.state.add_log("Save loaded.", false);
        }
        self.settle();
        Ok(true)
    }

    pub fn toggle_music(&mut self) {
        let on = !self.state.settings.bgm_on;
        self.state.settings.bgm_on = on;
        self.state.add_log(&format!("Music: {}", on_off(on)), false);
    }

    pub fn toggle_click_sound(&mut self) {
        let on = !self.state.settings.click_sound_on;
        self.state.settings.click_sound_on = on;
        self.state.add_log(&format!("Click sound: {}", on_off(on)), false);
    }

    /// Delete the save and start over from a fresh state.
    pub fn reset(&mut self) -> Result<(), GameError> {
        save::delete_save(self.storage.as_mut())?;
        let mut fresh = DustState::new();
        fresh.last_update_ms = self.now();
        self.state = fresh;
        self.secs_since_save = 0.0;
        self.state.add_log("Progress wiped. Starting over.", true);
        Ok(())
    }

    /// Load whatever was stored when the page opened.
    pub fn restore_on_start(&mut self) {
        match self.load() {
            Ok(true) => log::info!("resumed from save"),
            Ok(false) => log::info!("no save found, starting fresh"),
            Err(e) => self.report(e),
        }
    }

    // ── Internals ───────────────────────────────────────────────

    fn persist(&mut self) -> Result<(), GameError> {
        let now = self.now();
        save::save_game(&self.state, self.storage.as_mut(), now)?;
        self.secs_since_save = 0.0;
        Ok(())
    }

    /// Re-check achievements and titles. Runs after every action and every
    /// tick, so unlocks driven by passive income land within 250 ms rather
    /// than waiting for the next click or purchase.
    fn settle(&mut self) {
        achievements::check_achievements(&mut self.state);
        logic::update_prestige_title(&mut self.state);
    }

    fn report(&mut self, err: GameError) {
        log::warn!("{}", err);
        self.state.add_log(&capitalize(&err.to_string()), true);
    }

    fn run<T>(&mut self, result: Result<T, GameError>) {
        if let Err(e) = result {
            self.report(e);
        }
    }

    fn tool_on_page(&self, slot: usize) -> Option<ToolId> {
        if slot >= TOOLS_PER_PAGE {
            return None;
        }
        ToolId::from_index(self.state.tool_page * TOOLS_PER_PAGE + slot)
    }

    fn shop_on_page(&self, slot: usize) -> Option<PrestigeUpgradeId> {
        if slot >= SHOP_PER_PAGE {
            return None;
        }
        PrestigeUpgradeId::from_index(self.state.shop_page * SHOP_PER_PAGE + slot)
    }

    fn turn_page(&mut self, forward: bool) {
        let (page, count, per) = match self.state.tab {
            Tab::Prestige => (&mut self.state.shop_page, PRESTIGE_UPGRADES.len(), SHOP_PER_PAGE),
            _ => (&mut self.state.tool_page, TOOLS.len(), TOOLS_PER_PAGE),
        };
        let last = (count + per - 1) / per - 1;
        *page = if forward {
            (*page + 1).min(last)
        } else {
            page.saturating_sub(1)
        };
        self.state.selected_tool = 0;
    }

    /// Keyboard → action id. Digits and the sub-upgrade keys depend on the
    /// open tab.
    fn key_action(&self, key: char) -> Option<u16> {
        let tab = self.state.tab;
        let digit = key.to_digit(10).map(|d| d as usize);
        match key {
            'c' | ' ' => Some(SWEEP),
            't' => Some(TAB_TOOLS),
            'u' => Some(TAB_UPGRADES),
            'z' => Some(TAB_ZONES),
            'p' => Some(TAB_PRESTIGE),
            'a' => Some(TAB_ACHIEVEMENTS),
            'b' => Some(PAGE_PREV),
            'n' => Some(PAGE_NEXT),
            'v' => Some(SAVE),
            'l' => Some(LOAD),
            'm' => Some(TOGGLE_MUSIC),
            'k' => Some(TOGGLE_CLICK_SOUND),
            'X' => Some(RESET_SAVE),
            'q' | 'w' | 'e' if tab == Tab::Upgrades => {
                let track = match key {
                    'q' => 0,
                    'w' => 1,
                    _ => 2,
                };
                let id = self.tool_on_page(self.state.selected_tool)?;
                Some(BUY_UPGRADE_BASE + (id.index() * 3 + track) as u16)
            }
            _ => match (tab, digit) {
                (Tab::Tools, Some(d)) if d >= 1 => {
                    let id = self.tool_on_page(d - 1)?;
                    Some(BUY_TOOL_BASE + id.index() as u16)
                }
                (Tab::Upgrades, Some(d)) if d >= 1 => {
                    self.tool_on_page(d - 1)?;
                    Some(SELECT_TOOL_BASE + (d - 1) as u16)
                }
                (Tab::Zones, Some(1)) => Some(UNLOCK_ZONE),
                (Tab::Prestige, Some(0)) => Some(PRESTIGE_RESET),
                (Tab::Prestige, Some(d)) => {
                    let id = self.shop_on_page(d - 1)?;
                    Some(BUY_PRESTIGE_UPGRADE_BASE + id.index() as u16)
                }
                _ => None,
            },
        }
    }

    /// Run one semantic action. Returns false for unknown ids.
    fn dispatch(&mut self, action: u16) -> bool {
        let reset_armed = std::mem::replace(&mut self.state.reset_armed, false);
        let tool_count = TOOLS.len() as u16;
        let shop_count = PRESTIGE_UPGRADES.len() as u16;

        match action {
            SWEEP => self.click(),
            TAB_TOOLS => self.state.tab = Tab::Tools,
            TAB_UPGRADES => self.state.tab = Tab::Upgrades,
            TAB_ZONES => self.state.tab = Tab::Zones,
            TAB_PRESTIGE => self.state.tab = Tab::Prestige,
            TAB_ACHIEVEMENTS => self.state.tab = Tab::Achievements,
            PAGE_PREV => self.turn_page(false),
            PAGE_NEXT => self.turn_page(true),
            a if (BUY_TOOL_BASE..BUY_TOOL_BASE + tool_count).contains(&a) => {
                if let Some(id) = ToolId::from_index((a - BUY_TOOL_BASE) as usize) {
                    let r = self.buy_tool(id);
                    self.run(r);
                }
            }
            a if (BUY_UPGRADE_BASE..BUY_UPGRADE_BASE + tool_count * 3).contains(&a) => {
                let idx = (a - BUY_UPGRADE_BASE) as usize;
                let track = UpgradeTrack::all()[idx % 3];
                if let Some(id) = ToolId::from_index(idx / 3) {
                    let r = self.buy_upgrade(id, track);
                    self.run(r);
                }
            }
            a if (SELECT_TOOL_BASE..SELECT_TOOL_BASE + TOOLS_PER_PAGE as u16).contains(&a) => {
                let slot = (a - SELECT_TOOL_BASE) as usize;
                if self.tool_on_page(slot).is_some() {
                    self.state.selected_tool = slot;
                }
            }
            UNLOCK_ZONE => {
                let r = self.unlock_zone();
                self.run(r);
            }
            PRESTIGE_RESET => {
                let r = self.prestige();
                self.run(r);
            }
            a if (BUY_PRESTIGE_UPGRADE_BASE..BUY_PRESTIGE_UPGRADE_BASE + shop_count).contains(&a) => {
                if let Some(id) = PrestigeUpgradeId::from_index((a - BUY_PRESTIGE_UPGRADE_BASE) as usize) {
                    let r = self.buy_prestige_upgrade(id);
                    self.run(r);
                }
            }
            SAVE => {
                let r = self.save();
                self.run(r);
            }
            LOAD => {
                let r = self.load();
                if let Ok(false) = r {
                    self.state.add_log("No save found.", false);
                }
                self.run(r);
            }
            TOGGLE_MUSIC => self.toggle_music(),
            TOGGLE_CLICK_SOUND => self.toggle_click_sound(),
            RESET_SAVE => {
                if reset_armed {
                    let r = self.reset();
                    self.run(r);
                } else {
                    self.state.reset_armed = true;
                    self.state
                        .add_log("Press reset again to wipe all progress.", true);
                }
            }
            _ => return false,
        }
        true
    }
}

impl Game for DustGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => match self.key_action(*c) {
                Some(action) => self.dispatch(action),
                None => c.is_ascii_digit(),
            },
            InputEvent::Click(id) => self.dispatch(*id),
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        let seconds = delta_ticks as f64 * TICK_INTERVAL_MS / 1000.0;
        logic::apply_elapsed_time(&mut self.state, seconds);
        self.state.last_update_ms = self.now();
        self.settle();

        self.secs_since_save += seconds;
        if self.secs_since_save >= AUTOSAVE_INTERVAL_SECS {
            match self.persist() {
                Ok(()) => log::debug!("autosaved"),
                Err(e) => {
                    self.secs_since_save = 0.0;
                    self.report(e);
                }
            }
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "On"
    } else {
        "Off"
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `2h 05m`, `14m 09s` or `42s`.
fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else if m > 0 {
        format!("{}m {:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}
