//! Galactic Dust Sweeper progression state.

use super::catalog::{
    AchievementId, PrestigeUpgradeId, ToolDef, ToolId, UpgradeTrack, ZoneDef, ACHIEVEMENTS,
    MAX_LOG_ENTRIES, PRESTIGE_UPGRADES, TOOLS, UPGRADE_COST_FACTOR, UPGRADE_OUTPUT_STEP, ZONES,
};

/// Runtime progress of a single tool.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolState {
    /// Price of the next level. Grows forward on every purchase.
    pub cost: f64,
    pub level: u32,
    /// Sub-upgrade levels, indexed by [`UpgradeTrack::index`].
    pub upgrades: [u32; 3],
    /// Zone that pays for this tool and receives its output.
    pub zone: usize,
}

impl ToolState {
    pub fn new(def: &ToolDef) -> Self {
        Self {
            cost: def.base_cost,
            level: 0,
            upgrades: [0; 3],
            zone: def.zone,
        }
    }

    pub fn upgrade_level(&self, track: UpgradeTrack) -> u32 {
        self.upgrades[track.index()]
    }

    /// `1 + (sum of sub-upgrade levels) * 0.12`.
    pub fn upgrade_multiplier(&self) -> f64 {
        let levels: u32 = self.upgrades.iter().sum();
        1.0 + levels as f64 * UPGRADE_OUTPUT_STEP
    }

    /// Raw output before any prestige multiplier.
    pub fn output(&self, def: &ToolDef) -> f64 {
        self.level as f64 * def.increment * self.upgrade_multiplier()
    }

    /// Price of the next level of a sub-upgrade track.
    pub fn upgrade_cost(&self, def: &ToolDef, track: UpgradeTrack) -> f64 {
        let next = self.upgrade_level(track) as f64 + 1.0;
        (def.base_cost * UPGRADE_COST_FACTOR * next).ceil()
    }
}

/// Figures derived by `recalc_production`. Never edited directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Production {
    pub dust_per_click: f64,
    pub passive_per_second: f64,
    pub auto_clicks_per_second: f64,
    /// Passive income plus auto clicks converted at the per-click rate.
    pub total_per_second: f64,
    /// Per-zone income per second, credited by the tick.
    pub zone_per_second: Vec<f64>,
    /// Per-zone extra dust granted by each manual click.
    pub zone_clicks: Vec<f64>,
}

impl Default for Production {
    fn default() -> Self {
        Self {
            dust_per_click: 1.0,
            passive_per_second: 0.0,
            auto_clicks_per_second: 0.0,
            total_per_second: 0.0,
            zone_per_second: vec![0.0; ZONES.len()],
            zone_clicks: vec![0.0; ZONES.len()],
        }
    }
}

/// Persisted player preferences.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub bgm_on: bool,
    pub click_sound_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bgm_on: false,
            click_sound_on: true,
        }
    }
}

/// Notice shown in the in-game log.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full progression state of a run, plus what survives prestige.
#[derive(Clone, Debug)]
pub struct DustState {
    /// Sum of every gain ever credited. Only kept for older saves.
    pub dust: f64,
    /// Balance per zone index.
    pub currencies: Vec<f64>,
    /// Dust earned this run (the achievement counter).
    pub total_dust_earned: f64,
    /// Dust earned this run (drives prestige gain).
    pub lifetime_dust: f64,
    pub total_clicks: u64,
    /// Prestige point balance.
    pub prestige: u64,
    /// Highest prestige title index ever reached.
    pub prestige_title_index: usize,
    pub current_zone: usize,
    /// Indexed by [`ToolId::index`].
    pub tools: Vec<ToolState>,
    /// Indexed by [`PrestigeUpgradeId::index`].
    pub prestige_upgrades: Vec<u32>,
    /// Unlocked flags, indexed by [`AchievementId::index`].
    pub achievements: Vec<bool>,
    pub achievement_multiplier: f64,
    pub production: Production,
    pub settings: Settings,
    /// Epoch milliseconds of the last accrual or save.
    pub last_update_ms: f64,
    pub log: Vec<LogEntry>,
    /// Which screen the player is looking at.
    pub tab: Tab,
    /// Page of the tool list (shared by the tools and upgrades screens).
    pub tool_page: usize,
    /// Page of the prestige shop.
    pub shop_page: usize,
    /// Tool on the current page whose sub-upgrades the keyboard targets.
    pub selected_tool: usize,
    /// A first reset press arms it; the second one wipes the save.
    pub reset_armed: bool,
}

/// Screens of the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Tools,
    Upgrades,
    Zones,
    Prestige,
    Achievements,
}

impl Default for DustState {
    fn default() -> Self {
        Self::new()
    }
}

impl DustState {
    pub fn new() -> Self {
        Self {
            dust: 0.0,
            currencies: vec![0.0; ZONES.len()],
            total_dust_earned: 0.0,
            lifetime_dust: 0.0,
            total_clicks: 0,
            prestige: 0,
            prestige_title_index: 0,
            current_zone: 0,
            tools: fresh_tools(),
            prestige_upgrades: vec![0; PRESTIGE_UPGRADES.len()],
            achievements: vec![false; ACHIEVEMENTS.len()],
            achievement_multiplier: 1.0,
            production: Production::default(),
            settings: Settings::default(),
            last_update_ms: 0.0,
            log: vec![LogEntry {
                text: "Welcome to Galactic Dust Sweeper!".into(),
                is_important: true,
            }],
            tab: Tab::Tools,
            tool_page: 0,
            shop_page: 0,
            selected_tool: 0,
            reset_armed: false,
        }
    }

    pub fn tool(&self, id: ToolId) -> &ToolState {
        &self.tools[id.index()]
    }

    pub fn tool_mut(&mut self, id: ToolId) -> &mut ToolState {
        &mut self.tools[id.index()]
    }

    pub fn balance(&self, zone: usize) -> f64 {
        self.currencies.get(zone).copied().unwrap_or(0.0)
    }

    pub fn active_balance(&self) -> f64 {
        self.balance(self.current_zone)
    }

    pub fn current_zone_def(&self) -> &'static ZoneDef {
        &ZONES[self.current_zone.min(ZONES.len() - 1)]
    }

    /// Next zone to unlock, if any remain.
    pub fn next_zone(&self) -> Option<&'static ZoneDef> {
        ZONES.get(self.current_zone + 1)
    }

    pub fn prestige_level(&self, id: PrestigeUpgradeId) -> u32 {
        self.prestige_upgrades[id.index()]
    }

    /// Price of the next level of a prestige shop track.
    pub fn prestige_upgrade_cost(&self, id: PrestigeUpgradeId) -> u64 {
        id.def().cost * (1 + self.prestige_level(id) as u64)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements[id.index()]
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|u| **u).count()
    }

    pub fn total_tool_levels(&self) -> u32 {
        self.tools.iter().map(|t| t.level).sum()
    }

    /// Drop run progress. Prestige points, shop levels, achievements,
    /// titles and preferences are kept.
    pub fn reset_run(&mut self) {
        self.dust = 0.0;
        self.currencies = vec![0.0; ZONES.len()];
        self.total_dust_earned = 0.0;
        self.lifetime_dust = 0.0;
        self.total_clicks = 0;
        self.current_zone = 0;
        self.tools = fresh_tools();
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG_ENTRIES {
            self.log.remove(0);
        }
    }
}

fn fresh_tools() -> Vec<ToolState> {
    TOOLS.iter().map(ToolState::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_zeroed() {
        let state = DustState::new();
        assert_eq!(state.currencies.len(), ZONES.len());
        assert!(state.currencies.iter().all(|c| *c == 0.0));
        assert_eq!(state.current_zone, 0);
        assert_eq!(state.prestige, 0);
        assert_eq!(state.total_tool_levels(), 0);
        assert_eq!(state.unlocked_count(), 0);
        assert!((state.achievement_multiplier - 1.0).abs() < f64::EPSILON);
        assert!(state.settings.click_sound_on);
        assert!(!state.settings.bgm_on);
    }

    #[test]
    fn tool_starts_at_catalog_cost() {
        let state = DustState::new();
        let basic = state.tool(ToolId::Basic);
        assert!((basic.cost - 20.0).abs() < f64::EPSILON);
        assert_eq!(basic.zone, 0);
        assert_eq!(state.tool(ToolId::SolarArray).zone, 1);
    }

    #[test]
    fn tool_output_scales_with_upgrades() {
        let def = ToolId::Laser.def();
        let mut t = ToolState::new(def);
        assert!((t.output(def) - 0.0).abs() < f64::EPSILON);
        t.level = 2;
        assert!((t.output(def) - 10.0).abs() < 1e-9);
        t.upgrades = [1, 1, 0];
        // 2 * 5 * (1 + 2 * 0.12)
        assert!((t.output(def) - 12.4).abs() < 1e-9);
    }

    #[test]
    fn upgrade_cost_is_linear_in_track_level() {
        let def = ToolId::Basic.def();
        let mut t = ToolState::new(def);
        // ceil(20 * 0.6 * 1)
        assert!((t.upgrade_cost(def, UpgradeTrack::Speed) - 12.0).abs() < f64::EPSILON);
        t.upgrades[UpgradeTrack::Speed.index()] = 2;
        assert!((t.upgrade_cost(def, UpgradeTrack::Speed) - 36.0).abs() < f64::EPSILON);
        // other tracks unaffected
        assert!((t.upgrade_cost(def, UpgradeTrack::Capacity) - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn upgrade_cost_rounds_up() {
        let def = ToolId::AutoClicker.def();
        let t = ToolState::new(def);
        // 100 * 0.6 = 60 exactly; Magnet: 1200 * 0.6 = 720
        assert!((t.upgrade_cost(def, UpgradeTrack::Efficiency) - 60.0).abs() < f64::EPSILON);
        let def = ToolId::Magnet.def();
        let t = ToolState::new(def);
        assert!((t.upgrade_cost(def, UpgradeTrack::Efficiency) - 720.0).abs() < f64::EPSILON);
    }

    #[test]
    fn prestige_upgrade_cost_scales_with_level() {
        let mut state = DustState::new();
        assert_eq!(state.prestige_upgrade_cost(PrestigeUpgradeId::ClickBoost), 3);
        state.prestige_upgrades[PrestigeUpgradeId::ClickBoost.index()] = 2;
        assert_eq!(state.prestige_upgrade_cost(PrestigeUpgradeId::ClickBoost), 9);
    }

    #[test]
    fn next_zone_stops_at_the_end() {
        let mut state = DustState::new();
        assert_eq!(state.next_zone().map(|z| z.name), Some("Asteroid Belt"));
        state.current_zone = ZONES.len() - 1;
        assert!(state.next_zone().is_none());
    }

    #[test]
    fn reset_run_keeps_meta_progress() {
        let mut state = DustState::new();
        state.currencies[0] = 500.0;
        state.lifetime_dust = 1e6;
        state.total_clicks = 12;
        state.current_zone = 3;
        state.tool_mut(ToolId::Basic).level = 4;
        state.prestige = 7;
        state.prestige_upgrades[0] = 2;
        state.achievements[0] = true;
        state.achievement_multiplier = 1.5;

        state.reset_run();

        assert!((state.balance(0) - 0.0).abs() < f64::EPSILON);
        assert!((state.lifetime_dust - 0.0).abs() < f64::EPSILON);
        assert_eq!(state.total_clicks, 0);
        assert_eq!(state.current_zone, 0);
        assert_eq!(state.tool(ToolId::Basic).level, 0);
        assert_eq!(state.prestige, 7);
        assert_eq!(state.prestige_upgrades[0], 2);
        assert!(state.achievements[0]);
        assert!((state.achievement_multiplier - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn log_truncation() {
        let mut state = DustState::new();
        for i in 0..60 {
            state.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(state.log.len(), MAX_LOG_ENTRIES);
        assert_eq!(state.log.last().map(|e| e.text.as_str()), Some("msg 59"));
    }
}
