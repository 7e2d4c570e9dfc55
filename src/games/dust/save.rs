//! Save and load for Galactic Dust Sweeper.
//!
//! The blob is a single flat JSON object under [`SAVE_KEY`] with camelCase
//! keys, readable by (and from) the browser edition of the game. Every field
//! is optional on the way in: anything missing or `null` takes its
//! fresh-state value, unknown keys and ids are skipped.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: bump when fields are added.
//! - Blobs without a `version` come from the browser edition (version 0).
//!   Those may predate per-zone currencies, in which case the legacy `dust`
//!   total is moved into the first zone.
//!
//! Loading is all-or-nothing: the blob is parsed and a complete state is
//! rebuilt before anything is assigned, so a corrupt blob leaves the running
//! game untouched.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::catalog::{AchievementId, PrestigeUpgradeId, ToolId, ToolKind, ZONES};
use super::error::{GameError, PersistenceError};
use super::logic;
use super::state::{DustState, ToolState};

/// Storage key shared with the browser edition.
pub const SAVE_KEY: &str = "gds_save";

/// Current blob format. 0 means "written by the browser edition".
const SAVE_VERSION: u32 = 1;

// ── Storage backends ────────────────────────────────────────────

/// Minimal key-value store the save blob lives in.
pub trait SaveStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(PersistenceError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
fn rejected(op: &'static str, err: impl std::fmt::Debug) -> PersistenceError {
    PersistenceError::Rejected {
        op,
        reason: format!("{:?}", err),
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| rejected("read", e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| rejected("write", e))
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| rejected("delete", e))
    }
}

/// In-process store for native runs and tests.
#[derive(Debug)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    /// Largest value a single write may store, in bytes.
    quota: usize,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            quota: usize::MAX,
        }
    }

    #[cfg(test)]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota,
        }
    }
}

impl SaveStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if value.len() > self.quota {
            return Err(PersistenceError::Rejected {
                op: "write",
                reason: format!("quota of {} bytes exceeded", self.quota),
            });
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.items.remove(key);
        Ok(())
    }
}

// ── Blob format ─────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", default)]
struct SaveBlob {
    version: u32,
    /// Legacy aggregate of every gain.
    dust: f64,
    total_dust_earned: f64,
    lifetime_dust: f64,
    total_clicks: u64,
    prestige: u64,
    achievement_multiplier: f64,
    current_zone_index: usize,
    bgm_on: bool,
    click_sound_on: bool,
    tools: BTreeMap<String, ToolSave>,
    achievements: BTreeMap<String, Option<AchievementFlag>>,
    /// `zone_N` → balance. Absent in saves that predate zones.
    currencies: Option<BTreeMap<String, f64>>,
    /// Zone index → rate. Written for the browser edition; recomputed on load.
    currency_per_second: BTreeMap<String, f64>,
    prestige_upgrades: BTreeMap<String, u32>,
    /// Zone index → click contribution. Recomputed on load.
    currency_clicks: BTreeMap<String, f64>,
    prestige_title_index: usize,
    /// Epoch milliseconds of the save.
    last_update: f64,
}

impl Default for SaveBlob {
    fn default() -> Self {
        Self {
            version: 0,
            dust: 0.0,
            total_dust_earned: 0.0,
            lifetime_dust: 0.0,
            total_clicks: 0,
            prestige: 0,
            achievement_multiplier: 1.0,
            current_zone_index: 0,
            bgm_on: false,
            click_sound_on: true,
            tools: BTreeMap::new(),
            achievements: BTreeMap::new(),
            currencies: None,
            currency_per_second: BTreeMap::new(),
            prestige_upgrades: BTreeMap::new(),
            currency_clicks: BTreeMap::new(),
            prestige_title_index: 0,
            last_update: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct ToolSave {
    cost: Option<f64>,
    base_cost: Option<f64>,
    increment: Option<f64>,
    kind: Option<String>,
    level: u32,
    upgrades: UpgradeSave,
    currency_zone: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
struct UpgradeSave {
    efficiency: u32,
    speed: u32,
    capacity: u32,
}

/// Older saves stored a bare `true`; newer ones `{ "unlocked": true }`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(untagged)]
enum AchievementFlag {
    Bare(bool),
    Record {
        #[serde(default)]
        unlocked: bool,
    },
}

impl AchievementFlag {
    fn is_unlocked(&self) -> bool {
        match *self {
            AchievementFlag::Bare(b) => b,
            AchievementFlag::Record { unlocked } => unlocked,
        }
    }
}

/// Drop `null` members at every depth so they read as missing. The browser
/// edition writes `null` for NaN and Infinity.
fn strip_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn zone_key(zone: usize) -> String {
    format!("zone_{}", zone)
}

fn parse_zone_key(key: &str) -> Option<usize> {
    key.strip_prefix("zone_")?.parse().ok()
}

fn kind_key(kind: ToolKind) -> &'static str {
    match kind {
        ToolKind::Click => "click",
        ToolKind::Passive => "passive",
        ToolKind::AutoClick => "autoClick",
    }
}

fn positive_rates(rates: &[f64]) -> BTreeMap<String, f64> {
    rates
        .iter()
        .enumerate()
        .filter(|(_, r)| **r > 0.0)
        .map(|(z, r)| (z.to_string(), *r))
        .collect()
}

// ── State <-> blob ──────────────────────────────────────────────

fn extract_save(state: &DustState, now_ms: f64) -> SaveBlob {
    let tools = ToolId::all()
        .map(|id| {
            let def = id.def();
            let t = state.tool(id);
            let save = ToolSave {
                cost: Some(t.cost),
                base_cost: Some(def.base_cost),
                increment: Some(def.increment),
                kind: Some(kind_key(def.kind).to_string()),
                level: t.level,
                upgrades: UpgradeSave {
                    efficiency: t.upgrades[0],
                    speed: t.upgrades[1],
                    capacity: t.upgrades[2],
                },
                currency_zone: Some(t.zone),
            };
            (def.key.to_string(), save)
        })
        .collect();

    let achievements = AchievementId::all()
        .filter(|id| state.is_unlocked(*id))
        .map(|id| {
            (
                id.def().key.to_string(),
                Some(AchievementFlag::Record { unlocked: true }),
            )
        })
        .collect();

    SaveBlob {
        version: SAVE_VERSION,
        dust: state.dust,
        total_dust_earned: state.total_dust_earned,
        lifetime_dust: state.lifetime_dust,
        total_clicks: state.total_clicks,
        prestige: state.prestige,
        achievement_multiplier: state.achievement_multiplier,
        current_zone_index: state.current_zone,
        bgm_on: state.settings.bgm_on,
        click_sound_on: state.settings.click_sound_on,
        tools,
        achievements,
        currencies: Some(
            state
                .currencies
                .iter()
                .enumerate()
                .map(|(z, v)| (zone_key(z), *v))
                .collect(),
        ),
        currency_per_second: positive_rates(&state.production.zone_per_second),
        prestige_upgrades: PrestigeUpgradeId::all()
            .map(|id| (id.def().key.to_string(), state.prestige_level(id)))
            .collect(),
        currency_clicks: positive_rates(&state.production.zone_clicks),
        prestige_title_index: state.prestige_title_index,
        last_update: now_ms,
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

/// Build a complete state from a blob. Production is recomputed from the
/// restored tools and shop levels.
fn restore(blob: &SaveBlob) -> DustState {
    let mut state = DustState::new();
    state.dust = finite_or(blob.dust, 0.0);
    state.total_dust_earned = finite_or(blob.total_dust_earned, 0.0);
    state.lifetime_dust = finite_or(blob.lifetime_dust, 0.0);
    state.total_clicks = blob.total_clicks;
    state.prestige = blob.prestige;
    state.prestige_title_index = blob.prestige_title_index;
    state.achievement_multiplier = finite_or(blob.achievement_multiplier, 1.0);
    state.current_zone = blob.current_zone_index.min(ZONES.len() - 1);
    state.settings.bgm_on = blob.bgm_on;
    state.settings.click_sound_on = blob.click_sound_on;

    match &blob.currencies {
        Some(map) => {
            for (key, value) in map {
                match parse_zone_key(key) {
                    Some(z) if z < state.currencies.len() => {
                        state.currencies[z] = finite_or(*value, 0.0);
                    }
                    _ => log::debug!("ignoring currency entry {}", key),
                }
            }
        }
        None if state.dust > 0.0 => {
            log::info!("migrating legacy dust total {} into zone 0", state.dust);
            state.currencies[0] += state.dust;
        }
        None => {}
    }

    for (key, saved) in &blob.tools {
        let id = match ToolId::from_key(key) {
            Some(id) => id,
            None => {
                log::debug!("ignoring unknown tool {}", key);
                continue;
            }
        };
        let def = id.def();
        let mut tool = ToolState::new(def);
        if let Some(cost) = saved.cost.filter(|c| c.is_finite() && *c > 0.0) {
            tool.cost = cost;
        }
        tool.level = saved.level;
        tool.upgrades = [
            saved.upgrades.efficiency,
            saved.upgrades.speed,
            saved.upgrades.capacity,
        ];
        tool.zone = saved
            .currency_zone
            .filter(|z| *z < ZONES.len())
            .unwrap_or(def.zone);
        state.tools[id.index()] = tool;
    }

    for (key, flag) in &blob.achievements {
        match AchievementId::from_key(key) {
            Some(id) => {
                state.achievements[id.index()] = flag.map_or(false, |f| f.is_unlocked());
            }
            None => log::debug!("ignoring unknown achievement {}", key),
        }
    }

    for (key, level) in &blob.prestige_upgrades {
        match PrestigeUpgradeId::from_key(key) {
            Some(id) => state.prestige_upgrades[id.index()] = *level,
            None => log::debug!("ignoring unknown prestige upgrade {}", key),
        }
    }

    logic::recalc_production(&mut state);
    state
}

// ── Public API ──────────────────────────────────────────────────

/// What a successful load credited for the time the game was closed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadReport {
    pub offline_seconds: f64,
    pub offline_gain: f64,
}

/// Persist the settled state. On failure the previously stored blob is left
/// as it was.
pub fn save_game(
    state: &DustState,
    storage: &mut dyn SaveStorage,
    now_ms: f64,
) -> Result<(), GameError> {
    let json = serde_json::to_string(&extract_save(state, now_ms))?;
    storage.set(SAVE_KEY, &json)?;
    log::info!("saved {} bytes", json.len());
    Ok(())
}

/// Replace `state` with the stored blob and credit offline production.
///
/// `Ok(None)` when nothing is stored. On error `state` is unchanged.
pub fn load_game(
    state: &mut DustState,
    storage: &dyn SaveStorage,
    now_ms: f64,
) -> Result<Option<LoadReport>, GameError> {
    let raw = match storage.get(SAVE_KEY)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let mut value: serde_json::Value = serde_json::from_str(&raw)?;
    strip_nulls(&mut value);
    let blob: SaveBlob = serde_json::from_value(value)?;

    if blob.version == 0 {
        log::info!("loading save from the browser edition");
    } else if blob.version > SAVE_VERSION {
        log::warn!(
            "save version {} is newer than {}; unknown fields are dropped",
            blob.version,
            SAVE_VERSION
        );
    }

    let mut loaded = restore(&blob);
    loaded.log = std::mem::take(&mut state.log);
    loaded.tab = state.tab;
    *state = loaded;

    let offline_seconds = logic::offline_seconds(blob.last_update, now_ms);
    let offline_gain = logic::apply_elapsed_time(state, offline_seconds);
    state.last_update_ms = now_ms;

    log::info!(
        "loaded save: {:.0}s offline, +{:.0} dust",
        offline_seconds,
        offline_gain
    );
    Ok(Some(LoadReport {
        offline_seconds,
        offline_gain,
    }))
}

/// Remove the stored blob.
pub fn delete_save(storage: &mut dyn SaveStorage) -> Result<(), GameError> {
    storage.remove(SAVE_KEY)?;
    log::info!("save deleted");
    Ok(())
}
