//! Semantic action ids for Galactic Dust Sweeper click targets.
//!
//! Registered during render and dispatched back as `InputEvent::Click`.

// ── Core ────────────────────────────────────────────────────────
pub const SWEEP: u16 = 0;

// ── Tabs ────────────────────────────────────────────────────────
pub const TAB_TOOLS: u16 = 10;
pub const TAB_UPGRADES: u16 = 11;
pub const TAB_ZONES: u16 = 12;
pub const TAB_PRESTIGE: u16 = 13;
pub const TAB_ACHIEVEMENTS: u16 = 14;

// ── Paging (tool list or prestige shop, depending on the tab) ───
pub const PAGE_PREV: u16 = 20;
pub const PAGE_NEXT: u16 = 21;

// ── Tool purchase (base + tool index 0..29) ─────────────────────
pub const BUY_TOOL_BASE: u16 = 100;

// ── Sub-upgrade purchase (base + tool index * 3 + track index) ──
pub const BUY_UPGRADE_BASE: u16 = 200;

// ── Upgrade screen tool selection (base + slot on the page 0..7) ─
pub const SELECT_TOOL_BASE: u16 = 300;

// ── Zones ───────────────────────────────────────────────────────
pub const UNLOCK_ZONE: u16 = 400;

// ── Prestige ────────────────────────────────────────────────────
pub const PRESTIGE_RESET: u16 = 500;
/// Base + prestige upgrade index 0..11.
pub const BUY_PRESTIGE_UPGRADE_BASE: u16 = 600;

// ── Footer ──────────────────────────────────────────────────────
pub const SAVE: u16 = 700;
pub const LOAD: u16 = 701;
pub const TOGGLE_MUSIC: u16 = 702;
pub const TOGGLE_CLICK_SOUND: u16 = 703;
pub const RESET_SAVE: u16 = 704;
