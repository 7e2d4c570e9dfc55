//! Static game data: tools, zones, prestige shop, titles and achievements.
//!
//! Every id enum doubles as an index into the runtime progress vectors held by
//! [`DustState`](super::state::DustState), and carries the stable string key
//! used in the save blob.

// ── Tuning ──────────────────────────────────────────────────────

/// Geometric growth applied to a tool's cost after each purchase.
pub const TOOL_COST_GROWTH: f64 = 1.18;
/// Output bonus per sub-upgrade level (summed across the three tracks).
pub const UPGRADE_OUTPUT_STEP: f64 = 0.12;
/// Sub-upgrade cost = base cost × this × (track level + 1).
pub const UPGRADE_COST_FACTOR: f64 = 0.6;

/// Lifetime dust that never counts toward prestige.
pub const PRESTIGE_RUNWAY: f64 = 50_000.0;
pub const PRESTIGE_DIVISOR: f64 = 150_000.0;
pub const PRESTIGE_EXPONENT: f64 = 0.7;
/// Each banked prestige point adds this much to the prestige multiplier.
pub const PRESTIGE_LINEAR_STEP: f64 = 0.12;
/// Extra multiplier per √(prestige points).
pub const PRESTIGE_SQRT_STEP: f64 = 0.05;
/// Prestige points per title rank.
pub const TITLE_STEP: u64 = 10;

/// Offline gains never cover more than 12 hours.
pub const MAX_OFFLINE_SECONDS: f64 = 12.0 * 60.0 * 60.0;
/// Passive accrual cadence.
pub const TICK_INTERVAL_MS: f64 = 250.0;
/// Seconds between automatic saves.
pub const AUTOSAVE_INTERVAL_SECS: f64 = 30.0;
/// Maximum number of notices kept in the in-game log.
pub const MAX_LOG_ENTRIES: usize = 50;
/// Tools shown per page.
pub const TOOLS_PER_PAGE: usize = 8;
/// Prestige shop tracks shown per page.
pub const SHOP_PER_PAGE: usize = 4;

// ── Tools ───────────────────────────────────────────────────────

/// What a tool's output feeds into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
    /// Adds to dust per click.
    Click,
    /// Adds to dust per second.
    Passive,
    /// Adds automatic clicks per second.
    AutoClick,
}

impl ToolKind {
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Click => "click",
            ToolKind::Passive => "passive",
            ToolKind::AutoClick => "auto",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolId {
    Basic,
    Laser,
    AutoClicker,
    SuperVac,
    Magnet,
    AutoDrone,
    SolarArray,
    QuantumNet,
    IonScoop,
    NebulaHarvester,
    WarpCollector,
    DarkMatter,
    StellarBroom,
    PlasmaRake,
    GravityWell,
    ChronoClicker,
    PhotonArray,
    AntimatterMesh,
    SingularityNet,
    QuantumVacuum,
    StarForge,
    RiftEngine,
    AlienConsortium,
    CosmicOverseer,
    StarlitSail,
    NebulaCycler,
    VoidHarvester,
    RiftExcavator,
    AuroraWeaver,
    StellarEmpress,
}

pub struct ToolDef {
    pub id: ToolId,
    /// Save-blob key.
    pub key: &'static str,
    pub label: &'static str,
    pub base_cost: f64,
    pub increment: f64,
    pub kind: ToolKind,
    /// Zone whose currency pays for the tool and receives its output.
    pub zone: usize,
}

const fn tool(
    id: ToolId,
    key: &'static str,
    label: &'static str,
    base_cost: f64,
    increment: f64,
    kind: ToolKind,
    zone: usize,
) -> ToolDef {
    ToolDef {
        id,
        key,
        label,
        base_cost,
        increment,
        kind,
        zone,
    }
}

use ToolKind::{AutoClick, Click, Passive};

/// All tools in display order. `TOOLS[id.index()].id == id`.
pub static TOOLS: [ToolDef; 30] = [
    tool(ToolId::Basic, "basic", "Basic Sweeper", 20.0, 1.0, Click, 0),
    tool(ToolId::Laser, "laser", "Laser Sweeper", 200.0, 5.0, Click, 0),
    tool(ToolId::AutoClicker, "autoClicker", "Auto Clicker", 100.0, 1.0, AutoClick, 0),
    tool(ToolId::SuperVac, "superVac", "Super Vac", 500.0, 10.0, Click, 0),
    tool(ToolId::Magnet, "magnet", "Magnetic Net", 1_200.0, 25.0, Click, 0),
    tool(ToolId::AutoDrone, "autoDrone", "Auto Drone", 3_500.0, 50.0, AutoClick, 0),
    tool(ToolId::SolarArray, "solarArray", "Solar Array", 9_000.0, 150.0, Passive, 1),
    tool(ToolId::QuantumNet, "quantumNet", "Quantum Net", 25_000.0, 500.0, Click, 1),
    tool(ToolId::IonScoop, "ionScoop", "Ion Scoop", 40_000.0, 800.0, Click, 1),
    tool(ToolId::NebulaHarvester, "nebulaHarvester", "Nebula Harvester", 60_000.0, 400.0, Passive, 2),
    tool(ToolId::WarpCollector, "warpCollector", "Warp Collector", 85_000.0, 120.0, AutoClick, 2),
    tool(ToolId::DarkMatter, "darkMatter", "Dark Matter Siphon", 120_000.0, 1_200.0, Passive, 2),
    tool(ToolId::StellarBroom, "stellarBroom", "Stellar Broom", 180_000.0, 2_000.0, Click, 3),
    tool(ToolId::PlasmaRake, "plasmaRake", "Plasma Rake", 240_000.0, 2_800.0, Click, 3),
    tool(ToolId::GravityWell, "gravityWell", "Gravity Well", 320_000.0, 3_600.0, Passive, 3),
    tool(ToolId::ChronoClicker, "chronoClicker", "Chrono Clicker", 450_000.0, 500.0, AutoClick, 3),
    tool(ToolId::PhotonArray, "photonArray", "Photon Array", 600_000.0, 5_200.0, Passive, 4),
    tool(ToolId::AntimatterMesh, "antimatterMesh", "Antimatter Mesh", 800_000.0, 7_200.0, Click, 4),
    tool(ToolId::SingularityNet, "singularityNet", "Singularity Net", 1_050_000.0, 9_500.0, Click, 4),
    tool(ToolId::QuantumVacuum, "quantumVacuum", "Quantum Vacuum", 1_400_000.0, 900.0, AutoClick, 4),
    tool(ToolId::StarForge, "starForge", "Star Forge", 1_800_000.0, 12_000.0, Passive, 4),
    tool(ToolId::RiftEngine, "riftEngine", "Rift Engine", 2_300_000.0, 15_000.0, Click, 4),
    tool(ToolId::AlienConsortium, "alienConsortium", "Alien Consortium", 3_000_000.0, 18_000.0, Passive, 4),
    tool(ToolId::CosmicOverseer, "cosmicOverseer", "Cosmic Overseer", 3_800_000.0, 1_400.0, AutoClick, 4),
    tool(ToolId::StarlitSail, "starlitSail", "Starlit Sail", 5_200_000.0, 21_000.0, Passive, 5),
    tool(ToolId::NebulaCycler, "nebulaCycler", "Nebula Cycler", 7_600_000.0, 26_000.0, AutoClick, 5),
    tool(ToolId::VoidHarvester, "voidHarvester", "Void Harvester", 10_500_000.0, 32_000.0, Click, 6),
    tool(ToolId::RiftExcavator, "riftExcavator", "Rift Excavator", 14_500_000.0, 42_000.0, Passive, 6),
    tool(ToolId::AuroraWeaver, "auroraWeaver", "Aurora Weaver", 19_000_000.0, 52_000.0, Passive, 7),
    tool(ToolId::StellarEmpress, "stellarEmpress", "Stellar Empress", 25_000_000.0, 68_000.0, AutoClick, 7),
];

impl ToolId {
    /// All tools in display order.
    pub fn all() -> impl Iterator<Item = ToolId> {
        TOOLS.iter().map(|t| t.id)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn def(&self) -> &'static ToolDef {
        &TOOLS[self.index()]
    }

    pub fn from_index(idx: usize) -> Option<ToolId> {
        TOOLS.get(idx).map(|t| t.id)
    }

    pub fn from_key(key: &str) -> Option<ToolId> {
        TOOLS.iter().find(|t| t.key == key).map(|t| t.id)
    }
}

/// The three per-tool sub-upgrade tracks. They are interchangeable in effect;
/// only their levels (and therefore costs) are tracked separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeTrack {
    Efficiency,
    Speed,
    Capacity,
}

impl UpgradeTrack {
    pub fn all() -> &'static [UpgradeTrack; 3] {
        &[
            UpgradeTrack::Efficiency,
            UpgradeTrack::Speed,
            UpgradeTrack::Capacity,
        ]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpgradeTrack::Efficiency => "Efficiency",
            UpgradeTrack::Speed => "Speed",
            UpgradeTrack::Capacity => "Capacity",
        }
    }
}

// ── Zones ───────────────────────────────────────────────────────

pub struct ZoneDef {
    pub name: &'static str,
    pub currency: &'static str,
    /// Unlock cost, paid in the previous zone's currency.
    pub cost: f64,
    /// Flat production bonus as a fraction (0.05 = +5%).
    pub bonus: f64,
}

pub const ZONE_COUNT: usize = 8;

pub static ZONES: [ZoneDef; ZONE_COUNT] = [
    ZoneDef { name: "Planet A", currency: "Dust", cost: 0.0, bonus: 0.0 },
    ZoneDef { name: "Asteroid Belt", currency: "Astro Dust", cost: 1_000.0, bonus: 0.05 },
    ZoneDef { name: "Moon Outpost", currency: "Lunar Dust", cost: 5_000.0, bonus: 0.1 },
    ZoneDef { name: "Red Dunes", currency: "Dune Dust", cost: 20_000.0, bonus: 0.18 },
    ZoneDef { name: "Crystal Nebula", currency: "Nebula Dust", cost: 80_000.0, bonus: 0.3 },
    ZoneDef { name: "Starlit Reef", currency: "Starlight Dust", cost: 160_000.0, bonus: 0.36 },
    ZoneDef { name: "Void Rift", currency: "Void Dust", cost: 320_000.0, bonus: 0.44 },
    ZoneDef { name: "Aurora Spire", currency: "Aurora Dust", cost: 640_000.0, bonus: 0.52 },
];

/// Currency name for a zone index, falling back to plain dust.
pub fn currency_name(zone: usize) -> &'static str {
    ZONES.get(zone).map_or("Dust", |z| z.currency)
}

// ── Prestige shop ───────────────────────────────────────────────

/// Which production figure a prestige shop track boosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoostGroup {
    Click,
    Passive,
    Auto,
    Zone,
    Global,
    Yield,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrestigeUpgradeId {
    ClickBoost,
    PassiveBoost,
    AutoBoost,
    ZoneBonus,
    GlobalBoost,
    PrestigeYield,
    TapSurge,
    TempoFlux,
    SwarmOverclock,
    MacroEconomy,
    Windfall,
    Cartography,
}

pub struct PrestigeUpgradeDef {
    pub id: PrestigeUpgradeId,
    pub key: &'static str,
    pub label: &'static str,
    /// Price of level 1; level n+1 costs `cost * (n + 1)`.
    pub cost: u64,
    /// Multiplier gained per level.
    pub effect: f64,
    pub description: &'static str,
    pub group: BoostGroup,
}

pub static PRESTIGE_UPGRADES: [PrestigeUpgradeDef; 12] = [
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::ClickBoost,
        key: "clickBoost",
        label: "Galactic Focus",
        cost: 3,
        effect: 0.15,
        description: "+15% dust per click per level",
        group: BoostGroup::Click,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::PassiveBoost,
        key: "passiveBoost",
        label: "Fleet Logistics",
        cost: 4,
        effect: 0.12,
        description: "+12% passive/sec per level",
        group: BoostGroup::Passive,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::AutoBoost,
        key: "autoBoost",
        label: "Automation Mesh",
        cost: 4,
        effect: 0.12,
        description: "+12% auto clicks/sec per level",
        group: BoostGroup::Auto,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::ZoneBonus,
        key: "zoneBonus",
        label: "Zonal Synergy",
        cost: 5,
        effect: 0.08,
        description: "+8% zone bonus per level",
        group: BoostGroup::Zone,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::GlobalBoost,
        key: "globalBoost",
        label: "Continuum Surge",
        cost: 6,
        effect: 0.1,
        description: "+10% all gains per level",
        group: BoostGroup::Global,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::PrestigeYield,
        key: "prestigeYield",
        label: "Ascendant Yield",
        cost: 7,
        effect: 0.12,
        description: "+12% prestige gain per level",
        group: BoostGroup::Yield,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::TapSurge,
        key: "tapSurge",
        label: "Tap Surge",
        cost: 5,
        effect: 0.18,
        description: "+18% dust per click per level",
        group: BoostGroup::Click,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::TempoFlux,
        key: "tempoFlux",
        label: "Tempo Flux",
        cost: 5,
        effect: 0.15,
        description: "+15% passive/sec per level",
        group: BoostGroup::Passive,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::SwarmOverclock,
        key: "swarmOverclock",
        label: "Swarm Overclock",
        cost: 5,
        effect: 0.14,
        description: "+14% auto clicks/sec per level",
        group: BoostGroup::Auto,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::MacroEconomy,
        key: "macroEconomy",
        label: "Macro Economy",
        cost: 6,
        effect: 0.08,
        description: "+8% all gains per level",
        group: BoostGroup::Global,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::Windfall,
        key: "windfall",
        label: "Windfall",
        cost: 7,
        effect: 0.14,
        description: "+14% prestige gain per level",
        group: BoostGroup::Yield,
    },
    PrestigeUpgradeDef {
        id: PrestigeUpgradeId::Cartography,
        key: "cartography",
        label: "Zonal Cartography",
        cost: 4,
        effect: 0.12,
        description: "+12% zone bonus per level",
        group: BoostGroup::Zone,
    },
];

impl PrestigeUpgradeId {
    pub fn all() -> impl Iterator<Item = PrestigeUpgradeId> {
        PRESTIGE_UPGRADES.iter().map(|u| u.id)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn def(&self) -> &'static PrestigeUpgradeDef {
        &PRESTIGE_UPGRADES[self.index()]
    }

    pub fn from_index(idx: usize) -> Option<PrestigeUpgradeId> {
        PRESTIGE_UPGRADES.get(idx).map(|u| u.id)
    }

    pub fn from_key(key: &str) -> Option<PrestigeUpgradeId> {
        PRESTIGE_UPGRADES.iter().find(|u| u.key == key).map(|u| u.id)
    }
}

pub static PRESTIGE_TITLES: [&str; 11] = [
    "Initiate Sweeper",
    "Stellar Custodian",
    "Asteroid Keeper",
    "Nebula Warden",
    "Void Navigator",
    "Aurora Marshal",
    "Galactic Overwatch",
    "Cosmic Regent",
    "Eclipse Archon",
    "Starlight Sovereign",
    "Celestial Empress",
];

// ── Achievements ────────────────────────────────────────────────

/// Condition an achievement waits for. Read-only over the progression state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    TotalEarned(f64),
    TotalClicks(u64),
    AnyToolOwned,
    TotalToolLevels(u32),
    TotalPerSecond(f64),
    AutoClicksPerSecond(f64),
    /// Current prestige point balance.
    PrestigeAtLeast(u64),
    /// Current zone index at least this far along.
    ZoneReached(usize),
    LifetimeEarned(f64),
}

/// One-shot reward applied when an achievement unlocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reward {
    /// Dust credited to the active zone, subject to multipliers.
    Dust(f64),
    /// Prestige points added directly.
    Prestige(u64),
    /// Permanent bump: achievement multiplier × (1 + value).
    Multiplier(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstDust,
    HundredDust,
    ThousandDust,
    TenK,
    FiftyK,
    QuarterMil,
    ClickNovice,
    ClickPro,
    ClickLegend,
    FirstTool,
    Toolmaster,
    ToolCaptain,
    ToolLegend,
    PassiveFlow,
    PassiveTorrent,
    AutoAce,
    AutoOverdrive,
    PrestigeOnce,
    PrestigeFive,
    PrestigeTen,
    PrestigeTwentyFive,
    ZoneExplorer,
    ZoneVoyager,
    LifetimeMillion,
    LifetimeTenMillion,
    LifetimeBillion,
    LifetimeTenBillion,
}

pub struct AchievementDef {
    pub id: AchievementId,
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub condition: Condition,
    pub reward: Reward,
}

const fn achievement(
    id: AchievementId,
    key: &'static str,
    label: &'static str,
    description: &'static str,
    condition: Condition,
    reward: Reward,
) -> AchievementDef {
    AchievementDef {
        id,
        key,
        label,
        description,
        condition,
        reward,
    }
}

pub static ACHIEVEMENTS: [AchievementDef; 27] = [
    achievement(AchievementId::FirstDust, "first_dust", "First Sweep", "Collect your first dust.", Condition::TotalEarned(1.0), Reward::Dust(50.0)),
    achievement(AchievementId::HundredDust, "hundred_dust", "Collector", "Gather 100 dust.", Condition::TotalEarned(100.0), Reward::Multiplier(0.02)),
    achievement(AchievementId::ThousandDust, "thousand_dust", "Hoarder", "Gather 1,000 dust.", Condition::TotalEarned(1_000.0), Reward::Multiplier(0.05)),
    achievement(AchievementId::TenK, "ten_k", "Dust Tyro", "Gather 10,000 dust.", Condition::TotalEarned(10_000.0), Reward::Multiplier(0.08)),
    achievement(AchievementId::FiftyK, "fifty_k", "Dust Adept", "Gather 50,000 dust.", Condition::TotalEarned(50_000.0), Reward::Multiplier(0.12)),
    achievement(AchievementId::QuarterMil, "quarter_mil", "Dust Artisan", "Gather 250,000 dust.", Condition::TotalEarned(250_000.0), Reward::Dust(5_000.0)),
    achievement(AchievementId::ClickNovice, "click_novice", "Click Novice", "Click 50 times.", Condition::TotalClicks(50), Reward::Dust(250.0)),
    achievement(AchievementId::ClickPro, "click_pro", "Click Pro", "Click 1,000 times.", Condition::TotalClicks(1_000), Reward::Multiplier(0.06)),
    achievement(AchievementId::ClickLegend, "click_legend", "Click Legend", "Click 10,000 times.", Condition::TotalClicks(10_000), Reward::Prestige(2)),
    achievement(AchievementId::FirstTool, "first_tool", "Investor", "Buy any tool.", Condition::AnyToolOwned, Reward::Dust(500.0)),
    achievement(AchievementId::Toolmaster, "toolmaster", "Fleet Builder", "Reach 20 total tool levels.", Condition::TotalToolLevels(20), Reward::Multiplier(0.1)),
    achievement(AchievementId::ToolCaptain, "tool_captain", "Fleet Commander", "Reach 75 total tool levels.", Condition::TotalToolLevels(75), Reward::Multiplier(0.12)),
    achievement(AchievementId::ToolLegend, "tool_legend", "Armada Architect", "Reach 150 total tool levels.", Condition::TotalToolLevels(150), Reward::Prestige(4)),
    achievement(AchievementId::PassiveFlow, "passive_flow", "Passive Flow", "Reach 1,000 dust/sec.", Condition::TotalPerSecond(1_000.0), Reward::Prestige(1)),
    achievement(AchievementId::PassiveTorrent, "passive_torrent", "Nebula Torrent", "Reach 10,000 dust/sec.", Condition::TotalPerSecond(10_000.0), Reward::Multiplier(0.18)),
    achievement(AchievementId::AutoAce, "auto_ace", "Auto Ace", "Reach 250 auto clicks/sec.", Condition::AutoClicksPerSecond(250.0), Reward::Multiplier(0.1)),
    achievement(AchievementId::AutoOverdrive, "auto_overdrive", "Auto Overdrive", "Reach 1,000 auto clicks/sec.", Condition::AutoClicksPerSecond(1_000.0), Reward::Multiplier(0.14)),
    achievement(AchievementId::PrestigeOnce, "prestige_once", "Begin Again", "Prestige once.", Condition::PrestigeAtLeast(1), Reward::Multiplier(0.15)),
    achievement(AchievementId::PrestigeFive, "prestige_five", "Reborn x5", "Prestige five times.", Condition::PrestigeAtLeast(5), Reward::Prestige(2)),
    achievement(AchievementId::PrestigeTen, "prestige_ten", "Reborn x10", "Prestige ten times.", Condition::PrestigeAtLeast(10), Reward::Prestige(3)),
    achievement(AchievementId::PrestigeTwentyFive, "prestige_twentyfive", "Reborn x25", "Prestige twenty-five times.", Condition::PrestigeAtLeast(25), Reward::Multiplier(0.2)),
    achievement(AchievementId::ZoneExplorer, "zone_explorer", "Dune Ranger", "Unlock the Red Dunes (Zone 3).", Condition::ZoneReached(3), Reward::Multiplier(0.1)),
    achievement(AchievementId::ZoneVoyager, "zone_voyager", "Aurora Voyager", "Reach the Aurora Spire (final zone).", Condition::ZoneReached(ZONE_COUNT - 1), Reward::Prestige(3)),
    achievement(AchievementId::LifetimeMillion, "lifetime_million", "Stellar Earner", "Reach 1,000,000 lifetime dust.", Condition::LifetimeEarned(1_000_000.0), Reward::Multiplier(0.18)),
    achievement(AchievementId::LifetimeTenMillion, "lifetime_ten_million", "Stellar Tycoon", "Reach 10,000,000 lifetime dust.", Condition::LifetimeEarned(10_000_000.0), Reward::Multiplier(0.22)),
    achievement(AchievementId::LifetimeBillion, "lifetime_billion", "Cosmic Magnate", "Reach 1,000,000,000 lifetime dust.", Condition::LifetimeEarned(1_000_000_000.0), Reward::Prestige(5)),
    achievement(AchievementId::LifetimeTenBillion, "lifetime_ten_billion", "Cosmic Baron", "Reach 10,000,000,000 lifetime dust.", Condition::LifetimeEarned(10_000_000_000.0), Reward::Prestige(8)),
];

impl AchievementId {
    pub fn all() -> impl Iterator<Item = AchievementId> {
        ACHIEVEMENTS.iter().map(|a| a.id)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn def(&self) -> &'static AchievementDef {
        &ACHIEVEMENTS[self.index()]
    }

    pub fn from_key(key: &str) -> Option<AchievementId> {
        ACHIEVEMENTS.iter().find(|a| a.key == key).map(|a| a.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_table_is_indexed_by_id() {
        for (i, def) in TOOLS.iter().enumerate() {
            assert_eq!(def.id.index(), i, "{} is out of place", def.key);
        }
    }

    #[test]
    fn prestige_table_is_indexed_by_id() {
        for (i, def) in PRESTIGE_UPGRADES.iter().enumerate() {
            assert_eq!(def.id.index(), i, "{} is out of place", def.key);
        }
    }

    #[test]
    fn achievement_table_is_indexed_by_id() {
        for (i, def) in ACHIEVEMENTS.iter().enumerate() {
            assert_eq!(def.id.index(), i, "{} is out of place", def.key);
        }
    }

    #[test]
    fn tool_zones_exist() {
        for def in &TOOLS {
            assert!(def.zone < ZONES.len(), "{} points at zone {}", def.key, def.zone);
        }
    }

    #[test]
    fn zone_costs_increase() {
        for pair in ZONES.windows(2) {
            assert!(pair[1].cost > pair[0].cost);
        }
    }

    #[test]
    fn keys_round_trip() {
        for id in ToolId::all() {
            assert_eq!(ToolId::from_key(id.def().key), Some(id));
        }
        for id in PrestigeUpgradeId::all() {
            assert_eq!(PrestigeUpgradeId::from_key(id.def().key), Some(id));
        }
        for id in AchievementId::all() {
            assert_eq!(AchievementId::from_key(id.def().key), Some(id));
        }
        assert_eq!(ToolId::from_key("nope"), None);
    }

    #[test]
    fn every_boost_group_has_two_tracks() {
        for group in [
            BoostGroup::Click,
            BoostGroup::Passive,
            BoostGroup::Auto,
            BoostGroup::Zone,
            BoostGroup::Global,
            BoostGroup::Yield,
        ] {
            let n = PRESTIGE_UPGRADES.iter().filter(|u| u.group == group).count();
            assert_eq!(n, 2, "{:?}", group);
        }
    }

    #[test]
    fn voyager_waits_for_the_last_zone() {
        let def = AchievementId::ZoneVoyager.def();
        assert_eq!(def.condition, Condition::ZoneReached(7));
        assert_eq!(ACHIEVEMENTS.len(), 27);
    }

    #[test]
    fn currency_name_falls_back() {
        assert_eq!(currency_name(1), "Astro Dust");
        assert_eq!(currency_name(99), "Dust");
    }
}
