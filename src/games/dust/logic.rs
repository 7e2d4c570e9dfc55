//! Galactic Dust Sweeper economy: pure functions over [`DustState`].
//!
//! Every fallible operation is all-or-nothing: the guard runs before any
//! mutation, so an `Err` leaves the state exactly as it was.

use super::catalog::{
    currency_name, BoostGroup, PrestigeUpgradeId, ToolId, ToolKind, UpgradeTrack,
    MAX_OFFLINE_SECONDS, PRESTIGE_DIVISOR, PRESTIGE_EXPONENT, PRESTIGE_LINEAR_STEP,
    PRESTIGE_RUNWAY, PRESTIGE_SQRT_STEP, PRESTIGE_TITLES, PRESTIGE_UPGRADES, TITLE_STEP,
    TOOL_COST_GROWTH, ZONES,
};
use super::error::GameError;
use super::state::DustState;

// ── Multipliers ─────────────────────────────────────────────────

/// Product of `(1 + level * effect)` over the prestige shop tracks in `group`.
pub fn group_multiplier(state: &DustState, group: BoostGroup) -> f64 {
    PRESTIGE_UPGRADES
        .iter()
        .filter(|u| u.group == group)
        .map(|u| 1.0 + state.prestige_level(u.id) as f64 * u.effect)
        .product()
}

/// `(1 + p * 0.12 + sqrt(p) * 0.05) * global group`.
pub fn prestige_multiplier(state: &DustState) -> f64 {
    let p = state.prestige as f64;
    let base = 1.0 + p * PRESTIGE_LINEAR_STEP + p.sqrt() * PRESTIGE_SQRT_STEP;
    base * group_multiplier(state, BoostGroup::Global)
}

/// A zero multiplier can only come from a damaged save; treat it as neutral.
fn achievement_multiplier(state: &DustState) -> f64 {
    if state.achievement_multiplier > 0.0 {
        state.achievement_multiplier
    } else {
        1.0
    }
}

// ── Production ──────────────────────────────────────────────────

/// Rebuild the cached production figures from tools and shop levels.
///
/// A tool's output counts toward its own zone and is mirrored into the
/// active zone when the two differ.
pub fn recalc_production(state: &mut DustState) {
    let active = state.current_zone;
    let zones = ZONES.len();

    let mut click_sum = 0.0;
    let mut passive_sum = 0.0;
    let mut auto_sum = 0.0;
    let mut zone_click = vec![0.0; zones];
    let mut zone_passive = vec![0.0; zones];
    let mut zone_auto = vec![0.0; zones];

    for id in ToolId::all() {
        let def = id.def();
        let tool = state.tool(id);
        let output = tool.output(def);
        let (total, per_zone) = match def.kind {
            ToolKind::Click => (&mut click_sum, &mut zone_click),
            ToolKind::Passive => (&mut passive_sum, &mut zone_passive),
            ToolKind::AutoClick => (&mut auto_sum, &mut zone_auto),
        };
        *total += output;
        if !output.is_finite() || output <= 0.0 {
            continue;
        }
        let zone = if tool.zone < zones { tool.zone } else { 0 };
        per_zone[zone] += output;
        if zone != active && active < zones {
            per_zone[active] += output;
        }
    }

    let click_group = group_multiplier(state, BoostGroup::Click);
    let passive_group = group_multiplier(state, BoostGroup::Passive);
    let auto_group = group_multiplier(state, BoostGroup::Auto);
    let global_group = group_multiplier(state, BoostGroup::Global);

    let raw_per_click = 1.0 + click_sum;
    let prod = &mut state.production;
    prod.dust_per_click = raw_per_click * click_group * global_group;
    prod.passive_per_second = passive_sum * passive_group * global_group;
    prod.auto_clicks_per_second = auto_sum * auto_group * global_group;
    prod.total_per_second =
        prod.passive_per_second + prod.auto_clicks_per_second * prod.dust_per_click;
    prod.zone_per_second = zone_passive
        .iter()
        .zip(&zone_auto)
        .map(|(p, a)| p * passive_group + a * raw_per_click * auto_group)
        .collect();
    prod.zone_clicks = zone_click;
}

// ── Currency ────────────────────────────────────────────────────

/// Credit `amount` to a zone after every multiplier. Returns what was
/// actually credited; non-finite and non-positive amounts credit nothing.
pub fn add_currency(state: &mut DustState, zone: usize, amount: f64) -> f64 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0.0;
    }
    let zone_bonus = ZONES.get(zone).map_or(0.0, |z| z.bonus);
    let zone_group = group_multiplier(state, BoostGroup::Zone);
    let gained = amount
        * prestige_multiplier(state)
        * achievement_multiplier(state)
        * (1.0 + zone_bonus + (zone_group - 1.0));

    if zone >= state.currencies.len() {
        state.currencies.resize(zone + 1, 0.0);
    }
    state.currencies[zone] += gained;
    state.dust += gained;
    state.total_dust_earned += gained;
    state.lifetime_dust += gained;
    gained
}

/// Credit the active zone.
pub fn add_dust(state: &mut DustState, amount: f64) -> f64 {
    let zone = state.current_zone;
    add_currency(state, zone, amount)
}

/// Manual sweep: one dust to the active zone plus every zone's cached click
/// contribution.
pub fn click(state: &mut DustState) {
    add_dust(state, 1.0);
    for zone in 0..state.production.zone_clicks.len() {
        let amount = state.production.zone_clicks[zone];
        if amount > 0.0 {
            add_currency(state, zone, amount);
        }
    }
    state.total_clicks += 1;
}

/// Debit `cost` from a zone balance, or report what was missing.
fn debit(state: &mut DustState, zone: usize, cost: f64) -> Result<(), GameError> {
    let available = state.balance(zone);
    if available < cost {
        return Err(GameError::insufficient(currency_name(zone), cost, available));
    }
    if zone >= state.currencies.len() {
        state.currencies.resize(zone + 1, 0.0);
    }
    state.currencies[zone] = available - cost;
    Ok(())
}

// ── Tools ───────────────────────────────────────────────────────

/// Buy one level of a tool with its zone's currency.
pub fn buy_tool(state: &mut DustState, id: ToolId) -> Result<(), GameError> {
    let tool = state.tool(id);
    let (zone, cost) = (tool.zone, tool.cost);
    debit(state, zone, cost)?;

    let tool = state.tool_mut(id);
    tool.level += 1;
    tool.cost = (tool.cost * TOOL_COST_GROWTH).ceil();
    let level = tool.level;
    recalc_production(state);

    let label = id.def().label;
    log::debug!("bought {} (lv {}) for {}", label, level, cost);
    state.add_log(&format!("{} upgraded to Lv.{}.", label, level), false);
    Ok(())
}

/// Price of the next level of `track` on `id`.
pub fn upgrade_cost(state: &DustState, id: ToolId, track: UpgradeTrack) -> f64 {
    state.tool(id).upgrade_cost(id.def(), track)
}

/// Buy one level of a tool's sub-upgrade track.
pub fn buy_upgrade(state: &mut DustState, id: ToolId, track: UpgradeTrack) -> Result<(), GameError> {
    let cost = upgrade_cost(state, id, track);
    let zone = state.tool(id).zone;
    debit(state, zone, cost)?;

    state.tool_mut(id).upgrades[track.index()] += 1;
    recalc_production(state);

    log::debug!("{} {} upgrade for {}", id.def().label, track.label(), cost);
    state.add_log(
        &format!("{} {} upgrade applied.", id.def().label, track.label()),
        false,
    );
    Ok(())
}

// ── Zones ───────────────────────────────────────────────────────

/// Pay for and move into the next zone. `Ok(None)` once the last zone is
/// reached; otherwise the index of the newly entered zone.
pub fn unlock_zone(state: &mut DustState) -> Result<Option<usize>, GameError> {
    let next = match state.next_zone() {
        Some(z) => z,
        None => return Ok(None),
    };
    let current = state.current_zone;
    debit(state, current, next.cost)?;

    // Cached rates keep mirroring into the old zone until the next recalc.
    state.current_zone += 1;
    if state.currencies.len() <= state.current_zone {
        state.currencies.resize(state.current_zone + 1, 0.0);
    }

    log::info!("unlocked zone {} ({})", state.current_zone, next.name);
    state.add_log(&format!("Unlocked {}!", next.name), true);
    Ok(Some(state.current_zone))
}

// ── Prestige ────────────────────────────────────────────────────

/// Prestige points a reset would pay out right now.
pub fn prestige_available(state: &DustState) -> u64 {
    let effective = (state.lifetime_dust - PRESTIGE_RUNWAY).max(0.0);
    let base = (effective / PRESTIGE_DIVISOR).powf(PRESTIGE_EXPONENT);
    let gain = (base * group_multiplier(state, BoostGroup::Yield)).floor();
    if gain.is_finite() && gain > 0.0 {
        gain as u64
    } else {
        0
    }
}

/// Lifetime dust at which the payout reaches `points` under a yield multiplier.
pub fn lifetime_for_points(points: f64, yield_mult: f64) -> f64 {
    if points <= 0.0 {
        return PRESTIGE_RUNWAY;
    }
    (points / yield_mult).powf(1.0 / PRESTIGE_EXPONENT) * PRESTIGE_DIVISOR + PRESTIGE_RUNWAY
}

/// How far lifetime dust has moved from the current payout's threshold to
/// the next point's threshold, in `[0, 1]`.
pub fn prestige_progress(state: &DustState) -> f64 {
    let gain = prestige_available(state) as f64;
    let yield_mult = group_multiplier(state, BoostGroup::Yield);
    let current = lifetime_for_points(gain, yield_mult);
    let next = lifetime_for_points(gain + 1.0, yield_mult);
    let span = next - current;
    if span <= 0.0 {
        return 0.0;
    }
    ((state.lifetime_dust - current) / span).clamp(0.0, 1.0)
}

/// Convert lifetime dust into prestige points and start a fresh run.
/// Returns the points gained.
pub fn do_prestige(state: &mut DustState) -> Result<u64, GameError> {
    let gain = prestige_available(state);
    if gain == 0 {
        let yield_mult = group_multiplier(state, BoostGroup::Yield);
        return Err(GameError::insufficient(
            "lifetime dust",
            lifetime_for_points(1.0, yield_mult),
            state.lifetime_dust,
        ));
    }

    state.prestige = state.prestige.saturating_add(gain);
    state.reset_run();
    recalc_production(state);

    log::info!("prestige +{} (total {})", gain, state.prestige);
    state.add_log(&format!("Prestiged! +{} prestige earned.", gain), true);
    Ok(gain)
}

/// Buy one level of a prestige shop track with prestige points.
pub fn buy_prestige_upgrade(state: &mut DustState, id: PrestigeUpgradeId) -> Result<(), GameError> {
    let cost = state.prestige_upgrade_cost(id);
    if state.prestige < cost {
        return Err(GameError::insufficient(
            "prestige",
            cost as f64,
            state.prestige as f64,
        ));
    }
    state.prestige -= cost;
    state.prestige_upgrades[id.index()] += 1;
    recalc_production(state);

    let level = state.prestige_level(id);
    log::debug!("{} -> lv {} for {} prestige", id.def().key, level, cost);
    state.add_log(&format!("{} Lv.{} purchased.", id.def().label, level), false);
    Ok(())
}

// ── Titles ──────────────────────────────────────────────────────

/// Title index earned by a prestige balance.
pub fn title_index_for(prestige: u64) -> usize {
    let idx = (prestige / TITLE_STEP) as usize;
    idx.min(PRESTIGE_TITLES.len() - 1)
}

pub fn current_title(state: &DustState) -> &'static str {
    PRESTIGE_TITLES[title_index_for(state.prestige)]
}

/// Record a newly reached highest title. Returns its index when it is new.
pub fn update_prestige_title(state: &mut DustState) -> Option<usize> {
    let idx = title_index_for(state.prestige);
    if idx <= state.prestige_title_index {
        return None;
    }
    state.prestige_title_index = idx;
    state.add_log(&format!("Title earned: {}", PRESTIGE_TITLES[idx]), true);
    Some(idx)
}

// ── Time ────────────────────────────────────────────────────────

/// Credit every zone's cached per-second production for `seconds`.
/// Returns the total credited.
pub fn apply_elapsed_time(state: &mut DustState, seconds: f64) -> f64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0.0;
    }
    let mut total = 0.0;
    for zone in 0..state.production.zone_per_second.len() {
        let rate = state.production.zone_per_second[zone];
        if rate > 0.0 {
            total += add_currency(state, zone, rate * seconds);
        }
    }
    total
}

/// Seconds of offline time to credit between two epoch-millisecond stamps,
/// capped at 12 hours. A missing (zero) stamp or clock skew yields zero.
pub fn offline_seconds(last_update_ms: f64, now_ms: f64) -> f64 {
    if last_update_ms <= 0.0 || !last_update_ms.is_finite() {
        return 0.0;
    }
    let elapsed = (now_ms - last_update_ms) / 1000.0;
    if !elapsed.is_finite() || elapsed <= 0.0 {
        return 0.0;
    }
    elapsed.min(MAX_OFFLINE_SECONDS)
}

// ── Formatting ──────────────────────────────────────────────────

/// Compact number: `1.50B`, `2.25M`, `12.3k`, or the plain value with
/// `decimals` fraction digits.
pub fn format_number(val: f64, decimals: usize) -> String {
    if val >= 1e9 {
        format!("{:.2}B", val / 1e9)
    } else if val >= 1e6 {
        format!("{:.2}M", val / 1e6)
    } else if val >= 1e3 {
        format!("{:.1}k", val / 1e3)
    } else {
        format!("{:.*}", decimals, val)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_tool() -> impl Strategy<Value = ToolId> {
        (0usize..30).prop_map(|i| ToolId::from_index(i).unwrap_or(ToolId::Basic))
    }

    fn arb_track() -> impl Strategy<Value = UpgradeTrack> {
        prop_oneof![
            Just(UpgradeTrack::Efficiency),
            Just(UpgradeTrack::Speed),
            Just(UpgradeTrack::Capacity),
        ]
    }

    proptest! {
        #[test]
        fn prop_buy_tool_debits_exact_cost(
            id in arb_tool(),
            extra in 0.0f64..1e6,
            level in 0u32..20,
        ) {
            let mut state = DustState::new();
            state.tool_mut(id).level = level;
            let zone = state.tool(id).zone;
            let cost = state.tool(id).cost;
            state.currencies[zone] = cost + extra;
            buy_tool(&mut state, id).unwrap();
            prop_assert!((state.balance(zone) - extra).abs() < 1e-6 * (cost + extra).max(1.0));
            prop_assert!(state.tool(id).cost > cost);
            prop_assert_eq!(state.tool(id).level, level + 1);
        }

        #[test]
        fn prop_failed_purchase_changes_nothing(
            id in arb_tool(),
            track in arb_track(),
            frac in 0.0f64..0.99,
        ) {
            let mut state = DustState::new();
            let zone = state.tool(id).zone;
            let upgrade = upgrade_cost(&state, id, track);
            let cost = state.tool(id).cost.min(upgrade);
            state.currencies[zone] = cost * frac;
            let before = state.currencies.clone();
            prop_assert!(buy_tool(&mut state, id).is_err());
            prop_assert!(buy_upgrade(&mut state, id, track).is_err());
            prop_assert_eq!(&state.currencies, &before);
            prop_assert_eq!(state.tool(id).level, 0);
            prop_assert_eq!(state.tool(id).upgrades, [0, 0, 0]);
        }

        #[test]
        fn prop_recalc_is_idempotent(
            levels in proptest::collection::vec(0u32..30, 30),
            shop in proptest::collection::vec(0u32..5, 12),
            zone in 0usize..8,
        ) {
            let mut state = DustState::new();
            for (tool, lvl) in state.tools.iter_mut().zip(&levels) {
                tool.level = *lvl;
            }
            state.prestige_upgrades = shop;
            state.current_zone = zone;
            recalc_production(&mut state);
            let first = state.production.clone();
            recalc_production(&mut state);
            prop_assert_eq!(first, state.production.clone());
        }

        #[test]
        fn prop_unlock_zone_never_decreases(
            start in 0usize..8,
            balance in 0.0f64..1e6,
        ) {
            let mut state = DustState::new();
            state.current_zone = start;
            state.currencies[start] = balance;
            let ok = unlock_zone(&mut state);
            prop_assert!(state.current_zone >= start);
            prop_assert!(state.current_zone <= start + 1);
            if let Some(next) = ZONES.get(start + 1) {
                prop_assert_eq!(ok.is_ok(), balance >= next.cost);
            }
        }

        #[test]
        fn prop_add_currency_never_decreases_totals(
            zone in 0usize..8,
            amount in -1e6f64..1e6,
            prestige in 0u64..100,
        ) {
            let mut state = DustState::new();
            state.prestige = prestige;
            let gained = add_currency(&mut state, zone, amount);
            prop_assert!(gained >= 0.0);
            prop_assert!(state.lifetime_dust >= 0.0);
            if amount > 0.0 {
                prop_assert!(gained >= amount);
            }
        }

        #[test]
        fn prop_prestige_resets_but_keeps_meta(
            lifetime in 200_000.0f64..1e12,
            shop in proptest::collection::vec(0u32..5, 12),
        ) {
            let mut state = DustState::new();
            state.lifetime_dust = lifetime;
            state.prestige_upgrades = shop.clone();
            state.currencies[0] = lifetime;
            state.tool_mut(ToolId::Basic).level = 5;
            let before = state.prestige;
            let expected = prestige_available(&state);
            let gain = do_prestige(&mut state).unwrap();
            prop_assert_eq!(gain, expected);
            prop_assert_eq!(state.prestige, before + gain);
            prop_assert_eq!(&state.prestige_upgrades, &shop);
            prop_assert_eq!(state.total_tool_levels(), 0);
            prop_assert!(state.currencies.iter().all(|c| *c == 0.0));
        }

        #[test]
        fn prop_prestige_progress_in_unit_range(lifetime in 0.0f64..1e13) {
            let mut state = DustState::new();
            state.lifetime_dust = lifetime;
            let p = prestige_progress(&state);
            prop_assert!((0.0..=1.0).contains(&p), "progress {}", p);
        }

        #[test]
        fn prop_offline_never_exceeds_cap(last in 1.0f64..1e13, now in 1.0f64..1e13) {
            let secs = offline_seconds(last, now);
            prop_assert!(secs >= 0.0);
            prop_assert!(secs <= MAX_OFFLINE_SECONDS);
        }

        #[test]
        fn prop_format_number_no_panic(n in 0.0f64..1e15) {
            let s = format_number(n, 0);
            prop_assert!(!s.is_empty());
        }
    }
}
