//! Achievement evaluation and one-shot rewards.

use super::catalog::{AchievementDef, AchievementId, Condition, Reward, ACHIEVEMENTS};
use super::logic::{self, format_number};
use super::state::DustState;

/// Whether a condition holds against the live state.
pub fn condition_met(state: &DustState, condition: &Condition) -> bool {
    let prod = &state.production;
    match *condition {
        Condition::TotalEarned(n) => state.total_dust_earned >= n,
        Condition::TotalClicks(n) => state.total_clicks >= n,
        Condition::AnyToolOwned => state.tools.iter().any(|t| t.level > 0),
        Condition::TotalToolLevels(n) => state.total_tool_levels() >= n,
        Condition::TotalPerSecond(n) => prod.total_per_second >= n,
        Condition::AutoClicksPerSecond(n) => prod.auto_clicks_per_second >= n,
        Condition::PrestigeAtLeast(n) => state.prestige >= n,
        Condition::ZoneReached(n) => state.current_zone >= n,
        Condition::LifetimeEarned(n) => state.lifetime_dust >= n,
    }
}

/// Apply an achievement's reward once, then refresh production.
pub fn apply_reward(state: &mut DustState, reward: &Reward) {
    match *reward {
        Reward::Dust(amount) => {
            logic::add_dust(state, amount);
        }
        Reward::Prestige(points) => state.prestige = state.prestige.saturating_add(points),
        Reward::Multiplier(value) => {
            let current = if state.achievement_multiplier > 0.0 {
                state.achievement_multiplier
            } else {
                1.0
            };
            state.achievement_multiplier = current * (1.0 + value);
        }
    }
    logic::recalc_production(state);
}

pub fn describe_reward(reward: &Reward) -> String {
    match *reward {
        Reward::Dust(amount) => format!("+{} dust", format_number(amount, 0)),
        Reward::Prestige(points) => format!("+{} prestige", points),
        Reward::Multiplier(value) => format!("+{}% boost", (value * 100.0).round()),
    }
}

/// Unlock every locked achievement whose condition now holds, in catalog
/// order. Returns the ids unlocked by this call.
///
/// A reward can satisfy a later condition in the same pass (First Sweep's
/// dust counts toward Collector), but never an earlier one.
pub fn check_achievements(state: &mut DustState) -> Vec<AchievementId> {
    let mut unlocked = Vec::new();
    for def in ACHIEVEMENTS.iter() {
        if state.is_unlocked(def.id) || !condition_met(state, &def.condition) {
            continue;
        }
        unlock(state, def);
        unlocked.push(def.id);
    }
    unlocked
}

fn unlock(state: &mut DustState, def: &AchievementDef) {
    state.achievements[def.id.index()] = true;
    apply_reward(state, &def.reward);
    log::info!("achievement unlocked: {}", def.key);
    state.add_log(
        &format!(
            "Achievement unlocked: {} ({})",
            def.label,
            describe_reward(&def.reward)
        ),
        true,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dust::catalog::ToolId;

    #[test]
    fn first_sweep_grants_fifty() {
        let mut state = DustState::new();
        logic::click(&mut state);
        let got = check_achievements(&mut state);
        assert_eq!(got, vec![AchievementId::FirstDust]);
        assert!((state.balance(0) - 51.0).abs() < 0.001);
    }

    #[test]
    fn rewards_can_chain_forward() {
        let mut state = DustState::new();
        logic::add_dust(&mut state, 60.0);
        // 60 + 50 reaches Collector's 100 in the same pass
        let got = check_achievements(&mut state);
        assert_eq!(got, vec![AchievementId::FirstDust, AchievementId::HundredDust]);
        assert!((state.achievement_multiplier - 1.02).abs() < 1e-9);
    }

    #[test]
    fn already_unlocked_never_reapplies() {
        let mut state = DustState::new();
        state.total_dust_earned = 150.0;
        check_achievements(&mut state);
        let mult = state.achievement_multiplier;
        let balance = state.balance(0);

        let again = check_achievements(&mut state);
        assert!(again.is_empty());
        assert!((state.achievement_multiplier - mult).abs() < f64::EPSILON);
        assert!((state.balance(0) - balance).abs() < f64::EPSILON);
    }

    #[test]
    fn multiplier_rewards_compound() {
        let mut state = DustState::new();
        apply_reward(&mut state, &Reward::Multiplier(0.1));
        apply_reward(&mut state, &Reward::Multiplier(0.1));
        assert!((state.achievement_multiplier - 1.21).abs() < 1e-9);
    }

    #[test]
    fn prestige_reward_adds_points() {
        let mut state = DustState::new();
        state.prestige = 5;
        let got = check_achievements(&mut state);
        assert!(got.contains(&AchievementId::PrestigeOnce));
        assert!(got.contains(&AchievementId::PrestigeFive));
        // +2 from Reborn x5
        assert_eq!(state.prestige, 7);
    }

    #[test]
    fn tool_conditions() {
        let mut state = DustState::new();
        assert!(!condition_met(&state, &Condition::AnyToolOwned));
        state.tool_mut(ToolId::Magnet).level = 12;
        state.tool_mut(ToolId::Basic).level = 8;
        assert!(condition_met(&state, &Condition::AnyToolOwned));
        assert!(condition_met(&state, &Condition::TotalToolLevels(20)));
        assert!(!condition_met(&state, &Condition::TotalToolLevels(21)));
    }

    #[test]
    fn rate_conditions_read_cached_production() {
        let mut state = DustState::new();
        state.tool_mut(ToolId::SolarArray).level = 7;
        logic::recalc_production(&mut state);
        assert!(condition_met(&state, &Condition::TotalPerSecond(1_000.0)));
        assert!(!condition_met(&state, &Condition::AutoClicksPerSecond(1.0)));
    }

    #[test]
    fn zone_achievements_follow_the_current_zone() {
        let mut state = DustState::new();
        state.current_zone = 3;
        let got = check_achievements(&mut state);
        assert_eq!(got, vec![AchievementId::ZoneExplorer]);

        state.current_zone = 7;
        let got = check_achievements(&mut state);
        assert_eq!(got, vec![AchievementId::ZoneVoyager]);
        assert_eq!(state.prestige, 3);
    }

    #[test]
    fn prestige_reward_saturates() {
        let mut state = DustState::new();
        state.prestige = u64::MAX - 1;
        apply_reward(&mut state, &Reward::Prestige(8));
        assert_eq!(state.prestige, u64::MAX);
    }

    #[test]
    fn reward_descriptions() {
        assert_eq!(describe_reward(&Reward::Dust(500.0)), "+500 dust");
        assert_eq!(describe_reward(&Reward::Prestige(2)), "+2 prestige");
        assert_eq!(describe_reward(&Reward::Multiplier(0.18)), "+18% boost");
    }
}
