//! Balance simulator for Galactic Dust Sweeper.
//! Run with: cargo test simulate_greedy -- --nocapture

#[cfg(test)]
mod tests {
    use crate::games::dust::achievements::check_achievements;
    use crate::games::dust::catalog::{ToolId, UpgradeTrack, ACHIEVEMENTS, ZONES};
    use crate::games::dust::logic::{self, format_number};
    use crate::games::dust::state::DustState;

    const CLICKS_PER_SECOND: u32 = 5;
    /// Purchases allowed per simulated second.
    const MAX_BUYS_PER_SECOND: u32 = 20;

    #[derive(Clone, Copy, Debug)]
    enum Purchase {
        Tool(ToolId),
        Upgrade(ToolId, UpgradeTrack),
        Zone,
    }

    /// Dust per second a player clicking at `CLICKS_PER_SECOND` would see.
    fn income(state: &DustState) -> f64 {
        let prod = &state.production;
        prod.total_per_second + CLICKS_PER_SECOND as f64 * prod.dust_per_click
    }

    fn apply(state: &mut DustState, purchase: Purchase) -> bool {
        match purchase {
            Purchase::Tool(id) => logic::buy_tool(state, id).is_ok(),
            Purchase::Upgrade(id, track) => logic::buy_upgrade(state, id, track).is_ok(),
            Purchase::Zone => matches!(logic::unlock_zone(state), Ok(Some(_))),
        }
    }

    /// Zone unlocks first, then whatever affordable purchase pays itself
    /// back soonest.
    fn find_best_purchase(state: &DustState) -> Option<Purchase> {
        if let Some(next) = state.next_zone() {
            if state.active_balance() >= next.cost {
                return Some(Purchase::Zone);
            }
        }

        let before = income(state);
        let mut best: Option<(f64, Purchase)> = None;
        let mut consider = |cost: f64, purchase: Purchase| {
            let mut trial = state.clone();
            if !apply(&mut trial, purchase) {
                return;
            }
            let gain = income(&trial) - before;
            if gain <= 0.0 {
                return;
            }
            let payback = cost / gain;
            if best.as_ref().map_or(true, |(bp, _)| payback < *bp) {
                best = Some((payback, purchase));
            }
        };

        for id in ToolId::all() {
            let tool = state.tool(id);
            if state.balance(tool.zone) >= tool.cost {
                consider(tool.cost, Purchase::Tool(id));
            }
            if tool.level == 0 {
                continue;
            }
            for track in UpgradeTrack::all() {
                let cost = logic::upgrade_cost(state, id, *track);
                if state.balance(tool.zone) >= cost {
                    consider(cost, Purchase::Upgrade(id, *track));
                }
            }
        }

        best.map(|(_, p)| p)
    }

    fn report_stats(state: &DustState, seconds: u32, purchases: u32) {
        eprintln!("┌─── {}m{:02}s ─────────────────────────", seconds / 60, seconds % 60);
        eprintln!(
            "│ Zone: {} ({})  balance {}",
            state.current_zone_def().name,
            state.current_zone,
            format_number(state.active_balance(), 0)
        );
        eprintln!(
            "│ {}/s  per click {}  lifetime {}",
            format_number(state.production.total_per_second, 1),
            format_number(state.production.dust_per_click, 1),
            format_number(state.lifetime_dust, 0)
        );
        let owned: Vec<String> = ToolId::all()
            .filter(|id| state.tool(*id).level > 0)
            .map(|id| format!("{}:{}", id.def().key, state.tool(id).level))
            .collect();
        eprintln!("│ Tools: {}", owned.join("  "));
        eprintln!(
            "│ Achievements {}/{}  purchases {}  prestige ready +{}",
            state.unlocked_count(),
            ACHIEVEMENTS.len(),
            purchases,
            logic::prestige_available(state)
        );
        eprintln!("└────────────────────────────────────");
    }

    struct Outcome {
        state: DustState,
        purchases: u32,
        max_idle_gap: u32,
        zone_went_back: bool,
        negative_balance: bool,
    }

    fn simulate(total_seconds: u32) -> Outcome {
        let mut state = DustState::new();
        let mut purchases = 0u32;
        let mut last_purchase = 0u32;
        let mut max_idle_gap = 0u32;
        let mut zone_went_back = false;
        let mut negative_balance = false;

        eprintln!("\n========================================");
        eprintln!("  Galactic Dust Sweeper balance run");
        eprintln!("  play time: {} min, {} clicks/s", total_seconds / 60, CLICKS_PER_SECOND);
        eprintln!("========================================\n");

        for second in 1..=total_seconds {
            for _ in 0..CLICKS_PER_SECOND {
                logic::click(&mut state);
            }
            logic::apply_elapsed_time(&mut state, 1.0);
            check_achievements(&mut state);

            for _ in 0..MAX_BUYS_PER_SECOND {
                let zone_before = state.current_zone;
                match find_best_purchase(&state) {
                    Some(p) if apply(&mut state, p) => {
                        purchases += 1;
                        max_idle_gap = max_idle_gap.max(second - last_purchase);
                        last_purchase = second;
                        zone_went_back |= state.current_zone < zone_before;
                    }
                    _ => break,
                }
                check_achievements(&mut state);
            }
            negative_balance |= state.currencies.iter().any(|c| *c < 0.0);

            if second % 300 == 0 {
                report_stats(&state, second, purchases);
            }
        }

        eprintln!("\n======== summary ========");
        eprintln!("purchases: {}", purchases);
        eprintln!("longest wait between purchases: {}s", max_idle_gap);
        eprintln!("zones reached: {}/{}", state.current_zone + 1, ZONES.len());
        eprintln!("=========================\n");

        Outcome {
            state,
            purchases,
            max_idle_gap,
            zone_went_back,
            negative_balance,
        }
    }

    #[test]
    fn simulate_greedy_10min() {
        let out = simulate(600);
        let state = &out.state;

        assert!(out.purchases > 0);
        assert!(state.total_tool_levels() > 0);
        assert!(!out.zone_went_back);
        assert!(!out.negative_balance);
        // Every click credits at least one dust
        assert_eq!(state.total_clicks, 600 * CLICKS_PER_SECOND as u64);
        assert!(state.lifetime_dust >= state.total_clicks as f64);
        assert!(state.achievement_multiplier >= 1.0);
        let _ = out.max_idle_gap;
    }

    #[test]
    #[ignore]
    fn simulate_greedy_1hour() {
        let out = simulate(3600);
        assert!(!out.negative_balance);

        let mut state = out.state;
        let gain = logic::prestige_available(&state);
        if gain > 0 {
            let before = state.prestige;
            logic::do_prestige(&mut state).unwrap();
            eprintln!("prestiged for +{}, boost now x{:.2}", gain, logic::prestige_multiplier(&state));
            assert_eq!(state.prestige, before + gain);
            assert_eq!(state.current_zone, 0);
        }
    }
}
