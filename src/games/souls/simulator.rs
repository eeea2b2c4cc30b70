//! Balance simulator: plays the standard catalog with a greedy bot.
//!
//! Run with `cargo test simulate -- --nocapture` to see the report.

#[cfg(test)]
mod tests {
    use crate::games::souls::SoulsGame;
    use crate::games::Game;

    /// Milliseconds between simulated clicks (5 clicks per second).
    const CLICK_EVERY_MS: u64 = 200;
    const LIMIT_MS: u64 = 3_600_000;

    struct SimResult {
        /// (achievement, unlock time in seconds)
        unlocks: Vec<(&'static str, f64)>,
        purchases: u64,
        final_souls: u64,
        final_passive_rate: u64,
        elapsed_s: f64,
    }

    /// Click, buy the cheapest affordable upgrade, advance the frame clock.
    fn simulate() -> SimResult {
        let mut game = SoulsGame::new();
        let total = game.state.achievements().len();
        let mut unlocks = Vec::new();
        let mut purchases = 0u64;
        let mut now = 0u64;

        game.update(0.0);
        while now < LIMIT_MS && game.state.unlocked_count() < total {
            now += CLICK_EVERY_MS;
            game.click();

            let cheapest = game
                .state
                .upgrades()
                .iter()
                .filter(|u| u.cost() <= game.state.souls())
                .min_by_key(|u| u.cost())
                .map(|u| u.id);
            if let Some(id) = cheapest {
                if game.purchase(id).unwrap().is_purchased() {
                    purchases += 1;
                }
            }

            game.update(now as f64);

            for a in game.state.achievements() {
                if a.unlocked && !unlocks.iter().any(|(n, _)| *n == a.name) {
                    unlocks.push((a.name, now as f64 / 1000.0));
                }
            }
        }

        SimResult {
            unlocks,
            purchases,
            final_souls: game.state.souls(),
            final_passive_rate: game.state.passive_rate(),
            elapsed_s: now as f64 / 1000.0,
        }
    }

    #[test]
    fn simulate_greedy_player() {
        let r = simulate();
        eprintln!("=== Soul Reaper greedy run ===");
        for (name, at) in &r.unlocks {
            eprintln!("  {:<20} {:>8.1}s", name, at);
        }
        eprintln!(
            "  purchases={} souls={} passive_rate={} elapsed={:.1}s",
            r.purchases, r.final_souls, r.final_passive_rate, r.elapsed_s
        );

        assert_eq!(r.unlocks.len(), 5, "not every achievement unlocked in an hour");
        assert!(r.elapsed_s < LIMIT_MS as f64 / 1000.0);
        assert_eq!(r.unlocks[0].0, "First Soul");
        assert!(r.final_passive_rate >= 4);
    }

    #[test]
    fn simulate_single_minion_idle() {
        // One minion at yield 1 reaps a soul per second.
        let mut idle = SoulsGame::new();
        idle.state.souls = 100;
        idle.purchase("rift").unwrap();
        idle.update(0.0);
        for s in 1..=120u64 {
            idle.update((s * 1000) as f64);
        }
        assert_eq!(idle.state.total_collected(), 120);
    }
}
