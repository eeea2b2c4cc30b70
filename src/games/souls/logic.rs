//! Soul Reaper game logic. Pure functions over [`GameState`].
//!
//! Every mutation ends with [`check_achievements`], so unlocks land on the
//! same call that crossed the threshold.

use super::error::PurchaseError;
use super::state::{AchievementKind, GameEvent, GameState, UpgradeKind};

/// Result of a purchase that referenced a real upgrade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased {
        id: &'static str,
        kind: UpgradeKind,
        cost: u64,
        /// Owned count after the purchase.
        owned: u32,
    },
    /// Nothing changed; the player could not pay `cost`.
    InsufficientFunds { cost: u64, souls: u64 },
}

impl PurchaseOutcome {
    pub fn is_purchased(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}

/// Credit souls to both the balance and the lifetime total.
fn collect(state: &mut GameState, amount: u64) {
    state.souls = state.souls.saturating_add(amount);
    state.total_collected = state.total_collected.saturating_add(amount);
}

/// Manual click: add the per-click yield. Returns the souls gained.
pub fn click(state: &mut GameState) -> u64 {
    let gained = state.per_click_yield();
    collect(state, gained);
    state.total_clicks += 1;
    check_achievements(state);
    gained
}

/// Try to buy one unit of the upgrade with `id`.
pub fn purchase(state: &mut GameState, id: &str) -> Result<PurchaseOutcome, PurchaseError> {
    let idx = state
        .upgrades
        .iter()
        .position(|u| u.id == id)
        .ok_or_else(|| PurchaseError::NotFound(id.to_string()))?;

    let cost = state.upgrades[idx].cost();
    if state.souls < cost {
        log::debug!("cannot afford {id}: cost {cost}, have {}", state.souls);
        return Ok(PurchaseOutcome::InsufficientFunds {
            cost,
            souls: state.souls,
        });
    }

    state.souls -= cost;
    let upgrade = &mut state.upgrades[idx];
    upgrade.owned = upgrade.owned.saturating_add(1);
    let (id, kind, owned) = (upgrade.id, upgrade.kind, upgrade.owned);

    log::debug!("bought {id} #{owned} for {cost}");
    state
        .events
        .push(GameEvent::UpgradePurchased { id, owned, cost });
    check_achievements(state);

    Ok(PurchaseOutcome::Purchased {
        id,
        kind,
        cost,
        owned,
    })
}

/// Passive production for `units` scheduler intervals. Returns the souls produced.
pub fn tick(state: &mut GameState, units: u32) -> u64 {
    let produced = state.passive_rate().saturating_mul(u64::from(units));
    collect(state, produced);
    check_achievements(state);
    produced
}

/// Unlock every locked achievement whose requirement is now met.
/// Returns how many unlocked on this pass.
pub fn check_achievements(state: &mut GameState) -> usize {
    let total = state.total_collected;
    let rate = state.passive_rate();
    let mut newly_unlocked = 0;

    for achievement in state.achievements.iter_mut() {
        if achievement.unlocked {
            continue;
        }
        let met = match achievement.kind {
            AchievementKind::Total => total >= achievement.requirement,
            AchievementKind::Passive => rate >= achievement.requirement,
        };
        if met {
            achievement.unlocked = true;
            newly_unlocked += 1;
            log::info!("achievement unlocked: {}", achievement.name);
            state.events.push(GameEvent::AchievementUnlocked {
                name: achievement.name,
            });
        }
    }

    newly_unlocked
}

/// Format a number with commas (e.g. 1234567 → "1,234,567").
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
