//! Soul Reaper game state definitions.

use serde::Serialize;

use super::error::CatalogError;

/// How an upgrade contributes to production.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UpgradeKind {
    /// Adds `effect` souls per owned unit to every click.
    Click,
    /// Each owned unit yields one click's worth of souls per scheduler tick.
    Passive,
}

/// A purchasable upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub id: &'static str,
    pub name: &'static str,
    pub base_price: f64,
    /// Cost multiplier applied per owned unit.
    pub growth: f64,
    pub owned: u32,
    pub effect: f64,
    pub kind: UpgradeKind,
}

impl Upgrade {
    pub fn new(
        id: &'static str,
        name: &'static str,
        base_price: f64,
        growth: f64,
        effect: f64,
        kind: UpgradeKind,
    ) -> Self {
        Self {
            id,
            name,
            base_price,
            growth,
            owned: 0,
            effect,
            kind,
        }
    }

    /// Current cost to buy the next unit.
    pub fn cost(&self) -> u64 {
        self.cost_at(self.owned)
    }

    /// Cost of the next unit when `owned` units are already held.
    ///
    /// Saturates at `u64::MAX` once the float overflows.
    pub fn cost_at(&self, owned: u32) -> u64 {
        (self.base_price * self.growth.powf(f64::from(owned))).floor() as u64
    }
}

/// What an achievement's requirement is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AchievementKind {
    /// Lifetime souls collected.
    Total,
    /// Instantaneous passive rate.
    Passive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    pub name: &'static str,
    pub requirement: u64,
    pub kind: AchievementKind,
    pub unlocked: bool,
}

impl Achievement {
    pub fn new(name: &'static str, requirement: u64, kind: AchievementKind) -> Self {
        Self {
            name,
            requirement,
            kind,
            unlocked: false,
        }
    }
}

/// Notification queued by the engine for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    AchievementUnlocked { name: &'static str },
    UpgradePurchased { id: &'static str, owned: u32, cost: u64 },
}

/// Fixed list of upgrades and achievements an engine is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    pub upgrades: Vec<Upgrade>,
    pub achievements: Vec<Achievement>,
}

/// Position of "Soul Minion" in [`Catalog::standard`].
const STANDARD_PASSIVE_INDEX: usize = 3;

impl Catalog {
    /// The shipped game: three click upgrades, one minion, five achievements.
    pub fn standard() -> Self {
        Self {
            upgrades: vec![
                Upgrade::new("scythe", "Rusty Scythe", 10.0, 1.25, 1.0, UpgradeKind::Click),
                Upgrade::new("spectral", "Spectral Blade", 50.0, 1.3, 5.0, UpgradeKind::Click),
                Upgrade::new("pact", "Dark Pact", 200.0, 1.35, 20.0, UpgradeKind::Click),
                Upgrade::new("rift", "Soul Minion", 100.0, 1.4, 4.0, UpgradeKind::Passive),
            ],
            achievements: vec![
                Achievement::new("First Soul", 10, AchievementKind::Total),
                Achievement::new("Novice Harvester", 100, AchievementKind::Total),
                Achievement::new("Automation Begins", 4, AchievementKind::Passive),
                Achievement::new("Soul Collector", 1_000, AchievementKind::Total),
                Achievement::new("Soul King", 5_000, AchievementKind::Total),
            ],
        }
    }

    /// Check the catalog and return the index of its single passive upgrade.
    pub fn validate(&self) -> Result<usize, CatalogError> {
        let mut passive: Option<usize> = None;
        for (i, upgrade) in self.upgrades.iter().enumerate() {
            if self.upgrades[..i].iter().any(|u| u.id == upgrade.id) {
                return Err(CatalogError::DuplicateId(upgrade.id));
            }
            if !(upgrade.base_price > 0.0) {
                return Err(CatalogError::InvalidBasePrice(upgrade.id));
            }
            if !(upgrade.growth > 1.0) {
                return Err(CatalogError::InvalidGrowth(upgrade.id));
            }
            if !(upgrade.effect > 0.0) {
                return Err(CatalogError::InvalidEffect(upgrade.id));
            }
            if upgrade.kind == UpgradeKind::Passive {
                if let Some(first) = passive {
                    return Err(CatalogError::MultiplePassive(
                        self.upgrades[first].id,
                        upgrade.id,
                    ));
                }
                passive = Some(i);
            }
        }
        passive.ok_or(CatalogError::MissingPassive)
    }
}

/// Read-only view of an upgrade for rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpgradeView {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: UpgradeKind,
    pub owned: u32,
    pub effect: f64,
    pub cost: u64,
    pub affordable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AchievementView {
    pub name: &'static str,
    pub requirement: u64,
    pub kind: AchievementKind,
    pub unlocked: bool,
}

/// Everything the view layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub souls: u64,
    pub total_collected: u64,
    pub per_click_yield: u64,
    pub passive_rate: u64,
    pub total_clicks: u64,
    pub total_upgrades: u64,
    pub upgrades: Vec<UpgradeView>,
    pub achievements: Vec<AchievementView>,
}

/// Full state of a Soul Reaper session.
pub struct GameState {
    /// Spendable souls.
    pub(crate) souls: u64,
    /// Souls earned all-time; never decreases.
    pub(crate) total_collected: u64,
    /// Manual clicks count.
    pub(crate) total_clicks: u64,
    pub(crate) upgrades: Vec<Upgrade>,
    pub(crate) achievements: Vec<Achievement>,
    /// Index of the passive upgrade, resolved once from the catalog.
    passive_index: usize,
    /// Notifications not yet taken by the view.
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self::from_validated(Catalog::standard(), STANDARD_PASSIVE_INDEX)
    }

    /// Build a state from a custom catalog.
    pub fn with_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        let passive_index = catalog.validate()?;
        Ok(Self::from_validated(catalog, passive_index))
    }

    fn from_validated(catalog: Catalog, passive_index: usize) -> Self {
        // Every achievement starts locked so each unlock is announced once.
        let mut achievements = catalog.achievements;
        for achievement in &mut achievements {
            achievement.unlocked = false;
        }
        Self {
            souls: 0,
            total_collected: 0,
            total_clicks: 0,
            upgrades: catalog.upgrades,
            achievements,
            passive_index,
            events: Vec::new(),
        }
    }

    pub fn souls(&self) -> u64 {
        self.souls
    }

    pub fn total_collected(&self) -> u64 {
        self.total_collected
    }

    pub fn total_clicks(&self) -> u64 {
        self.total_clicks
    }

    pub fn upgrades(&self) -> &[Upgrade] {
        &self.upgrades
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn passive_upgrade(&self) -> &Upgrade {
        &self.upgrades[self.passive_index]
    }

    pub fn passive_owned(&self) -> u32 {
        self.passive_upgrade().owned
    }

    /// Souls gained per click: 1 plus every owned click upgrade's effect.
    pub fn per_click_yield(&self) -> u64 {
        let bonus: f64 = self
            .upgrades
            .iter()
            .filter(|u| u.kind == UpgradeKind::Click)
            .map(|u| u.effect * f64::from(u.owned))
            .sum();
        (1.0 + bonus).floor() as u64
    }

    /// Souls produced per scheduler tick.
    pub fn passive_rate(&self) -> u64 {
        self.per_click_yield()
            .saturating_mul(u64::from(self.passive_owned()))
    }

    /// Owned units summed over every upgrade.
    pub fn total_upgrades(&self) -> u64 {
        self.upgrades.iter().map(|u| u64::from(u.owned)).sum()
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            souls: self.souls,
            total_collected: self.total_collected,
            per_click_yield: self.per_click_yield(),
            passive_rate: self.passive_rate(),
            total_clicks: self.total_clicks,
            total_upgrades: self.total_upgrades(),
            upgrades: self
                .upgrades
                .iter()
                .map(|u| {
                    let cost = u.cost();
                    UpgradeView {
                        id: u.id,
                        name: u.name,
                        kind: u.kind,
                        owned: u.owned,
                        effect: u.effect,
                        cost,
                        affordable: self.souls >= cost,
                    }
                })
                .collect(),
            achievements: self
                .achievements
                .iter()
                .map(|a| AchievementView {
                    name: a.name,
                    requirement: a.requirement,
                    kind: a.kind,
                    unlocked: a.unlocked,
                })
                .collect(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
