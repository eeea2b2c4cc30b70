//! Soul Reaper: an incremental soul-harvesting clicker.

pub mod actions;
pub mod error;
pub mod logic;
pub mod render;
pub mod scheduler;
pub mod state;
mod simulator;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent, KEY_ESCAPE};

use error::PurchaseError;
use logic::{format_number, PurchaseOutcome};
use scheduler::{Scheduler, SchedulerConfig};
use state::{GameEvent, GameState, Snapshot, UpgradeKind};

/// How long an unlock popup stays on screen.
pub const POPUP_DURATION_MS: f64 = 2500.0;

const MAX_LOG_ENTRIES: usize = 50;

/// Log entry for the Soul Reaper game.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Congratulation message currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub text: String,
    pub expires_at_ms: f64,
}

/// Engine plus the view state the terminal front end needs.
pub struct SoulsGame {
    /// Mutated only through the facade so minion purchases always re-arm.
    state: GameState,
    scheduler: Scheduler,
    /// Message log.
    pub log: Vec<LogEntry>,
    /// Whether the help overlay is open.
    pub show_help: bool,
    pub popup: Option<Popup>,
    /// Unlock messages waiting for the current popup to close.
    pending_popups: VecDeque<String>,
    /// Timestamp of the latest `update`.
    now_ms: f64,
}

impl SoulsGame {
    pub fn new() -> Self {
        Self::with_parts(GameState::new(), SchedulerConfig::default())
    }

    pub fn with_parts(state: GameState, config: SchedulerConfig) -> Self {
        let mut scheduler = Scheduler::new(config);
        scheduler.reconfigure(state.passive_owned());
        let mut game = Self {
            state,
            scheduler,
            log: Vec::new(),
            show_help: false,
            popup: None,
            pending_popups: VecDeque::new(),
            now_ms: 0.0,
        };
        game.add_log("Welcome, reaper. Click the orb to harvest souls.", true);
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Reap once. Returns the souls gained.
    pub fn click(&mut self) -> u64 {
        let gained = logic::click(&mut self.state);
        self.process_events();
        gained
    }

    /// Buy one unit of `id`, re-arming production when a minion was bought.
    pub fn purchase(&mut self, id: &str) -> Result<PurchaseOutcome, PurchaseError> {
        let outcome = logic::purchase(&mut self.state, id)?;
        match &outcome {
            PurchaseOutcome::Purchased {
                kind: UpgradeKind::Passive,
                ..
            } => {
                self.scheduler.reconfigure(self.state.passive_owned());
            }
            PurchaseOutcome::Purchased { .. } => {}
            PurchaseOutcome::InsufficientFunds { cost, souls } => {
                let name = self.state.upgrade(id).map_or("that", |u| u.name);
                self.add_log(
                    &format!(
                        "Not enough souls for {}: need {}, have {}",
                        name,
                        format_number(*cost),
                        format_number(*souls)
                    ),
                    false,
                );
            }
        }
        self.process_events();
        Ok(outcome)
    }

    /// Buy the upgrade at catalog position `index`. Returns false if there is none.
    fn purchase_index(&mut self, index: usize) -> bool {
        let Some(id) = self.state.upgrades().get(index).map(|u| u.id) else {
            return false;
        };
        if let Err(err) = self.purchase(id) {
            log::error!("{err}");
        }
        true
    }

    /// Move queued engine notifications into the log and popup queue.
    fn process_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::AchievementUnlocked { name } => {
                    self.add_log(&format!("🏆 Achievement: {}", name), true);
                    self.queue_popup(format!("{} Unlocked!", name));
                }
                GameEvent::UpgradePurchased { id, owned, cost } => {
                    let name = self.state.upgrade(id).map_or(id, |u| u.name);
                    self.add_log(
                        &format!("Bought {} (Lv {}) for {}", name, owned, format_number(cost)),
                        false,
                    );
                }
            }
        }
    }

    fn queue_popup(&mut self, text: String) {
        if self.popup.is_none() {
            self.popup = Some(Popup {
                text,
                expires_at_ms: self.now_ms + POPUP_DURATION_MS,
            });
        } else {
            self.pending_popups.push_back(text);
        }
    }

    fn expire_popup(&mut self) {
        let expired = self
            .popup
            .as_ref()
            .is_some_and(|p| self.now_ms >= p.expires_at_ms);
        if expired {
            let now_ms = self.now_ms;
            self.popup = self.pending_popups.pop_front().map(|text| Popup {
                text,
                expires_at_ms: now_ms + POPUP_DURATION_MS,
            });
        }
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

impl Default for SoulsGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SoulsGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.show_help {
            return match event {
                InputEvent::Key('?')
                | InputEvent::Key(KEY_ESCAPE)
                | InputEvent::Click(actions::TOGGLE_HELP)
                | InputEvent::Click(actions::CLOSE_HELP) => {
                    self.show_help = false;
                    true
                }
                _ => false,
            };
        }

        match event {
            InputEvent::Key('c')
            | InputEvent::Key(' ')
            | InputEvent::Click(actions::CLICK_ORB)
            | InputEvent::Click(actions::REAP_BUTTON) => {
                self.click();
                true
            }
            InputEvent::Key('?') | InputEvent::Click(actions::TOGGLE_HELP) => {
                self.show_help = true;
                true
            }
            InputEvent::Key(key @ '1'..='9') => {
                let index = (*key as u8 - b'1') as usize;
                self.purchase_index(index)
            }
            InputEvent::Click(id) if *id >= actions::BUY_UPGRADE_BASE => {
                self.purchase_index(usize::from(*id - actions::BUY_UPGRADE_BASE))
            }
            _ => false,
        }
    }

    fn update(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        self.scheduler.advance(&mut self.state, now_ms);
        self.process_events();
        self.expire_popup();
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}
