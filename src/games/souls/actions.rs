//! Semantic action IDs for Soul Reaper click targets.
//!
//! Each constant represents a distinct clickable action in the UI.
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

// ── Reaping ─────────────────────────────────────────────────────
pub const CLICK_ORB: u16 = 0;
pub const REAP_BUTTON: u16 = 1;

// ── Help overlay ────────────────────────────────────────────────
pub const TOGGLE_HELP: u16 = 10;
pub const CLOSE_HELP: u16 = 11;

// ── Upgrade purchase (base + catalog index) ─────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;
