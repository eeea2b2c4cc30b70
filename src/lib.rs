//! Soul Reaper: an incremental soul-harvesting clicker for the browser terminal.

pub mod games;
pub mod input;
pub mod time;
