//! Absence tracking: notices when the user steps away and what the pets get up to meanwhile.
pub mod catchup;
pub mod clock;
pub mod config;
pub mod events;
pub mod format;
pub mod notice;
pub mod plugin;
pub mod store;
pub mod systems;
pub mod telemetry;
pub mod tier;
pub mod tracker;

pub use plugin::AbsencePlugin;
