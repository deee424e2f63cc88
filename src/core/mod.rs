//! Core timing shared by every simulation plugin.
pub mod plugin;

pub use plugin::CorePlugin;
