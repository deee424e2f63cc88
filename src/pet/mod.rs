//! Pets: needs, mood, personality and autonomous behaviour.
pub mod components;
pub mod config;
pub mod events;
pub mod personality;
pub mod plugin;
pub mod random;
pub mod registry;
pub mod systems;

pub use plugin::PetPlugin;
