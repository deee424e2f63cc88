//! Player input: selection, care shortcuts, dragging and debug keys.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
