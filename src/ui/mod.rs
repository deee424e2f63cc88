// src/ui/mod.rs
//
// Presentation of cafe state. The window title carries the selected pet's
// status and any welcome-back notice.

pub mod plugin;
pub mod status;

pub use plugin::UiPlugin;
