// src/ui/plugin.rs
//
// UiPlugin keeps the window title in sync with the cafe.

use bevy::prelude::*;

use super::status::update_window_title;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.add_systems(Update, update_window_title);
    }
}
