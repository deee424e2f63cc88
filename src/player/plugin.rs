//! Player plugin wiring input bindings.
use bevy::prelude::*;

use crate::{
    absence::systems::{handle_absence_debug_commands, record_user_activity},
    pet::systems::{apply_pet_drags, apply_run_requests},
    player::{
        components::{PetDragState, PetSelection},
        systems::{
            cycle_pet_selection, emit_user_activity, handle_absence_debug_keys,
            handle_care_shortcuts, handle_pet_dragging, handle_run_shortcut, log_cafe_status,
        },
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PetSelection>()
            .init_resource::<PetDragState>()
            .add_systems(
                Update,
                (
                    emit_user_activity.before(record_user_activity),
                    cycle_pet_selection,
                    handle_care_shortcuts.after(cycle_pet_selection),
                    handle_pet_dragging.after(cycle_pet_selection),
                    handle_run_shortcut.after(cycle_pet_selection),
                    handle_absence_debug_keys.before(handle_absence_debug_commands),
                )
                    .before(apply_pet_drags)
                    .before(apply_run_requests),
            )
            .add_systems(Update, log_cafe_status);
    }
}
