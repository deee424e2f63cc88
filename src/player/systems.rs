//! Systems translating keyboard and mouse input into cafe messages.
use bevy::prelude::*;

use crate::{
    absence::{
        events::{AbsenceDebugCommand, UserActivityEvent, UserInputKind},
        telemetry::AbsenceHistory,
        tracker::AbsenceTracker,
    },
    pet::{
        components::PetAction,
        events::{PetActionEvent, PetDragEvent, PetRunRequest},
        registry::PetRegistry,
    },
    player::components::{PetDragState, PetSelection},
};

/// Reports any key press or mouse button change as user activity.
pub fn emit_user_activity(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut activity: MessageWriter<UserActivityEvent>,
) {
    if keyboard.get_just_pressed().next().is_some() {
        activity.write(UserActivityEvent {
            kind: UserInputKind::KeyPress,
        });
    }
    if mouse.get_just_pressed().next().is_some() {
        activity.write(UserActivityEvent {
            kind: UserInputKind::PointerPress,
        });
    }
    if mouse.get_just_released().next().is_some() {
        activity.write(UserActivityEvent {
            kind: UserInputKind::PointerRelease,
        });
    }
}

/// Tab moves the selection to the next pet.
pub fn cycle_pet_selection(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<PetRegistry>,
    mut selection: ResMut<PetSelection>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) {
        return;
    }
    selection.cycle(registry.len());
    if let Some(pet) = selection.current(&registry) {
        info!("Selected {}", pet.name());
    }
}

/// F feeds, P plays with and C cleans the selected pet.
pub fn handle_care_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<PetRegistry>,
    selection: Res<PetSelection>,
    mut actions: MessageWriter<PetActionEvent>,
) {
    const BINDINGS: [(KeyCode, PetAction); 3] = [
        (KeyCode::KeyF, PetAction::Feed),
        (KeyCode::KeyP, PetAction::Play),
        (KeyCode::KeyC, PetAction::Clean),
    ];

    let Some(pet) = selection.current(&registry) else {
        return;
    };

    for (key, action) in BINDINGS {
        if keyboard.just_pressed(key) {
            actions.write(PetActionEvent {
                pet: pet.name().to_string(),
                action,
            });
        }
    }
}

/// Left mouse button picks up the selected pet and sets down whichever pet is held.
pub fn handle_pet_dragging(
    mouse: Res<ButtonInput<MouseButton>>,
    registry: Res<PetRegistry>,
    selection: Res<PetSelection>,
    mut drag: ResMut<PetDragState>,
    mut drags: MessageWriter<PetDragEvent>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        if let Some(pet) = selection.current(&registry) {
            drag.grab(pet.name());
            drags.write(PetDragEvent {
                pet: pet.name().to_string(),
                grabbed: true,
            });
        }
    }
    if mouse.just_released(MouseButton::Left) {
        if let Some(pet) = drag.release() {
            drags.write(PetDragEvent {
                pet,
                grabbed: false,
            });
        }
    }
}

/// R sends the selected pet on a run.
pub fn handle_run_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<PetRegistry>,
    selection: Res<PetSelection>,
    mut runs: MessageWriter<PetRunRequest>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }
    if let Some(pet) = selection.current(&registry) {
        runs.write(PetRunRequest {
            pet: pet.name().to_string(),
        });
    }
}

/// T simulates an hour away, Z resets the activity timestamp.
pub fn handle_absence_debug_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: MessageWriter<AbsenceDebugCommand>,
) {
    if keyboard.just_pressed(KeyCode::KeyT) {
        commands.write(AbsenceDebugCommand::SimulateAbsence);
    }
    if keyboard.just_pressed(KeyCode::KeyZ) {
        commands.write(AbsenceDebugCommand::ResetTimestamp);
    }
}

/// S logs every pet and the absence tracker state.
pub fn log_cafe_status(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<PetRegistry>,
    tracker: Res<AbsenceTracker>,
    history: Res<AbsenceHistory>,
) {
    if !keyboard.just_pressed(KeyCode::KeyS) {
        return;
    }

    for pet in registry.iter() {
        let needs = pet.needs();
        let detail = if pet.is_running() {
            " (zoomies)".to_string()
        } else if pet.autonomous_timer() > 0 {
            format!(" ({} steps left)", pet.autonomous_timer())
        } else {
            String::new()
        };
        info!(
            "{}: {} and {}{} | hunger {:.1} happiness {:.1} energy {:.1} cleanliness {:.1}",
            pet.name(),
            pet.mood().label(),
            pet.activity(),
            detail,
            needs.hunger,
            needs.happiness,
            needs.energy,
            needs.cleanliness
        );
    }

    info!(
        "User {} for {:.0}s ({}), {} history records",
        if tracker.is_active() { "active" } else { "away" },
        tracker.elapsed(),
        tracker.level(),
        history.len()
    );
    if let Some(episode) = tracker.last_episode() {
        info!(
            "Last absence: {} ({}), {} pets started activities",
            episode.away_for,
            episode.tier,
            episode.autonomous.len()
        );
    }
}
