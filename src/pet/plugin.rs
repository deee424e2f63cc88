//! Pet plugin wiring configuration, the registry and per-step systems.
use bevy::prelude::*;

use crate::core::plugin::advance_step_clock;

use super::{
    config::PetConfig,
    events::{PetActionEvent, PetDragEvent, PetRunRequest},
    random::PetRandom,
    registry::PetRegistry,
    systems::{
        advance_pet_steps, apply_pet_actions, apply_pet_drags, apply_run_requests, spawn_cafe_pets,
    },
};

pub struct PetPlugin;

impl Plugin for PetPlugin {
    fn build(&self, app: &mut App) {
        let config = PetConfig::load_or_default();
        info!(
            "Pet config loaded: {} pets, decay every {} steps, feed +{:.0}/+{:.0}",
            config.roster.len(),
            config.cadence.decay_every_steps,
            config.actions.feed_hunger,
            config.actions.feed_happiness
        );

        app.insert_resource(config)
            .init_resource::<PetRegistry>()
            .init_resource::<PetRandom>()
            .add_message::<PetActionEvent>()
            .add_message::<PetDragEvent>()
            .add_message::<PetRunRequest>()
            .add_systems(Startup, spawn_cafe_pets)
            .add_systems(
                Update,
                (
                    apply_pet_drags,
                    apply_pet_actions,
                    apply_run_requests,
                    advance_pet_steps,
                )
                    .chain()
                    .after(advance_step_clock),
            );
    }
}
