//! Systems that populate the cafe and drive pets from the step clock and user actions.
use bevy::prelude::*;

use crate::core::plugin::StepClock;

use super::{
    components::{Activity, Pet},
    config::PetConfig,
    events::{PetActionEvent, PetDragEvent, PetRunRequest},
    random::{PetRandom, RandomSource},
    registry::PetRegistry,
};

/// Adds every configured roster entry to the registry.
pub fn spawn_cafe_pets(config: Res<PetConfig>, mut registry: ResMut<PetRegistry>) {
    for entry in &config.roster {
        let pet = Pet::new(entry.name.clone(), entry.personality.profile(), &config);
        match registry.add(pet) {
            Ok(_) => info!(
                "{} joins the cafe with a {} personality",
                entry.name, entry.personality
            ),
            Err(err) => warn!("Skipping roster entry: {}", err),
        }
    }
}

/// Runs the per-step pet simulation for every step produced this frame.
pub fn advance_pet_steps(
    steps: Res<StepClock>,
    config: Res<PetConfig>,
    mut random: ResMut<PetRandom>,
    mut registry: ResMut<PetRegistry>,
) {
    if steps.steps_this_frame() == 0 || registry.is_empty() {
        return;
    }

    for step in steps.steps() {
        for pet in registry.iter_mut() {
            step_pet(pet, step, &config, random.source());
        }
    }
}

fn step_pet(pet: &mut Pet, step: u64, config: &PetConfig, random: &mut dyn RandomSource) {
    if pet.tick_autonomous_timer() {
        debug!("{} settles back to idle", pet.name());
    }

    match pet.update_running(random, config) {
        Some(Activity::Running) => info!("{} gets the zoomies", pet.name()),
        Some(_) => debug!("{} stops running", pet.name()),
        None => {}
    }

    let cadence = &config.cadence;
    if step % cadence.decay_every_steps == 0 {
        let outcome = pet.decay(cadence.decay_ticks, config);
        if let Some(mood) = outcome.mood_changed {
            info!(
                "{} mood shifts to {} (average need {:.1})",
                pet.name(),
                mood.label(),
                pet.needs().average()
            );
        }
        match outcome.sleeping_changed {
            Some(true) => info!("{} dozes off (energy {:.1})", pet.name(), pet.needs().energy),
            Some(false) => info!("{} wakes up", pet.name()),
            None => {}
        }
    }

    if step % cadence.activity_reset_every_steps == 0 && pet.expire_directed_activity() {
        debug!("{} goes back to idling", pet.name());
    }
}

/// Applies feed/play/clean requests to the named pets.
pub fn apply_pet_actions(
    mut actions: MessageReader<PetActionEvent>,
    config: Res<PetConfig>,
    mut registry: ResMut<PetRegistry>,
) {
    for event in actions.read() {
        let Some(pet) = registry.get_mut(&event.pet) else {
            warn!("Ignoring {} for unknown pet '{}'", event.action.label(), event.pet);
            continue;
        };

        if pet.apply_action(event.action, &config) {
            let needs = pet.needs();
            info!(
                "{} is {} (hunger {:.0}, happiness {:.0}, energy {:.0}, cleanliness {:.0})",
                pet.name(),
                pet.activity(),
                needs.hunger,
                needs.happiness,
                needs.energy,
                needs.cleanliness
            );
        } else {
            debug!(
                "{} is too tired to {} (energy {:.1})",
                pet.name(),
                event.action.label(),
                pet.needs().energy
            );
        }
    }
}

/// Applies pointer grabs and releases.
pub fn apply_pet_drags(
    mut drags: MessageReader<PetDragEvent>,
    config: Res<PetConfig>,
    mut registry: ResMut<PetRegistry>,
) {
    for event in drags.read() {
        let Some(pet) = registry.get_mut(&event.pet) else {
            continue;
        };
        if event.grabbed {
            pet.begin_drag(&config);
            debug!("{} is picked up", pet.name());
        } else {
            pet.end_drag(&config);
            debug!("{} is set down", pet.name());
        }
    }
}

pub fn apply_run_requests(
    mut requests: MessageReader<PetRunRequest>,
    config: Res<PetConfig>,
    mut random: ResMut<PetRandom>,
    mut registry: ResMut<PetRegistry>,
) {
    for request in requests.read() {
        let Some(pet) = registry.get_mut(&request.pet) else {
            warn!("Cannot send unknown pet '{}' running", request.pet);
            continue;
        };
        if pet.start_run(random.source(), &config) {
            info!("{} is sent off running", pet.name());
        } else {
            debug!("{} is already running", pet.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::pet::{
        components::{AutonomousActivity, Needs, PetAction},
        personality::PersonalityProfile,
        random::testing::ScriptedRandom,
    };

    #[test]
    fn decay_fires_on_cadence_steps_only() {
        let config = PetConfig::default();
        let mut pet = Pet::new("meeple", PersonalityProfile::NEUTRAL, &config);
        let mut random = ScriptedRandom::new().with_rolls(std::iter::repeat(1000).take(64));

        for step in 1..=29 {
            step_pet(&mut pet, step, &config, &mut random);
        }
        assert_eq!(pet.needs(), Needs::uniform(50.0));

        step_pet(&mut pet, 30, &config, &mut random);
        assert!((pet.needs().hunger - 49.9).abs() < 1e-4);
    }

    #[test]
    fn activity_reset_step_clears_directed_labels() {
        let config = PetConfig::default();
        let mut pet = Pet::new("meeple", PersonalityProfile::NEUTRAL, &config);
        pet.apply_action(PetAction::Feed, &config);
        let mut random = ScriptedRandom::new().with_rolls([1000, 1000]);

        step_pet(&mut pet, 119, &config, &mut random);
        assert_eq!(pet.activity(), Activity::Eating);
        step_pet(&mut pet, 120, &config, &mut random);
        assert_eq!(pet.activity(), Activity::Idle);
    }

    #[test]
    fn autonomous_activity_survives_reset_step_until_timer_ends() {
        let config = PetConfig::default();
        let mut pet = Pet::new("beepaw", PersonalityProfile::INDEPENDENT, &config);
        let mut random = ScriptedRandom::new().with_rolls([60]);
        pet.start_autonomous_activity(AutonomousActivity::SelfGrooming, &mut random, &config);

        let mut random = ScriptedRandom::new().with_rolls(std::iter::repeat(1000).take(60));
        for step in 61..=119 {
            step_pet(&mut pet, step, &config, &mut random);
        }
        assert_eq!(pet.activity(), Activity::SelfGrooming);
        step_pet(&mut pet, 120, &config, &mut random);
        assert_eq!(pet.activity(), Activity::Idle);
    }

    #[test]
    fn action_and_step_systems_update_registry() {
        let config = PetConfig::default();
        let mut registry = PetRegistry::default();
        registry
            .add(Pet::new("elwin", PersonalityProfile::SOCIAL, &config))
            .expect("unique name");

        let mut steps = StepClock::default();
        steps.tick(Duration::from_secs(1));

        let mut app = App::new();
        app.insert_resource(config)
            .insert_resource(registry)
            .insert_resource(steps)
            .insert_resource(PetRandom::new(Box::new(
                ScriptedRandom::new().with_rolls(std::iter::repeat(1000).take(64)),
            )))
            .add_message::<PetActionEvent>()
            .add_message::<PetDragEvent>()
            .add_message::<PetRunRequest>()
            .add_systems(
                Update,
                (
                    apply_pet_drags,
                    apply_pet_actions,
                    apply_run_requests,
                    advance_pet_steps,
                )
                    .chain(),
            );

        app.world_mut().write_message(PetActionEvent {
            pet: "elwin".to_string(),
            action: PetAction::Clean,
        });
        app.world_mut().write_message(PetDragEvent {
            pet: "elwin".to_string(),
            grabbed: true,
        });
        app.world_mut().write_message(PetRunRequest {
            pet: "elwin".to_string(),
        });
        app.update();

        let registry = app.world().resource::<PetRegistry>();
        let pet = registry.get("elwin").expect("pet exists");
        assert!(pet.is_dragged());
        assert!(pet.is_running());
        assert_eq!(pet.activity(), Activity::Running);
        // +20 from cleaning, then one decay tick at step 30.
        assert!((pet.needs().cleanliness - (70.0 - 0.03)).abs() < 1e-4);
        // -1 from the grab, +3 from cleaning, +2 for a playful pet starting a run.
        assert!((pet.needs().happiness - 54.0).abs() < 1e-4);
    }
}
