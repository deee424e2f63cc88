//! What happens to the pets when an absence tier is first reached.
use serde::Serialize;

use crate::pet::{
    components::{Activity, AutonomousActivity, Pet},
    config::PetConfig,
    random::RandomSource,
    registry::PetRegistry,
};

use super::tier::AbsenceTier;

const LONG_ABSENCE_CHOICES: [AutonomousActivity; 3] = [
    AutonomousActivity::Wandering,
    AutonomousActivity::Playing,
    AutonomousActivity::SelfGrooming,
];

/// A pet that started something on its own while the user was away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutonomousStart {
    pub pet: String,
    pub activity: AutonomousActivity,
}

/// Applies the tier's need adjustments to every pet, then lets each pet pick
/// an autonomous activity according to the tier's policy.
pub fn apply_absence_tier(
    tier: AbsenceTier,
    registry: &mut PetRegistry,
    random: &mut dyn RandomSource,
    config: &PetConfig,
    medium_wander_chance: f32,
) -> Vec<AutonomousStart> {
    let delta = tier.effects();
    let mut started = Vec::new();

    for pet in registry.iter_mut() {
        pet.apply_needs_delta(delta);

        let Some(activity) = choose_activity(tier, pet, random, medium_wander_chance) else {
            continue;
        };
        pet.start_autonomous_activity(activity, random, config);
        started.push(AutonomousStart {
            pet: pet.name().to_string(),
            activity,
        });
    }

    started
}

fn choose_activity(
    tier: AbsenceTier,
    pet: &Pet,
    random: &mut dyn RandomSource,
    medium_wander_chance: f32,
) -> Option<AutonomousActivity> {
    let idle = pet.activity() == Activity::Idle;
    let needs = pet.needs();

    match tier {
        AbsenceTier::Short => None,
        AbsenceTier::Medium => {
            (idle && random.chance(medium_wander_chance)).then_some(AutonomousActivity::Wandering)
        }
        AbsenceTier::Long => {
            if !idle {
                return None;
            }
            let index = random.pick(LONG_ABSENCE_CHOICES.len());
            LONG_ABSENCE_CHOICES.get(index).copied()
        }
        AbsenceTier::Extended => {
            if needs.hunger < 30.0 {
                Some(AutonomousActivity::Foraging)
            } else if needs.energy < 20.0 {
                Some(AutonomousActivity::Sleeping)
            } else if needs.cleanliness < 25.0 {
                Some(AutonomousActivity::SelfGrooming)
            } else {
                None
            }
        }
        AbsenceTier::Overnight => {
            if needs.hunger < 20.0 {
                Some(AutonomousActivity::Foraging)
            } else if needs.cleanliness < 30.0 {
                Some(AutonomousActivity::SelfGrooming)
            } else {
                Some(AutonomousActivity::Wandering)
            }
        }
    }
}
