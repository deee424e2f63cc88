use bevy::prelude::*;

use crate::pet::{config::PetConfig, random::PetRandom, registry::PetRegistry};

use super::{
    config::AbsenceSettings,
    events::{
        AbsenceAppliedEvent, AbsenceDebugCommand, UserActivityEvent, UserInputKind,
        UserReturnedEvent,
    },
    notice::WelcomeBackNotice,
    tracker::AbsenceTracker,
};

/// Repeating real-time timer between absence checks.
#[derive(Resource, Debug)]
pub struct AbsenceCheckTimer {
    timer: Timer,
}

impl AbsenceCheckTimer {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
        }
    }
}

pub fn show_startup_notice(
    settings: Res<AbsenceSettings>,
    tracker: Res<AbsenceTracker>,
    mut banner: ResMut<WelcomeBackNotice>,
) {
    let Some(notice) = tracker.startup_notice(settings.notice.startup_min_away_secs) else {
        return;
    };
    info!("{} since the last session", notice.headline());
    banner.show(notice, settings.notice.display_secs);
}

/// Feeds user input into the tracker. Pointer presses are throttled; releases
/// and key presses always count.
pub fn record_user_activity(
    mut inputs: MessageReader<UserActivityEvent>,
    settings: Res<AbsenceSettings>,
    mut tracker: ResMut<AbsenceTracker>,
    mut banner: ResMut<WelcomeBackNotice>,
    mut returned: MessageWriter<UserReturnedEvent>,
) {
    for input in inputs.read() {
        let notice = match input.kind {
            UserInputKind::PointerPress => {
                tracker.record_throttled_activity(settings.pointer_throttle_secs)
            }
            UserInputKind::PointerRelease | UserInputKind::KeyPress => tracker.record_activity(),
        };

        if let Some(notice) = notice {
            banner.show(notice.clone(), settings.notice.display_secs);
            returned.write(UserReturnedEvent { notice });
        }
    }
}

pub fn check_for_absence(
    time: Res<Time<Real>>,
    pet_config: Res<PetConfig>,
    mut timer: ResMut<AbsenceCheckTimer>,
    mut tracker: ResMut<AbsenceTracker>,
    mut registry: ResMut<PetRegistry>,
    mut random: ResMut<PetRandom>,
    mut applied: MessageWriter<AbsenceAppliedEvent>,
) {
    if !timer.timer.tick(time.delta()).just_finished() {
        return;
    }

    if let Some(episode) = tracker.check_absence(&mut registry, random.source(), &pet_config) {
        applied.write(AbsenceAppliedEvent { episode });
    }
}

/// Debug shortcuts. A simulated absence is checked straight away instead of
/// waiting for the next timer tick.
pub fn handle_absence_debug_commands(
    mut commands: MessageReader<AbsenceDebugCommand>,
    settings: Res<AbsenceSettings>,
    pet_config: Res<PetConfig>,
    mut tracker: ResMut<AbsenceTracker>,
    mut registry: ResMut<PetRegistry>,
    mut random: ResMut<PetRandom>,
    mut applied: MessageWriter<AbsenceAppliedEvent>,
) {
    for command in commands.read() {
        match command {
            AbsenceDebugCommand::SimulateAbsence => {
                tracker.simulate_absence(settings.simulated_absence_secs);
                if let Some(episode) =
                    tracker.check_absence(&mut registry, random.source(), &pet_config)
                {
                    applied.write(AbsenceAppliedEvent { episode });
                }
            }
            AbsenceDebugCommand::ResetTimestamp => tracker.reset_timestamp(),
        }
    }
}

pub fn tick_welcome_back_notice(time: Res<Time<Real>>, mut banner: ResMut<WelcomeBackNotice>) {
    banner.tick(time.delta());
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::{
        absence::{
            clock::testing::ManualClock,
            store::testing::MemoryActivityStore,
            tier::{AbsenceLevel, AbsenceThresholds, AbsenceTier},
        },
        pet::{components::Pet, personality::PersonalityProfile, random::testing::ScriptedRandom},
    };

    const START: f64 = 1_700_000_000.0;

    fn test_app(clock: &ManualClock) -> App {
        let config = PetConfig::default();
        let mut registry = PetRegistry::default();
        registry
            .add(Pet::new("churrio", PersonalityProfile::ENERGETIC, &config))
            .expect("unique name");

        let tracker = AbsenceTracker::new(
            Box::new(clock.clone()),
            Box::new(MemoryActivityStore::default()),
            AbsenceThresholds::default(),
            0.3,
        );

        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)))
            .insert_resource(config)
            .insert_resource(registry)
            .insert_resource(PetRandom::new(Box::new(ScriptedRandom::new())))
            .insert_resource(AbsenceSettings::default())
            .insert_resource(AbsenceCheckTimer::new(1.0))
            .insert_resource(tracker)
            .init_resource::<WelcomeBackNotice>()
            .add_message::<UserActivityEvent>()
            .add_message::<UserReturnedEvent>()
            .add_message::<AbsenceAppliedEvent>()
            .add_message::<AbsenceDebugCommand>()
            .add_systems(
                Update,
                (
                    record_user_activity,
                    handle_absence_debug_commands,
                    check_for_absence,
                )
                    .chain(),
            );
        app
    }

    #[test]
    fn absence_and_return_flow_through_systems() {
        let clock = ManualClock::starting_at(START);
        let mut app = test_app(&clock);
        app.update();
        app.update();

        clock.advance(1800.0);
        app.update();

        let tracker = app.world().resource::<AbsenceTracker>();
        assert!(!tracker.is_active());
        assert_eq!(
            tracker.last_episode().map(|episode| episode.tier),
            Some(AbsenceTier::Medium)
        );
        let pet = app.world().resource::<PetRegistry>().get("churrio").map(Pet::needs);
        assert_eq!(pet.map(|needs| needs.hunger), Some(35.0));

        app.world_mut().write_message(UserActivityEvent {
            kind: UserInputKind::KeyPress,
        });
        app.update();

        let tracker = app.world().resource::<AbsenceTracker>();
        assert!(tracker.is_active());
        let banner = app.world().resource::<WelcomeBackNotice>();
        assert_eq!(
            banner.current().map(|notice| notice.level),
            Some(AbsenceLevel::Away(AbsenceTier::Medium))
        );
    }

    #[test]
    fn simulate_command_applies_the_absence_immediately() {
        let clock = ManualClock::starting_at(START);
        let mut app = test_app(&clock);
        app.insert_resource(AbsenceCheckTimer::new(600.0));
        app.update();

        app.world_mut()
            .write_message(AbsenceDebugCommand::SimulateAbsence);
        app.update();

        let tracker = app.world().resource::<AbsenceTracker>();
        assert_eq!(
            tracker.last_episode().map(|episode| episode.tier),
            Some(AbsenceTier::Long)
        );
    }

    #[test]
    fn key_that_triggers_a_simulated_absence_does_not_end_it() {
        let clock = ManualClock::starting_at(START);
        let mut app = test_app(&clock);
        app.insert_resource(AbsenceCheckTimer::new(600.0));
        app.update();

        app.world_mut().write_message(UserActivityEvent {
            kind: UserInputKind::KeyPress,
        });
        app.world_mut()
            .write_message(AbsenceDebugCommand::SimulateAbsence);
        app.update();

        let tracker = app.world().resource::<AbsenceTracker>();
        assert!(!tracker.is_active());
        assert!(tracker.last_episode().is_some());
        assert!(app.world().resource::<WelcomeBackNotice>().current().is_none());
    }
}
