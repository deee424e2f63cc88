//! Absence plugin wiring the tracker, periodic checks and history logging.
use bevy::prelude::*;

use crate::pet::systems::advance_pet_steps;

use super::{
    clock::SystemWallClock,
    config::AbsenceSettings,
    events::{AbsenceAppliedEvent, AbsenceDebugCommand, UserActivityEvent, UserReturnedEvent},
    notice::WelcomeBackNotice,
    store::FileActivityStore,
    systems::{
        check_for_absence, handle_absence_debug_commands, record_user_activity,
        show_startup_notice, tick_welcome_back_notice, AbsenceCheckTimer,
    },
    telemetry::{
        flush_absence_history_log, record_absence_history, AbsenceHistory, AbsenceHistoryLog,
    },
    tracker::AbsenceTracker,
};

pub struct AbsencePlugin;

impl Plugin for AbsencePlugin {
    fn build(&self, app: &mut App) {
        let settings = AbsenceSettings::load_or_default();
        let store = FileActivityStore::new(&settings.save_path);
        info!(
            "Absence tracking: activity saved to {:?}, checked every {:.1}s",
            store.path(),
            settings.check_interval_secs
        );

        let tracker = AbsenceTracker::new(
            Box::new(SystemWallClock),
            Box::new(store),
            settings.thresholds.clone(),
            settings.medium_wander_chance,
        );

        app.insert_resource(AbsenceCheckTimer::new(settings.check_interval_secs))
            .insert_resource(AbsenceHistory::new(settings.history.capacity))
            .insert_resource(AbsenceHistoryLog::new(settings.history.log_path.clone()))
            .insert_resource(tracker)
            .insert_resource(settings)
            .init_resource::<WelcomeBackNotice>()
            .add_message::<UserActivityEvent>()
            .add_message::<UserReturnedEvent>()
            .add_message::<AbsenceAppliedEvent>()
            .add_message::<AbsenceDebugCommand>()
            .add_systems(Startup, show_startup_notice)
            .add_systems(
                Update,
                (
                    tick_welcome_back_notice,
                    record_user_activity,
                    handle_absence_debug_commands,
                    check_for_absence,
                    record_absence_history,
                    flush_absence_history_log,
                )
                    .chain()
                    .after(advance_pet_steps),
            );
    }
}
