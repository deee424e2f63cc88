//! Messages exchanged between input handling, the tracker and telemetry.
use bevy::prelude::Message;

use super::tracker::{AbsenceEpisode, ReturnNotice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInputKind {
    PointerPress,
    PointerRelease,
    KeyPress,
}

/// Any input that proves the user is present.
#[derive(Message, Debug, Clone, Copy)]
pub struct UserActivityEvent {
    pub kind: UserInputKind,
}

/// Input arrived after the user had been marked absent.
#[derive(Message, Debug, Clone)]
pub struct UserReturnedEvent {
    pub notice: ReturnNotice,
}

/// An absence tier was reached and applied to the pets.
#[derive(Message, Debug, Clone)]
pub struct AbsenceAppliedEvent {
    pub episode: AbsenceEpisode,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum AbsenceDebugCommand {
    /// Backdate the last activity by the configured number of seconds.
    SimulateAbsence,
    ResetTimestamp,
}
