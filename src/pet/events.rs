//! Pet-specific messages broadcast between systems.
use bevy::prelude::Message;

use super::components::PetAction;

/// Requests a direct care action on the named pet.
#[derive(Message, Debug, Clone)]
pub struct PetActionEvent {
    pub pet: String,
    pub action: PetAction,
}

/// Pointer grab or release of the named pet.
#[derive(Message, Debug, Clone)]
pub struct PetDragEvent {
    pub pet: String,
    pub grabbed: bool,
}

/// Debug request that sends the named pet on a run straight away.
#[derive(Message, Debug, Clone)]
pub struct PetRunRequest {
    pub pet: String,
}
