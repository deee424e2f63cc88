//! Resources for player interaction with the cafe.
use bevy::prelude::*;

use crate::pet::{components::Pet, registry::PetRegistry};

/// Index into the registry of the pet that keyboard and pointer actions target.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetSelection {
    index: usize,
}

impl PetSelection {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the next pet, wrapping around.
    pub fn cycle(&mut self, pet_count: usize) {
        self.index = if pet_count == 0 {
            0
        } else {
            (self.index + 1) % pet_count
        };
    }

    pub fn current<'a>(&self, registry: &'a PetRegistry) -> Option<&'a Pet> {
        registry.at(self.index).or_else(|| registry.at(0))
    }
}

/// Name of the pet held by the pointer. Release goes to this pet even if the
/// selection moved while it was held.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct PetDragState {
    dragging: Option<String>,
}

impl PetDragState {
    pub fn grab(&mut self, pet: &str) {
        self.dragging = Some(pet.to_string());
    }

    pub fn release(&mut self) -> Option<String> {
        self.dragging.take()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }
}
