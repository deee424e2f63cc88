//! Ordered, name-keyed collection of every pet in the cafe.
use std::fmt;

use bevy::prelude::Resource;

use super::components::Pet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateName(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "a pet named '{}' already exists", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Pets in insertion order. Pets are never removed during a session.
#[derive(Resource, Debug, Default)]
pub struct PetRegistry {
    pets: Vec<Pet>,
}

impl PetRegistry {
    pub fn add(&mut self, pet: Pet) -> Result<usize, RegistryError> {
        if self.get(pet.name()).is_some() {
            return Err(RegistryError::DuplicateName(pet.name().to_string()));
        }
        self.pets.push(pet);
        Ok(self.pets.len() - 1)
    }

    pub fn get(&self, name: &str) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|pet| pet.name() == name)
    }

    pub fn at(&self, index: usize) -> Option<&Pet> {
        self.pets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pet> {
        self.pets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pet> {
        self.pets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}
