// src/ui/status.rs
//
// Window-title status line for the selected pet.

use bevy::{prelude::*, window::PrimaryWindow};

use crate::{
    absence::{notice::WelcomeBackNotice, tracker::ReturnNotice},
    pet::{components::Pet, registry::PetRegistry},
    player::components::PetSelection,
};

const TITLE_PREFIX: &str = "Purr Cafe";

/// Builds the status line shown in the window title.
pub fn status_line(pet: Option<&Pet>, notice: Option<&ReturnNotice>) -> String {
    let mut line = TITLE_PREFIX.to_string();

    if let Some(pet) = pet {
        let needs = pet.needs();
        let state = if pet.is_sleeping() {
            format!("{}, sleepy", pet.mood().label())
        } else {
            pet.mood().label().to_string()
        };
        line.push_str(&format!(
            " | {} ({}, {}) | hunger {:.0} happiness {:.0} energy {:.0} cleanliness {:.0}",
            pet.name(),
            state,
            pet.activity(),
            needs.hunger,
            needs.happiness,
            needs.energy,
            needs.cleanliness
        ));
    }

    if let Some(notice) = notice {
        line.push_str(" | ");
        line.push_str(&notice.headline());
    }

    line
}

/// Rewrites the primary window title when the status line changes.
pub fn update_window_title(
    registry: Res<PetRegistry>,
    selection: Res<PetSelection>,
    banner: Res<WelcomeBackNotice>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let title = status_line(selection.current(&registry), banner.current());
    if window.title != title {
        window.title = title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        absence::tier::{AbsenceLevel, AbsenceTier},
        pet::{components::Needs, config::PetConfig, personality::PersonalityProfile},
    };

    #[test]
    fn status_line_without_pets_is_just_the_prefix() {
        assert_eq!(status_line(None, None), "Purr Cafe");
    }

    #[test]
    fn status_line_describes_pet_and_notice() {
        let config = PetConfig::default();
        let mut pet = Pet::new("meeple", PersonalityProfile::CLEAN, &config);
        pet.set_needs(Needs {
            hunger: 80.0,
            happiness: 100.0,
            energy: 20.0,
            cleanliness: 90.0,
        });
        let notice = ReturnNotice::new(3661.0, AbsenceLevel::Away(AbsenceTier::Long));

        let line = status_line(Some(&pet), Some(&notice));

        assert!(line.starts_with("Purr Cafe | meeple (happy, sleepy, idle)"));
        assert!(line.contains("energy 20"));
        assert!(line.ends_with("Welcome back! You were away for 1h 1m"));
    }
}
