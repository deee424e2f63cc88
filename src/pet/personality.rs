//! Personality profiles: fixed multiplier bundles assigned to each pet at creation.
use std::{fmt, str::FromStr};

/// Rate multipliers that shape how a pet's needs evolve.
///
/// All multipliers are positive; `1.0` leaves the base rate untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalityProfile {
    pub hunger_rate: f32,
    pub energy_rate: f32,
    pub messy_rate: f32,
    pub social_need: f32,
    pub playfulness: f32,
    pub sleepiness_rate: f32,
}

impl PersonalityProfile {
    pub const NEUTRAL: Self = Self {
        hunger_rate: 1.0,
        energy_rate: 1.0,
        messy_rate: 1.0,
        social_need: 1.0,
        playfulness: 1.0,
        sleepiness_rate: 1.0,
    };

    pub const LAZY: Self = Self {
        hunger_rate: 0.8,
        energy_rate: 1.5,
        messy_rate: 1.2,
        social_need: 0.8,
        playfulness: 0.6,
        sleepiness_rate: 1.5,
    };

    pub const ENERGETIC: Self = Self {
        hunger_rate: 1.3,
        energy_rate: 0.7,
        messy_rate: 1.3,
        social_need: 1.2,
        playfulness: 1.8,
        sleepiness_rate: 0.6,
    };

    pub const CLEAN: Self = Self {
        hunger_rate: 1.0,
        energy_rate: 1.0,
        messy_rate: 0.5,
        social_need: 1.0,
        playfulness: 1.0,
        sleepiness_rate: 1.0,
    };

    pub const SOCIAL: Self = Self {
        hunger_rate: 1.0,
        energy_rate: 1.0,
        messy_rate: 1.0,
        social_need: 1.8,
        playfulness: 1.3,
        sleepiness_rate: 0.8,
    };

    pub const INDEPENDENT: Self = Self {
        hunger_rate: 0.9,
        energy_rate: 0.9,
        messy_rate: 0.9,
        social_need: 0.5,
        playfulness: 0.8,
        sleepiness_rate: 1.1,
    };
}

impl Default for PersonalityProfile {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Named personality presets, used by configuration to pick a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalityKind {
    Lazy,
    Energetic,
    Clean,
    Social,
    Independent,
    Neutral,
}

impl PersonalityKind {
    pub const ALL: [Self; 6] = [
        Self::Lazy,
        Self::Energetic,
        Self::Clean,
        Self::Social,
        Self::Independent,
        Self::Neutral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Lazy => "lazy",
            Self::Energetic => "energetic",
            Self::Clean => "clean",
            Self::Social => "social",
            Self::Independent => "independent",
            Self::Neutral => "neutral",
        }
    }

    pub fn profile(self) -> PersonalityProfile {
        match self {
            Self::Lazy => PersonalityProfile::LAZY,
            Self::Energetic => PersonalityProfile::ENERGETIC,
            Self::Clean => PersonalityProfile::CLEAN,
            Self::Social => PersonalityProfile::SOCIAL,
            Self::Independent => PersonalityProfile::INDEPENDENT,
            Self::Neutral => PersonalityProfile::NEUTRAL,
        }
    }
}

impl fmt::Display for PersonalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Returned when a personality label does not name a known preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPersonality(pub String);

impl fmt::Display for UnknownPersonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown personality '{}'", self.0)
    }
}

impl std::error::Error for UnknownPersonality {}

impl FromStr for PersonalityKind {
    type Err = UnknownPersonality;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == normalised)
            .ok_or_else(|| UnknownPersonality(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_neutral() {
        let profile = PersonalityProfile::default();
        assert_eq!(profile, PersonalityProfile::NEUTRAL);
        assert_eq!(profile.playfulness, 1.0);
    }

    #[test]
    fn kinds_parse_from_labels() {
        for kind in PersonalityKind::ALL {
            assert_eq!(kind.label().parse::<PersonalityKind>(), Ok(kind));
        }
        assert_eq!(
            " Energetic ".parse::<PersonalityKind>(),
            Ok(PersonalityKind::Energetic)
        );

        let err = "grumpy".parse::<PersonalityKind>().unwrap_err();
        assert!(err.to_string().contains("grumpy"));
    }

    #[test]
    fn canonical_profiles_stay_in_expected_range() {
        for kind in PersonalityKind::ALL {
            let profile = kind.profile();
            for multiplier in [
                profile.hunger_rate,
                profile.energy_rate,
                profile.messy_rate,
                profile.social_need,
                profile.playfulness,
                profile.sleepiness_rate,
            ] {
                assert!((0.5..=1.8).contains(&multiplier), "{kind}: {multiplier}");
            }
        }
        assert_eq!(PersonalityKind::Energetic.profile().playfulness, 1.8);
        assert_eq!(PersonalityKind::Independent.profile().social_need, 0.5);
    }
}
