//! Absence tiers, their thresholds and the need adjustments each tier applies.
use std::fmt;

use serde::{Serialize, Serializer};

use crate::pet::components::NeedsDelta;

/// Severity buckets for time spent away, strictly ordered by boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceTier {
    Short,
    Medium,
    Long,
    Extended,
    Overnight,
}

impl AbsenceTier {
    pub const ALL: [Self; 5] = [
        Self::Short,
        Self::Medium,
        Self::Long,
        Self::Extended,
        Self::Overnight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Extended => "extended",
            Self::Overnight => "overnight",
        }
    }

    /// Need adjustment applied to every pet when this tier is reached.
    /// Overnight restores energy: the pets slept while nobody was around.
    pub fn effects(self) -> NeedsDelta {
        match self {
            Self::Short => NeedsDelta {
                happiness: -5.0,
                energy: -3.0,
                ..NeedsDelta::default()
            },
            Self::Medium => NeedsDelta {
                happiness: -10.0,
                hunger: -15.0,
                energy: -8.0,
                cleanliness: -5.0,
            },
            Self::Long => NeedsDelta {
                happiness: -20.0,
                hunger: -30.0,
                energy: -15.0,
                cleanliness: -15.0,
            },
            Self::Extended => NeedsDelta {
                happiness: -35.0,
                hunger: -50.0,
                energy: -25.0,
                cleanliness: -30.0,
            },
            Self::Overnight => NeedsDelta {
                happiness: -25.0,
                hunger: -60.0,
                energy: 30.0,
                cleanliness: -40.0,
            },
        }
    }
}

impl fmt::Display for AbsenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Either still present, or away long enough to fall into a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceLevel {
    Active,
    Away(AbsenceTier),
}

impl AbsenceLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Away(tier) => tier.label(),
        }
    }
}

impl fmt::Display for AbsenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for AbsenceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Lower bounds (in seconds) of each tier.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsenceThresholds {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
    pub extended: f64,
    pub overnight: f64,
}

impl Default for AbsenceThresholds {
    fn default() -> Self {
        Self {
            short: 300.0,
            medium: 1800.0,
            long: 3600.0,
            extended: 14_400.0,
            overnight: 28_800.0,
        }
    }
}

impl AbsenceThresholds {
    /// Forces boundaries to be finite, non-negative and non-decreasing.
    pub fn normalised(self) -> Self {
        let fallback = Self::default();
        let sanitise = |value: f64, default: f64| {
            if value.is_finite() {
                value.max(0.0)
            } else {
                default
            }
        };

        let short = sanitise(self.short, fallback.short);
        let medium = sanitise(self.medium, fallback.medium).max(short);
        let long = sanitise(self.long, fallback.long).max(medium);
        let extended = sanitise(self.extended, fallback.extended).max(long);
        let overnight = sanitise(self.overnight, fallback.overnight).max(extended);

        Self {
            short,
            medium,
            long,
            extended,
            overnight,
        }
    }

    pub fn boundary(&self, tier: AbsenceTier) -> f64 {
        match tier {
            AbsenceTier::Short => self.short,
            AbsenceTier::Medium => self.medium,
            AbsenceTier::Long => self.long,
            AbsenceTier::Extended => self.extended,
            AbsenceTier::Overnight => self.overnight,
        }
    }

    /// Highest tier whose boundary `elapsed` has reached.
    pub fn classify(&self, elapsed: f64) -> AbsenceLevel {
        AbsenceTier::ALL
            .into_iter()
            .rev()
            .find(|tier| elapsed >= self.boundary(*tier))
            .map_or(AbsenceLevel::Active, AbsenceLevel::Away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        let thresholds = AbsenceThresholds::default();
        let cases = [
            (0.0, AbsenceLevel::Active),
            (299.0, AbsenceLevel::Active),
            (300.0, AbsenceLevel::Away(AbsenceTier::Short)),
            (1799.0, AbsenceLevel::Away(AbsenceTier::Short)),
            (1800.0, AbsenceLevel::Away(AbsenceTier::Medium)),
            (3599.9, AbsenceLevel::Away(AbsenceTier::Medium)),
            (4000.0, AbsenceLevel::Away(AbsenceTier::Long)),
            (14_400.0, AbsenceLevel::Away(AbsenceTier::Extended)),
            (28_799.0, AbsenceLevel::Away(AbsenceTier::Extended)),
            (28_800.0, AbsenceLevel::Away(AbsenceTier::Overnight)),
            (1_000_000.0, AbsenceLevel::Away(AbsenceTier::Overnight)),
        ];
        for (elapsed, expected) in cases {
            assert_eq!(thresholds.classify(elapsed), expected, "elapsed {elapsed}");
        }
        assert_eq!(thresholds.classify(-5.0), AbsenceLevel::Active);
        assert_eq!(thresholds.classify(f64::NAN), AbsenceLevel::Active);
    }

    #[test]
    fn only_overnight_restores_a_need() {
        for tier in AbsenceTier::ALL {
            let delta = tier.effects();
            let positives = [delta.hunger, delta.happiness, delta.energy, delta.cleanliness]
                .into_iter()
                .filter(|value| *value > 0.0)
                .count();
            let expected = usize::from(tier == AbsenceTier::Overnight);
            assert_eq!(positives, expected, "{tier}");
        }
        assert_eq!(AbsenceTier::Overnight.effects().energy, 30.0);
    }

    #[test]
    fn normalisation_keeps_tiers_ascending() {
        let thresholds = AbsenceThresholds {
            short: -10.0,
            medium: 5000.0,
            long: 100.0,
            extended: f64::INFINITY,
            overnight: 20_000.0,
        }
        .normalised();

        assert_eq!(thresholds.short, 0.0);
        assert_eq!(thresholds.medium, 5000.0);
        assert_eq!(thresholds.long, 5000.0);
        assert_eq!(thresholds.extended, 14_400.0);
        assert_eq!(thresholds.overnight, 20_000.0);
        assert_eq!(thresholds.classify(6000.0), AbsenceLevel::Away(AbsenceTier::Long));
    }

    #[test]
    fn level_labels_serialise_as_strings() {
        let json = serde_json::to_string(&AbsenceLevel::Away(AbsenceTier::Extended))
            .expect("level serialises");
        assert_eq!(json, "\"extended\"");
        assert_eq!(AbsenceLevel::Active.to_string(), "active");
    }
}
