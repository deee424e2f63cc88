use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::personality::PersonalityKind;

const CONFIG_PATH: &str = "config/pets.toml";

#[derive(Debug, Clone, Deserialize)]
struct RawPetConfig {
    #[serde(default)]
    defaults: RawDefaults,
    #[serde(default)]
    decay: RawDecay,
    #[serde(default)]
    mood: RawMood,
    #[serde(default)]
    actions: RawActions,
    #[serde(default)]
    autonomous: RawAutonomous,
    #[serde(default)]
    running: RawRunning,
    #[serde(default)]
    cadence: RawCadence,
    #[serde(default = "default_roster")]
    roster: Vec<RawRosterEntry>,
}

impl Default for RawPetConfig {
    fn default() -> Self {
        Self {
            defaults: RawDefaults::default(),
            decay: RawDecay::default(),
            mood: RawMood::default(),
            actions: RawActions::default(),
            autonomous: RawAutonomous::default(),
            running: RawRunning::default(),
            cadence: RawCadence::default(),
            roster: default_roster(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDefaults {
    start: f32,
}

impl Default for RawDefaults {
    fn default() -> Self {
        Self { start: 50.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDecay {
    hunger_per_tick: f32,
    energy_per_tick: f32,
    cleanliness_per_tick: f32,
    unhappiness_per_tick: f32,
    contentment_per_tick: f32,
    critical_below: f32,
    thriving_above: f32,
}

impl Default for RawDecay {
    fn default() -> Self {
        Self {
            hunger_per_tick: 0.1,
            energy_per_tick: 0.05,
            cleanliness_per_tick: 0.03,
            unhappiness_per_tick: 0.15,
            contentment_per_tick: 0.05,
            critical_below: 20.0,
            thriving_above: 80.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMood {
    happy_above: f32,
    neutral_above: f32,
    sleepy_below: f32,
}

impl Default for RawMood {
    fn default() -> Self {
        Self {
            happy_above: 70.0,
            neutral_above: 40.0,
            sleepy_below: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawActions {
    feed_hunger: f32,
    feed_happiness: f32,
    play_happiness: f32,
    play_energy_cost: f32,
    play_min_energy: f32,
    clean_cleanliness: f32,
    clean_happiness: f32,
    drag_happiness_cost: f32,
    drop_happiness_bonus: f32,
}

impl Default for RawActions {
    fn default() -> Self {
        Self {
            feed_hunger: 15.0,
            feed_happiness: 5.0,
            play_happiness: 12.0,
            play_energy_cost: 8.0,
            play_min_energy: 20.0,
            clean_cleanliness: 20.0,
            clean_happiness: 3.0,
            drag_happiness_cost: 1.0,
            drop_happiness_bonus: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawAutonomous {
    min_ticks: u32,
    max_ticks: u32,
    foraging_hunger: f32,
    grooming_cleanliness: f32,
    play_happiness: f32,
    play_energy_cost: f32,
}

impl Default for RawAutonomous {
    fn default() -> Self {
        Self {
            min_ticks: 60,
            max_ticks: 180,
            foraging_hunger: 10.0,
            grooming_cleanliness: 15.0,
            play_happiness: 8.0,
            play_energy_cost: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawRunning {
    chance_per_mille: f32,
    min_ticks: u32,
    max_ticks: u32,
    happiness_bonus: f32,
}

impl Default for RawRunning {
    fn default() -> Self {
        Self {
            chance_per_mille: 1.0,
            min_ticks: 90,
            max_ticks: 150,
            happiness_bonus: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCadence {
    decay_every_steps: u64,
    decay_ticks: f32,
    activity_reset_every_steps: u64,
}

impl Default for RawCadence {
    fn default() -> Self {
        Self {
            decay_every_steps: 30,
            decay_ticks: 1.0,
            activity_reset_every_steps: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawRosterEntry {
    name: String,
    #[serde(default = "default_personality_label")]
    personality: String,
}

fn default_personality_label() -> String {
    PersonalityKind::Neutral.label().to_string()
}

fn default_roster() -> Vec<RawRosterEntry> {
    [
        ("churrio", PersonalityKind::Energetic),
        ("beepaw", PersonalityKind::Independent),
        ("meeple", PersonalityKind::Clean),
        ("elwin", PersonalityKind::Social),
    ]
    .into_iter()
    .map(|(name, kind)| RawRosterEntry {
        name: name.to_string(),
        personality: kind.label().to_string(),
    })
    .collect()
}

/// Runtime configuration derived from `config/pets.toml`.
#[derive(Resource, Debug, Clone)]
pub struct PetConfig {
    pub defaults: PetDefaults,
    pub decay: DecayRates,
    pub mood: MoodThresholds,
    pub actions: ActionMagnitudes,
    pub autonomous: AutonomousConfig,
    pub running: RunningConfig,
    pub cadence: StepCadence,
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone)]
pub struct PetDefaults {
    pub start: f32,
}

/// Base per-tick rates, scaled by each pet's personality.
#[derive(Debug, Clone)]
pub struct DecayRates {
    pub hunger_per_tick: f32,
    pub energy_per_tick: f32,
    pub cleanliness_per_tick: f32,
    pub unhappiness_per_tick: f32,
    pub contentment_per_tick: f32,
    pub critical_below: f32,
    pub thriving_above: f32,
}

#[derive(Debug, Clone)]
pub struct MoodThresholds {
    pub happy_above: f32,
    pub neutral_above: f32,
    pub sleepy_below: f32,
}

#[derive(Debug, Clone)]
pub struct ActionMagnitudes {
    pub feed_hunger: f32,
    pub feed_happiness: f32,
    pub play_happiness: f32,
    pub play_energy_cost: f32,
    pub play_min_energy: f32,
    pub clean_cleanliness: f32,
    pub clean_happiness: f32,
    pub drag_happiness_cost: f32,
    pub drop_happiness_bonus: f32,
}

#[derive(Debug, Clone)]
pub struct AutonomousConfig {
    pub min_ticks: u32,
    pub max_ticks: u32,
    pub foraging_hunger: f32,
    pub grooming_cleanliness: f32,
    pub play_happiness: f32,
    pub play_energy_cost: f32,
}

#[derive(Debug, Clone)]
pub struct RunningConfig {
    pub chance_per_mille: f32,
    pub min_ticks: u32,
    pub max_ticks: u32,
    pub happiness_bonus: f32,
}

/// How often (in simulation steps) the per-step pet systems fire.
#[derive(Debug, Clone)]
pub struct StepCadence {
    pub decay_every_steps: u64,
    pub decay_ticks: f32,
    pub activity_reset_every_steps: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub personality: PersonalityKind,
}

impl PetConfig {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match Self::parse(&raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawPetConfig>(raw).map(Self::from)
    }
}

impl Default for PetConfig {
    fn default() -> Self {
        RawPetConfig::default().into()
    }
}

impl From<RawPetConfig> for PetConfig {
    fn from(value: RawPetConfig) -> Self {
        let defaults = PetDefaults {
            start: clamp_need(value.defaults.start),
        };

        let decay = DecayRates {
            hunger_per_tick: value.decay.hunger_per_tick.max(0.0),
            energy_per_tick: value.decay.energy_per_tick.max(0.0),
            cleanliness_per_tick: value.decay.cleanliness_per_tick.max(0.0),
            unhappiness_per_tick: value.decay.unhappiness_per_tick.max(0.0),
            contentment_per_tick: value.decay.contentment_per_tick.max(0.0),
            critical_below: clamp_need(value.decay.critical_below),
            thriving_above: clamp_need(value.decay.thriving_above),
        };

        let mut mood = MoodThresholds {
            happy_above: clamp_need(value.mood.happy_above),
            neutral_above: clamp_need(value.mood.neutral_above),
            sleepy_below: clamp_need(value.mood.sleepy_below),
        };
        if mood.happy_above < mood.neutral_above {
            mood.happy_above = mood.neutral_above;
        }

        let actions = ActionMagnitudes {
            feed_hunger: value.actions.feed_hunger.max(0.0),
            feed_happiness: value.actions.feed_happiness.max(0.0),
            play_happiness: value.actions.play_happiness.max(0.0),
            play_energy_cost: value.actions.play_energy_cost.max(0.0),
            play_min_energy: clamp_need(value.actions.play_min_energy),
            clean_cleanliness: value.actions.clean_cleanliness.max(0.0),
            clean_happiness: value.actions.clean_happiness.max(0.0),
            drag_happiness_cost: value.actions.drag_happiness_cost.max(0.0),
            drop_happiness_bonus: value.actions.drop_happiness_bonus.max(0.0),
        };

        let (min_ticks, max_ticks) =
            ordered_span(value.autonomous.min_ticks, value.autonomous.max_ticks);
        let autonomous = AutonomousConfig {
            min_ticks,
            max_ticks,
            foraging_hunger: value.autonomous.foraging_hunger.max(0.0),
            grooming_cleanliness: value.autonomous.grooming_cleanliness.max(0.0),
            play_happiness: value.autonomous.play_happiness.max(0.0),
            play_energy_cost: value.autonomous.play_energy_cost.max(0.0),
        };

        let (min_ticks, max_ticks) = ordered_span(value.running.min_ticks, value.running.max_ticks);
        let running = RunningConfig {
            chance_per_mille: value.running.chance_per_mille.max(0.0),
            min_ticks,
            max_ticks,
            happiness_bonus: value.running.happiness_bonus.max(0.0),
        };

        let cadence = StepCadence {
            decay_every_steps: value.cadence.decay_every_steps.max(1),
            decay_ticks: value.cadence.decay_ticks.max(0.0),
            activity_reset_every_steps: value.cadence.activity_reset_every_steps.max(1),
        };

        Self {
            defaults,
            decay,
            mood,
            actions,
            autonomous,
            running,
            cadence,
            roster: normalise_roster(value.roster),
        }
    }
}

fn clamp_need(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn ordered_span(min: u32, max: u32) -> (u32, u32) {
    let min = min.max(1);
    let max = max.max(1);
    (min.min(max), min.max(max))
}

fn normalise_roster(entries: Vec<RawRosterEntry>) -> Vec<RosterEntry> {
    let mut roster: Vec<RosterEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            warn!("Skipping roster entry with an empty name");
            continue;
        }
        if roster.iter().any(|existing| existing.name == name) {
            warn!("Skipping duplicate roster entry '{}'", name);
            continue;
        }

        let personality = entry.personality.parse().unwrap_or_else(|err| {
            warn!("{} for '{}'; using neutral", err, name);
            PersonalityKind::Neutral
        });
        roster.push(RosterEntry { name, personality });
    }
    roster
}
