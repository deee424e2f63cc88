//! Pet state: needs, derived mood, activities and the operations that mutate them.
use std::fmt;

use serde::Serialize;

use super::{
    config::{MoodThresholds, PetConfig},
    personality::PersonalityProfile,
    random::RandomSource,
};

pub const NEED_MIN: f32 = 0.0;
pub const NEED_MAX: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    Idle,
    Eating,
    Playing,
    Cleaning,
    Running,
    Wandering,
    Foraging,
    SelfGrooming,
    Sleeping,
}

impl Activity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Eating => "eating",
            Self::Playing => "playing",
            Self::Cleaning => "cleaning",
            Self::Running => "running",
            Self::Wandering => "wandering",
            Self::Foraging => "foraging",
            Self::SelfGrooming => "self-grooming",
            Self::Sleeping => "sleeping",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Direct care actions the user can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetAction {
    Feed,
    Play,
    Clean,
}

impl PetAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Clean => "clean",
        }
    }
}

/// Activities a pet performs on its own, chosen by the absence catch-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutonomousActivity {
    Wandering,
    Foraging,
    SelfGrooming,
    Playing,
    Sleeping,
}

impl AutonomousActivity {
    pub fn activity(self) -> Activity {
        match self {
            Self::Wandering => Activity::Wandering,
            Self::Foraging => Activity::Foraging,
            Self::SelfGrooming => Activity::SelfGrooming,
            Self::Playing => Activity::Playing,
            Self::Sleeping => Activity::Sleeping,
        }
    }

    pub fn label(self) -> &'static str {
        self.activity().label()
    }
}

/// The four bounded needs of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Needs {
    pub hunger: f32,
    pub happiness: f32,
    pub energy: f32,
    pub cleanliness: f32,
}

impl Needs {
    pub const fn uniform(value: f32) -> Self {
        Self {
            hunger: value,
            happiness: value,
            energy: value,
            cleanliness: value,
        }
    }

    pub fn average(&self) -> f32 {
        (self.hunger + self.happiness + self.energy + self.cleanliness) / 4.0
    }

    /// Returns a copy with every need clamped to `[0, 100]`; NaN becomes 0.
    pub fn clamped(self) -> Self {
        Self {
            hunger: clamp_need(self.hunger),
            happiness: clamp_need(self.happiness),
            energy: clamp_need(self.energy),
            cleanliness: clamp_need(self.cleanliness),
        }
    }

    pub fn shifted(self, delta: NeedsDelta) -> Self {
        Self {
            hunger: self.hunger + delta.hunger,
            happiness: self.happiness + delta.happiness,
            energy: self.energy + delta.energy,
            cleanliness: self.cleanliness + delta.cleanliness,
        }
        .clamped()
    }
}

fn clamp_need(value: f32) -> f32 {
    if value.is_nan() {
        NEED_MIN
    } else {
        value.clamp(NEED_MIN, NEED_MAX)
    }
}

/// Signed adjustment applied to every need at once.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NeedsDelta {
    pub hunger: f32,
    pub happiness: f32,
    pub energy: f32,
    pub cleanliness: f32,
}

/// Summary of what changed during a decay tick.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PetTickOutcome {
    pub mood_changed: Option<Mood>,
    pub sleeping_changed: Option<bool>,
}

#[derive(Debug, Clone, Default)]
struct RunState {
    timer: u32,
    duration: u32,
}

/// A single pet. Mood and sleeping are derived from the needs and refreshed
/// after every mutation; the personality never changes after construction.
#[derive(Debug, Clone)]
pub struct Pet {
    name: String,
    needs: Needs,
    mood: Mood,
    sleeping: bool,
    activity: Activity,
    personality: PersonalityProfile,
    autonomous_timer: u32,
    run: Option<RunState>,
    dragged: bool,
    mood_thresholds: MoodThresholds,
}

impl Pet {
    pub fn new(name: impl Into<String>, personality: PersonalityProfile, config: &PetConfig) -> Self {
        let mut pet = Self {
            name: name.into(),
            needs: Needs::uniform(config.defaults.start),
            mood: Mood::Neutral,
            sleeping: false,
            activity: Activity::Idle,
            personality,
            autonomous_timer: 0,
            run: None,
            dragged: false,
            mood_thresholds: config.mood.clone(),
        };
        pet.refresh_derived();
        pet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn needs(&self) -> Needs {
        self.needs
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn personality(&self) -> &PersonalityProfile {
        &self.personality
    }

    pub fn autonomous_timer(&self) -> u32 {
        self.autonomous_timer
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn is_dragged(&self) -> bool {
        self.dragged
    }

    /// Replaces all needs at once (clamped), e.g. when restoring state.
    pub fn set_needs(&mut self, needs: Needs) {
        self.needs = needs.clamped();
        self.refresh_derived();
    }

    pub fn apply_needs_delta(&mut self, delta: NeedsDelta) {
        self.needs = self.needs.shifted(delta);
        self.refresh_derived();
    }

    /// Advances need decay by `ticks` simulation ticks.
    pub fn decay(&mut self, ticks: f32, config: &PetConfig) -> PetTickOutcome {
        let mut outcome = PetTickOutcome::default();
        if !ticks.is_finite() || ticks <= 0.0 {
            return outcome;
        }

        let rates = &config.decay;
        let personality = self.personality;
        let previous_mood = self.mood;
        let previous_sleeping = self.sleeping;

        let mut needs = self.needs;
        needs.hunger -= rates.hunger_per_tick * personality.hunger_rate * ticks;
        needs.energy -= rates.energy_per_tick * personality.energy_rate * ticks;
        needs.cleanliness -= rates.cleanliness_per_tick * personality.messy_rate * ticks;
        needs = needs.clamped();

        let vitals = [needs.hunger, needs.energy, needs.cleanliness];
        if vitals.iter().any(|value| *value < rates.critical_below) {
            needs.happiness -= rates.unhappiness_per_tick * personality.social_need * ticks;
        } else if vitals.iter().all(|value| *value > rates.thriving_above) {
            needs.happiness += rates.contentment_per_tick * ticks;
        }

        self.set_needs(needs);

        if self.mood != previous_mood {
            outcome.mood_changed = Some(self.mood);
        }
        if self.sleeping != previous_sleeping {
            outcome.sleeping_changed = Some(self.sleeping);
        }
        outcome
    }

    /// Applies a direct care action. Returns false when a guard blocked it
    /// (playing with too little energy); the pet is left untouched then.
    pub fn apply_action(&mut self, action: PetAction, config: &PetConfig) -> bool {
        let magnitudes = &config.actions;
        match action {
            PetAction::Feed => {
                self.apply_needs_delta(NeedsDelta {
                    hunger: magnitudes.feed_hunger,
                    happiness: magnitudes.feed_happiness,
                    ..NeedsDelta::default()
                });
                self.activity = Activity::Eating;
            }
            PetAction::Play => {
                if self.needs.energy <= magnitudes.play_min_energy {
                    return false;
                }
                self.apply_needs_delta(NeedsDelta {
                    happiness: magnitudes.play_happiness * self.personality.playfulness,
                    energy: -magnitudes.play_energy_cost,
                    ..NeedsDelta::default()
                });
                self.activity = Activity::Playing;
            }
            PetAction::Clean => {
                self.apply_needs_delta(NeedsDelta {
                    cleanliness: magnitudes.clean_cleanliness,
                    happiness: magnitudes.clean_happiness,
                    ..NeedsDelta::default()
                });
                self.activity = Activity::Cleaning;
            }
        }
        true
    }

    /// Starts a self-directed activity with a random duration and its stat nudge.
    pub fn start_autonomous_activity(
        &mut self,
        kind: AutonomousActivity,
        random: &mut dyn RandomSource,
        config: &PetConfig,
    ) {
        let autonomous = &config.autonomous;
        self.activity = kind.activity();
        self.autonomous_timer = random.roll(autonomous.min_ticks, autonomous.max_ticks);

        let delta = match kind {
            AutonomousActivity::Foraging => NeedsDelta {
                hunger: autonomous.foraging_hunger,
                ..NeedsDelta::default()
            },
            AutonomousActivity::SelfGrooming => NeedsDelta {
                cleanliness: autonomous.grooming_cleanliness,
                ..NeedsDelta::default()
            },
            AutonomousActivity::Playing => NeedsDelta {
                happiness: autonomous.play_happiness,
                energy: -autonomous.play_energy_cost,
                ..NeedsDelta::default()
            },
            AutonomousActivity::Wandering | AutonomousActivity::Sleeping => NeedsDelta::default(),
        };
        self.apply_needs_delta(delta);
    }

    /// Counts down an autonomous activity; returns true when it just ended.
    pub fn tick_autonomous_timer(&mut self) -> bool {
        if self.autonomous_timer == 0 {
            return false;
        }
        self.autonomous_timer -= 1;
        if self.autonomous_timer == 0 {
            self.activity = Activity::Idle;
            return true;
        }
        false
    }

    /// Reverts eating/playing/cleaning to idle unless an autonomous activity
    /// or a run is still in progress.
    pub fn expire_directed_activity(&mut self) -> bool {
        if self.autonomous_timer > 0 || self.run.is_some() {
            return false;
        }
        match self.activity {
            Activity::Eating | Activity::Playing | Activity::Cleaning => {
                self.activity = Activity::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn begin_drag(&mut self, config: &PetConfig) {
        if self.dragged {
            return;
        }
        self.dragged = true;
        self.apply_needs_delta(NeedsDelta {
            happiness: -config.actions.drag_happiness_cost,
            ..NeedsDelta::default()
        });
    }

    pub fn end_drag(&mut self, config: &PetConfig) {
        if !self.dragged {
            return;
        }
        self.dragged = false;
        self.apply_needs_delta(NeedsDelta {
            happiness: config.actions.drop_happiness_bonus,
            ..NeedsDelta::default()
        });
    }

    /// Starts a run unless one is already in progress. Playful pets get a
    /// small happiness bonus.
    pub fn start_run(&mut self, random: &mut dyn RandomSource, config: &PetConfig) -> bool {
        if self.run.is_some() {
            return false;
        }

        let running = &config.running;
        self.run = Some(RunState {
            timer: 0,
            duration: random.roll(running.min_ticks, running.max_ticks),
        });
        if self.personality.playfulness > 1.0 {
            self.apply_needs_delta(NeedsDelta {
                happiness: running.happiness_bonus,
                ..NeedsDelta::default()
            });
        }
        self.activity = Activity::Running;
        true
    }

    /// Per-step spontaneous running. Returns the activity the pet switched to, if any.
    /// The step that starts a run also counts towards its duration.
    pub fn update_running(
        &mut self,
        random: &mut dyn RandomSource,
        config: &PetConfig,
    ) -> Option<Activity> {
        let mut started = false;
        if self.run.is_none() && !self.dragged && !self.sleeping {
            let threshold = config.running.chance_per_mille * self.personality.playfulness;
            if (random.roll(1, 1000) as f32) < threshold {
                started = self.start_run(random, config);
            }
        }

        let finished = match self.run.as_mut() {
            Some(run) => {
                run.timer += 1;
                run.timer > run.duration
            }
            None => false,
        };
        if finished {
            self.run = None;
            self.activity = Activity::Idle;
            return Some(Activity::Idle);
        }
        started.then_some(Activity::Running)
    }

    fn refresh_derived(&mut self) {
        self.mood = determine_mood(self.needs.average(), &self.mood_thresholds);
        self.sleeping = self.needs.energy < self.mood_thresholds.sleepy_below;
    }
}

fn determine_mood(average: f32, thresholds: &MoodThresholds) -> Mood {
    if average > thresholds.happy_above {
        Mood::Happy
    } else if average > thresholds.neutral_above {
        Mood::Neutral
    } else {
        Mood::Sad
    }
}
