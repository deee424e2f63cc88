//! Tracks when the user was last seen and turns absences into pet effects.
use bevy::{
    log::{info, warn},
    prelude::Resource,
};
use serde::Serialize;

use crate::pet::{config::PetConfig, random::RandomSource, registry::PetRegistry};

use super::{
    catchup::{apply_absence_tier, AutonomousStart},
    clock::WallClock,
    format::format_duration,
    store::ActivityStore,
    tier::{AbsenceLevel, AbsenceThresholds, AbsenceTier},
};

/// Produced when input arrives after the user had been marked absent, or at
/// startup when the saved timestamp is old enough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnNotice {
    pub elapsed_secs: f64,
    pub away_for: String,
    pub level: AbsenceLevel,
}

impl ReturnNotice {
    pub fn new(elapsed_secs: f64, level: AbsenceLevel) -> Self {
        Self {
            elapsed_secs,
            away_for: format_duration(elapsed_secs),
            level,
        }
    }

    pub fn headline(&self) -> String {
        format!("Welcome back! You were away for {}", self.away_for)
    }
}

/// One edge-triggered transition from active to absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsenceEpisode {
    pub tier: AbsenceTier,
    pub elapsed_secs: f64,
    pub away_for: String,
    pub pets_affected: usize,
    pub autonomous: Vec<AutonomousStart>,
}

#[derive(Resource)]
pub struct AbsenceTracker {
    clock: Box<dyn WallClock>,
    store: Box<dyn ActivityStore>,
    thresholds: AbsenceThresholds,
    medium_wander_chance: f32,
    last_active: f64,
    active: bool,
    last_notice: Option<ReturnNotice>,
    last_episode: Option<AbsenceEpisode>,
}

impl AbsenceTracker {
    /// Builds the tracker and restores the last activity time from `store`.
    /// A missing or unreadable record starts fresh from the current time.
    pub fn new(
        clock: Box<dyn WallClock>,
        store: Box<dyn ActivityStore>,
        thresholds: AbsenceThresholds,
        medium_wander_chance: f32,
    ) -> Self {
        let now = clock.now();
        let mut tracker = Self {
            clock,
            store,
            thresholds,
            medium_wander_chance: medium_wander_chance.clamp(0.0, 1.0),
            last_active: now,
            active: true,
            last_notice: None,
            last_episode: None,
        };
        tracker.restore(now);
        tracker
    }

    fn restore(&mut self, now: f64) {
        match self.store.load() {
            Ok(Some(timestamp)) => {
                self.last_active = timestamp;
                info!(
                    "Last activity was {} ago",
                    format_duration(now - timestamp)
                );
            }
            Ok(None) => {
                info!("No activity record found, starting fresh");
                self.persist();
            }
            Err(err) => {
                warn!("Ignoring activity record: {}", err);
                self.persist();
            }
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(self.last_active) {
            warn!("Failed to save last activity time: {}", err);
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn last_active(&self) -> f64 {
        self.last_active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn last_notice(&self) -> Option<&ReturnNotice> {
        self.last_notice.as_ref()
    }

    pub fn last_episode(&self) -> Option<&AbsenceEpisode> {
        self.last_episode.as_ref()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Seconds since the last recorded input; never negative.
    pub fn elapsed(&self) -> f64 {
        let elapsed = self.clock.now() - self.last_active;
        if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            0.0
        }
    }

    pub fn level(&self) -> AbsenceLevel {
        self.thresholds.classify(self.elapsed())
    }

    /// Marks the user present and persists the timestamp. Returns a notice when
    /// this input ends an absence.
    pub fn record_activity(&mut self) -> Option<ReturnNotice> {
        let elapsed = self.elapsed();
        let was_absent = !self.active;

        self.last_active = self.clock.now();
        self.active = true;
        self.persist();

        if !was_absent {
            return None;
        }

        let notice = ReturnNotice::new(elapsed, self.thresholds.classify(elapsed));
        info!("{} ({})", notice.headline(), notice.level);
        self.last_notice = Some(notice.clone());
        Some(notice)
    }

    /// Pointer presses only count once `throttle_secs` have passed since the
    /// last recorded input.
    pub fn record_throttled_activity(&mut self, throttle_secs: f64) -> Option<ReturnNotice> {
        if self.active && self.elapsed() <= throttle_secs {
            return None;
        }
        self.record_activity()
    }

    /// Fires once per absence: the first check after the short threshold marks
    /// the user absent and applies the reached tier to every pet.
    pub fn check_absence(
        &mut self,
        registry: &mut PetRegistry,
        random: &mut dyn RandomSource,
        config: &PetConfig,
    ) -> Option<AbsenceEpisode> {
        if !self.active {
            return None;
        }

        let elapsed = self.elapsed();
        let AbsenceLevel::Away(tier) = self.thresholds.classify(elapsed) else {
            return None;
        };

        self.active = false;
        let autonomous =
            apply_absence_tier(tier, registry, random, config, self.medium_wander_chance);
        let episode = AbsenceEpisode {
            tier,
            elapsed_secs: elapsed,
            away_for: format_duration(elapsed),
            pets_affected: registry.len(),
            autonomous,
        };
        info!(
            "User away for {} ({} absence), {} pets affected, {} started something on their own",
            episode.away_for,
            tier,
            episode.pets_affected,
            episode.autonomous.len()
        );
        self.last_episode = Some(episode.clone());
        Some(episode)
    }

    /// Notice shown at launch when the saved timestamp is older than `min_away_secs`.
    pub fn startup_notice(&self, min_away_secs: f64) -> Option<ReturnNotice> {
        let elapsed = self.elapsed();
        (elapsed > min_away_secs)
            .then(|| ReturnNotice::new(elapsed, self.thresholds.classify(elapsed)))
    }

    /// Pretends the last input happened `seconds` ago. Not persisted.
    pub fn simulate_absence(&mut self, seconds: f64) {
        self.last_active = self.clock.now() - seconds.max(0.0);
        self.active = true;
        info!("Simulating an absence of {}", format_duration(seconds));
    }

    /// Stamps and persists the current time; the absent flag is left alone.
    pub fn reset_timestamp(&mut self) {
        self.last_active = self.clock.now();
        self.persist();
        info!("Activity timestamp reset");
    }
}
