//! CorePlugin wires global timing and logging utilities for the simulation.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::{ops::RangeInclusive, time::Duration};

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;

/// Fixed simulation step rate; pet timers and cadences are counted in these steps.
pub const STEPS_PER_SECOND: u32 = 30;

/// Steps produced by a single stalled frame are capped; long wall-clock gaps
/// are handled by the absence tracker instead.
const MAX_STEPS_PER_FRAME: u64 = 240;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Tracks scaled simulation time derived from real frame deltas.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        let clamped = time_scale.max(MIN_TIME_SCALE);
        Self {
            time_scale: clamped,
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Sets the time-scale multiplier (clamped to a small positive minimum).
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(MIN_TIME_SCALE);
    }

    /// Returns the current time-scale multiplier.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last real (unscaled) delta reported by Bevy's Time resource.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last scaled delta after applying the multiplier.
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Returns the total scaled duration elapsed since the clock was initialised.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies a real delta to the clock, storing both the real and scaled durations.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// Slices scaled simulation time into fixed, numbered steps.
///
/// Steps are numbered from 1. Systems that need a cadence ("every 30 steps")
/// iterate [`StepClock::steps`] and test the step number, so several systems
/// can observe the same steps within one frame.
#[derive(Resource, Debug)]
pub struct StepClock {
    step_length: Duration,
    accumulator: Duration,
    total_steps: u64,
    frame_start: u64,
}

impl StepClock {
    pub fn new(steps_per_second: u32) -> Self {
        let rate = u64::from(steps_per_second.max(1));
        Self {
            step_length: Duration::from_nanos(1_000_000_000 / rate),
            accumulator: Duration::ZERO,
            total_steps: 0,
            frame_start: 0,
        }
    }

    /// Feeds a scaled delta into the clock, producing zero or more steps.
    pub fn tick(&mut self, scaled_delta: Duration) {
        self.frame_start = self.total_steps;
        self.accumulator += scaled_delta;

        let mut produced = 0;
        while self.accumulator >= self.step_length && produced < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.step_length;
            produced += 1;
        }
        if produced == MAX_STEPS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        self.total_steps += produced;
    }

    /// Step numbers produced by the most recent [`StepClock::tick`].
    pub fn steps(&self) -> RangeInclusive<u64> {
        (self.frame_start + 1)..=self.total_steps
    }

    pub fn steps_this_frame(&self) -> u64 {
        self.total_steps - self.frame_start
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(STEPS_PER_SECOND)
    }
}

/// Registers simulation timing systems and resources.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    /// Creates a CorePlugin with the provided time-scale multiplier.
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::new(self.time_scale))
            .init_resource::<StepClock>()
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(
                Update,
                (update_simulation_clock, advance_step_clock).chain(),
            );

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks.after(advance_step_clock));
        }
    }
}

pub fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

/// Converts the latest scaled delta into simulation steps.
pub fn advance_step_clock(sim_clock: Res<SimulationClock>, mut steps: ResMut<StepClock>) {
    steps.tick(sim_clock.last_scaled_delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>) {
    info!(
        "CorePlugin initialised with time scale: {:.3} ({} steps/s)",
        clock.time_scale(),
        STEPS_PER_SECOND
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(
    mut timer: ResMut<DebugTickTimer>,
    clock: Res<SimulationClock>,
    steps: Res<StepClock>,
) {
    if timer.timer.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | real dt: {:.4}s | scaled dt: {:.4}s | step {}",
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
            steps.total_steps(),
        );
    }
}
