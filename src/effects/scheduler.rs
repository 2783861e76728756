//! Burst scheduling
//!
//! Turns one [`BurstConfig`] into `steps + 1` pairs of emission requests.
//! Step `i` sits at progress `t = i / steps` and fires at
//! `round(t * total_duration_ms)`. Each request is self-contained, so the
//! pairs may fire in any order.

use glam::Vec2;

use super::burst::{BurstConfig, Direction, EmissionRequest};
use crate::error::EmitError;
use crate::timeline::{Timeline, TimerGroup};

/// Receives emission requests (canvas confetti, a log, a test recorder)
pub trait Emitter {
    fn emit(&mut self, request: &EmissionRequest) -> Result<(), EmitError>;
}

/// One emission with its offset from the trigger
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEmission {
    pub step: u32,
    pub delay_ms: u64,
    pub direction: Direction,
    pub request: EmissionRequest,
}

/// Handle for every timer spawned by one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BurstHandle(TimerGroup);

impl BurstHandle {
    pub fn group(&self) -> TimerGroup {
        self.0
    }
}

/// Normalized progress of `step`: 0 at the first step, 1 at the last
#[inline]
pub fn step_progress(step: u32, steps: u32) -> f32 {
    step as f32 / steps.max(1) as f32
}

/// Firing offset for progress `t`
#[inline]
pub fn step_delay(t: f32, total_duration_ms: u64) -> u64 {
    (t * total_duration_ms as f32).round() as u64
}

/// The downward and upward requests for one step
pub fn emission_pair(config: &BurstConfig, step: u32) -> [ScheduledEmission; 2] {
    let t = step_progress(step, config.step_count());
    let delay_ms = step_delay(t, config.total_duration_ms);

    let spread = config.spread.lerp(t);
    let start_velocity = config.velocity.lerp(t);
    let decay = config.decay.lerp(t);
    let drift = config.drift.lerp(t);
    let scalar = config.scalar.lerp(t);
    let ticks = config.ticks.lerp(t).round().max(0.0) as u32;
    let particle_count = config.per_step_count();

    let request = |direction: Direction| {
        let (gravity, origin_y, drift) = match direction {
            Direction::Down => (config.gravity_down.lerp(t), config.origin_y_down.lerp(t), drift),
            Direction::Up => (config.gravity_up.lerp(t), config.origin_y_up.lerp(t), -drift),
        };
        ScheduledEmission {
            step,
            delay_ms,
            direction,
            request: EmissionRequest {
                particle_count,
                angle: direction.angle(),
                spread,
                start_velocity,
                gravity,
                decay,
                drift,
                scalar,
                ticks,
                origin: Vec2::new(config.origin_x, origin_y),
                colors: config.colors.clone(),
                shapes: config.shapes.clone(),
            },
        }
    };

    [request(Direction::Down), request(Direction::Up)]
}

/// Every emission of a burst, in non-decreasing delay order
pub fn plan(config: &BurstConfig) -> Vec<ScheduledEmission> {
    (0..=config.step_count())
        .flat_map(|step| emission_pair(config, step))
        .collect()
}

/// Queue a whole burst on the timeline under a fresh group
pub fn schedule<T: From<EmissionRequest>>(
    timeline: &mut Timeline<T>,
    config: &BurstConfig,
) -> BurstHandle {
    let group = timeline.open_group();
    let emissions = plan(config);
    log::debug!(
        "Scheduling burst {}: {} emissions over {}ms",
        group.id(),
        emissions.len(),
        config.total_duration_ms
    );
    for emission in emissions {
        timeline.schedule(group, emission.delay_ms, T::from(emission.request));
    }
    BurstHandle(group)
}

/// Void every emission of a burst that has not fired yet
///
/// Safe to call more than once.
pub fn cancel<T>(timeline: &mut Timeline<T>, handle: BurstHandle) -> usize {
    let dropped = timeline.cancel_group(handle.group());
    if dropped > 0 {
        log::debug!("Cancelled burst {}: {dropped} emissions dropped", handle.group().id());
    }
    dropped
}

/// Hand one request to the emitter; failures are logged and swallowed
pub fn dispatch<E: Emitter + ?Sized>(emitter: &mut E, request: &EmissionRequest) -> bool {
    match emitter.emit(request) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Emission dropped: {err}");
            false
        }
    }
}
