//! Inertia tilt filters
//!
//! Turns the sampled world position of a tracked body into a small cosmetic
//! rotation that leans against the direction of motion. Two flavors:
//! - [`TiltFilter`]: first-order low-pass, never overshoots (blaster)
//! - [`SpringTiltFilter`]: damped spring, overshoots and sloshes (liquid)

use glam::Vec3;

use crate::consts::VELOCITY_EPSILON;
use crate::tuning::{LowPassTuning, SpringTuning};

/// Longest spring integration step; larger frames are split
const MAX_SPRING_STEP: f32 = 1.0 / 60.0;
/// Frame time past this many sub-steps is dropped
const MAX_SPRING_SUBSTEPS: u32 = 60;

/// Finite-difference velocity from successive position samples
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    previous: Option<Vec3>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample and return the velocity since the previous one.
    ///
    /// The stored position is replaced on every call, whichever body the
    /// sample came from. The first sample yields zero velocity.
    pub fn sample(&mut self, position: Vec3, dt: f32) -> Vec3 {
        let velocity = match self.previous {
            Some(prev) => (position - prev) / dt.max(VELOCITY_EPSILON),
            None => Vec3::ZERO,
        };
        self.previous = Some(position);
        velocity
    }

    pub fn previous(&self) -> Option<Vec3> {
        self.previous
    }
}

#[inline]
fn clamp_tilt(tilt: Vec3, max_tilt: f32) -> Vec3 {
    tilt.clamp(Vec3::splat(-max_tilt), Vec3::splat(max_tilt))
}

/// Low-pass tilt: exponential approach toward the target tilt
#[derive(Debug, Clone)]
pub struct TiltFilter {
    pub tuning: LowPassTuning,
    tracker: VelocityTracker,
    tilt: Vec3,
}

impl TiltFilter {
    pub fn new(tuning: LowPassTuning) -> Self {
        Self {
            tuning,
            tracker: VelocityTracker::new(),
            tilt: Vec3::ZERO,
        }
    }

    /// Feed this frame's position and return the smoothed tilt
    pub fn update(&mut self, position: Vec3, dt: f32) -> Vec3 {
        let dt = dt.max(0.0);
        let t = &self.tuning;
        let velocity = self.tracker.sample(position, dt);
        let target = t.axes.targets(velocity, t.sensitivity, t.max_tilt);

        let blend = (t.damping * dt).clamp(0.0, 1.0);
        self.tilt = clamp_tilt(self.tilt + (target - self.tilt) * blend, t.max_tilt);
        self.tilt
    }

    pub fn tilt(&self) -> Vec3 {
        self.tilt
    }
}

/// Spring-damper tilt, integrated with semi-implicit Euler
#[derive(Debug, Clone)]
pub struct SpringTiltFilter {
    pub tuning: SpringTuning,
    tracker: VelocityTracker,
    tilt: Vec3,
    velocity: Vec3,
}

impl SpringTiltFilter {
    pub fn new(tuning: SpringTuning) -> Self {
        Self {
            tuning,
            tracker: VelocityTracker::new(),
            tilt: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }

    /// Feed this frame's position and return the sloshing tilt.
    ///
    /// Long frames are integrated in steps of at most [`MAX_SPRING_STEP`],
    /// up to [`MAX_SPRING_SUBSTEPS`] of them.
    pub fn update(&mut self, position: Vec3, dt: f32) -> Vec3 {
        let dt = dt.max(0.0);
        let body_velocity = self.tracker.sample(position, dt);
        let t = self.tuning;
        let target = t.axes.targets(body_velocity, t.sensitivity, t.max_tilt);

        let steps = ((dt / MAX_SPRING_STEP) - 1e-4)
            .ceil()
            .clamp(1.0, MAX_SPRING_SUBSTEPS as f32);
        let h = (dt / steps).min(MAX_SPRING_STEP);
        for _ in 0..steps as u32 {
            // Velocity first, then position with the new velocity
            self.velocity += (target - self.tilt) * (t.spring * h) - self.velocity * (t.damping * h);
            self.tilt = clamp_tilt(self.tilt + self.velocity * h, t.max_tilt);
        }

        if !self.velocity.is_finite() {
            log::warn!("Liquid tilt velocity diverged, resetting");
            self.velocity = Vec3::ZERO;
        }
        if !self.tilt.is_finite() {
            self.tilt = Vec3::ZERO;
        }
        self.tilt
    }

    pub fn tilt(&self) -> Vec3 {
        self.tilt
    }

    /// Angular velocity of the tilt itself (not of the tracked body)
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}
