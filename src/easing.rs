//! Frame-rate independent damping
//!
//! Critically damped smoothing toward a moving target. The velocity is kept
//! between calls so a target change mid-transition stays continuous.

use crate::palette::Color;

/// Values closer than this snap onto the target
pub const DAMP_EPSILON: f32 = 0.001;

/// Polynomial approximation of `exp(-x)` used for the decay factor
#[inline]
fn exp_decay(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Damp `current` toward `target`. Returns false once the value has settled.
pub fn damp(current: &mut f32, velocity: &mut f32, target: f32, smooth_time: f32, delta: f32) -> bool {
    if (*current - target).abs() <= DAMP_EPSILON {
        *current = target;
        *velocity = 0.0;
        return false;
    }
    if delta <= 0.0 {
        return true;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let t = exp_decay(omega * delta);
    let change = *current - target;
    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * t;
    let mut output = target + (change + temp) * t;

    // Never step past the target
    if (target - *current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / delta;
    }
    *current = output;
    true
}

/// Per-channel damping state for a colour
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorDamper {
    velocity: [f32; 3],
}

impl ColorDamper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Damp every channel of `current` toward `target`. Returns true while moving.
    pub fn step(&mut self, current: &mut Color, target: Color, smooth_time: f32, delta: f32) -> bool {
        let mut channels = current.to_array();
        let goal = target.to_array();
        let mut moving = false;
        for i in 0..3 {
            moving |= damp(&mut channels[i], &mut self.velocity[i], goal[i], smooth_time, delta);
        }
        *current = Color::from_array(channels);
        moving
    }
}
