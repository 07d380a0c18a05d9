//! Damped spring integrator for thumb animations.

use serde::{Deserialize, Serialize};

// Larger frame gaps (window dragged, app backgrounded) are capped so the
// integration cannot blow up.
const MAX_FRAME_SECONDS: f32 = 0.1;
const SUBSTEP_SECONDS: f32 = 1.0 / 120.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from the target (px) under which the spring may settle
    pub rest_displacement: f32,
    /// Speed (px/s) under which the spring may settle
    pub rest_velocity: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_displacement: 0.01,
            rest_velocity: 0.01,
        }
    }
}

/// Spring pulling a 1-D position toward a target
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    target: Option<f32>,
    velocity: f32,
}

impl Spring {
    pub fn new(config: SpringConfig) -> Self {
        Self { config, target: None, velocity: 0.0 }
    }

    /// Start (or retarget) an animation. Current velocity is kept.
    pub fn animate_to(&mut self, target: f32) {
        self.target = Some(target);
    }

    pub fn stop(&mut self) {
        self.target = None;
        self.velocity = 0.0;
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<f32> {
        self.target
    }

    /// Advance `position` by `dt` seconds and return the new position.
    /// Once at rest the target is returned exactly and the spring stops.
    pub fn step(&mut self, position: f32, dt: f32) -> f32 {
        let Some(target) = self.target else {
            return position;
        };
        let mut remaining = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_SECONDS) } else { 0.0 };
        let mass = if self.config.mass > 0.0 { self.config.mass } else { 1.0 };

        let mut x = position;
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP_SECONDS);
            let force = -self.config.stiffness * (x - target) - self.config.damping * self.velocity;
            self.velocity += force / mass * h;
            x += self.velocity * h;
            remaining -= h;
        }

        if (x - target).abs() < self.config.rest_displacement && self.velocity.abs() < self.config.rest_velocity {
            self.stop();
            return target;
        }
        x
    }
}
