// Damped harmonic oscillator used by every pointer and scroll effect.
use crate::constants::{
    MAX_STEP_MS, MAX_SUBSTEPS, REST_EPSILON, SPRING_DAMPING_DEFAULT, SPRING_MASS_DEFAULT,
    SPRING_STIFFNESS_DEFAULT,
};
use crate::error::{MotionError, Result};

/// Stiffness, damping and mass of a spring. Immutable once validated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    stiffness: f64,
    damping: f64,
    mass: f64,
}

impl SpringConfig {
    /// Rejects configs that would produce NaN or divergent motion.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self> {
        if !stiffness.is_finite() || stiffness <= 0.0 {
            return Err(MotionError::invalid(
                "stiffness",
                stiffness,
                "must be finite and > 0",
            ));
        }
        if !damping.is_finite() || damping < 0.0 {
            return Err(MotionError::invalid(
                "damping",
                damping,
                "must be finite and >= 0",
            ));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(MotionError::invalid("mass", mass, "must be finite and > 0"));
        }
        Ok(Self {
            stiffness,
            damping,
            mass,
        })
    }

    /// Damping that gives the fastest approach without overshoot.
    pub fn critically_damped(stiffness: f64, mass: f64) -> Result<Self> {
        let damping = 2.0 * (stiffness.max(0.0) * mass.max(0.0)).sqrt();
        Self::new(stiffness, damping, mass)
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// ζ = c / (2·sqrt(k·m)). Below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// ωn = sqrt(k/m), in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: SPRING_STIFFNESS_DEFAULT,
            damping: SPRING_DAMPING_DEFAULT,
            mass: SPRING_MASS_DEFAULT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

/// One axis of spring motion. Each axis owns its state; nothing else mutates it.
#[derive(Clone, Debug)]
pub struct SpringAxis {
    config: SpringConfig,
    state: SpringState,
    target: f64,
}

impl SpringAxis {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            state: SpringState::default(),
            target: 0.0,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn state(&self) -> SpringState {
        self.state
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Only the target moves; position follows on later steps.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump straight to `position` with no velocity. Used when mounting an
    /// element that should start somewhere other than rest.
    pub fn snap_to(&mut self, position: f64) {
        if position.is_finite() {
            self.state = SpringState {
                position,
                velocity: 0.0,
            };
            self.target = position;
        }
    }

    pub fn reset(&mut self) {
        self.state = SpringState::default();
        self.target = 0.0;
    }

    /// One semi-implicit Euler step of `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;

        let displacement = self.target - self.state.position;
        let acceleration = (stiffness * displacement - damping * self.state.velocity) / mass;
        self.state.velocity += acceleration * dt;
        self.state.position += self.state.velocity * dt;
    }

    /// Advance by `delta_ms`, splitting long gaps into stable sub-steps.
    ///
    /// Non-positive or non-finite deltas leave the state untouched. Gaps
    /// longer than `MAX_SUBSTEPS * MAX_STEP_MS` only simulate that much time.
    pub fn advance(&mut self, delta_ms: f64) -> f64 {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return self.state.position;
        }

        let simulated_ms = delta_ms.min(MAX_STEP_MS * MAX_SUBSTEPS as f64);
        let steps = ((simulated_ms / MAX_STEP_MS).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        let dt = simulated_ms / steps as f64 / 1000.0;
        for _ in 0..steps {
            self.step(dt);
        }
        self.state.position
    }

    pub fn is_at_rest(&self, epsilon: f64) -> bool {
        (self.target - self.state.position).abs() <= epsilon && self.state.velocity.abs() <= epsilon
    }

    pub fn is_settled(&self) -> bool {
        self.is_at_rest(REST_EPSILON)
    }
}
