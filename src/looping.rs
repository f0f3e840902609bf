//! Explicit descriptions of repeating animations.
//!
//! Marquees, pulses and spinners are described as data (`LoopSpec`) and
//! sampled by the host's scheduler with the elapsed time. Nothing here owns a
//! timer.

use crate::constants::{
    EASE_BEZIER, MARQUEE_PERIOD_MS, MARQUEE_SLOW_PERIOD_MS, PAGE_TRANSITION_BEZIER,
    PAGE_TRANSITION_MS, PULSE_PERIOD_MS, SPIN_PERIOD_MS,
};
use crate::error::{MotionError, Result};

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const SOLVE_EPSILON: f64 = 1e-7;

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// `x1` and `x2` must lie in `[0, 1]` so the curve is a function of time.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        for (field, value) in [("x1", x1), ("x2", x2)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MotionError::invalid(field, value, "must be within [0, 1]"));
            }
        }
        for (field, value) in [("y1", y1), ("y2", y2)] {
            if !value.is_finite() {
                return Err(MotionError::invalid(field, value, "must be finite"));
            }
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    fn from_points(p: [f64; 4]) -> Self {
        Self {
            x1: p[0],
            y1: p[1],
            x2: p[2],
            y2: p[3],
        }
    }

    fn component(t: f64, p1: f64, p2: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
    }

    fn derivative(t: f64, p1: f64, p2: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Curve parameter whose x equals `x`. Newton first, bisection if the
    /// slope is too flat to trust.
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = Self::component(t, self.x1, self.x2) - x;
            if err.abs() < SOLVE_EPSILON {
                return t;
            }
            let slope = Self::derivative(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = Self::component(t, self.x1, self.x2);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    pub fn apply(&self, progress: f64) -> f64 {
        let x = progress.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        Self::component(self.solve_t(x), self.y1, self.y2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Waveform {
    Linear,
    /// CSS `ease`.
    Ease,
    CubicBezier(CubicBezier),
}

impl Waveform {
    pub fn apply(&self, progress: f64) -> f64 {
        match self {
            Waveform::Linear => progress.clamp(0.0, 1.0),
            Waveform::Ease => CubicBezier::from_points(EASE_BEZIER).apply(progress),
            Waveform::CubicBezier(curve) => curve.apply(progress),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Play once.
    None,
    /// Play forever.
    Loop,
    /// Play once, then this many more times.
    Count(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSample {
    /// Eased progress through the current iteration.
    pub progress: f64,
    /// Zero-based iteration index.
    pub iteration: u64,
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSpec {
    pub waveform: Waveform,
    pub period_ms: f64,
    pub repeat: Repeat,
    /// Reverse direction on every other iteration.
    pub yoyo: bool,
}

impl LoopSpec {
    pub fn new(waveform: Waveform, period_ms: f64, repeat: Repeat) -> Result<Self> {
        if !period_ms.is_finite() || period_ms <= 0.0 {
            return Err(MotionError::invalid(
                "period_ms",
                period_ms,
                "must be finite and > 0",
            ));
        }
        Ok(Self {
            waveform,
            period_ms,
            repeat,
            yoyo: false,
        })
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Endless linear scroll, one strip length per period.
    pub fn marquee(period_ms: f64) -> Result<Self> {
        Self::new(Waveform::Linear, period_ms, Repeat::Loop)
    }

    pub fn default_marquee() -> Self {
        Self {
            waveform: Waveform::Linear,
            period_ms: MARQUEE_PERIOD_MS,
            repeat: Repeat::Loop,
            yoyo: false,
        }
    }

    /// The second marquee row, slower so the two strips drift apart.
    pub fn slow_marquee() -> Self {
        Self {
            period_ms: MARQUEE_SLOW_PERIOD_MS,
            ..Self::default_marquee()
        }
    }

    /// Fades out and back in once per `PULSE_PERIOD_MS`.
    pub fn pulse() -> Self {
        Self {
            waveform: Waveform::Ease,
            period_ms: PULSE_PERIOD_MS / 2.0,
            repeat: Repeat::Loop,
            yoyo: true,
        }
    }

    pub fn spin() -> Self {
        Self {
            waveform: Waveform::Linear,
            period_ms: SPIN_PERIOD_MS,
            repeat: Repeat::Loop,
            yoyo: false,
        }
    }

    pub fn page_transition() -> Self {
        Self {
            waveform: Waveform::CubicBezier(CubicBezier::from_points(PAGE_TRANSITION_BEZIER)),
            period_ms: PAGE_TRANSITION_MS,
            repeat: Repeat::None,
            yoyo: false,
        }
    }

    /// Total number of iterations, `None` when looping forever.
    pub fn iterations(&self) -> Option<u64> {
        match self.repeat {
            Repeat::None => Some(1),
            Repeat::Loop => None,
            Repeat::Count(n) => Some(1 + n as u64),
        }
    }

    pub fn total_duration_ms(&self) -> Option<f64> {
        self.iterations().map(|n| n as f64 * self.period_ms)
    }

    pub fn sample(&self, elapsed_ms: f64) -> LoopSample {
        let elapsed = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };

        let (iteration, raw, finished) = match self.iterations() {
            Some(n) if elapsed >= n as f64 * self.period_ms => (n - 1, 1.0, true),
            _ => {
                let iteration = (elapsed / self.period_ms).floor() as u64;
                let raw = (elapsed % self.period_ms) / self.period_ms;
                (iteration, raw, false)
            }
        };

        let directed = if self.yoyo && iteration % 2 == 1 {
            1.0 - raw
        } else {
            raw
        };

        LoopSample {
            progress: self.waveform.apply(directed),
            iteration,
            finished,
        }
    }
}
