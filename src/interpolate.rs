// Linear range mapping, the building block behind tilt, skew and scroll effects.
use crate::error::{MotionError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Reject a range with a NaN or infinite end, naming it `field`.
    pub fn check(&self, field: &'static str) -> Result<()> {
        for value in [self.start, self.end] {
            if !value.is_finite() {
                return Err(MotionError::invalid(field, value, "must be finite"));
            }
        }
        Ok(())
    }

    fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    fn max(&self) -> f64 {
        self.start.max(self.end)
    }
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Map `value` from `input` onto `output`.
///
/// With `clamp` set the result never leaves a finite `output`. A zero-width
/// input range maps everything to `output.start`.
pub fn map_range(value: f64, input: Range, output: Range, clamp: bool) -> f64 {
    if input.span().abs() < f64::EPSILON {
        return output.start;
    }

    let mut t = (value - input.start) / input.span();
    if clamp {
        t = t.clamp(0.0, 1.0);
    }
    let mapped = lerp(output.start, output.end, t);

    if clamp && output.is_finite() {
        mapped.clamp(output.min(), output.max())
    } else {
        mapped
    }
}
