// Scroll-driven parallax layers.
use crate::error::{MotionError, Result};
use crate::interpolate::{map_range, Range};
use crate::spring::{SpringAxis, SpringConfig};

/// How far through its scrollable content a container is, `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollProgress(f64);

impl ScrollProgress {
    /// Content that fits in the viewport has nothing to scroll and reports 0.
    pub fn from_scroll(scroll_top: f64, viewport_height: f64, content_height: f64) -> Self {
        let scrollable = content_height - viewport_height;
        if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_top.is_finite() {
            return Self(0.0);
        }
        Self((scroll_top / scrollable).clamp(0.0, 1.0))
    }

    pub fn new(progress: f64) -> Self {
        if progress.is_finite() {
            Self(progress.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// One layer moving at its own rate as the page scrolls.
///
/// `input` is usually a slice of the progress range (a section's share of the
/// page) and `output` the translation in pixels across that slice.
#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    input: Range,
    output: Range,
    clamp: bool,
    smoothing: Option<SpringAxis>,
    offset: f64,
}

impl ParallaxLayer {
    /// Both ranges must have finite ends.
    pub fn new(input: Range, output: Range) -> Result<Self> {
        input.check("input_range")?;
        output.check("output_range")?;
        Ok(Self {
            input,
            output,
            clamp: true,
            smoothing: None,
            offset: map_range(0.0, input, output, true),
        })
    }

    /// Keep mapping past the ends of `input` instead of holding the end values.
    pub fn unclamped(mut self) -> Self {
        self.clamp = false;
        self
    }

    /// Follow scroll changes through a spring instead of snapping.
    pub fn smoothed(mut self, spring: SpringConfig) -> Self {
        let mut axis = SpringAxis::new(spring);
        axis.snap_to(self.offset);
        self.smoothing = Some(axis);
        self
    }

    /// Depth-style layer: moves `rate` times the scroll distance.
    pub fn with_rate(scroll_distance_px: f64, rate: f64) -> Result<Self> {
        if !rate.is_finite() {
            return Err(MotionError::invalid("rate", rate, "must be finite"));
        }
        Self::new(
            Range::new(0.0, 1.0),
            Range::new(0.0, scroll_distance_px * rate),
        )
    }

    pub fn offset_for(&self, progress: ScrollProgress) -> f64 {
        map_range(progress.value(), self.input, self.output, self.clamp)
    }

    /// Record a new scroll position. Unsmoothed layers update immediately.
    pub fn on_scroll(&mut self, progress: ScrollProgress) {
        let target = self.offset_for(progress);
        match self.smoothing.as_mut() {
            Some(axis) => axis.set_target(target),
            None => self.offset = target,
        }
    }

    pub fn tick(&mut self, delta_time_ms: f64) -> f64 {
        if let Some(axis) = self.smoothing.as_mut() {
            self.offset = axis.advance(delta_time_ms);
        }
        self.offset
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}
