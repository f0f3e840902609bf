// Pointer velocity estimation and the velocity-driven skew effect.
use crate::constants::{
    VELOCITY_IDLE_MS, VELOCITY_SKEW_INPUT_PX_PER_SEC, VELOCITY_SKEW_MAX_DEG,
};
use crate::error::Result;
use crate::interpolate::{map_range, Range};
use crate::presets::Preset;
use crate::spring::{SpringAxis, SpringConfig};
use crate::types::{PointerSample, Vec2};

/// Velocity from the two most recent samples, in px/s.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    last: Option<PointerSample>,
    velocity: Vec2,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples whose timestamp does not move forward are dropped; the
    /// previous estimate stays in place.
    pub fn push(&mut self, sample: PointerSample) -> Vec2 {
        if let Some(prev) = self.last {
            let dt_ms = sample.timestamp_ms - prev.timestamp_ms;
            if dt_ms.is_nan() || dt_ms <= 0.0 {
                log::trace!(
                    "Dropping pointer sample with non-increasing timestamp ({} -> {})",
                    prev.timestamp_ms,
                    sample.timestamp_ms
                );
                return self.velocity;
            }
            let dt = dt_ms / 1000.0;
            self.velocity = Vec2::new((sample.x - prev.x) / dt, (sample.y - prev.y) / dt);
        }
        self.last = Some(sample);
        self.velocity
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Velocity as seen at `now_ms`; zero once the pointer has been still for
    /// longer than the idle window.
    pub fn velocity_at(&self, now_ms: f64) -> Vec2 {
        match self.last {
            Some(last) if now_ms - last.timestamp_ms <= VELOCITY_IDLE_MS => self.velocity,
            _ => Vec2::ZERO,
        }
    }

    pub fn clear(&mut self) {
        self.last = None;
        self.velocity = Vec2::ZERO;
    }
}

/// Skews text against the direction of horizontal pointer travel.
///
/// Time runs on the sample clock: each pointer sample moves `clock_ms` up to
/// its timestamp and each tick advances it by the frame delta. The tracker
/// decides from that clock when the pointer has gone still.
#[derive(Clone, Debug)]
pub struct VelocitySkew {
    tracker: VelocityTracker,
    axis: SpringAxis,
    input: Range,
    output: Range,
    clock_ms: f64,
}

impl VelocitySkew {
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            tracker: VelocityTracker::new(),
            axis: SpringAxis::new(spring),
            input: Range::new(
                -VELOCITY_SKEW_INPUT_PX_PER_SEC,
                VELOCITY_SKEW_INPUT_PX_PER_SEC,
            ),
            output: Range::new(VELOCITY_SKEW_MAX_DEG, -VELOCITY_SKEW_MAX_DEG),
            clock_ms: 0.0,
        }
    }

    pub fn from_preset() -> Result<Self> {
        Ok(Self::new(Preset::VelocitySkew.spring()?))
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        self.tracker.push(sample);
        // f64::max skips a NaN timestamp.
        self.clock_ms = self.clock_ms.max(sample.timestamp_ms);
        self.retarget();
    }

    /// Drops the velocity history and relaxes to no skew.
    pub fn on_pointer_leave(&mut self) {
        self.tracker.clear();
        self.retarget();
    }

    /// Returns the skew angle in degrees.
    pub fn tick(&mut self, delta_time_ms: f64) -> f64 {
        if delta_time_ms.is_finite() && delta_time_ms > 0.0 {
            self.clock_ms += delta_time_ms;
            self.retarget();
        }
        self.axis.advance(delta_time_ms)
    }

    fn retarget(&mut self) {
        let velocity = self.tracker.velocity_at(self.clock_ms);
        self.axis
            .set_target(map_range(velocity.x, self.input, self.output, true));
    }

    pub fn skew_degrees(&self) -> f64 {
        self.axis.position()
    }

    pub fn target_degrees(&self) -> f64 {
        self.axis.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn velocity_from_two_samples() {
        let mut tracker = VelocityTracker::new();
        tracker.push(PointerSample::new(0.0, 0.0, 0.0));
        let v = tracker.push(PointerSample::new(10.0, -5.0, 20.0));
        assert!((v.x - 500.0).abs() < EPSILON);
        assert!((v.y + 250.0).abs() < EPSILON);
    }

    #[test]
    fn stale_timestamps_are_dropped() {
        let mut tracker = VelocityTracker::new();
        tracker.push(PointerSample::new(0.0, 0.0, 100.0));
        tracker.push(PointerSample::new(10.0, 0.0, 110.0));
        let before = tracker.velocity();
        let after = tracker.push(PointerSample::new(500.0, 0.0, 110.0));
        assert_eq!(before, after);
    }

    #[test]
    fn velocity_goes_idle() {
        let mut tracker = VelocityTracker::new();
        tracker.push(PointerSample::new(0.0, 0.0, 0.0));
        tracker.push(PointerSample::new(10.0, 0.0, 10.0));
        assert!(tracker.velocity_at(50.0).x > 0.0);
        assert_eq!(tracker.velocity_at(500.0), Vec2::ZERO);
    }

    #[test]
    fn fast_rightward_flick_skews_left_and_clamps() {
        let mut skew = VelocitySkew::from_preset().unwrap();
        skew.on_pointer_move(PointerSample::new(0.0, 0.0, 0.0));
        skew.on_pointer_move(PointerSample::new(100.0, 0.0, 10.0)); // 10,000 px/s
        assert!((skew.target_degrees() + VELOCITY_SKEW_MAX_DEG).abs() < EPSILON);
    }

    #[test]
    fn skew_relaxes_once_pointer_stops() {
        let mut skew = VelocitySkew::from_preset().unwrap();
        skew.on_pointer_move(PointerSample::new(0.0, 0.0, 0.0));
        skew.on_pointer_move(PointerSample::new(5.0, 0.0, 10.0));
        skew.tick(16.0);
        assert!(skew.skew_degrees() < 0.0);
        for _ in 0..300 {
            skew.tick(16.0);
        }
        assert_eq!(skew.target_degrees(), 0.0);
        assert!(skew.skew_degrees().abs() < 0.01);
    }

    #[test]
    fn idle_window_follows_sample_timestamps() {
        let mut skew = VelocitySkew::from_preset().unwrap();
        // Host clock already well past zero.
        skew.on_pointer_move(PointerSample::new(0.0, 0.0, 5_000.0));
        skew.on_pointer_move(PointerSample::new(5.0, 0.0, 5_010.0));
        assert!(skew.target_degrees() < 0.0);

        skew.tick(50.0);
        assert!(skew.target_degrees() < 0.0, "still inside the idle window");
        skew.tick(60.0);
        assert_eq!(skew.target_degrees(), 0.0);
    }

    #[test]
    fn leave_clears_skew_target() {
        let mut skew = VelocitySkew::from_preset().unwrap();
        skew.on_pointer_move(PointerSample::new(0.0, 0.0, 0.0));
        skew.on_pointer_move(PointerSample::new(-20.0, 0.0, 10.0));
        assert!(skew.target_degrees() > 0.0);
        skew.on_pointer_leave();
        assert_eq!(skew.target_degrees(), 0.0);
    }
}
