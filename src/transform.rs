// Pointer-relative transforms: magnetic buttons, tilt cards, cursor followers.
use crate::constants::{SENSITIVITY_DEFAULT, TILT_MAX_ANGLE_DEFAULT};
use crate::error::{MotionError, Result};
use crate::spring::{SpringAxis, SpringConfig};
use crate::types::{NormalizedOffset, PointerSample, RegionBounds, RotationPair, Vec2};

/// How a normalized offset turns into a 3D tilt.
///
/// Horizontal displacement rotates about the vertical axis (`rotate_y`),
/// vertical displacement about the horizontal one (`rotate_x`). The sign of
/// each can be flipped to pick the visual handedness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltMapping {
    pub max_angle_degrees: f64,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl TiltMapping {
    pub fn new(max_angle_degrees: f64) -> Self {
        Self {
            max_angle_degrees,
            invert_x: false,
            invert_y: false,
        }
    }

    /// Pointer at the bottom edge tips the card back, pointer on the right
    /// turns it to face right.
    pub fn facing_pointer(max_angle_degrees: f64) -> Self {
        Self {
            max_angle_degrees,
            invert_x: true,
            invert_y: false,
        }
    }

    pub fn rotation_for(&self, nx: f64, ny: f64) -> RotationPair {
        let sign = |inverted: bool| if inverted { -1.0 } else { 1.0 };
        RotationPair {
            rotate_x: sign(self.invert_x) * ny * self.max_angle_degrees,
            rotate_y: sign(self.invert_y) * nx * self.max_angle_degrees,
        }
    }
}

impl Default for TiltMapping {
    fn default() -> Self {
        Self::new(TILT_MAX_ANGLE_DEFAULT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformConfig {
    pub spring: SpringConfig,
    /// Multiplier applied to the normalized offset before it becomes a target.
    pub sensitivity: f64,
    /// Set for tilt variants; enables `rotation()`.
    pub tilt: Option<TiltMapping>,
    /// Multiplier applied to the smoothed position in `tick` output.
    pub output_scale: f64,
    /// Pin the normalized offset to `[-0.5, 0.5]` so pointers outside the
    /// region hold the edge value instead of extrapolating.
    pub clamp_to_region: bool,
}

impl TransformConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.sensitivity.is_finite() {
            return Err(MotionError::invalid(
                "sensitivity",
                self.sensitivity,
                "must be finite",
            ));
        }
        if !self.output_scale.is_finite() {
            return Err(MotionError::invalid(
                "output_scale",
                self.output_scale,
                "must be finite",
            ));
        }
        if let Some(tilt) = self.tilt {
            if !tilt.max_angle_degrees.is_finite() {
                return Err(MotionError::invalid(
                    "max_angle_degrees",
                    tilt.max_angle_degrees,
                    "must be finite",
                ));
            }
        }
        Ok(())
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            sensitivity: SENSITIVITY_DEFAULT,
            tilt: None,
            output_scale: 1.0,
            clamp_to_region: false,
        }
    }
}

/// Converts pointer movement over a region into a spring-smoothed 2D offset.
///
/// Pointer events only move the spring targets. Position changes happen in
/// `tick`, which the host calls once per frame.
#[derive(Clone, Debug)]
pub struct PointerRelativeTransform {
    config: TransformConfig,
    x: SpringAxis,
    y: SpringAxis,
}

impl PointerRelativeTransform {
    pub fn new(config: TransformConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            log::warn!("Rejected transform config: {}", e);
            e
        })?;

        log::debug!(
            "Created pointer transform (k={}, c={}, m={}, zeta={:.2}, sensitivity={})",
            config.spring.stiffness(),
            config.spring.damping(),
            config.spring.mass(),
            config.spring.damping_ratio(),
            config.sensitivity
        );

        Ok(Self {
            config,
            x: SpringAxis::new(config.spring),
            y: SpringAxis::new(config.spring),
        })
    }

    /// Builds the spring config as well, so a bad mass or stiffness fails here.
    pub fn with_spring(stiffness: f64, damping: f64, mass: f64, sensitivity: f64) -> Result<Self> {
        let spring = SpringConfig::new(stiffness, damping, mass).map_err(|e| {
            log::warn!("Rejected spring config: {}", e);
            e
        })?;
        Self::new(TransformConfig {
            spring,
            sensitivity,
            ..TransformConfig::default()
        })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Retarget both axes from a pointer sample. Degenerate bounds are ignored.
    pub fn on_pointer_move(&mut self, sample: PointerSample, bounds: RegionBounds) {
        match bounds.normalize(&sample) {
            Ok(offset) => {
                let offset = if self.config.clamp_to_region {
                    offset.clamped()
                } else {
                    offset
                };
                let target = offset.scaled(self.config.sensitivity);
                self.x.set_target(target.nx);
                self.y.set_target(target.ny);
            }
            Err(e) => log::trace!("Ignoring pointer move: {}", e),
        }
    }

    /// Relax back to rest. Position and velocity carry over.
    pub fn on_pointer_leave(&mut self) {
        self.x.set_target(0.0);
        self.y.set_target(0.0);
    }

    /// Advance both springs by `delta_time_ms` and return the smoothed offset.
    pub fn tick(&mut self, delta_time_ms: f64) -> Vec2 {
        self.x.advance(delta_time_ms);
        self.y.advance(delta_time_ms);
        self.output()
    }

    /// Last computed offset, scaled for output.
    pub fn output(&self) -> Vec2 {
        Vec2::new(
            self.x.position() * self.config.output_scale,
            self.y.position() * self.config.output_scale,
        )
    }

    /// Tilt angles for the current smoothed position. `None` unless the
    /// transform was configured with a `TiltMapping`.
    pub fn rotation(&self) -> Option<RotationPair> {
        self.config
            .tilt
            .map(|tilt| tilt.rotation_for(self.x.position(), self.y.position()))
    }

    pub fn position(&self) -> NormalizedOffset {
        NormalizedOffset {
            nx: self.x.position(),
            ny: self.y.position(),
        }
    }

    pub fn target(&self) -> NormalizedOffset {
        NormalizedOffset {
            nx: self.x.target(),
            ny: self.y.target(),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.x.velocity(), self.y.velocity())
    }

    pub fn is_at_rest(&self, epsilon: f64) -> bool {
        self.x.is_at_rest(epsilon) && self.y.is_at_rest(epsilon)
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }

    /// Back to the freshly mounted state.
    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

/// Magnetic button offset in pixels.
///
/// The button moves `sensitivity` times the pointer's distance from its
/// center. The last valid region size converts the normalized spring output
/// back to pixels, so the release animation keeps its scale after leave.
#[derive(Clone, Debug)]
pub struct MagneticTransform {
    inner: PointerRelativeTransform,
    size: (f64, f64),
}

impl MagneticTransform {
    pub fn new(config: TransformConfig) -> Result<Self> {
        Ok(Self {
            inner: PointerRelativeTransform::new(config)?,
            size: (0.0, 0.0),
        })
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample, bounds: RegionBounds) {
        if !bounds.is_degenerate() {
            self.size = (bounds.width, bounds.height);
        }
        self.inner.on_pointer_move(sample, bounds);
    }

    pub fn on_pointer_leave(&mut self) {
        self.inner.on_pointer_leave();
    }

    pub fn tick(&mut self, delta_time_ms: f64) -> Vec2 {
        let normalized = self.inner.tick(delta_time_ms);
        Vec2::new(normalized.x * self.size.0, normalized.y * self.size.1)
    }

    pub fn inner(&self) -> &PointerRelativeTransform {
        &self.inner
    }
}

/// Spring-follows absolute pointer coordinates (the glowing orb that trails
/// the cursor). Each instance owns its cursor position; there is no shared
/// global cursor.
#[derive(Clone, Debug)]
pub struct CursorFollower {
    x: SpringAxis,
    y: SpringAxis,
}

impl CursorFollower {
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            x: SpringAxis::new(spring),
            y: SpringAxis::new(spring),
        }
    }

    /// Start at `origin` instead of the top-left corner.
    pub fn starting_at(spring: SpringConfig, origin: Vec2) -> Self {
        let mut follower = Self::new(spring);
        follower.x.snap_to(origin.x);
        follower.y.snap_to(origin.y);
        follower
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        self.x.set_target(sample.x);
        self.y.set_target(sample.y);
    }

    pub fn tick(&mut self, delta_time_ms: f64) -> Vec2 {
        Vec2::new(
            self.x.advance(delta_time_ms),
            self.y.advance(delta_time_ms),
        )
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x.position(), self.y.position())
    }

    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn transform(sensitivity: f64) -> PointerRelativeTransform {
        PointerRelativeTransform::with_spring(150.0, 15.0, 0.8, sensitivity).unwrap()
    }

    #[test]
    fn move_sets_target_without_moving_position() {
        let mut t = transform(0.4);
        t.on_pointer_move(
            PointerSample::new(150.0, 50.0, 0.0),
            RegionBounds::new(0.0, 0.0, 200.0, 100.0),
        );
        let target = t.target();
        assert!((target.nx - 0.10).abs() < EPSILON);
        assert!(target.ny.abs() < EPSILON);
        assert_eq!(t.position(), NormalizedOffset::default());
    }

    #[test]
    fn latest_move_wins_between_ticks() {
        let bounds = RegionBounds::new(0.0, 0.0, 100.0, 100.0);
        let mut t = transform(1.0);
        t.on_pointer_move(PointerSample::new(0.0, 0.0, 0.0), bounds);
        t.on_pointer_move(PointerSample::new(100.0, 100.0, 1.0), bounds);
        t.on_pointer_move(PointerSample::new(75.0, 25.0, 2.0), bounds);
        let target = t.target();
        assert!((target.nx - 0.25).abs() < EPSILON);
        assert!((target.ny + 0.25).abs() < EPSILON);
    }

    #[test]
    fn outside_region_extrapolates() {
        let mut t = transform(1.0);
        t.on_pointer_move(
            PointerSample::new(300.0, 50.0, 0.0),
            RegionBounds::new(0.0, 0.0, 100.0, 100.0),
        );
        assert!((t.target().nx - 2.5).abs() < EPSILON);
    }

    #[test]
    fn clamp_to_region_holds_edge_value() {
        let mut t = PointerRelativeTransform::new(TransformConfig {
            sensitivity: 1.0,
            clamp_to_region: true,
            ..TransformConfig::default()
        })
        .unwrap();
        t.on_pointer_move(
            PointerSample::new(300.0, -80.0, 0.0),
            RegionBounds::new(0.0, 0.0, 100.0, 100.0),
        );
        assert!((t.target().nx - 0.5).abs() < EPSILON);
        assert!((t.target().ny + 0.5).abs() < EPSILON);
    }

    #[test]
    fn rotation_is_none_without_tilt() {
        assert!(transform(0.4).rotation().is_none());
    }

    #[test]
    fn tilt_sign_convention_is_configurable() {
        let plain = TiltMapping::new(10.0).rotation_for(0.5, -0.5);
        assert!((plain.rotate_x + 5.0).abs() < EPSILON);
        assert!((plain.rotate_y - 5.0).abs() < EPSILON);

        let facing = TiltMapping::facing_pointer(10.0).rotation_for(0.5, -0.5);
        assert!((facing.rotate_x - 5.0).abs() < EPSILON);
        assert!((facing.rotate_y - 5.0).abs() < EPSILON);
    }

    #[test]
    fn non_finite_sensitivity_is_rejected() {
        let cfg = TransformConfig {
            sensitivity: f64::NAN,
            ..TransformConfig::default()
        };
        assert!(matches!(
            PointerRelativeTransform::new(cfg),
            Err(MotionError::InvalidConfig {
                field: "sensitivity",
                ..
            })
        ));
    }

    #[test]
    fn reset_returns_to_mount_state() {
        let mut t = transform(1.0);
        t.on_pointer_move(
            PointerSample::new(90.0, 10.0, 0.0),
            RegionBounds::new(0.0, 0.0, 100.0, 100.0),
        );
        t.tick(16.0);
        t.reset();
        assert_eq!(t.position(), NormalizedOffset::default());
        assert_eq!(t.target(), NormalizedOffset::default());
        assert_eq!(t.velocity(), Vec2::ZERO);
    }

    #[test]
    fn magnetic_output_is_in_pixels() {
        let mut m = MagneticTransform::new(TransformConfig {
            spring: SpringConfig::new(150.0, 15.0, 1.0).unwrap(),
            sensitivity: 0.4,
            ..TransformConfig::default()
        })
        .unwrap();
        // 50px right of center of a 200x60 button.
        m.on_pointer_move(
            PointerSample::new(150.0, 30.0, 0.0),
            RegionBounds::new(0.0, 0.0, 200.0, 60.0),
        );
        let mut out = Vec2::ZERO;
        for _ in 0..600 {
            out = m.tick(1000.0 / 60.0);
        }
        assert!((out.x - 20.0).abs() < 0.01, "got {:?}", out);
        assert!(out.y.abs() < 0.01);
    }

    #[test]
    fn follower_chases_absolute_coordinates() {
        let mut f = CursorFollower::starting_at(SpringConfig::default(), Vec2::new(10.0, 10.0));
        f.on_pointer_move(PointerSample::new(400.0, 300.0, 0.0));
        let first = f.tick(16.0);
        assert!(first.x > 10.0 && first.x < 400.0);
        for _ in 0..600 {
            f.tick(16.0);
        }
        assert!((f.position().x - 400.0).abs() < 0.01);
        assert!((f.position().y - 300.0).abs() < 0.01);
    }
}
