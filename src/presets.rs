//! Named configurations for the effects used across the hero templates.
//!
//! The templates each carried their own copy of the spring and mapping
//! values. A preset fills those values in and builds the effect type that
//! produces the right output units, wrapped in an [`Effect`].

use crate::constants::*;
use crate::error::{MotionError, Result};
use crate::spring::SpringConfig;
use crate::transform::{
    CursorFollower, MagneticTransform, PointerRelativeTransform, TiltMapping, TransformConfig,
};
use crate::types::{PointerSample, RegionBounds, RotationPair, Vec2};
use crate::velocity::VelocitySkew;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Preset {
    /// Call-to-action button pulled toward the pointer.
    MagneticButton,
    /// Dashboard mockup tilting ±5° at the region edges.
    TiltCard,
    /// Glow orb trailing the cursor.
    CursorFollow,
    /// Floating glass card; larger `factor` means a nearer layer.
    FloatingParallax { factor: f64 },
    /// Headline skewed by horizontal pointer speed.
    VelocitySkew,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Preset::MagneticButton => "magnetic-button",
            Preset::TiltCard => "tilt-card",
            Preset::CursorFollow => "cursor-follow",
            Preset::FloatingParallax { .. } => "floating-parallax",
            Preset::VelocitySkew => "velocity-skew",
        }
    }

    pub fn spring(&self) -> Result<SpringConfig> {
        match self {
            Preset::MagneticButton => {
                SpringConfig::new(MAGNETIC_STIFFNESS, MAGNETIC_DAMPING, SPRING_MASS_DEFAULT)
            }
            Preset::TiltCard => SpringConfig::new(TILT_STIFFNESS, TILT_DAMPING, TILT_MASS),
            Preset::CursorFollow => {
                SpringConfig::new(FOLLOW_STIFFNESS, FOLLOW_DAMPING, SPRING_MASS_DEFAULT)
            }
            Preset::FloatingParallax { .. } => {
                SpringConfig::new(PARALLAX_STIFFNESS, PARALLAX_DAMPING, SPRING_MASS_DEFAULT)
            }
            Preset::VelocitySkew => SpringConfig::new(
                VELOCITY_SKEW_STIFFNESS,
                VELOCITY_SKEW_DAMPING,
                SPRING_MASS_DEFAULT,
            ),
        }
    }

    /// Config for the presets built on a normalized pointer transform.
    ///
    /// The cursor follower works on raw coordinates and the skew on pointer
    /// velocity, so both fail with `NotPointerRelative`.
    pub fn transform_config(&self) -> Result<TransformConfig> {
        let spring = self.spring()?;
        let config = match *self {
            Preset::MagneticButton => TransformConfig {
                spring,
                sensitivity: MAGNETIC_SENSITIVITY,
                tilt: None,
                output_scale: 1.0,
                clamp_to_region: false,
            },
            // The normalized offset spans ±0.5, so twice the edge angle
            // gives the full ±TILT_MAX_ANGLE_DEFAULT at the edges.
            Preset::TiltCard => TransformConfig {
                spring,
                sensitivity: 1.0,
                tilt: Some(TiltMapping::facing_pointer(2.0 * TILT_MAX_ANGLE_DEFAULT)),
                output_scale: 1.0,
                clamp_to_region: true,
            },
            Preset::FloatingParallax { factor } => TransformConfig {
                spring,
                sensitivity: 1.0,
                tilt: None,
                output_scale: 2.0 * factor * PARALLAX_RANGE_PX,
                clamp_to_region: true,
            },
            Preset::CursorFollow | Preset::VelocitySkew => {
                return Err(MotionError::NotPointerRelative(self.name()));
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn build(&self) -> Result<Effect> {
        let effect = match *self {
            Preset::MagneticButton => Effect::Magnetic(magnetic_button()?),
            Preset::TiltCard | Preset::FloatingParallax { .. } => {
                Effect::Pointer(PointerRelativeTransform::new(self.transform_config()?)?)
            }
            Preset::CursorFollow => Effect::Follower(cursor_follower()?),
            Preset::VelocitySkew => Effect::Skew(VelocitySkew::new(self.spring()?)),
        };
        log::debug!("Built {} preset", self.name());
        Ok(effect)
    }
}

/// One built preset behind a uniform event/tick surface.
///
/// `tick` output units depend on the variant:
/// - `Pointer`: normalized offset times `output_scale` (pixels for parallax).
/// - `Magnetic`: pixels from the region center.
/// - `Follower`: absolute coordinates in the pointer's space.
/// - `Skew`: skew in degrees in `x`, `y` always 0.
#[derive(Clone, Debug)]
pub enum Effect {
    Pointer(PointerRelativeTransform),
    Magnetic(MagneticTransform),
    Follower(CursorFollower),
    Skew(VelocitySkew),
}

impl Effect {
    pub fn on_pointer_move(&mut self, sample: PointerSample, bounds: RegionBounds) {
        match self {
            Effect::Pointer(t) => t.on_pointer_move(sample, bounds),
            Effect::Magnetic(m) => m.on_pointer_move(sample, bounds),
            Effect::Follower(f) => f.on_pointer_move(sample),
            Effect::Skew(s) => s.on_pointer_move(sample),
        }
    }

    /// The follower keeps chasing the last position it saw.
    pub fn on_pointer_leave(&mut self) {
        match self {
            Effect::Pointer(t) => t.on_pointer_leave(),
            Effect::Magnetic(m) => m.on_pointer_leave(),
            Effect::Follower(_) => {}
            Effect::Skew(s) => s.on_pointer_leave(),
        }
    }

    pub fn tick(&mut self, delta_time_ms: f64) -> Vec2 {
        match self {
            Effect::Pointer(t) => t.tick(delta_time_ms),
            Effect::Magnetic(m) => m.tick(delta_time_ms),
            Effect::Follower(f) => f.tick(delta_time_ms),
            Effect::Skew(s) => Vec2::new(s.tick(delta_time_ms), 0.0),
        }
    }

    pub fn rotation(&self) -> Option<RotationPair> {
        match self {
            Effect::Pointer(t) => t.rotation(),
            _ => None,
        }
    }
}

pub fn magnetic_button() -> Result<MagneticTransform> {
    MagneticTransform::new(Preset::MagneticButton.transform_config()?)
}

pub fn tilt_card() -> Result<PointerRelativeTransform> {
    PointerRelativeTransform::new(Preset::TiltCard.transform_config()?)
}

pub fn cursor_follower() -> Result<CursorFollower> {
    Ok(CursorFollower::new(Preset::CursorFollow.spring()?))
}

pub fn floating_parallax(factor: f64) -> Result<PointerRelativeTransform> {
    PointerRelativeTransform::new(Preset::FloatingParallax { factor }.transform_config()?)
}
