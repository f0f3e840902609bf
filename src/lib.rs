//! Motion primitives for the hero section templates.
//!
//! The host owns rendering and the frame loop. It forwards pointer and
//! scroll events here, calls `tick` once per frame, and applies the returned
//! numbers as CSS-style transforms.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod interpolate;
pub mod looping;
pub mod presets;
pub mod scroll;
pub mod spring;
pub mod thumbnail;
pub mod transform;
pub mod types;
pub mod velocity;

#[cfg(feature = "ffi")]
pub mod ffi;


pub use catalog::{catalog, navigate_to, validate_catalog, Route, TemplateCard, TemplateStatus};
pub use error::{MotionError, Result};
pub use looping::{LoopSample, LoopSpec, Repeat, Waveform};
pub use presets::{Effect, Preset};
pub use scroll::{ParallaxLayer, ScrollProgress};
pub use spring::{SpringAxis, SpringConfig, SpringState};
pub use transform::{
    CursorFollower, MagneticTransform, PointerRelativeTransform, TiltMapping, TransformConfig,
};
pub use types::{NormalizedOffset, PointerSample, RegionBounds, RotationPair, Vec2};
pub use velocity::{VelocitySkew, VelocityTracker};
