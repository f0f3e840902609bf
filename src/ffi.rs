// C ABI for presentation hosts that are not written in Rust.
//
// Effects are handed out as opaque pointers. The host owns the handle from
// `hero_transform_new` or `hero_transform_from_preset` until it passes it to
// `hero_transform_free`, and must only use it from one thread.

use std::ffi::{c_char, CString};

use log::LevelFilter;

use crate::catalog::catalog_json;
use crate::constants::{
    SENSITIVITY_DEFAULT, SPRING_DAMPING_DEFAULT, SPRING_MASS_DEFAULT, SPRING_STIFFNESS_DEFAULT,
};
use crate::presets::{Effect, Preset};
use crate::spring::SpringConfig;
use crate::transform::{PointerRelativeTransform, TiltMapping, TransformConfig};
use crate::types::{PointerSample, RegionBounds, Vec2};

/// Transform configuration passed from the host.
///
/// A `max_angle_degrees` of 0 or less means the transform has no tilt output.
/// `clamp_to_region` pins pointers outside the region to its edges.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CTransformConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub sensitivity: f64,
    pub output_scale: f64,
    pub max_angle_degrees: f64,
    pub invert_x: bool,
    pub invert_y: bool,
    pub clamp_to_region: bool,
}

impl Default for CTransformConfig {
    fn default() -> Self {
        Self {
            stiffness: SPRING_STIFFNESS_DEFAULT,
            damping: SPRING_DAMPING_DEFAULT,
            mass: SPRING_MASS_DEFAULT,
            sensitivity: SENSITIVITY_DEFAULT,
            output_scale: 1.0,
            max_angle_degrees: 0.0,
            invert_x: false,
            invert_y: false,
            clamp_to_region: false,
        }
    }
}

impl CTransformConfig {
    fn to_config(self) -> crate::Result<TransformConfig> {
        let spring = SpringConfig::new(self.stiffness, self.damping, self.mass)?;
        let tilt = (self.max_angle_degrees > 0.0).then_some(TiltMapping {
            max_angle_degrees: self.max_angle_degrees,
            invert_x: self.invert_x,
            invert_y: self.invert_y,
        });
        Ok(TransformConfig {
            spring,
            sensitivity: self.sensitivity,
            tilt,
            output_scale: self.output_scale,
            clamp_to_region: self.clamp_to_region,
        })
    }
}

/// Preset ids accepted by `hero_transform_from_preset`.
///
/// `hero_transform_tick` returns pixels from the region center for the
/// magnetic button, absolute pointer coordinates for the cursor follower and
/// the skew angle in `x` for velocity skew.
pub const HERO_PRESET_MAGNETIC_BUTTON: i32 = 0;
pub const HERO_PRESET_TILT_CARD: i32 = 1;
pub const HERO_PRESET_CURSOR_FOLLOW: i32 = 2;
pub const HERO_PRESET_FLOATING_PARALLAX: i32 = 3;
pub const HERO_PRESET_VELOCITY_SKEW: i32 = 4;

fn into_handle(result: crate::Result<Effect>) -> *mut Effect {
    match result {
        Ok(effect) => Box::into_raw(Box::new(effect)),
        Err(e) => {
            log::warn!("Failed to create effect: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Returns null if `config` is null or invalid.
#[no_mangle]
pub extern "C" fn hero_transform_new(
    config: *const CTransformConfig,
) -> *mut Effect {
    if config.is_null() {
        log::error!("hero_transform_new called with null config");
        return std::ptr::null_mut();
    }
    // Safe: checked non-null above, host guarantees it points to a config.
    let config = unsafe { *config };
    into_handle(
        config
            .to_config()
            .and_then(PointerRelativeTransform::new)
            .map(Effect::Pointer),
    )
}

/// `factor` is only used by the floating parallax preset.
#[no_mangle]
pub extern "C" fn hero_transform_from_preset(
    preset: i32,
    factor: f64,
) -> *mut Effect {
    let preset = match preset {
        HERO_PRESET_MAGNETIC_BUTTON => Preset::MagneticButton,
        HERO_PRESET_TILT_CARD => Preset::TiltCard,
        HERO_PRESET_CURSOR_FOLLOW => Preset::CursorFollow,
        HERO_PRESET_FLOATING_PARALLAX => Preset::FloatingParallax { factor },
        HERO_PRESET_VELOCITY_SKEW => Preset::VelocitySkew,
        other => {
            log::warn!("Unknown preset id {}", other);
            return std::ptr::null_mut();
        }
    };
    into_handle(preset.build())
}

#[no_mangle]
pub extern "C" fn hero_transform_free(transform: *mut Effect) {
    if !transform.is_null() {
        // Reconstruct the Box so Rust drops it.
        unsafe {
            drop(Box::from_raw(transform));
        }
    }
}

#[no_mangle]
pub extern "C" fn hero_transform_pointer_move(
    transform: *mut Effect,
    sample: PointerSample,
    bounds: RegionBounds,
) {
    match unsafe { transform.as_mut() } {
        Some(t) => t.on_pointer_move(sample, bounds),
        None => log::error!("hero_transform_pointer_move called with null handle"),
    }
}

#[no_mangle]
pub extern "C" fn hero_transform_pointer_leave(transform: *mut Effect) {
    match unsafe { transform.as_mut() } {
        Some(t) => t.on_pointer_leave(),
        None => log::error!("hero_transform_pointer_leave called with null handle"),
    }
}

/// Zero vector for a null handle.
#[no_mangle]
pub extern "C" fn hero_transform_tick(
    transform: *mut Effect,
    delta_ms: f64,
) -> Vec2 {
    match unsafe { transform.as_mut() } {
        Some(t) => t.tick(delta_ms),
        None => {
            log::error!("hero_transform_tick called with null handle");
            Vec2::ZERO
        }
    }
}

/// `(rotate_x, rotate_y)` in degrees, zeros when the transform has no tilt.
#[no_mangle]
pub extern "C" fn hero_transform_rotation(transform: *const Effect) -> Vec2 {
    unsafe { transform.as_ref() }
        .and_then(|t| t.rotation())
        .map(Vec2::from)
        .unwrap_or(Vec2::ZERO)
}

/// JSON array of template cards. Free with `hero_string_free`.
#[no_mangle]
pub extern "C" fn hero_catalog_json() -> *mut c_char {
    let json = match catalog_json() {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize catalog: {}", e);
            return std::ptr::null_mut();
        }
    };
    match CString::new(json) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            log::error!("Catalog JSON contained a NUL byte: {}", e);
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "C" fn hero_string_free(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}

/// 0=off, 1=error, 2=warn, 3=info, 4=debug, 5=trace. Out of range clamps.
pub fn level_filter(level: i32) -> LevelFilter {
    match level {
        i32::MIN..=0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// The host installs the logger; this only adjusts the max level.
#[no_mangle]
pub extern "C" fn hero_set_log_level(level: i32) {
    log::set_max_level(level_filter(level));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn handle_lifecycle() {
        let config = CTransformConfig::default();
        let handle = hero_transform_new(&config);
        assert!(!handle.is_null());

        hero_transform_pointer_move(
            handle,
            PointerSample::new(150.0, 50.0, 0.0),
            RegionBounds::new(0.0, 0.0, 200.0, 100.0),
        );
        let out = hero_transform_tick(handle, 16.0);
        assert!(out.x > 0.0 && out.x < 0.1);

        hero_transform_pointer_leave(handle);
        assert_eq!(hero_transform_rotation(handle), Vec2::ZERO);
        hero_transform_free(handle);
    }

    #[test]
    fn invalid_config_returns_null() {
        let config = CTransformConfig {
            mass: 0.0,
            ..CTransformConfig::default()
        };
        assert!(hero_transform_new(&config).is_null());
        assert!(hero_transform_new(std::ptr::null()).is_null());
    }

    #[test]
    fn null_handles_are_tolerated() {
        let null = std::ptr::null_mut();
        hero_transform_pointer_move(
            null,
            PointerSample::new(0.0, 0.0, 0.0),
            RegionBounds::new(0.0, 0.0, 1.0, 1.0),
        );
        hero_transform_pointer_leave(null);
        assert_eq!(hero_transform_tick(null, 16.0), Vec2::ZERO);
        hero_transform_free(null);
        hero_string_free(std::ptr::null_mut());
    }

    #[test]
    fn preset_handles() {
        let tilt = hero_transform_from_preset(HERO_PRESET_TILT_CARD, 0.0);
        assert!(!tilt.is_null());
        hero_transform_pointer_move(
            tilt,
            PointerSample::new(100.0, 0.0, 0.0),
            RegionBounds::new(0.0, 0.0, 100.0, 100.0),
        );
        hero_transform_tick(tilt, 16.0);
        let rotation = hero_transform_rotation(tilt);
        assert!(rotation.x > 0.0 && rotation.y > 0.0, "{:?}", rotation);
        hero_transform_free(tilt);

        assert!(hero_transform_from_preset(42, 0.0).is_null());
    }

    fn settle(handle: *mut Effect) -> Vec2 {
        let mut out = Vec2::ZERO;
        for _ in 0..600 {
            out = hero_transform_tick(handle, 1000.0 / 60.0);
        }
        out
    }

    #[test]
    fn magnetic_preset_handle_outputs_pixels() {
        let magnetic = hero_transform_from_preset(HERO_PRESET_MAGNETIC_BUTTON, 0.0);
        assert!(!magnetic.is_null());
        hero_transform_pointer_move(
            magnetic,
            PointerSample::new(150.0, 30.0, 0.0),
            RegionBounds::new(0.0, 0.0, 200.0, 60.0),
        );
        let out = settle(magnetic);
        assert!((out.x - 20.0).abs() < 0.01, "{:?}", out);
        assert!(out.y.abs() < 0.01, "{:?}", out);
        hero_transform_free(magnetic);
    }

    #[test]
    fn follow_preset_handle_tracks_coordinates() {
        let follow = hero_transform_from_preset(HERO_PRESET_CURSOR_FOLLOW, 0.0);
        assert!(!follow.is_null());
        hero_transform_pointer_move(
            follow,
            PointerSample::new(400.0, 300.0, 0.0),
            RegionBounds::new(0.0, 0.0, 1000.0, 800.0),
        );
        let out = settle(follow);
        assert!((out.x - 400.0).abs() < 0.01, "{:?}", out);
        assert!((out.y - 300.0).abs() < 0.01, "{:?}", out);
        assert_eq!(hero_transform_rotation(follow), Vec2::ZERO);
        hero_transform_free(follow);
    }

    #[test]
    fn skew_preset_handle_uses_velocity() {
        let skew = hero_transform_from_preset(HERO_PRESET_VELOCITY_SKEW, 0.0);
        assert!(!skew.is_null());
        let bounds = RegionBounds::new(0.0, 0.0, 800.0, 200.0);
        // Same position twice: no velocity, no skew.
        hero_transform_pointer_move(skew, PointerSample::new(50.0, 0.0, 0.0), bounds);
        hero_transform_pointer_move(skew, PointerSample::new(50.0, 0.0, 10.0), bounds);
        assert_eq!(hero_transform_tick(skew, 16.0), Vec2::ZERO);

        hero_transform_pointer_move(skew, PointerSample::new(-50.0, 0.0, 30.0), bounds);
        let out = hero_transform_tick(skew, 16.0);
        assert!(out.x > 0.0, "leftward flick should skew right: {:?}", out);
        hero_transform_free(skew);
    }

    #[test]
    fn catalog_json_crosses_the_boundary() {
        let raw = hero_catalog_json();
        assert!(!raw.is_null());
        let text = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_owned();
        hero_string_free(raw);
        assert!(text.contains("\"flowly\""));
    }

    #[test]
    fn log_levels_map_like_the_host_expects() {
        assert_eq!(level_filter(-3), LevelFilter::Off);
        assert_eq!(level_filter(0), LevelFilter::Off);
        assert_eq!(level_filter(3), LevelFilter::Info);
        assert_eq!(level_filter(99), LevelFilter::Trace);
    }
}
