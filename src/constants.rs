//! Documented constants for the pointer and scroll driven hero effects.
//!
//! The hero templates each hand-tuned their own spring values; they are
//! collected here so every effect is a parameterization of the same filter.

// ============================================================================
// Spring Physics Constants
// ============================================================================

/// Default spring stiffness (pull strength).
///
/// **Rationale**: Every pointer effect in the templates settles on 150. With
/// unit mass this gives a natural frequency of ~12.2 rad/s, so the element
/// catches up with the pointer in roughly a third of a second.
pub const SPRING_STIFFNESS_DEFAULT: f64 = 150.0;

/// Default damping coefficient.
///
/// **Rationale**: The templates range from 15 (bouncy magnetic buttons) to 40
/// (heavy tilt cards). 20 sits in the middle: a damping ratio of ~0.82 at
/// k=150, m=1, which overshoots slightly and then settles.
pub const SPRING_DAMPING_DEFAULT: f64 = 20.0;

/// Default spring mass.
pub const SPRING_MASS_DEFAULT: f64 = 1.0;

/// Default multiplier applied to the normalized pointer offset.
///
/// **Rationale**: Magnetic buttons move 40% of the pointer's distance from
/// their center; a full 1.0 would make the element chase the cursor out of
/// its own bounds.
pub const SENSITIVITY_DEFAULT: f64 = 0.4;

/// Default maximum tilt angle in degrees.
///
/// **Rationale**: The dashboard mockup tilts ±5°. Past ~12° the perspective
/// distortion makes text on the card hard to read.
pub const TILT_MAX_ANGLE_DEFAULT: f64 = 5.0;

// ============================================================================
// Integration Constants
// ============================================================================

/// Largest single integration step in milliseconds.
///
/// **Rationale**: Semi-implicit Euler stays stable while `dt < 2/ωn`. At the
/// stiffest preset (k=400, m=1, ωn=20) that bound is 100ms. 1/60s leaves a
/// wide margin, and a long gap (backgrounded tab) is split into several
/// steps instead of one explosive one.
pub const MAX_STEP_MS: f64 = 1000.0 / 60.0;

/// Upper bound on sub-steps per tick.
///
/// **Rationale**: A tab that was hidden for minutes would otherwise replay
/// thousands of steps on return. Two seconds of simulated time is more than
/// enough for any preset to settle.
pub const MAX_SUBSTEPS: usize = 120;

/// Distance and speed below which a spring counts as settled.
pub const REST_EPSILON: f64 = 1e-4;

// ============================================================================
// Template-specific tuning
// ============================================================================

/// Magnetic button: light damping so the button visibly springs back.
pub const MAGNETIC_STIFFNESS: f64 = 150.0;
pub const MAGNETIC_DAMPING: f64 = 15.0;
pub const MAGNETIC_SENSITIVITY: f64 = 0.4;

/// Tilt card: heavy damping and lower mass for a weighty but quick panel.
pub const TILT_STIFFNESS: f64 = 150.0;
pub const TILT_DAMPING: f64 = 40.0;
pub const TILT_MASS: f64 = 0.8;

/// Cursor follower orb.
pub const FOLLOW_STIFFNESS: f64 = 150.0;
pub const FOLLOW_DAMPING: f64 = 25.0;

/// Floating glass cards. The offset range is `±factor * PARALLAX_RANGE_PX`.
pub const PARALLAX_STIFFNESS: f64 = 150.0;
pub const PARALLAX_DAMPING: f64 = 20.0;
pub const PARALLAX_RANGE_PX: f64 = 50.0;

// ============================================================================
// Velocity Skew Constants
// ============================================================================

/// Pointer speed (px/s) that produces the full skew angle.
///
/// **Rationale**: 1000 px/s is a brisk but deliberate flick across a laptop
/// screen. Faster movements are clamped to the maximum skew.
pub const VELOCITY_SKEW_INPUT_PX_PER_SEC: f64 = 1000.0;

/// Skew angle at full speed, in degrees. Sign is inverted so text leans away
/// from the direction of travel.
pub const VELOCITY_SKEW_MAX_DEG: f64 = 10.0;

pub const VELOCITY_SKEW_STIFFNESS: f64 = 400.0;
pub const VELOCITY_SKEW_DAMPING: f64 = 30.0;

/// If no sample arrives within this window the pointer is treated as still.
pub const VELOCITY_IDLE_MS: f64 = 100.0;

// ============================================================================
// Loop Constants
// ============================================================================

/// Marquee strips scroll one full cycle in 20s (and 25s for the slower row).
pub const MARQUEE_PERIOD_MS: f64 = 20_000.0;
pub const MARQUEE_SLOW_PERIOD_MS: f64 = 25_000.0;

/// "Live" indicator pulse.
pub const PULSE_PERIOD_MS: f64 = 1_500.0;

/// Spinning disc badge.
pub const SPIN_PERIOD_MS: f64 = 5_000.0;

/// Route change fade.
pub const PAGE_TRANSITION_MS: f64 = 500.0;

/// CSS `ease`.
pub const EASE_BEZIER: [f64; 4] = [0.25, 0.1, 0.25, 1.0];

/// Page transition curve, a strong ease-out.
pub const PAGE_TRANSITION_BEZIER: [f64; 4] = [0.22, 1.0, 0.36, 1.0];
