use crate::error::{MotionError, Result};

/// Raw pointer position, in the same coordinate space as the region bounds.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self { x, y, timestamp_ms }
    }

    /// Re-base page coordinates into a region's local space.
    pub fn relative_to(&self, origin_x: f64, origin_y: f64) -> Self {
        Self {
            x: self.x - origin_x,
            y: self.y - origin_y,
            timestamp_ms: self.timestamp_ms,
        }
    }
}

/// Bounding rectangle of the interactive element.
///
/// Layout can change between events, so callers query it fresh on every
/// pointer event instead of caching it on the transform.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A zero-size region is a transient layout state (element collapsed,
    /// not yet laid out). Moves against it are ignored.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn check(&self) -> Result<()> {
        if self.is_degenerate() {
            return Err(MotionError::DegenerateRegion {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Position of `sample` relative to the center, divided by the region size.
    ///
    /// Fails with `DegenerateRegion` for zero-size bounds. Samples outside the
    /// region are extrapolated rather than clamped.
    pub fn normalize(&self, sample: &PointerSample) -> Result<NormalizedOffset> {
        self.check()?;
        let (cx, cy) = self.center();
        Ok(NormalizedOffset {
            nx: (sample.x - cx) / self.width,
            ny: (sample.y - cy) / self.height,
        })
    }
}

/// Pointer position relative to the region center, `[-0.5, 0.5]` inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedOffset {
    pub nx: f64,
    pub ny: f64,
}

impl NormalizedOffset {
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            nx: self.nx * factor,
            ny: self.ny * factor,
        }
    }

    /// Pin both components to the region edges.
    pub fn clamped(self) -> Self {
        Self {
            nx: self.nx.clamp(-0.5, 0.5),
            ny: self.ny.clamp(-0.5, 0.5),
        }
    }
}

/// Per-frame output handed back to the host.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Tilt output in degrees. `rotate_x` turns about the horizontal axis and is
/// driven by vertical pointer displacement; `rotate_y` the other way round.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationPair {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl From<RotationPair> for Vec2 {
    fn from(r: RotationPair) -> Self {
        Vec2::new(r.rotate_x, r.rotate_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_bounds_report_their_size() {
        let err = RegionBounds::new(0.0, 0.0, 0.0, 40.0).check().unwrap_err();
        assert!(matches!(
            err,
            MotionError::DegenerateRegion { width, height } if width == 0.0 && height == 40.0
        ));
        assert!(RegionBounds::new(0.0, 0.0, 1.0, 1.0).check().is_ok());
    }

    #[test]
    fn normalize_rejects_degenerate_bounds() {
        let sample = PointerSample::new(5.0, 5.0, 0.0);
        assert!(matches!(
            RegionBounds::new(0.0, 0.0, 10.0, 0.0).normalize(&sample),
            Err(MotionError::DegenerateRegion { .. })
        ));
    }

    #[test]
    fn clamped_offset_stops_at_edges() {
        let offset = NormalizedOffset { nx: 2.5, ny: -0.7 }.clamped();
        assert_eq!(offset, NormalizedOffset { nx: 0.5, ny: -0.5 });
        let inside = NormalizedOffset { nx: 0.2, ny: -0.1 };
        assert_eq!(inside.clamped(), inside);
    }

    #[test]
    fn relative_to_rebases_page_coordinates() {
        let local = PointerSample::new(420.0, 310.0, 5.0).relative_to(400.0, 300.0);
        assert_eq!(local, PointerSample::new(20.0, 10.0, 5.0));
    }
}
