use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::catalog::TemplateCard;
use crate::error::{MotionError, Result};

/// Tailwind palette entries used by the catalog gradients.
const PALETTE: &[(&str, [u8; 3])] = &[
    ("amber-900", [0x78, 0x35, 0x0f]),
    ("blue-900", [0x1e, 0x3a, 0x8a]),
    ("orange-900", [0x7c, 0x2d, 0x12]),
    ("slate-900", [0x0f, 0x17, 0x2a]),
    ("stone-900", [0x1c, 0x19, 0x17]),
];

/// Inset of the frosted panel, as a fraction of the thumbnail size.
const GLASS_INSET: f32 = 0.12;
/// Opacity of the white glass panel.
const GLASS_ALPHA: f32 = 0.08;

pub fn palette_color(name: &str) -> Result<Rgba<u8>> {
    PALETTE
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, [r, g, b])| Rgba([*r, *g, *b, 255]))
        .ok_or_else(|| MotionError::UnknownColor(name.to_string()))
}

/// Parse `from-<color> to-<color>` into its two end colors.
pub fn parse_gradient(spec: &str) -> Result<(Rgba<u8>, Rgba<u8>)> {
    let mut from = None;
    let mut to = None;
    for token in spec.split_whitespace() {
        if let Some(name) = token.strip_prefix("from-") {
            from = Some(palette_color(name)?);
        } else if let Some(name) = token.strip_prefix("to-") {
            to = Some(palette_color(name)?);
        }
    }
    match (from, to) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(MotionError::InvalidCatalog(format!(
            "gradient {:?} needs both from- and to- colors",
            spec
        ))),
    }
}

#[inline(always)]
fn blend(bg: u8, fg: u8, alpha: f32) -> u8 {
    ((bg as f32 * (1.0 - alpha)) + (fg as f32 * alpha))
        .round()
        .clamp(0.0, 255.0) as u8
}

fn mix(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    Rgba([
        blend(a[0], b[0], t),
        blend(a[1], b[1], t),
        blend(a[2], b[2], t),
        255,
    ])
}

/// Dashboard preview: the card's diagonal gradient (top-left to bottom-right)
/// with a translucent glass panel in the middle.
pub fn render_thumbnail(card: &TemplateCard, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(MotionError::InvalidDimensions { width, height });
    }

    let (from, to) = parse_gradient(card.gradient)?;
    let max_x = (width - 1).max(1) as f32;
    let max_y = (height - 1).max(1) as f32;

    let mut img = RgbaImage::from_fn(width, height, |x, y| {
        let t = (x as f32 / max_x + y as f32 / max_y) / 2.0;
        mix(from, to, t)
    });

    let inset_x = (width as f32 * GLASS_INSET) as u32;
    let inset_y = (height as f32 * GLASS_INSET) as u32;
    for y in inset_y..height.saturating_sub(inset_y) {
        for x in inset_x..width.saturating_sub(inset_x) {
            let px = img.get_pixel_mut(x, y);
            for c in 0..3 {
                px[c] = blend(px[c], 255, GLASS_ALPHA);
            }
        }
    }

    log::debug!("Rendered {}x{} thumbnail for {}", width, height, card.id);
    Ok(img)
}

pub fn save_thumbnail(card: &TemplateCard, path: &Path, width: u32, height: u32) -> Result<()> {
    let img = render_thumbnail(card, width, height)?;
    img.save(path)?;
    log::info!("Saved thumbnail for {} to {:?}", card.id, path);
    Ok(())
}
