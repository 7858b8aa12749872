// Random rectangle pattern behind everything.
// Visual: faint white bars scattered over the dark window, reshuffled on resize.

use std::path::Path;

use image::{Rgb, RgbImage};
use rand::Rng;

use crate::draw::blend_rect;
use crate::error::Error;
use crate::gamma::Blender;
use crate::types::{FrameBuffer, Rgba};

pub const DEFAULT_RECTS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// `count` rectangles with their corner anywhere on a `width`x`height` surface;
/// sizes are 20..120 wide and 50..250 tall. Nothing for a zero-area surface.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, count: usize, rng: &mut R) -> Vec<PatternRect> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| PatternRect {
            x: rng.r#gen::<f32>() * width as f32,
            y: rng.r#gen::<f32>() * height as f32,
            width: rng.gen_range(20.0..120.0),
            height: rng.gen_range(50.0..250.0),
        })
        .collect()
}

/// Fill the rectangles in white at `opacity`; overlaps stack up.
pub fn paint(fb: &mut FrameBuffer, blender: &Blender, rects: &[PatternRect], opacity: f32) {
    let color = Rgba::white(opacity);
    for r in rects {
        blend_rect(fb, blender, r.x, r.y, r.width, r.height, color);
    }
}

/// Save a painted buffer as a PNG (the page used it as a CSS background image).
pub fn export_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    let img = RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    });
    img.save(path)?;
    Ok(())
}
