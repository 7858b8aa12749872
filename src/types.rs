// Core types shared by the sampler, the circle field and the drawing code.

/// A point in surface pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Straight-alpha color. Channels are sRGB bytes, `alpha` is in [0,1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const fn white(alpha: f32) -> Self {
        Self { r: 255, g: 255, b: 255, alpha }
    }
}

/// Rendered metrics of the editable region, in pixels.
/// `padding` is assumed to be the same on all four sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub padding: f32,
}

impl TextStyle {
    /// Horizontal pitch of one column.
    pub fn advance(&self) -> f32 {
        self.font_size * 0.6
    }

    /// Vertical pitch of one row.
    pub fn line_height(&self) -> f32 {
        self.font_size * 1.1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black buffer. Either dimension may be 0.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Match a new window size; contents are reset to black.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// Drawing target for the circle field: what the canvas overlay exposes.
pub trait Surface {
    /// (width, height) in pixels; may be (0, 0).
    fn size(&self) -> (usize, usize);

    /// Wipe the whole surface.
    fn clear(&mut self);

    /// Filled disc centered at `center`. Callers never pass `radius <= 0`.
    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba);
}
