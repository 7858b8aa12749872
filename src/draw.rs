// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the typing playground.
// 2) A canvas layer: background + text underneath, soft white circles on top.
// 3) A ring cursor that follows your mouse while it hovers the window.
// 4) A tiny 5x7 bitmap font, scaled up for the typed text and 1:1 for the HUD.

use std::cell::RefCell;
use std::rc::Rc;

use minifb::{InputCallback, Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::gamma::Blender;
use crate::types::{FrameBuffer, Point, Rgba, Surface, TextStyle};

/// Characters typed since the last frame, filled by minifb's char callback.
type CharQueue = Rc<RefCell<Vec<char>>>;

struct CharSink(CharQueue);

impl InputCallback for CharSink {
    fn add_char(&mut self, uni_char: u32) {
        if let Some(ch) = char::from_u32(uni_char) {
            self.0.borrow_mut().push(ch);
        }
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
    typed: CharQueue,
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window =
            Window::new(title, width, height, opts).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps);

        let typed = CharQueue::default();
        window.set_input_callback(Box::new(CharSink(Rc::clone(&typed))));
        Ok(Self { window, typed })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Pump window events without drawing (nothing to show at zero size).
    pub fn update(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Current client size; the canvas follows it.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position, or None while the pointer is outside the window.
    /// Visual: Some(..) means the circles bloom and the ring cursor is drawn.
    pub fn pointer(&self) -> Option<Point> {
        self.window.get_mouse_pos(MouseMode::Discard).map(|(x, y)| Point::new(x, y))
    }

    pub fn left_click(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Vertical wheel delta for this frame (positive = scroll up).
    pub fn scroll_delta(&self) -> f32 {
        self.window.get_scroll_wheel().map_or(0.0, |(_, dy)| dy)
    }

    /// Ctrl (or Cmd on macOS) held down.
    pub fn modifier_down(&self) -> bool {
        [Key::LeftCtrl, Key::RightCtrl, Key::LeftSuper, Key::RightSuper]
            .into_iter()
            .any(|k| self.window.is_key_down(k))
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Like `pressed`, but auto-repeats while held (Backspace, Enter).
    pub fn pressed_repeat(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::Yes)
    }

    /// Take everything typed since the last call.
    pub fn drain_typed(&self) -> Vec<char> {
        std::mem::take(&mut *self.typed.borrow_mut())
    }
}

/* ---------- Canvas: base layer + overlay on the same pixel buffer ---------- */

/// `base` holds what sits under the circles (pattern + text); `screen` is what gets presented.
/// Clearing the overlay means restoring `screen` from `base`.
pub struct Canvas {
    base: FrameBuffer,
    screen: FrameBuffer,
    blender: Blender,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            base: FrameBuffer::new(width, height),
            screen: FrameBuffer::new(width, height),
            blender: Blender::new(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.base.resize(width, height);
        self.screen.resize(width, height);
    }

    pub fn base_mut(&mut self) -> &mut FrameBuffer {
        &mut self.base
    }

    pub fn screen(&self) -> &FrameBuffer {
        &self.screen
    }

    pub fn blender(&self) -> &Blender {
        &self.blender
    }

    /// Ring outline (custom cursor). `width` is the stroke thickness in pixels.
    pub fn stroke_ring(&mut self, center: Point, radius: f32, width: f32, color: Rgba) {
        let inner = (radius - width).max(0.0);
        let blender = &self.blender;
        for_each_covered(&mut self.screen, center, radius, |px, d| {
            let cov = coverage(radius, d) - coverage(inner, d);
            *px = blender.over(*px, color, cov);
        });
    }

    /// Scale every presented pixel by `factor` (parallax dim).
    pub fn dim(&mut self, factor: f32) {
        if factor >= 1.0 {
            return;
        }
        for px in &mut self.screen.pixels {
            *px = self.blender.dim(*px, factor);
        }
    }

    pub fn screen_mut(&mut self) -> &mut FrameBuffer {
        &mut self.screen
    }
}

impl Surface for Canvas {
    fn size(&self) -> (usize, usize) {
        (self.screen.width, self.screen.height)
    }

    fn clear(&mut self) {
        self.screen.pixels.copy_from_slice(&self.base.pixels);
    }

    /// Anti-aliased disc: one pixel of soft edge, alpha-blended in linear light.
    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba) {
        let blender = &self.blender;
        for_each_covered(&mut self.screen, center, radius, |px, d| {
            *px = blender.over(*px, color, coverage(radius, d));
        });
    }
}

/// Fraction of a pixel at distance `d` from the center that lies inside `radius`.
#[inline]
fn coverage(radius: f32, d: f32) -> f32 {
    if radius <= 0.0 { 0.0 } else { (radius + 0.5 - d).clamp(0.0, 1.0) }
}

/// Visit every in-bounds pixel of the disc's bounding box with its center distance.
/// Empty buffers, NaN centers and non-positive radii visit nothing.
fn for_each_covered(
    fb: &mut FrameBuffer,
    center: Point,
    radius: f32,
    mut f: impl FnMut(&mut u32, f32),
) {
    if fb.is_empty() || !(radius > 0.0) || !center.x.is_finite() || !center.y.is_finite() {
        return;
    }
    let (w, h) = (fb.width as f32, fb.height as f32);
    let x0 = (center.x - radius - 1.0).floor().clamp(0.0, w) as usize;
    let x1 = (center.x + radius + 1.0).ceil().clamp(0.0, w) as usize;
    let y0 = (center.y - radius - 1.0).floor().clamp(0.0, h) as usize;
    let y1 = (center.y + radius + 1.0).ceil().clamp(0.0, h) as usize;

    for y in y0..y1 {
        let row = y * fb.width;
        let dy = y as f32 + 0.5 - center.y;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - center.x;
            f(&mut fb.pixels[row + x], (dx * dx + dy * dy).sqrt());
        }
    }
}

/* ---------- Software drawing: pixels, lines, rectangles ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
/// Visual: the text caret.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Alpha-blend an axis-aligned rectangle, clipped to the buffer.
pub fn blend_rect(fb: &mut FrameBuffer, blender: &Blender, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
    if fb.is_empty() {
        return;
    }
    let (fw, fh) = (fb.width as f32, fb.height as f32);
    let x0 = x.max(0.0).min(fw) as usize;
    let x1 = (x + w).max(0.0).min(fw) as usize;
    let y0 = y.max(0.0).min(fh) as usize;
    let y1 = (y + h).max(0.0).min(fh) as usize;
    for yy in y0..y1 {
        let row = yy * fb.width;
        for px in &mut fb.pixels[row + x0..row + x1] {
            *px = blender.over(*px, color, 1.0);
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps onto uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        ';' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00100,0b01000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00100,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '"' => g!(0b01010,0b01010,0b01010,0b00000,0b00000,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '*' => g!(0b00000,0b10101,0b01110,0b11111,0b01110,0b10101,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),

        _ => None,
    }
}

/// Draw one glyph with each font pixel as a `scale`x`scale` block.
fn draw_char(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let (bx, by) = (x + rx * scale, y + ry as i32 * scale);
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(fb, bx + sx, by + sy, color);
                }
            }
        }
    }
}

/// Draw a HUD string using 1:1 5x7 glyphs with a 1-pixel black shadow for contrast.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char(fb, x + 1, y + 1, ch, 1, 0x00000000);
        draw_char(fb, x, y, ch, 1, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// Pixel size of one font dot so that a 6-dot cell roughly matches the style's advance.
pub fn glyph_scale(style: &TextStyle) -> i32 {
    ((style.advance() / 6.0).floor() as i32).max(1)
}

/// Draw the typed text on the same fixed-pitch grid the sampler assumes.
/// Returns the top-left corner of the cell right after the last character (the caret).
pub fn draw_text_block(fb: &mut FrameBuffer, text: &str, style: &TextStyle, color: u32) -> (i32, i32) {
    let scale = glyph_scale(style);
    // Center the 7-dot glyph on the sampler's vertical anchor (padding + 0.4 * font size).
    let glyph_top = style.font_size * 0.4 - 3.5 * scale as f32;
    let mut caret = (style.padding.round() as i32, (style.padding + glyph_top).round() as i32);

    for (row, line) in text.split('\n').enumerate() {
        let y = style.padding + row as f32 * style.line_height() + glyph_top;
        let mut cols = 0;
        for (col, ch) in line.chars().enumerate() {
            let x = style.padding + col as f32 * style.advance();
            draw_char(fb, x.round() as i32, y.round() as i32, ch, scale, color);
            cols = col + 1;
        }
        caret = ((style.padding + cols as f32 * style.advance()).round() as i32, y.round() as i32);
    }
    caret
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u32 = 0x00_FF_FF_FF;

    #[test]
    fn opaque_disc_paints_center_and_not_far_corners() {
        let mut canvas = Canvas::new(40, 40);
        canvas.fill_disc(Point::new(20.0, 20.0), 5.0, Rgba::white(1.0));
        assert_eq!(canvas.screen().get(20, 20), Some(WHITE));
        assert_eq!(canvas.screen().get(0, 0), Some(0));
        assert_eq!(canvas.screen().get(39, 39), Some(0));
    }

    #[test]
    fn clear_restores_the_base_layer() {
        let mut canvas = Canvas::new(8, 8);
        canvas.base_mut().pixels.fill(0x00_10_20_30);
        canvas.clear();
        canvas.fill_disc(Point::new(4.0, 4.0), 3.0, Rgba::white(1.0));
        assert_eq!(canvas.screen().get(4, 4), Some(WHITE));
        canvas.clear();
        assert!(canvas.screen().pixels.iter().all(|&p| p == 0x00_10_20_30));
    }

    #[test]
    fn zero_area_canvas_ignores_everything() {
        let mut canvas = Canvas::new(0, 0);
        assert_eq!(canvas.size(), (0, 0));
        canvas.clear();
        canvas.fill_disc(Point::new(0.0, 0.0), 10.0, Rgba::white(1.0));
        canvas.stroke_ring(Point::new(0.0, 0.0), 10.0, 2.0, Rgba::white(0.5));
        canvas.dim(0.5);
        assert!(canvas.screen().pixels.is_empty());
    }

    #[test]
    fn discs_clip_at_the_edges() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_disc(Point::new(-3.0, 12.0), 6.0, Rgba::white(1.0));
        canvas.fill_disc(Point::new(f32::NAN, 5.0), 6.0, Rgba::white(1.0));
        assert_eq!(canvas.screen().get(0, 9), Some(WHITE));
        assert_eq!(canvas.screen().get(9, 0), Some(0));
    }

    #[test]
    fn ring_leaves_its_middle_untouched() {
        let mut canvas = Canvas::new(40, 40);
        canvas.stroke_ring(Point::new(20.0, 20.0), 10.0, 2.0, Rgba::white(1.0));
        assert_eq!(canvas.screen().get(20, 20), Some(0));
        assert_eq!(canvas.screen().get(20, 11), Some(WHITE));
    }

    #[test]
    fn text_block_caret_follows_last_line() {
        let style = TextStyle { font_size: 20.0, padding: 10.0 };
        let mut fb = FrameBuffer::new(200, 100);
        let (cx, _) = draw_text_block(&mut fb, "AB\nC", &style, WHITE);
        assert_eq!(cx, 22);
        assert!(fb.pixels.iter().any(|&p| p == WHITE));
    }

    #[test]
    fn unknown_glyphs_draw_nothing() {
        let mut fb = FrameBuffer::new(20, 20);
        draw_text_5x7(&mut fb, 2, 2, "~", WHITE);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }
}
