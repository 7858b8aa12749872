// Text → approximate glyph anchors.
// Visual: one circle sits roughly on top of every visible character you typed.

use rand::Rng;

use crate::types::{Point, TextStyle};

/// One anchor per non-whitespace character, scanning rows top to bottom and
/// columns left to right. Positions use a fixed-pitch approximation of the
/// font (columns are counted in `char`s, not bytes) plus a little jitter so
/// the circles don't line up like a grid.
pub fn sample<R: Rng + ?Sized>(text: &str, style: &TextStyle, rng: &mut R) -> Vec<Point> {
    let fs = style.font_size;
    let mut out = Vec::with_capacity(text.len());

    for (row, line) in text.split('\n').enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            // Multiplying a [0,1) sample keeps a zero font size legal (no empty range).
            let jitter_x = rng.r#gen::<f32>() * fs * 0.3;
            let jitter_y = rng.r#gen::<f32>() * fs * 0.2;

            let x = style.padding + col as f32 * style.advance() + jitter_x;
            let y = style.padding + row as f32 * style.line_height() + fs * 0.4 + jitter_y;
            out.push(Point::new(x, y));
        }
    }

    out
}

/// Number of anchors `sample` will emit for `text`.
pub fn anchor_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}
