// Gamma-correct "source over" blending with table lookups instead of powf.
// Visual: half-transparent white dots fade into the dark background without muddy halos.

use crate::types::Rgba;

pub struct Blender {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    // (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl Default for Blender {
    fn default() -> Self {
        Self::new()
    }
}

impl Blender {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    fn to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    fn to_srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Composite `src` (scaled by an extra `coverage` in [0,1]) over the packed
    /// 0x00RRGGBB pixel `dst`.
    #[inline]
    pub fn over(&self, dst: u32, src: Rgba, coverage: f32) -> u32 {
        let a = (src.alpha * coverage).clamp(0.0, 1.0);
        if a <= 0.0 {
            return dst;
        }
        let mix = |d: u32, s: u8| -> u32 {
            let dl = self.to_linear(d as u8);
            let sl = self.to_linear(s);
            self.to_srgb(dl + (sl - dl) * a) as u32
        };
        let r = mix((dst >> 16) & 0xFF, src.r);
        let g = mix((dst >> 8) & 0xFF, src.g);
        let b = mix(dst & 0xFF, src.b);
        (r << 16) | (g << 8) | b
    }

    /// Multiply every channel by `factor` in linear light (1 = unchanged, 0 = black).
    #[inline]
    pub fn dim(&self, px: u32, factor: f32) -> u32 {
        let f = factor.clamp(0.0, 1.0);
        let ch = |c: u32| self.to_srgb(self.to_linear(c as u8) * f) as u32;
        (ch((px >> 16) & 0xFF) << 16) | (ch((px >> 8) & 0xFF) << 8) | ch(px & 0xFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_white_replaces_pixel() {
        let b = Blender::new();
        assert_eq!(b.over(0x00_12_34_56, Rgba::white(1.0), 1.0), 0x00_FF_FF_FF);
    }

    #[test]
    fn transparent_source_is_a_no_op() {
        let b = Blender::new();
        assert_eq!(b.over(0x00_12_34_56, Rgba::white(0.0), 1.0), 0x00_12_34_56);
        assert_eq!(b.over(0x00_12_34_56, Rgba::white(1.0), 0.0), 0x00_12_34_56);
    }

    #[test]
    fn half_white_over_black_is_brighter_than_naive_mid_gray() {
        let b = Blender::new();
        let px = b.over(0, Rgba::white(0.5), 1.0);
        let r = (px >> 16) & 0xFF;
        assert!(r > 128, "linear-light mix should land above sRGB 128, got {r}");
    }

    #[test]
    fn dim_bounds() {
        let b = Blender::new();
        assert_eq!(b.dim(0x00_AB_CD_EF, 1.0), 0x00_AB_CD_EF);
        assert_eq!(b.dim(0x00_AB_CD_EF, 0.0), 0);
    }
}
