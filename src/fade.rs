// Parallax dim: scrolling "down" past the main section fades it to half brightness.

/// Pixels scrolled per wheel notch.
const WHEEL_STEP: f32 = 40.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollFade {
    scrolled: f32,
    section_height: f32,
}

impl ScrollFade {
    pub fn new(section_height: f32) -> Self {
        Self { scrolled: 0.0, section_height: section_height.max(0.0) }
    }

    /// The window was resized; keep the offset inside the new section.
    pub fn set_section_height(&mut self, height: f32) {
        self.section_height = height.max(0.0);
        self.scrolled = self.scrolled.min(self.section_height);
    }

    /// Feed a wheel delta (positive = up, which scrolls back toward the top).
    pub fn scroll(&mut self, wheel_delta: f32) {
        if !wheel_delta.is_finite() {
            return;
        }
        self.scrolled = (self.scrolled - wheel_delta * WHEEL_STEP).clamp(0.0, self.section_height);
    }

    pub fn scrolled(&self) -> f32 {
        self.scrolled
    }

    /// 1 at the top, 0.5 once the whole section has scrolled by.
    pub fn opacity(&self) -> f32 {
        if self.section_height <= 0.0 {
            return 1.0;
        }
        1.0 - (self.scrolled.min(self.section_height) / self.section_height) * 0.5
    }
}
