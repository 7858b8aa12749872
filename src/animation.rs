// The playground core: sampler + circle field + the per-frame driver.
// Everything runs on the one UI thread. Input handlers mutate the field between
// frames; the next frame simply sees the latest list.

use rand::Rng;
use tracing::info;

use crate::circles::CircleField;
use crate::sampler;
use crate::types::{Surface, TextStyle};

/// The repeating frame callback. Owned by the playground; once stopped it
/// never reschedules and frames become no-ops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FrameLoop {
    #[default]
    Idle,
    Running { frames: u64 },
    Stopped,
}

pub struct Playground<R> {
    style: TextStyle,
    field: CircleField,
    hovering: bool,
    animation: FrameLoop,
    rng: R,
}

impl<R: Rng> Playground<R> {
    /// `rng` drives glyph jitter and circle sizes; pass a seeded or mock RNG for reproducible output.
    pub fn new(style: TextStyle, rng: R) -> Self {
        Self { style, field: CircleField::new(), hovering: false, animation: FrameLoop::Idle, rng }
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn field(&self) -> &CircleField {
        &self.field
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Text region changed: resample anchors and resize the circle list to match.
    pub fn on_text_changed(&mut self, text: &str) {
        let anchors = sampler::sample(text, &self.style, &mut self.rng);
        self.field.reconcile(&anchors, &mut self.rng);
    }

    pub fn on_pointer_enter(&mut self) {
        self.hovering = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovering = false;
    }

    /// Convenience for hosts that poll the pointer every frame.
    pub fn set_hovering(&mut self, hovering: bool) {
        if hovering {
            self.on_pointer_enter();
        } else {
            self.on_pointer_leave();
        }
    }

    pub fn start(&mut self) {
        if !matches!(self.animation, FrameLoop::Running { .. }) {
            info!("animation started");
            self.animation = FrameLoop::Running { frames: 0 };
        }
    }

    /// Teardown: release the frame callback. Safe to call more than once.
    pub fn stop(&mut self) {
        if let FrameLoop::Running { frames } = self.animation {
            info!(frames, "animation stopped");
        }
        self.animation = FrameLoop::Stopped;
    }

    pub fn animation(&self) -> FrameLoop {
        self.animation
    }

    /// One display refresh: clear, advance every circle, repaint.
    /// Returns whether the loop wants another frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let FrameLoop::Running { frames } = &mut self.animation else {
            return false;
        };
        *frames += 1;

        surface.clear();
        self.field.tick(self.hovering);
        self.field.render(surface);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circles::tests::RecordingSurface;
    use rand::rngs::mock::StepRng;

    fn playground() -> Playground<StepRng> {
        Playground::new(TextStyle { font_size: 20.0, padding: 10.0 }, StepRng::new(0, 0))
    }

    #[test]
    fn frames_do_nothing_until_started() {
        let mut pg = playground();
        let mut surface = RecordingSurface::default();
        assert!(!pg.frame(&mut surface));
        assert_eq!(surface.clears, 0);

        pg.start();
        assert!(pg.frame(&mut surface));
        assert_eq!(surface.clears, 1);
        assert_eq!(pg.animation(), FrameLoop::Running { frames: 1 });
    }

    #[test]
    fn stopped_loop_never_reschedules() {
        let mut pg = playground();
        let mut surface = RecordingSurface::default();
        pg.start();
        pg.stop();
        pg.stop();
        assert!(!pg.frame(&mut surface));
        assert_eq!(pg.animation(), FrameLoop::Stopped);
    }

    #[test]
    fn text_changes_resize_the_field() {
        let mut pg = playground();
        pg.on_text_changed("hello world");
        assert_eq!(pg.field().len(), 10);
        pg.on_text_changed("hi");
        assert_eq!(pg.field().len(), 2);
        pg.on_text_changed("");
        assert!(pg.field().is_empty());
    }

    #[test]
    fn hover_drives_growth_and_drawing() {
        let mut pg = playground();
        let mut surface = RecordingSurface { size: (100, 100), ..Default::default() };
        pg.on_text_changed("ab");
        pg.start();

        pg.frame(&mut surface);
        assert!(surface.discs.is_empty());

        pg.on_pointer_enter();
        for _ in 0..3 {
            pg.frame(&mut surface);
        }
        assert_eq!(surface.discs.len(), 2);
        assert_eq!(surface.discs[0].1, 3.0);

        pg.on_pointer_leave();
        for _ in 0..3 {
            pg.frame(&mut surface);
        }
        assert!(surface.discs.is_empty());
    }

    #[test]
    fn edits_between_frames_keep_grown_state() {
        let mut pg = playground();
        let mut surface = RecordingSurface::default();
        pg.on_text_changed("a");
        pg.start();
        pg.set_hovering(true);
        for _ in 0..4 {
            pg.frame(&mut surface);
        }
        pg.on_text_changed("ab");
        pg.frame(&mut surface);

        let radii: Vec<f32> = pg.field().circles().iter().map(|c| c.radius()).collect();
        assert_eq!(radii, vec![5.0, 1.0]);
    }
}
