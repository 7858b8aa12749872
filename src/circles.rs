// The circle field: one soft white dot per typed character.
// Visual: hover the window and the dots bloom over the letters; leave it and they shrink away.

use rand::Rng;
use tracing::debug;

use crate::types::{Point, Rgba, Surface};

/// Per-frame change in radius (pixels) while growing or shrinking.
pub const RADIUS_STEP: f32 = 1.0;
/// Per-frame change in opacity while growing or shrinking.
pub const OPACITY_STEP: f32 = 0.05;
/// `max_radius` is drawn uniformly from this range when a circle is created.
pub const MAX_RADIUS_RANGE: std::ops::Range<f32> = 10.0..25.0;

/// One animated dot anchored at a glyph position.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub position: Point,
    radius: f32,
    max_radius: f32,
    opacity: f32,
    growing: bool,
}

impl Circle {
    /// A fresh circle: invisible, in the growing phase.
    pub fn new(position: Point, max_radius: f32) -> Self {
        Self { position, radius: 0.0, max_radius: max_radius.max(0.0), opacity: 0.0, growing: true }
    }

    pub fn spawn<R: Rng + ?Sized>(position: Point, rng: &mut R) -> Self {
        Self::new(position, rng.gen_range(MAX_RADIUS_RANGE))
    }

    pub fn radius(&self) -> f32 { self.radius }
    pub fn max_radius(&self) -> f32 { self.max_radius }
    pub fn opacity(&self) -> f32 { self.opacity }
    pub fn is_growing(&self) -> bool { self.growing }

    /// Advance one frame. `hovering` alone decides grow vs. shrink.
    pub fn tick(&mut self, hovering: bool) {
        if hovering {
            if !self.growing {
                return; // holds at full size
            }
            self.radius += RADIUS_STEP;
            self.opacity = (self.opacity + OPACITY_STEP).min(1.0);
            if self.radius >= self.max_radius {
                self.radius = self.max_radius;
                self.opacity = 1.0;
                self.growing = false;
            }
        } else {
            self.radius -= RADIUS_STEP;
            self.opacity = (self.opacity - OPACITY_STEP).max(0.0);
            if self.radius <= 0.0 {
                self.radius = 0.0;
                self.opacity = 0.0;
                // Fully gone: the next hover grows it again from scratch.
                self.growing = true;
            }
        }
    }

    /// Draw as a white disc at the current opacity; invisible circles are skipped.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.radius > 0.0 {
            surface.fill_disc(self.position, self.radius, Rgba::white(self.opacity));
        }
    }
}

/// Ordered list of circles; index i belongs to the i-th sampled glyph.
#[derive(Clone, Debug, Default)]
pub struct CircleField {
    circles: Vec<Circle>,
}

impl CircleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize { self.circles.len() }
    pub fn is_empty(&self) -> bool { self.circles.is_empty() }
    pub fn circles(&self) -> &[Circle] { &self.circles }

    /// Grow or shrink the list to `samples.len()` and move every survivor to its
    /// new anchor. Survivors keep radius/opacity/phase; positions jump, no easing.
    pub fn reconcile<R: Rng + ?Sized>(&mut self, samples: &[Point], rng: &mut R) {
        let before = self.circles.len();

        // Drop from the tail first so the survivors are exactly the old prefix.
        self.circles.truncate(samples.len());
        for (circle, &pos) in self.circles.iter_mut().zip(samples) {
            circle.position = pos;
        }
        for &pos in &samples[self.circles.len()..] {
            self.circles.push(Circle::spawn(pos, rng));
        }

        if before != self.circles.len() {
            debug!(before, after = self.circles.len(), "circle count changed");
        }
    }

    pub fn tick(&mut self, hovering: bool) {
        for c in &mut self.circles {
            c.tick(hovering);
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for c in &self.circles {
            c.render(surface);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    /// Records every draw call instead of touching pixels.
    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub size: (usize, usize),
        pub clears: usize,
        pub discs: Vec<(Point, f32, Rgba)>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (usize, usize) { self.size }
        fn clear(&mut self) {
            self.clears += 1;
            self.discs.clear();
        }
        fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba) {
            self.discs.push((center, radius, color));
        }
    }

    fn pts(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f32, 2.0 * i as f32)).collect()
    }

    #[test]
    fn reconcile_from_empty_spawns_fresh_circles() {
        let mut rng = StepRng::new(0, 0);
        let mut field = CircleField::new();
        field.reconcile(&pts(3), &mut rng);

        assert_eq!(field.len(), 3);
        for (i, c) in field.circles().iter().enumerate() {
            assert_eq!(c.position, Point::new(i as f32, 2.0 * i as f32));
            assert_eq!(c.radius(), 0.0);
            assert_eq!(c.opacity(), 0.0);
            assert!(c.is_growing());
            assert_eq!(c.max_radius(), 10.0); // all-zero stream picks the range start
        }
    }

    #[test]
    fn shrinking_keeps_the_prefix_and_its_state() {
        let mut rng = StepRng::new(0, 0);
        let mut field = CircleField::new();
        field.reconcile(&pts(5), &mut rng);
        for _ in 0..4 {
            field.tick(true);
        }
        let before: Vec<Circle> = field.circles()[..2].to_vec();

        let moved = vec![Point::new(50.0, 60.0), Point::new(70.0, 80.0)];
        field.reconcile(&moved, &mut rng);

        assert_eq!(field.len(), 2);
        for ((now, was), pos) in field.circles().iter().zip(&before).zip(&moved) {
            assert_eq!(now.position, *pos);
            assert_eq!(now.radius(), was.radius());
            assert_eq!(now.opacity(), was.opacity());
            assert_eq!(now.is_growing(), was.is_growing());
        }
    }

    #[test]
    fn reconcile_to_empty_clears_everything() {
        let mut rng = StepRng::new(0, 0);
        let mut field = CircleField::new();
        field.reconcile(&pts(4), &mut rng);
        field.reconcile(&[], &mut rng);
        assert!(field.is_empty());
    }

    #[test]
    fn full_growth_then_one_shrink_step() {
        let mut c = Circle::new(Point::default(), 10.0);
        for _ in 0..10 {
            c.tick(true);
        }
        assert_eq!(c.radius(), 10.0);
        assert_eq!(c.opacity(), 1.0);
        assert!(!c.is_growing());

        c.tick(true);
        assert_eq!(c.radius(), 10.0);

        c.tick(false);
        assert_eq!(c.radius(), 9.0);
        assert!((c.opacity() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn fractional_max_radius_is_hit_exactly() {
        let mut c = Circle::new(Point::default(), 12.5);
        for _ in 0..13 {
            c.tick(true);
        }
        assert_eq!(c.radius(), 12.5);
        assert_eq!(c.opacity(), 1.0);
    }

    #[test]
    fn fully_shrunk_circle_can_grow_again() {
        let mut c = Circle::new(Point::default(), 10.0);
        for _ in 0..10 {
            c.tick(true);
        }
        for _ in 0..10 {
            c.tick(false);
        }
        assert_eq!((c.radius(), c.opacity()), (0.0, 0.0));
        assert!(c.is_growing());

        c.tick(true);
        assert_eq!(c.radius(), 1.0);
    }

    #[test]
    fn interrupted_growth_resumes() {
        let mut c = Circle::new(Point::default(), 20.0);
        for _ in 0..5 {
            c.tick(true);
        }
        c.tick(false);
        assert!(c.is_growing());
        c.tick(true);
        assert_eq!(c.radius(), 5.0);
    }

    #[test]
    fn render_skips_invisible_circles() {
        let mut rng = StepRng::new(0, 0);
        let mut field = CircleField::new();
        field.reconcile(&pts(3), &mut rng);

        let mut surface = RecordingSurface::default();
        field.render(&mut surface);
        assert!(surface.discs.is_empty());

        field.tick(true);
        field.render(&mut surface);
        assert_eq!(surface.discs.len(), 3);
        let (_, r, color) = surface.discs[0];
        assert_eq!(r, 1.0);
        assert_eq!(color, Rgba::white(OPACITY_STEP));
    }
}
