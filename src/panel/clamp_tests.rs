use egui::{Vec2, vec2};

use super::geometry::{Offset, clamp_offset_for_size};

const MIN_MARGIN: f32 = 16.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0xA55E_7A55_E7A5_5E7A)
    }

    fn next_u64(&mut self) -> u64 {
        // Simple LCG: deterministic, fast, no dependency.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005u64)
            .wrapping_add(1442695040888963407u64);
        self.0
    }

    fn next_f32_in(&mut self, min: f32, max: f32) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        min + unit * (max - min)
    }
}

fn random_case(rng: &mut Rng) -> (Offset, Vec2, f32, Vec2) {
    let proposed = Offset::new(
        rng.next_f32_in(-500.0, 3000.0),
        rng.next_f32_in(-500.0, 3000.0),
    );
    let size = vec2(rng.next_f32_in(50.0, 900.0), rng.next_f32_in(50.0, 900.0));
    let min_bottom = [0.0, 8.0, 24.0][(rng.next_u64() % 3) as usize];
    let viewport = vec2(
        rng.next_f32_in(300.0, 2000.0),
        rng.next_f32_in(300.0, 2000.0),
    );
    (proposed, size, min_bottom, viewport)
}

#[test]
fn clamp_is_idempotent() {
    let mut rng = Rng::new(1);
    for _ in 0..1000 {
        let (proposed, size, min_bottom, viewport) = random_case(&mut rng);
        let once = clamp_offset_for_size(proposed, size, min_bottom, MIN_MARGIN, Some(viewport));
        let twice = clamp_offset_for_size(once, size, min_bottom, MIN_MARGIN, Some(viewport));
        assert_eq!(once, twice, "clamping a clamped offset must not move it");
    }
}

#[test]
fn clamp_output_is_contained_or_pinned() {
    let mut rng = Rng::new(2);
    for _ in 0..1000 {
        let (proposed, size, min_bottom, viewport) = random_case(&mut rng);
        let out = clamp_offset_for_size(proposed, size, min_bottom, MIN_MARGIN, Some(viewport));

        assert!(out.right >= MIN_MARGIN, "right below the margin: {out:?}");
        assert!(out.bottom >= min_bottom, "bottom below its floor: {out:?}");

        if viewport.x - size.x - MIN_MARGIN >= MIN_MARGIN {
            assert!(
                out.right + size.x <= viewport.x - MIN_MARGIN + 1e-3,
                "panel sticks out horizontally: {out:?} size={size:?} viewport={viewport:?}"
            );
        } else {
            assert_eq!(out.right, MIN_MARGIN, "oversized panel must pin right");
        }
        if viewport.y - size.y - MIN_MARGIN >= min_bottom {
            assert!(
                out.bottom + size.y <= viewport.y - MIN_MARGIN + 1e-3,
                "panel sticks out vertically: {out:?} size={size:?} viewport={viewport:?}"
            );
        } else {
            assert_eq!(out.bottom, min_bottom, "oversized panel must pin bottom");
        }
    }
}

#[test]
fn oversized_panel_pins_at_the_margin() {
    let out = clamp_offset_for_size(
        Offset::new(400.0, 400.0),
        vec2(2000.0, 2000.0),
        24.0,
        MIN_MARGIN,
        Some(vec2(1280.0, 800.0)),
    );
    assert_eq!(out, Offset::new(MIN_MARGIN, 24.0));
}

#[test]
fn headless_mode_enforces_only_the_lower_bounds() {
    let size = vec2(420.0, 520.0);

    let lifted = clamp_offset_for_size(Offset::new(-100.0, -100.0), size, 8.0, MIN_MARGIN, None);
    assert_eq!(lifted, Offset::new(MIN_MARGIN, 8.0));

    let unbounded = clamp_offset_for_size(Offset::new(5000.0, 5000.0), size, 8.0, MIN_MARGIN, None);
    assert_eq!(unbounded, Offset::new(5000.0, 5000.0), "no upper bound without a viewport");
}
