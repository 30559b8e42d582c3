use egui::{Pos2, Rect, Vec2};

/// Panel position expressed as distances (in points) from the viewport's
/// right and bottom edges.
///
/// The panel is anchored to the bottom-right corner, so a growing viewport
/// keeps the panel near that corner without any re-layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Offset {
    pub right: f32,
    pub bottom: f32,
}

impl Offset {
    pub const fn new(right: f32, bottom: f32) -> Self {
        Self { right, bottom }
    }
}

/// Clamp a proposed offset so a rectangle of `size` stays inside the viewport
/// with a `min_margin` gap on the right/top/left and at least `min_bottom`
/// above the bottom edge.
///
/// If the rectangle is larger than the viewport minus margins, the upper
/// bound collapses onto the lower bound and the offset pins at the margin.
/// Without a viewport (headless / pre-render) only the lower bounds are
/// enforced.
pub(crate) fn clamp_offset_for_size(
    proposed: Offset,
    size: Vec2,
    min_bottom: f32,
    min_margin: f32,
    viewport: Option<Vec2>,
) -> Offset {
    let Some(viewport) = viewport else {
        return Offset {
            right: proposed.right.max(min_margin),
            bottom: proposed.bottom.max(min_bottom),
        };
    };

    let max_right = (viewport.x - size.x - min_margin).max(min_margin);
    let max_bottom = (viewport.y - size.y - min_margin).max(min_bottom);

    Offset {
        right: proposed.right.clamp(min_margin, max_right),
        bottom: proposed.bottom.clamp(min_bottom, max_bottom),
    }
}

/// Screen-space rectangle for a panel of `size` at `offset`, given the
/// current viewport size (origin at the top-left, as egui uses).
pub(crate) fn rect_for_offset(offset: Offset, size: Vec2, viewport: Vec2) -> Rect {
    let min = Pos2::new(
        viewport.x - offset.right - size.x,
        viewport.y - offset.bottom - size.y,
    );
    Rect::from_min_size(min, size)
}
