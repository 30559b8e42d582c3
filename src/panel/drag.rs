use egui::{Pos2, Vec2};
use log::{trace, warn};

use super::geometry::{Offset, clamp_offset_for_size};
use super::session::{DragSession, DragSubject};
use super::{AssistantPanel, VisualMode};

impl AssistantPanel {
    /// Start a drag gesture on pointer-down. Ignored while another gesture
    /// session is active (single-pointer input never produces that).
    pub fn begin_drag(&mut self, subject: DragSubject, pointer: Pos2) {
        if self.drag.is_some() || self.resize.is_some() {
            warn!("drag start ignored: another gesture session is active");
            return;
        }

        self.suppress_click = false;
        self.drag = Some(DragSession {
            subject,
            pointer_start: pointer,
            offset_start: self.offset,
            size_start: self.drag_subject_size(subject),
            moved: false,
        });
        trace!("drag session start subject={subject:?} pointer={pointer:?}");
    }

    /// Track a pointer-move while dragging. The first move past the click
    /// slop undocks a docked pill so the drag follows the pointer right away.
    /// O(1) and idempotent for a repeated pointer position.
    pub fn drag_to(&mut self, pointer: Pos2, viewport: Option<Vec2>) {
        let Some(mut session) = self.drag else {
            return;
        };

        let delta = pointer - session.pointer_start;
        let slop = self.options.drag_click_slop;
        if !session.moved && (delta.x.abs() > slop || delta.y.abs() > slop) {
            session.moved = true;
            if session.subject == DragSubject::CollapsedControl && self.mode.is_docked() {
                self.mode = VisualMode::CollapsedFloating;
                trace!("drag undocked the collapsed pill");
            }
        }

        // Offsets are measured from the right/bottom edges, so screen-space
        // deltas apply with the opposite sign.
        let proposed = Offset::new(
            session.offset_start.right - delta.x,
            session.offset_start.bottom - delta.y,
        );
        self.offset = clamp_offset_for_size(
            proposed,
            session.size_start,
            self.drag_min_bottom(session.subject),
            self.options.min_margin,
            viewport,
        );
        self.drag = Some(session);
    }

    /// Finish the drag on pointer-up, deciding dock vs. float for the
    /// collapsed pill and refreshing the remembered open offset.
    pub fn end_drag(&mut self, pointer: Pos2, viewport: Option<Vec2>) {
        let Some(session) = self.drag.take() else {
            return;
        };

        let delta = pointer - session.pointer_start;
        let proposed = Offset::new(
            session.offset_start.right - delta.x,
            session.offset_start.bottom - delta.y,
        );
        let opts = &self.options;

        match session.subject {
            DragSubject::CollapsedControl => {
                let collapsed_bounds = clamp_offset_for_size(
                    proposed,
                    session.size_start,
                    opts.collapsed_min_bottom,
                    opts.min_margin,
                    viewport,
                );

                // Dock eagerly near the bottom edge: either the settled pill
                // position or the release pointer being close enough docks.
                let proximity_dock = collapsed_bounds.bottom <= opts.dock_snap_distance;
                let pointer_dock =
                    viewport.is_some_and(|viewport| pointer.y >= viewport.y - opts.dock_threshold);
                let should_dock = proximity_dock || pointer_dock;

                let next = if should_dock {
                    let dock_bounds = clamp_offset_for_size(
                        Offset::new(collapsed_bounds.right, 0.0),
                        opts.docked_collapsed_size,
                        0.0,
                        opts.min_margin,
                        viewport,
                    );
                    Offset::new(dock_bounds.right, 0.0)
                } else {
                    Offset::new(
                        collapsed_bounds.right,
                        collapsed_bounds.bottom.max(opts.collapsed_min_bottom),
                    )
                };

                // Re-anchor the remembered open offset so a later `open`
                // starts from where the pill settled, lifted to the open
                // panel's floor.
                self.last_open_offset = clamp_offset_for_size(
                    Offset::new(next.right, next.bottom.max(opts.open_min_bottom)),
                    self.panel_size,
                    opts.open_min_bottom,
                    opts.min_margin,
                    viewport,
                );
                self.mode = if should_dock {
                    VisualMode::CollapsedDocked
                } else {
                    VisualMode::CollapsedFloating
                };
                self.offset = next;
                trace!(
                    "drag session end: pill {} at {:?}",
                    if should_dock { "docked" } else { "floating" },
                    next
                );
            }
            DragSubject::Panel => {
                let bounds = clamp_offset_for_size(
                    proposed,
                    self.panel_size,
                    opts.open_min_bottom,
                    opts.min_margin,
                    viewport,
                );
                self.last_open_offset = bounds;
                self.offset = bounds;
                trace!("drag session end: panel at {bounds:?}");
            }
        }

        self.suppress_click = session.moved;
    }

    fn drag_subject_size(&self, subject: DragSubject) -> Vec2 {
        match subject {
            DragSubject::Panel => self.panel_size,
            DragSubject::CollapsedControl => self.options.collapsed_size(self.mode.is_docked()),
        }
    }

    fn drag_min_bottom(&self, subject: DragSubject) -> f32 {
        match subject {
            DragSubject::Panel => self.options.open_min_bottom,
            DragSubject::CollapsedControl => {
                if self.mode.is_docked() {
                    0.0
                } else {
                    self.options.collapsed_min_bottom
                }
            }
        }
    }
}
