use egui::{Pos2, Vec2};
use log::{trace, warn};

use super::geometry::{Offset, clamp_offset_for_size};
use super::session::{ResizeDirection, ResizeSession};
use super::AssistantPanel;

impl AssistantPanel {
    /// Start a resize gesture on pointer-down on one of the eight hit zones.
    /// Only meaningful while the panel is open; ignored while another gesture
    /// session is active.
    pub fn begin_resize(&mut self, direction: ResizeDirection, pointer: Pos2) {
        if !self.mode.is_open() {
            return;
        }
        if self.drag.is_some() || self.resize.is_some() {
            warn!("resize start ignored: another gesture session is active");
            return;
        }

        self.resize = Some(ResizeSession {
            pointer_start: pointer,
            size_start: self.panel_size,
            offset_start: self.offset,
            direction,
        });
        trace!("resize session start direction={direction:?} pointer={pointer:?}");
    }

    /// Track a pointer-move while resizing.
    ///
    /// Each edge included in the session's direction is adjusted on its own,
    /// anchoring the opposite edge: moving the left edge keeps the right edge
    /// fixed by growing/shrinking the width, and similarly for the top. Width
    /// and height honour both the configured min/max and the viewport-derived
    /// maximum, whichever is stricter. A no-op without a viewport.
    pub fn resize_to(&mut self, pointer: Pos2, viewport: Option<Vec2>) {
        let Some(session) = self.resize else {
            return;
        };
        let Some(viewport) = viewport else {
            return;
        };

        let opts = &self.options;
        let delta = pointer - session.pointer_start;

        let left_start = viewport.x - session.offset_start.right - session.size_start.x;
        let top_start = viewport.y - session.offset_start.bottom - session.size_start.y;

        let mut left = left_start;
        let mut top = top_start;
        let mut width = session.size_start.x;
        let mut height = session.size_start.y;

        if session.direction.includes_left() {
            let right_edge = left_start + session.size_start.x;
            let min_left = (right_edge - opts.max_panel_size.x).max(opts.min_margin);
            let max_left = (right_edge - opts.min_panel_size.x).max(opts.min_margin);
            let new_left = (left_start + delta.x).clamp(min_left, max_left);
            width = session.size_start.x + (left_start - new_left);
            left = new_left;
        }

        if session.direction.includes_right() {
            let max_width = opts
                .max_panel_size
                .x
                .min(viewport.x - left - opts.min_margin);
            width = (width + delta.x).max(opts.min_panel_size.x).min(max_width);
        }

        if session.direction.includes_top() {
            let bottom_edge = top_start + session.size_start.y;
            let min_top = (bottom_edge - opts.max_panel_size.y).max(opts.min_margin);
            let max_top = (bottom_edge - opts.min_panel_size.y).max(opts.min_margin);
            let new_top = (top_start + delta.y).clamp(min_top, max_top);
            height = session.size_start.y + (top_start - new_top);
            top = new_top;
        }

        if session.direction.includes_bottom() {
            let max_height = opts
                .max_panel_size
                .y
                .min(viewport.y - top - opts.open_min_bottom);
            height = (height + delta.y).max(opts.min_panel_size.y).min(max_height);
        }

        let size = Vec2::new(width, height);
        let raw = Offset::new(viewport.x - left - width, viewport.y - top - height);
        let clamped = clamp_offset_for_size(
            raw,
            size,
            opts.open_min_bottom,
            opts.min_margin,
            Some(viewport),
        );

        self.panel_size = size;
        self.offset = clamped;
        self.last_open_offset = clamped;
    }

    /// Finish the resize on pointer-up. The state committed by the last move
    /// is already final.
    pub fn end_resize(&mut self) {
        if self.resize.take().is_some() {
            trace!("resize session end size={:?}", self.panel_size);
        }
    }
}
