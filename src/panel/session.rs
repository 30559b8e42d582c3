use egui::{CursorIcon, Pos2, Vec2};

use super::geometry::Offset;

/// What a drag gesture grabbed: the open panel's header or the collapsed pill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragSubject {
    Panel,
    CollapsedControl,
}

/// Snapshot taken on pointer-down for a drag gesture.
///
/// Created at gesture start and dropped on release; the panel owns at most
/// one of these at a time, so the current gesture is fully inspectable.
#[derive(Clone, Copy, Debug)]
pub(super) struct DragSession {
    pub subject: DragSubject,
    pub pointer_start: Pos2,
    pub offset_start: Offset,
    pub size_start: Vec2,
    /// Set once the pointer travels past the click slop; suppresses the
    /// synthetic click that follows the release.
    pub moved: bool,
}

/// Snapshot taken on pointer-down on one of the eight resize hit zones.
#[derive(Clone, Copy, Debug)]
pub(super) struct ResizeSession {
    pub pointer_start: Pos2,
    pub size_start: Vec2,
    pub offset_start: Offset,
    pub direction: ResizeDirection,
}

/// The eight edge/corner resize hit zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    pub fn includes_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn includes_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn includes_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn includes_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            Self::Top | Self::Bottom => CursorIcon::ResizeVertical,
            Self::Left | Self::Right => CursorIcon::ResizeHorizontal,
            Self::TopLeft | Self::BottomRight => CursorIcon::ResizeNwSe,
            Self::TopRight | Self::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }
}
