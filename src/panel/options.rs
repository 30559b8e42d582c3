use egui::Vec2;

/// Options for [`super::AssistantPanel`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AssistantPanelOptions {
    /// Minimum gap (in points) kept between the panel and the left, right and
    /// top viewport edges.
    pub min_margin: f32,

    /// Lowest allowed bottom offset for the collapsed pill while it floats.
    pub collapsed_min_bottom: f32,

    /// Lowest allowed bottom offset for the open panel.
    pub open_min_bottom: f32,

    /// Releasing a collapsed-pill drag with the pointer within this distance
    /// of the viewport's bottom edge docks the pill.
    pub dock_threshold: f32,

    /// Releasing a collapsed-pill drag with its clamped bottom offset at or
    /// below this value also docks the pill.
    ///
    /// Both conditions are checked and either one is enough: near the bottom
    /// edge we dock eagerly.
    pub dock_snap_distance: f32,

    /// Pill size while docked flush with the bottom edge.
    pub docked_collapsed_size: Vec2,

    /// Pill size while floating.
    pub floating_collapsed_size: Vec2,

    /// Size of the open panel when it is first shown.
    pub initial_panel_size: Vec2,

    /// Smallest size the open panel can be resized to.
    pub min_panel_size: Vec2,

    /// Largest size the open panel can be resized to. The viewport may impose
    /// a stricter limit.
    pub max_panel_size: Vec2,

    /// Pointer travel (in points, per axis) below which a press/release on
    /// the collapsed pill counts as a click rather than a drag.
    pub drag_click_slop: f32,

    /// Thickness of the edge resize hit zones.
    pub resize_edge_thickness: f32,

    /// Side length of the corner resize hit zones.
    pub resize_corner_size: f32,

    /// Title shown in the header and on the collapsed pill.
    pub title: String,

    /// Placeholder text for the message input.
    pub input_hint: String,

    /// Text shown while the conversation log is empty.
    pub empty_state_text: String,

    /// Language hint forwarded with transcription requests.
    pub transcription_language: Option<String>,
}

impl Default for AssistantPanelOptions {
    fn default() -> Self {
        Self {
            min_margin: 16.0,
            collapsed_min_bottom: 8.0,
            open_min_bottom: 24.0,
            dock_threshold: 120.0,
            dock_snap_distance: 72.0,
            docked_collapsed_size: Vec2::new(176.0, 58.0),
            floating_collapsed_size: Vec2::new(188.0, 74.0),
            initial_panel_size: Vec2::new(420.0, 520.0),
            min_panel_size: Vec2::new(408.0, 400.0),
            max_panel_size: Vec2::new(720.0, 720.0),
            drag_click_slop: 2.0,
            resize_edge_thickness: 6.0,
            resize_corner_size: 14.0,
            title: "Assistant".to_owned(),
            input_hint: "Ask anything…".to_owned(),
            empty_state_text: "Ask for help with anything in this workspace.".to_owned(),
            transcription_language: Some("en-US".to_owned()),
        }
    }
}

impl AssistantPanelOptions {
    /// Pill size for the given dock state.
    pub fn collapsed_size(&self, docked: bool) -> Vec2 {
        if docked {
            self.docked_collapsed_size
        } else {
            self.floating_collapsed_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_panel_sizes_are_ordered() {
        let opt = AssistantPanelOptions::default();
        assert!(
            opt.min_panel_size.x <= opt.initial_panel_size.x
                && opt.initial_panel_size.x <= opt.max_panel_size.x,
            "initial width must sit between min and max"
        );
        assert!(
            opt.min_panel_size.y <= opt.initial_panel_size.y
                && opt.initial_panel_size.y <= opt.max_panel_size.y,
            "initial height must sit between min and max"
        );
    }

    #[test]
    fn collapsed_size_follows_dock_state() {
        let opt = AssistantPanelOptions::default();
        assert_eq!(opt.collapsed_size(true), opt.docked_collapsed_size);
        assert_eq!(opt.collapsed_size(false), opt.floating_collapsed_size);
    }
}
