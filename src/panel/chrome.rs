use egui::{
    Align, Align2, Area, Button, Context, CornerRadius, CursorIcon, FontId, Id, Key, Layout, Order,
    Rect, ScrollArea, Sense, StrokeKind, TextEdit, UiBuilder, Vec2, pos2, vec2,
};

use super::AssistantPanel;
use super::geometry::rect_for_offset;
use super::session::{DragSubject, ResizeDirection};
use crate::conversation::{Role, SuggestedAction};
use crate::host::AssistantHost;

impl AssistantPanel {
    /// Show the panel. Call once per frame from your `eframe::App::update`
    /// (or equivalent).
    ///
    /// The viewport size is queried fresh every frame so gestures stay
    /// correct across window resizes.
    pub fn ui(&mut self, ctx: &Context, host: &mut dyn AssistantHost) {
        if self.poll() {
            ctx.request_repaint();
        }

        let viewport = ctx.screen_rect().size();
        if self.mode.is_open() {
            self.ui_open(ctx, host, viewport);
        } else {
            self.ui_collapsed(ctx, viewport);
        }
    }

    fn ui_collapsed(&mut self, ctx: &Context, viewport: Vec2) {
        let docked = self.mode.is_docked();
        let size = self.options.collapsed_size(docked);
        let rect = rect_for_offset(self.offset, size, viewport);

        Area::new(Id::new("assistant_panel_collapsed"))
            .order(Order::Foreground)
            .fixed_pos(rect.min)
            .interactable(true)
            .show(ctx, |ui| {
                let (alloc_rect, resp) = ui.allocate_exact_size(size, Sense::click_and_drag());

                let fill = ui.visuals().window_fill();
                let stroke = ui.visuals().widgets.noninteractive.bg_stroke;
                let text_color = ui.visuals().text_color();
                // Docked: a tab flush with the bottom edge. Floating: a pill.
                let rounding = if docked {
                    CornerRadius {
                        nw: 16,
                        ne: 16,
                        sw: 0,
                        se: 0,
                    }
                } else {
                    CornerRadius::same(24)
                };
                ui.painter().rect_filled(alloc_rect, rounding, fill);
                ui.painter()
                    .rect_stroke(alloc_rect, rounding, stroke, StrokeKind::Inside);
                ui.painter().text(
                    alloc_rect.center(),
                    Align2::CENTER_CENTER,
                    &self.options.title,
                    FontId::proportional(14.0),
                    text_color,
                );

                if resp.drag_started()
                    && let Some(pointer) = ui.ctx().input(|i| i.pointer.latest_pos())
                {
                    self.begin_drag(DragSubject::CollapsedControl, pointer);
                }

                let mut drag_released = false;
                if self.is_dragging() {
                    let pointer = ui.ctx().input(|i| i.pointer.latest_pos());
                    if let Some(pointer) = pointer {
                        self.drag_to(pointer, Some(viewport));
                    }
                    if ui.ctx().input(|i| i.pointer.any_released()) {
                        self.end_drag(pointer.unwrap_or(alloc_rect.center()), Some(viewport));
                        drag_released = true;
                    }
                    ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
                } else if resp.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::Grab);
                }

                if resp.clicked() {
                    if !self.take_suppressed_click() {
                        self.open(Some(viewport));
                    }
                } else if drag_released {
                    // A pointer that travelled past egui's own click threshold
                    // never reports `clicked`, so the flag set by `end_drag`
                    // would outlive this gesture and swallow the next click.
                    self.take_suppressed_click();
                }
            });
    }

    fn ui_open(&mut self, ctx: &Context, host: &mut dyn AssistantHost, viewport: Vec2) {
        let recording = host.voice_capture().is_some_and(|v| v.is_recording());
        let voice_supported = host.voice_capture().is_some_and(|v| v.is_supported());

        let rect = rect_for_offset(self.offset, self.panel_size, viewport);

        let mut collapse_clicked = false;
        let mut close_clicked = false;
        let mut send_clicked = false;
        let mut voice_clicked = false;
        let mut activated: Option<SuggestedAction> = None;

        Area::new(Id::new("assistant_panel_open"))
            .order(Order::Foreground)
            .fixed_pos(rect.min)
            .interactable(true)
            .show(ctx, |ui| {
                let (alloc_rect, _resp) =
                    ui.allocate_exact_size(self.panel_size, Sense::hover());

                let fill = ui.visuals().window_fill();
                let stroke = ui.visuals().widgets.noninteractive.bg_stroke;
                let rounding = CornerRadius::same(12);
                ui.painter().rect_filled(alloc_rect, rounding, fill);
                ui.painter()
                    .rect_stroke(alloc_rect, rounding, stroke, StrokeKind::Inside);

                let header_height = 40.0;
                let footer_height = 56.0;
                let header_rect = Rect::from_min_size(
                    alloc_rect.min,
                    vec2(alloc_rect.width(), header_height),
                );

                // Header is the drag handle.
                let header_resp = ui.interact(
                    header_rect,
                    ui.id().with("assistant_header"),
                    Sense::click_and_drag(),
                );
                if header_resp.drag_started()
                    && let Some(pointer) = ui.ctx().input(|i| i.pointer.latest_pos())
                {
                    self.begin_drag(DragSubject::Panel, pointer);
                }
                if self.is_dragging() {
                    let pointer = ui.ctx().input(|i| i.pointer.latest_pos());
                    if let Some(pointer) = pointer {
                        self.drag_to(pointer, Some(viewport));
                    }
                    if ui.ctx().input(|i| i.pointer.any_released()) {
                        self.end_drag(pointer.unwrap_or(header_rect.center()), Some(viewport));
                        // The header has no click action, so the flag would go
                        // stale and block a later click on the collapsed pill.
                        self.take_suppressed_click();
                    }
                    ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
                } else if header_resp.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::Grab);
                }

                {
                    let mut header_ui = ui.new_child(
                        UiBuilder::new().max_rect(header_rect.shrink2(vec2(12.0, 6.0))),
                    );
                    header_ui.style_mut().interaction.selectable_labels = false;
                    header_ui.horizontal_centered(|ui| {
                        ui.label(egui::RichText::new(&self.options.title).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("✕").clicked() {
                                close_clicked = true;
                            }
                            if ui.button("Snap to bottom").clicked() {
                                collapse_clicked = true;
                            }
                        });
                    });
                }
                ui.painter()
                    .hline(alloc_rect.x_range(), header_rect.max.y, stroke);

                let content_rect = Rect::from_min_max(
                    pos2(alloc_rect.min.x, header_rect.max.y),
                    pos2(alloc_rect.max.x, alloc_rect.max.y - footer_height),
                );
                {
                    // Bottom-up so the error row and suggested actions sit
                    // just above the input, with the log filling the rest.
                    let mut content_ui = ui.new_child(
                        UiBuilder::new()
                            .max_rect(content_rect.shrink(12.0))
                            .layout(Layout::bottom_up(Align::Min)),
                    );
                    content_ui.set_clip_rect(content_ui.clip_rect().intersect(content_rect));

                    if let Some(error) = &self.error {
                        let color = content_ui.visuals().error_fg_color;
                        content_ui.colored_label(color, error);
                    }
                    if !self.suggested.is_empty() {
                        content_ui.horizontal_wrapped(|ui| {
                            for action in &self.suggested {
                                if ui.small_button(&action.label).clicked() {
                                    activated = Some(action.clone());
                                }
                            }
                        });
                    }

                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .show(&mut content_ui, |ui| {
                            if self.conversation.is_empty() {
                                ui.weak(&self.options.empty_state_text);
                            }
                            for entry in &self.conversation {
                                let align = if entry.message.role == Role::User {
                                    Align::Max
                                } else {
                                    Align::Min
                                };
                                ui.with_layout(Layout::top_down(align), |ui| {
                                    ui.label(&entry.message.content);
                                });
                            }
                        });
                }

                let footer_rect = Rect::from_min_max(
                    pos2(alloc_rect.min.x, alloc_rect.max.y - footer_height),
                    alloc_rect.max,
                );
                ui.painter()
                    .hline(alloc_rect.x_range(), footer_rect.min.y, stroke);
                {
                    let mut footer_ui = ui.new_child(
                        UiBuilder::new().max_rect(footer_rect.shrink2(vec2(12.0, 8.0))),
                    );
                    footer_ui.horizontal_centered(|ui| {
                        let input_resp = ui.add(
                            TextEdit::singleline(&mut self.input)
                                .hint_text(self.options.input_hint.as_str())
                                .desired_width(ui.available_width() - 120.0),
                        );
                        if input_resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                            send_clicked = true;
                        }

                        let voice_label = if self.is_transcribing() {
                            "…"
                        } else if recording {
                            "■"
                        } else {
                            "🎙"
                        };
                        if ui
                            .add_enabled(
                                voice_supported && !self.is_transcribing(),
                                Button::new(voice_label),
                            )
                            .clicked()
                        {
                            voice_clicked = true;
                        }

                        let send_label = if self.is_loading() { "…" } else { "Send" };
                        if ui
                            .add_enabled(!self.is_loading(), Button::new(send_label))
                            .clicked()
                        {
                            send_clicked = true;
                        }
                    });
                }

                for direction in ResizeDirection::ALL {
                    let zone = resize_zone_rect(
                        direction,
                        alloc_rect,
                        self.options.resize_edge_thickness,
                        self.options.resize_corner_size,
                    );
                    let zone_resp = ui.interact(
                        zone,
                        ui.id().with(("assistant_resize", direction)),
                        Sense::drag(),
                    );
                    if zone_resp.hovered() || zone_resp.dragged() {
                        ui.ctx().set_cursor_icon(direction.cursor_icon());
                    }
                    if zone_resp.drag_started()
                        && let Some(pointer) = ui.ctx().input(|i| i.pointer.latest_pos())
                    {
                        self.begin_resize(direction, pointer);
                    }
                }
                if self.is_resizing() {
                    if let Some(pointer) = ui.ctx().input(|i| i.pointer.latest_pos()) {
                        self.resize_to(pointer, Some(viewport));
                    }
                    if ui.ctx().input(|i| i.pointer.any_released()) {
                        self.end_resize();
                    }
                }
            });

        if collapse_clicked {
            self.collapse(Some(viewport));
        }
        if close_clicked {
            self.close(Some(viewport));
            if let Some(voice) = host.voice_capture() {
                voice.reset();
            }
        }
        if send_clicked {
            self.submit_input(host, Some(viewport));
        }
        if voice_clicked {
            self.toggle_voice(host);
        }
        if let Some(action) = activated {
            self.activate_action(host, &action);
        }
    }
}

fn resize_zone_rect(direction: ResizeDirection, rect: Rect, edge: f32, corner: f32) -> Rect {
    let edge_width = (rect.width() - 2.0 * corner).max(0.0);
    let edge_height = (rect.height() - 2.0 * corner).max(0.0);
    match direction {
        ResizeDirection::Top => Rect::from_min_size(
            pos2(rect.min.x + corner, rect.min.y),
            vec2(edge_width, edge),
        ),
        ResizeDirection::Bottom => Rect::from_min_size(
            pos2(rect.min.x + corner, rect.max.y - edge),
            vec2(edge_width, edge),
        ),
        ResizeDirection::Left => Rect::from_min_size(
            pos2(rect.min.x, rect.min.y + corner),
            vec2(edge, edge_height),
        ),
        ResizeDirection::Right => Rect::from_min_size(
            pos2(rect.max.x - edge, rect.min.y + corner),
            vec2(edge, edge_height),
        ),
        ResizeDirection::TopLeft => Rect::from_min_size(rect.min, Vec2::splat(corner)),
        ResizeDirection::TopRight => Rect::from_min_size(
            pos2(rect.max.x - corner, rect.min.y),
            Vec2::splat(corner),
        ),
        ResizeDirection::BottomLeft => Rect::from_min_size(
            pos2(rect.min.x, rect.max.y - corner),
            Vec2::splat(corner),
        ),
        ResizeDirection::BottomRight => {
            Rect::from_min_size(rect.max - Vec2::splat(corner), Vec2::splat(corner))
        }
    }
}
