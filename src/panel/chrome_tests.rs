use egui::{
    Context, Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2, pos2, vec2,
};

use super::{AssistantPanel, VisualMode};
use crate::conversation::{InFlight, QueryRequest, QueryResponse};
use crate::host::AssistantHost;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);

struct NullHost;

impl AssistantHost for NullHost {
    fn submit_message(&mut self, _request: QueryRequest) -> InFlight<QueryResponse> {
        let (_reply, in_flight) = InFlight::channel();
        in_flight
    }
}

fn run_frame(ctx: &Context, panel: &mut AssistantPanel, events: Vec<Event>) {
    let input = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, VIEWPORT)),
        events,
        ..RawInput::default()
    };
    let _output = ctx.run(input, |ctx| panel.ui(ctx, &mut NullHost));
}

fn press(pos: Pos2) -> Vec<Event> {
    vec![
        Event::PointerMoved(pos),
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        },
    ]
}

fn drag_move(pos: Pos2) -> Vec<Event> {
    vec![Event::PointerMoved(pos)]
}

fn release(pos: Pos2) -> Vec<Event> {
    vec![Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed: false,
        modifiers: Modifiers::NONE,
    }]
}

/// Center of the default docked pill (176×58 at offset `{16, 0}`).
fn docked_pill_center() -> Pos2 {
    pos2(
        VIEWPORT.x - 16.0 - 176.0 / 2.0,
        VIEWPORT.y - 58.0 / 2.0,
    )
}

#[test]
fn plain_click_opens_the_docked_pill() {
    let ctx = Context::default();
    let mut panel = AssistantPanel::new();

    run_frame(&ctx, &mut panel, Vec::new());
    // egui attributes a click to a widget only if the pointer hovered it on a
    // frame before the press, so the move gets its own frame.
    run_frame(&ctx, &mut panel, drag_move(docked_pill_center()));
    run_frame(&ctx, &mut panel, press(docked_pill_center()));
    run_frame(&ctx, &mut panel, release(docked_pill_center()));

    assert_eq!(panel.mode(), VisualMode::OpenFloating);
}

#[test]
fn click_after_dragging_the_pill_still_opens() {
    let ctx = Context::default();
    let mut panel = AssistantPanel::new();

    run_frame(&ctx, &mut panel, Vec::new());

    // Drag the pill high into the viewport so it releases floating.
    let grab = docked_pill_center();
    run_frame(&ctx, &mut panel, drag_move(grab));
    run_frame(&ctx, &mut panel, press(grab));
    run_frame(&ctx, &mut panel, drag_move(grab + vec2(-10.0, -10.0)));
    run_frame(&ctx, &mut panel, drag_move(grab + vec2(-120.0, -400.0)));
    run_frame(&ctx, &mut panel, release(grab + vec2(-120.0, -400.0)));

    assert_eq!(panel.mode(), VisualMode::CollapsedFloating);
    let offset = panel.offset();
    let floating_size = panel.options.floating_collapsed_size;
    let center = pos2(
        VIEWPORT.x - offset.right - floating_size.x / 2.0,
        VIEWPORT.y - offset.bottom - floating_size.y / 2.0,
    );

    // A plain click on the pill at its new position must open the panel: the
    // drag's release never reports a click, so its suppression must not leak
    // into this gesture.
    run_frame(&ctx, &mut panel, drag_move(center));
    run_frame(&ctx, &mut panel, press(center));
    run_frame(&ctx, &mut panel, release(center));

    assert_eq!(panel.mode(), VisualMode::OpenFloating);
}

#[test]
fn click_after_dragging_the_header_still_opens() {
    let ctx = Context::default();
    let mut panel = AssistantPanel::new();
    panel.open(Some(VIEWPORT));

    run_frame(&ctx, &mut panel, Vec::new());

    // Open panel is 420×520 at {16, 24}; grab inside its 40-point header.
    let grab = pos2(1000.0, 270.0);
    run_frame(&ctx, &mut panel, drag_move(grab));
    run_frame(&ctx, &mut panel, press(grab));
    run_frame(&ctx, &mut panel, drag_move(grab + vec2(-10.0, -10.0)));
    run_frame(&ctx, &mut panel, drag_move(grab + vec2(-90.0, -60.0)));
    run_frame(&ctx, &mut panel, release(grab + vec2(-90.0, -60.0)));

    assert_eq!(panel.mode(), VisualMode::OpenFloating);
    assert!(!panel.is_dragging());

    panel.collapse(Some(VIEWPORT));
    run_frame(&ctx, &mut panel, Vec::new());

    let offset = panel.offset();
    let docked_size = panel.options.docked_collapsed_size;
    let center = pos2(
        VIEWPORT.x - offset.right - docked_size.x / 2.0,
        VIEWPORT.y - docked_size.y / 2.0,
    );
    run_frame(&ctx, &mut panel, drag_move(center));
    run_frame(&ctx, &mut panel, press(center));
    run_frame(&ctx, &mut panel, release(center));

    assert_eq!(panel.mode(), VisualMode::OpenFloating);
}
