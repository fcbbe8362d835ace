use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2};

use crate::grid::{CardToken, GridLayout, SlotId};

use super::{
    CardGridView, ControllerOptions, DragController, GridGeometry, RetainedSurface, ServerMessage,
    SlotVisual, SwapMethod, SwapRequest,
};

const S5: SlotId = SlotId::from_index(5);
const S6: SlotId = SlotId::from_index(6);

/// Headless egui frames around one [`CardGridView`].
struct Harness {
    ctx: egui::Context,
    view: CardGridView,
    controller: DragController<Vec<ServerMessage>>,
    surface: RetainedSurface,
    geometry: GridGeometry,
}

impl Harness {
    fn new() -> Self {
        let layout = GridLayout::default();
        let tokens = (0..layout.len()).map(|i| match i {
            5 => "Hearts:7".to_owned(),
            6 => "Blank:S".to_owned(),
            _ => format!("Clubs:{i}"),
        });
        let surface = RetainedSurface::from_tokens(&layout, tokens);
        let mut harness = Self {
            ctx: egui::Context::default(),
            view: CardGridView::new("view_tests"),
            controller: DragController::new_with_options(
                layout,
                Vec::new(),
                ControllerOptions::default(),
            ),
            surface,
            geometry: GridGeometry::default(),
        };

        // Registers the slot widgets and tells us where the panel put the grid.
        let grid_rect = harness.frame(Vec::new());
        harness.geometry.origin = grid_rect.min;
        harness
    }

    fn frame(&mut self, events: Vec<Event>) -> Rect {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1200.0, 700.0))),
            events,
            ..Default::default()
        };

        let Self {
            ctx,
            view,
            controller,
            surface,
            ..
        } = self;
        let mut grid_rect = Rect::NOTHING;
        let _full_output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                grid_rect = view.show(ui, controller, surface).rect;
            });
        });
        grid_rect
    }

    fn slot_rect(&self, slot: SlotId) -> Rect {
        self.geometry
            .slot_rect(self.controller.layout(), slot)
            .expect("slot in layout")
    }

    fn move_to(&mut self, pos: Pos2) {
        self.frame(vec![Event::PointerMoved(pos)]);
    }

    fn button(&mut self, pos: Pos2, pressed: bool) {
        self.frame(vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                modifiers: Modifiers::NONE,
            },
        ]);
    }

    /// Press on `from`, move far enough to start a drag, then move to `to`.
    fn drag_to(&mut self, from: SlotId, to: Pos2) {
        let grab = self.slot_rect(from).center();
        self.move_to(grab);
        self.button(grab, true);
        self.move_to(grab + Vec2::new(10.0, 0.0));
        self.move_to(to);
    }

    fn names(&self) -> Vec<&'static str> {
        self.controller
            .server()
            .iter()
            .map(ServerMessage::input_name)
            .collect()
    }
}

#[test]
fn dragging_onto_a_blank_requests_a_swap() {
    let mut h = Harness::new();
    let target = h.slot_rect(S6).center();

    h.drag_to(S5, target);

    assert!(h.controller.is_dragging());
    let active = h.controller.active_drag().expect("dragging");
    assert_eq!(active.source, S5);
    let card = h.slot_rect(S5).size();
    assert!(
        (0.0..=card.x).contains(&active.grab_offset.x)
            && (0.0..=card.y).contains(&active.grab_offset.y),
        "grab offset {:?} lies inside the card",
        active.grab_offset
    );
    assert!(h.surface.clone_element().is_some());
    assert_eq!(h.surface.visual(S6), Some(&SlotVisual::ValidTarget));

    h.button(target, false);

    assert!(!h.controller.is_dragging());
    assert!(h.surface.clone_element().is_none());
    assert_eq!(
        h.names(),
        [
            "drag_started",
            "dragged_card",
            "swap_cards",
            "dragged_card",
            "drag_ended"
        ]
    );
    assert_eq!(
        h.controller.server()[2],
        ServerMessage::SwapRequest(SwapRequest {
            source_slot: S5,
            target_slot: S6,
            source_token: CardToken::from("Hearts:7"),
            target_token: CardToken::from("Blank:S"),
            method: SwapMethod::Drag,
        })
    );
}

#[test]
fn leaving_the_hovered_blank_reverts_it() {
    let mut h = Harness::new();
    let target = h.slot_rect(S6).center();

    h.drag_to(S5, target);
    assert_eq!(h.surface.visual(S6), Some(&SlotVisual::ValidTarget));

    let below_grid = h.slot_rect(S6).center() + Vec2::new(0.0, 500.0);
    h.move_to(below_grid);
    assert_eq!(h.surface.visual(S6), Some(&SlotVisual::Blank));
    assert!(h.controller.is_dragging());
}

#[test]
fn releasing_over_a_gap_cancels() {
    let mut h = Harness::new();
    let s5 = h.slot_rect(S5);
    let gap = Pos2::new(s5.max.x + 2.0, s5.center().y);

    h.drag_to(S5, gap);
    h.button(gap, false);

    assert!(!h.controller.is_dragging());
    assert_eq!(
        h.names(),
        [
            "drag_started",
            "dragged_card",
            "drag_cancelled",
            "dragged_card",
            "drag_ended"
        ]
    );
    assert_eq!(
        h.surface.visual(S5),
        Some(&SlotVisual::Card(CardToken::from("Hearts:7")))
    );
}

#[test]
fn click_without_movement_selects() {
    let mut h = Harness::new();
    let center = h.slot_rect(S5).center();

    h.move_to(center);
    h.button(center, true);
    h.button(center, false);

    assert!(!h.controller.is_dragging());
    assert_eq!(h.controller.selection().map(|s| s.slot), Some(S5));
    assert!(h.surface.is_selected(S5));
    assert_eq!(h.names(), ["card_clicked"]);
}
