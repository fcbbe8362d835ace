use egui::{
    Align2, Color32, CornerRadius, FontId, LayerId, Order, Painter, Rect, Sense, Stroke,
    StrokeKind, Vec2,
};

use crate::grid::SlotId;

use super::DragController;
use super::geometry::GridGeometry;
use super::server::ServerSession;
use super::surface::{RetainedSlot, RetainedSurface};
use super::types::{GestureEvent, GhostClone, SlotVisual};

const CORNER: CornerRadius = CornerRadius::same(6);

/// Egui host for a [`DragController`]: turns this frame's pointer input into gestures and paints
/// the grid from a [`RetainedSurface`].
///
/// Release is reported like a browser does: a `Drop` (on the slot under the pointer, or outside)
/// followed by a native `DragEnd`.
#[derive(Clone, Debug)]
pub struct CardGridView {
    pub geometry: GridGeometry,
    id: egui::Id,
    hovered: Option<SlotId>,
}

impl CardGridView {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            geometry: GridGeometry::default(),
            id: egui::Id::new(("card_grid_drag_view", id_salt)),
            hovered: None,
        }
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: GridGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn show<S: ServerSession>(
        &mut self,
        ui: &mut egui::Ui,
        controller: &mut DragController<S>,
        surface: &mut RetainedSurface,
    ) -> egui::Response {
        let geometry = GridGeometry {
            origin: ui.cursor().min,
            ..self.geometry
        };
        let response = ui.allocate_rect(geometry.grid_rect(controller.layout()), Sense::hover());

        let slot_rects: Vec<(SlotId, Rect)> = controller
            .layout()
            .slots()
            .filter_map(|slot| Some((slot, geometry.slot_rect(controller.layout(), slot)?)))
            .collect();

        for &(slot, rect) in &slot_rects {
            let slot_response =
                ui.interact(rect, self.id.with(slot.index()), Sense::click_and_drag());
            if slot_response.drag_started() {
                if let Some(pointer) = slot_response.interact_pointer_pos() {
                    controller.handle(
                        GestureEvent::DragStart {
                            slot,
                            pointer,
                            card_rect: rect,
                        },
                        surface,
                    );
                }
            } else if slot_response.clicked() {
                controller.handle(GestureEvent::Click { slot }, surface);
            }
        }

        if controller.is_dragging() {
            self.drive_drag(ui, &geometry, controller, surface);
        } else {
            self.hovered = None;
        }

        let painter = ui.painter();
        for &(slot, rect) in &slot_rects {
            if let Some(retained) = surface.slot(slot) {
                paint_slot(painter, rect, retained);
            }
        }
        if let Some(clone) = surface.clone_element() {
            let painter = ui
                .ctx()
                .layer_painter(LayerId::new(Order::Tooltip, self.id.with("clone")));
            paint_clone(&painter, clone);
        }

        response
    }

    fn drive_drag<S: ServerSession>(
        &mut self,
        ui: &egui::Ui,
        geometry: &GridGeometry,
        controller: &mut DragController<S>,
        surface: &mut RetainedSurface,
    ) {
        let (pointer, moved, released) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.delta() != Vec2::ZERO,
                i.pointer.any_released(),
            )
        });

        if let Some(pointer) = pointer {
            if moved {
                controller.handle(GestureEvent::DragMove { pointer }, surface);
            }
        }

        let hovered = pointer.and_then(|p| geometry.slot_under_pointer(controller.layout(), p));
        if hovered != self.hovered {
            if let Some(left) = self.hovered {
                controller.handle(GestureEvent::DragLeave { slot: left }, surface);
            }
            if let Some(entered) = hovered {
                controller.handle(GestureEvent::DragEnter { slot: entered }, surface);
            }
            self.hovered = hovered;
        }

        if released {
            controller.handle(GestureEvent::Drop { target: hovered }, surface);
            controller.handle(GestureEvent::DragEnd, surface);
            self.hovered = None;
        } else {
            ui.ctx().request_repaint();
        }
    }
}

fn paint_slot(painter: &Painter, rect: Rect, slot: &RetainedSlot) {
    match &slot.visual {
        SlotVisual::Card(token) => paint_card_face(painter, rect, token.as_str()),
        SlotVisual::Blank => {
            painter.rect_filled(rect, CORNER, Color32::from_rgb(18, 82, 56));
        }
        SlotVisual::ValidTarget => {
            painter.rect_filled(rect, CORNER, Color32::from_rgb(64, 160, 96));
            painter.rect_stroke(
                rect,
                CORNER,
                Stroke::new(2.0, Color32::from_rgb(180, 255, 200)),
                StrokeKind::Inside,
            );
        }
    }
    if slot.selected {
        painter.rect_stroke(
            rect,
            CORNER,
            Stroke::new(3.0, Color32::GOLD),
            StrokeKind::Outside,
        );
    }
}

fn paint_card_face(painter: &Painter, rect: Rect, label: &str) {
    painter.rect_filled(rect, CORNER, Color32::from_gray(245));
    painter.rect_stroke(
        rect,
        CORNER,
        Stroke::new(1.0, Color32::from_gray(120)),
        StrokeKind::Inside,
    );
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(13.0),
        Color32::from_gray(20),
    );
}

fn paint_clone(painter: &Painter, clone: &GhostClone) {
    paint_card_face(painter, clone.rect, clone.token.as_str());
}
