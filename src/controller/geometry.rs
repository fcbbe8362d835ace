use egui::{Pos2, Rect, Vec2};

use crate::grid::{GridLayout, GridPos, SlotId};

/// Where each slot of a [`GridLayout`] is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct GridGeometry {
    pub origin: Pos2,
    pub card_size: Vec2,
    pub spacing: Vec2,
}

impl Default for GridGeometry {
    fn default() -> Self {
        // Playing-card aspect ratio (5:7).
        Self {
            origin: Pos2::ZERO,
            card_size: Vec2::new(60.0, 84.0),
            spacing: Vec2::new(4.0, 20.0),
        }
    }
}

impl GridGeometry {
    fn pitch(&self) -> Vec2 {
        self.card_size + self.spacing
    }

    pub fn rect_for(&self, pos: GridPos) -> Rect {
        let min = self.origin
            + Vec2::new(
                f32::from(pos.col) * self.pitch().x,
                f32::from(pos.row) * self.pitch().y,
            );
        Rect::from_min_size(min, self.card_size)
    }

    pub fn slot_rect(&self, layout: &GridLayout, slot: SlotId) -> Option<Rect> {
        layout.position(slot).map(|pos| self.rect_for(pos))
    }

    /// Bounding rectangle of the whole grid, without trailing spacing.
    pub fn grid_rect(&self, layout: &GridLayout) -> Rect {
        let size = Vec2::new(
            f32::from(layout.columns()) * self.pitch().x - self.spacing.x,
            f32::from(layout.rows()) * self.pitch().y - self.spacing.y,
        );
        Rect::from_min_size(self.origin, size.max(Vec2::ZERO))
    }

    /// The slot whose card rectangle contains `pointer`. Gaps between cards belong to no slot.
    pub fn slot_under_pointer(&self, layout: &GridLayout, pointer: Pos2) -> Option<SlotId> {
        let local = pointer - self.origin;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let pitch = self.pitch();
        let col = (local.x / pitch.x).floor();
        let row = (local.y / pitch.y).floor();
        if col >= f32::from(layout.columns()) || row >= f32::from(layout.rows()) {
            return None;
        }

        let pos = GridPos::new(row as u16, col as u16);
        if !self.rect_for(pos).contains(pointer) {
            return None;
        }
        layout.slot_at(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_testing_matches_slot_rects() {
        let layout = GridLayout::default();
        let geometry = GridGeometry {
            origin: Pos2::new(10.0, 10.0),
            ..Default::default()
        };
        for slot in layout.slots() {
            let rect = geometry.slot_rect(&layout, slot).expect("slot in layout");
            assert_eq!(geometry.slot_under_pointer(&layout, rect.center()), Some(slot));
        }
    }

    #[test]
    fn gaps_and_outside_hit_nothing() {
        let layout = GridLayout::default();
        let geometry = GridGeometry::default();
        let first = geometry.rect_for(GridPos::new(0, 0));

        let in_gap = Pos2::new(first.max.x + 1.0, first.center().y);
        assert_eq!(geometry.slot_under_pointer(&layout, in_gap), None);
        assert_eq!(geometry.slot_under_pointer(&layout, Pos2::new(-1.0, 5.0)), None);

        let below = geometry.grid_rect(&layout).max + Vec2::splat(5.0);
        assert_eq!(geometry.slot_under_pointer(&layout, below), None);
    }
}
