use std::collections::BTreeMap;
use std::fmt;

use egui::{Pos2, Rect};

use crate::assets::AssetScheme;
use crate::grid::{CardToken, GridLayout, SlotId};

use super::types::{GhostClone, SlotVisual};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// No element for this slot (e.g. the grid was re-rendered mid-gesture).
    UnknownSlot(SlotId),

    /// The slot exists but no longer holds what the gesture started from.
    Stale {
        slot: SlotId,
        expected: CardToken,
        found: CardToken,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlot(slot) => write!(f, "no element for slot {slot}"),
            Self::Stale {
                slot,
                expected,
                found,
            } => write!(f, "slot {slot} holds {found}, expected {expected}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Read-only view of what the grid currently holds.
///
/// Transition handlers only ever query through this, so they stay pure.
pub trait GridQuery {
    /// `None` if the slot cannot be looked up right now.
    fn token_at(&self, slot: SlotId) -> Option<CardToken>;
}

/// The document the controller draws feedback into.
///
/// Everything here is best-effort: the server may replace the grid at any time.
pub trait GridSurface: GridQuery {
    fn set_slot_visual(&mut self, slot: SlotId, visual: SlotVisual) -> Result<(), SurfaceError>;

    fn set_slot_selected(&mut self, slot: SlotId, selected: bool) -> Result<(), SurfaceError>;

    /// Reverts a valid-target highlight to the blank visual. Returns `false` (and changes
    /// nothing) if the slot no longer shows the highlight, e.g. after a re-render.
    fn clear_valid_target(&mut self, slot: SlotId) -> Result<bool, SurfaceError>;

    fn suppress_native_ghost(&mut self);

    fn attach_clone(&mut self, clone: GhostClone);

    fn move_clone(&mut self, min: Pos2);

    /// Returns `false` if there was no clone to remove.
    fn remove_clone(&mut self) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetainedSlot {
    pub token: CardToken,
    pub visual: SlotVisual,
    pub selected: bool,
}

impl RetainedSlot {
    fn rendered(token: CardToken) -> Self {
        let visual = if token.is_blank() {
            SlotVisual::Blank
        } else {
            SlotVisual::Card(token.clone())
        };
        Self {
            token,
            visual,
            selected: false,
        }
    }
}

/// An in-memory document: slot contents and visuals, the drag clone, and whether the native
/// drag image was suppressed.
///
/// Server re-renders go through [`Self::render`] and [`Self::remove_slot`].
#[derive(Clone, Debug, Default)]
pub struct RetainedSurface {
    slots: BTreeMap<SlotId, RetainedSlot>,
    clone: Option<GhostClone>,
    native_ghost_suppressed: bool,
    clone_moves: u64,
}

impl RetainedSurface {
    /// Deal `tokens` into the layout in row-major order. Extra tokens are ignored, missing ones
    /// leave slots without an element.
    pub fn from_tokens<T: Into<CardToken>>(
        layout: &GridLayout,
        tokens: impl IntoIterator<Item = T>,
    ) -> Self {
        let mut surface = Self::default();
        for (slot, token) in layout.slots().zip(tokens) {
            surface.render(slot, token.into());
        }
        surface
    }

    /// (Re-)render one slot from authoritative content. Resets its visual and selection.
    pub fn render(&mut self, slot: SlotId, token: CardToken) {
        self.slots.insert(slot, RetainedSlot::rendered(token));
    }

    pub fn remove_slot(&mut self, slot: SlotId) -> Option<RetainedSlot> {
        self.slots.remove(&slot)
    }

    pub fn slot(&self, slot: SlotId) -> Option<&RetainedSlot> {
        self.slots.get(&slot)
    }

    pub fn visual(&self, slot: SlotId) -> Option<&SlotVisual> {
        self.slots.get(&slot).map(|s| &s.visual)
    }

    pub fn is_selected(&self, slot: SlotId) -> bool {
        self.slots.get(&slot).is_some_and(|s| s.selected)
    }

    pub fn clone_element(&self) -> Option<&GhostClone> {
        self.clone.as_ref()
    }

    pub fn native_ghost_suppressed(&self) -> bool {
        self.native_ghost_suppressed
    }

    /// Number of clone repositions since creation of the surface.
    pub fn clone_moves(&self) -> u64 {
        self.clone_moves
    }

    /// Image path of what the slot currently displays.
    pub fn image_src(&self, slot: SlotId, assets: &AssetScheme) -> Option<String> {
        self.visual(slot).map(|visual| assets.path_for(visual))
    }

    /// Swap the contents of two slots, the way a server applies an accepted swap.
    pub fn swap(&mut self, a: SlotId, b: SlotId) -> Result<(), SurfaceError> {
        let token_a = self.token_at(a).ok_or(SurfaceError::UnknownSlot(a))?;
        let token_b = self.token_at(b).ok_or(SurfaceError::UnknownSlot(b))?;
        self.render(a, token_b);
        self.render(b, token_a);
        Ok(())
    }

    fn slot_mut(&mut self, slot: SlotId) -> Result<&mut RetainedSlot, SurfaceError> {
        self.slots
            .get_mut(&slot)
            .ok_or(SurfaceError::UnknownSlot(slot))
    }
}

impl GridQuery for RetainedSurface {
    fn token_at(&self, slot: SlotId) -> Option<CardToken> {
        self.slots.get(&slot).map(|s| s.token.clone())
    }
}

impl GridSurface for RetainedSurface {
    fn set_slot_visual(&mut self, slot: SlotId, visual: SlotVisual) -> Result<(), SurfaceError> {
        let entry = self.slot_mut(slot)?;
        if let SlotVisual::Card(expected) = &visual {
            if *expected != entry.token {
                return Err(SurfaceError::Stale {
                    slot,
                    expected: expected.clone(),
                    found: entry.token.clone(),
                });
            }
        }
        entry.visual = visual;
        Ok(())
    }

    fn set_slot_selected(&mut self, slot: SlotId, selected: bool) -> Result<(), SurfaceError> {
        self.slot_mut(slot)?.selected = selected;
        Ok(())
    }

    fn clear_valid_target(&mut self, slot: SlotId) -> Result<bool, SurfaceError> {
        let entry = self.slot_mut(slot)?;
        if entry.visual != SlotVisual::ValidTarget {
            return Ok(false);
        }
        entry.visual = SlotVisual::Blank;
        Ok(true)
    }

    fn suppress_native_ghost(&mut self) {
        self.native_ghost_suppressed = true;
    }

    fn attach_clone(&mut self, clone: GhostClone) {
        self.clone = Some(clone);
    }

    fn move_clone(&mut self, min: Pos2) {
        if let Some(clone) = &mut self.clone {
            clone.rect = Rect::from_min_size(min, clone.rect.size());
            self.clone_moves += 1;
        }
    }

    fn remove_clone(&mut self) -> bool {
        self.clone.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use egui::Vec2;

    use super::*;

    fn small_surface() -> RetainedSurface {
        RetainedSurface::from_tokens(&GridLayout::new(1, 3), ["Hearts:7", "Blank:S", "Spades:2"])
    }

    #[test]
    fn render_derives_visual_from_token() {
        let surface = small_surface();
        assert_eq!(
            surface.visual(SlotId::from_index(0)),
            Some(&SlotVisual::Card(CardToken::from("Hearts:7")))
        );
        assert_eq!(surface.visual(SlotId::from_index(1)), Some(&SlotVisual::Blank));
        assert_eq!(surface.visual(SlotId::from_index(3)), None);
    }

    #[test]
    fn restoring_a_replaced_card_is_reported_stale() {
        let mut surface = small_surface();
        surface.render(SlotId::from_index(0), CardToken::from("Clubs:9"));
        let err = surface
            .set_slot_visual(
                SlotId::from_index(0),
                SlotVisual::Card(CardToken::from("Hearts:7")),
            )
            .expect_err("content changed underneath");
        assert!(matches!(err, SurfaceError::Stale { .. }), "{err}");
    }

    #[test]
    fn clone_removal_is_idempotent() {
        let mut surface = small_surface();
        surface.attach_clone(GhostClone {
            token: CardToken::from("Hearts:7"),
            rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(60.0, 84.0)),
        });
        surface.move_clone(Pos2::new(10.0, 20.0));
        assert_eq!(
            surface.clone_element().map(|c| c.rect.min),
            Some(Pos2::new(10.0, 20.0))
        );
        assert!(surface.remove_clone());
        assert!(!surface.remove_clone());
        surface.move_clone(Pos2::new(1.0, 1.0));
        assert!(surface.clone_element().is_none());
    }

    #[test]
    fn clearing_a_highlight_leaves_rerendered_content_alone() {
        let mut surface = small_surface();
        let blank = SlotId::from_index(1);

        surface
            .set_slot_visual(blank, SlotVisual::ValidTarget)
            .expect("slot exists");
        assert_eq!(surface.clear_valid_target(blank), Ok(true));
        assert_eq!(surface.visual(blank), Some(&SlotVisual::Blank));
        assert_eq!(surface.clear_valid_target(blank), Ok(false));

        surface
            .set_slot_visual(blank, SlotVisual::ValidTarget)
            .expect("slot exists");
        surface.render(blank, CardToken::from("Clubs:3"));
        assert_eq!(surface.clear_valid_target(blank), Ok(false));
        assert_eq!(
            surface.visual(blank),
            Some(&SlotVisual::Card(CardToken::from("Clubs:3")))
        );

        assert_eq!(
            surface.clear_valid_target(SlotId::from_index(9)),
            Err(SurfaceError::UnknownSlot(SlotId::from_index(9)))
        );
    }

    #[test]
    fn swap_exchanges_tokens() {
        let mut surface = small_surface();
        surface
            .swap(SlotId::from_index(0), SlotId::from_index(1))
            .expect("both slots exist");
        assert_eq!(
            surface.token_at(SlotId::from_index(1)),
            Some(CardToken::from("Hearts:7"))
        );
        assert!(surface.swap(SlotId::from_index(0), SlotId::from_index(9)).is_err());
    }
}
