use super::types::{ActiveDrag, Selection};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Everything the controller remembers between events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControllerState {
    pub phase: DragPhase,
    pub selection: Option<Selection>,
    next_session_id: u64,
}

impl ControllerState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.phase {
            DragPhase::Dragging(active) => Some(active),
            DragPhase::Idle => None,
        }
    }

    pub(super) fn active_mut(&mut self) -> Option<&mut ActiveDrag> {
        match &mut self.phase {
            DragPhase::Dragging(active) => Some(active),
            DragPhase::Idle => None,
        }
    }

    /// Session ids start at 1 and never repeat within one controller.
    pub(super) fn allocate_session_id(&mut self) -> u64 {
        let id = self.next_session_id.max(1);
        self.next_session_id = id.saturating_add(1);
        id
    }

    /// Ends the session, if any. A second call returns `None`.
    pub(super) fn take_active(&mut self) -> Option<ActiveDrag> {
        match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(active) => Some(active),
            DragPhase::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::{Pos2, Rect, Vec2};

    use super::*;
    use crate::grid::{CardToken, GridPos, SlotId};

    fn active(session_id: u64) -> ActiveDrag {
        ActiveDrag {
            session_id,
            source: SlotId::from_index(5),
            source_pos: GridPos::new(0, 5),
            token: CardToken::from("Hearts:7"),
            grab_offset: Vec2::new(4.0, 6.0),
            clone_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(60.0, 84.0)),
            highlighted: None,
        }
    }

    #[test]
    fn session_ids_are_monotonic_from_one() {
        let mut state = ControllerState::default();
        assert_eq!(state.allocate_session_id(), 1);
        assert_eq!(state.allocate_session_id(), 2);
        assert_eq!(state.allocate_session_id(), 3);
    }

    #[test]
    fn take_active_ends_the_session_once() {
        let mut state = ControllerState {
            phase: DragPhase::Dragging(active(7)),
            ..Default::default()
        };
        assert!(state.is_dragging());
        assert_eq!(state.take_active().map(|a| a.session_id), Some(7));
        assert!(!state.is_dragging());
        assert!(state.take_active().is_none());
    }
}
