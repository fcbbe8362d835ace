//! Named transition handlers.
//!
//! Each handler is a pure function of (current state, event, read-only grid view) returning the
//! next state plus the side effects to perform. Nothing here touches a surface or a server.

use egui::{Pos2, Rect};

use crate::grid::{GridLayout, SlotId};

use super::options::ControllerOptions;
use super::release::{on_drag_end, on_drop};
use super::selection::on_click;
use super::server::ServerMessage;
use super::session::{ControllerState, DragPhase};
use super::surface::GridQuery;
use super::types::{ActiveDrag, Effect, GestureEvent, GhostClone, SlotVisual};

/// Read-only inputs of a transition.
pub struct StepContext<'a, G: GridQuery + ?Sized> {
    pub layout: &'a GridLayout,
    pub grid: &'a G,
    pub options: &'a ControllerOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub next: ControllerState,
    pub effects: Vec<Effect>,

    /// Diagnostic line for the log, if the transition is worth mentioning.
    pub note: Option<String>,
}

impl Transition {
    pub(super) fn to(next: ControllerState, effects: Vec<Effect>, note: String) -> Self {
        Self {
            next,
            effects,
            note: Some(note),
        }
    }

    /// No state change, no effects.
    pub(super) fn unchanged(state: ControllerState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
            note: None,
        }
    }

    /// No state change, no effects, but worth a log line.
    pub(super) fn ignored(state: ControllerState, note: String) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
            note: Some(note),
        }
    }
}

pub fn step<G: GridQuery + ?Sized>(
    state: ControllerState,
    event: &GestureEvent,
    cx: &StepContext<'_, G>,
) -> Transition {
    match *event {
        GestureEvent::DragStart {
            slot,
            pointer,
            card_rect,
        } => on_drag_start(state, slot, pointer, card_rect, cx),
        GestureEvent::DragMove { pointer } => on_drag_move(state, pointer),
        GestureEvent::DragEnter { slot } => on_drag_enter(state, slot, cx),
        GestureEvent::DragLeave { slot } => on_drag_leave(state, slot),
        GestureEvent::Drop { target } => on_drop(state, target, cx),
        GestureEvent::DragEnd => on_drag_end(state),
        GestureEvent::Click { slot } => on_click(state, slot, cx),
    }
}

/// `Idle → Dragging`, on a populated slot.
pub fn on_drag_start<G: GridQuery + ?Sized>(
    mut state: ControllerState,
    slot: SlotId,
    pointer: Pos2,
    card_rect: Rect,
    cx: &StepContext<'_, G>,
) -> Transition {
    if let Some(active) = state.active() {
        let note = format!(
            "drag_start {slot} ignored: session {} still active",
            active.session_id
        );
        return Transition::ignored(state, note);
    }
    let Some(source_pos) = cx.layout.position(slot) else {
        return Transition::ignored(state, format!("drag_start {slot} ignored: not in layout"));
    };
    let Some(token) = cx.grid.token_at(slot) else {
        return Transition::ignored(state, format!("drag_start {slot} ignored: lookup failed"));
    };
    if token.is_blank() {
        return Transition::ignored(state, format!("drag_start {slot} ignored: blank"));
    }

    let mut effects = Vec::with_capacity(7);

    if cx.options.clear_selection_on_drag_start {
        if let Some(selection) = state.selection.take() {
            effects.push(Effect::SetSelected {
                slot: selection.slot,
                selected: false,
            });
            effects.push(Effect::Notify(ServerMessage::CardClicked { card_token: None }));
        }
    }

    let session_id = state.allocate_session_id();
    let grab_offset = pointer - card_rect.min;
    let clone_rect = Rect::from_min_size(pointer - grab_offset, card_rect.size());

    if cx.options.suppress_native_ghost {
        effects.push(Effect::SuppressNativeGhost);
    }
    effects.push(Effect::AttachClone(GhostClone {
        token: token.clone(),
        rect: clone_rect,
    }));
    if cx.options.optimistic_source_blank {
        effects.push(Effect::SetVisual {
            slot,
            visual: SlotVisual::Blank,
        });
    }
    effects.push(Effect::Notify(ServerMessage::DragStarted {
        card_token: token.clone(),
        source_position: source_pos,
    }));
    effects.push(Effect::Notify(ServerMessage::DraggedCard {
        card_token: Some(token.clone()),
    }));

    let note = format!("session START id={session_id} source={slot} token={token}");
    state.phase = DragPhase::Dragging(ActiveDrag {
        session_id,
        source: slot,
        source_pos,
        token,
        grab_offset,
        clone_rect,
        highlighted: None,
    });

    Transition::to(state, effects, note)
}

/// `Dragging → Dragging`: keep the clone under the pointer. Silent when idle.
pub fn on_drag_move(mut state: ControllerState, pointer: Pos2) -> Transition {
    let Some(active) = state.active_mut() else {
        return Transition::unchanged(state);
    };

    let min = active.clone_min_for(pointer);
    active.clone_rect = Rect::from_min_size(min, active.clone_rect.size());

    Transition {
        next: state,
        effects: vec![Effect::MoveClone { min }],
        note: None,
    }
}

/// Hover feedback: a blank slot under an active drag shows the valid-target visual.
pub fn on_drag_enter<G: GridQuery + ?Sized>(
    mut state: ControllerState,
    slot: SlotId,
    cx: &StepContext<'_, G>,
) -> Transition {
    let Some(active) = state.active_mut() else {
        return Transition::unchanged(state);
    };
    if slot == active.source || active.highlighted == Some(slot) {
        return Transition::unchanged(state);
    }
    if !cx.grid.token_at(slot).is_some_and(|token| token.is_blank()) {
        return Transition::unchanged(state);
    }

    let mut effects = Vec::with_capacity(2);
    // A missed leave event would otherwise leave the old target lit.
    if let Some(previous) = active.highlighted.replace(slot) {
        effects.push(Effect::ClearValidTarget { slot: previous });
    }
    effects.push(Effect::SetVisual {
        slot,
        visual: SlotVisual::ValidTarget,
    });

    Transition {
        next: state,
        effects,
        note: None,
    }
}

/// Hover feedback: leaving the highlighted slot without dropping reverts it to blank.
pub fn on_drag_leave(mut state: ControllerState, slot: SlotId) -> Transition {
    let Some(active) = state.active_mut() else {
        return Transition::unchanged(state);
    };
    if active.highlighted != Some(slot) {
        return Transition::unchanged(state);
    }
    active.highlighted = None;

    Transition {
        next: state,
        effects: vec![Effect::ClearValidTarget { slot }],
        note: None,
    }
}
