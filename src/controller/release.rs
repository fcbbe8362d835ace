use crate::grid::SlotId;

use super::drop_policy::{DropTarget, classify_drop};
use super::machine::{StepContext, Transition};
use super::server::{ServerMessage, SwapMethod, SwapRequest};
use super::session::ControllerState;
use super::surface::GridQuery;
use super::types::{ActiveDrag, Effect, SlotVisual};

/// `Dragging → Idle` on release. Without an active session this is a no-op, which is what makes
/// the drop and native drag-end paths idempotent with each other.
pub fn on_drop<G: GridQuery + ?Sized>(
    mut state: ControllerState,
    target: Option<SlotId>,
    cx: &StepContext<'_, G>,
) -> Transition {
    let Some(active) = state.take_active() else {
        let target = target.map_or_else(|| "outside".to_owned(), |t| t.to_string());
        return Transition::ignored(state, format!("drop on {target} ignored: no active session"));
    };

    match classify_drop(cx.layout, active.source, target) {
        DropTarget::Distinct(target) => {
            let Some(target_token) = cx.grid.token_at(target) else {
                // Re-rendered away under the pointer: nothing to name in a swap request.
                return cancel(state, active, "drop_target_lookup_failed");
            };

            let mut effects = Vec::with_capacity(6);
            clear_highlight(&active, &mut effects);
            if cx.options.optimistic_source_blank {
                effects.push(restore_source(&active));
            }
            effects.push(Effect::Notify(ServerMessage::SwapRequest(SwapRequest {
                source_slot: active.source,
                target_slot: target,
                source_token: active.token.clone(),
                target_token,
                method: SwapMethod::Drag,
            })));
            teardown(&active, &mut effects);

            let note = format!(
                "session RELEASE id={} kind=swap source={} target={target}",
                active.session_id, active.source
            );
            Transition::to(state, effects, note)
        }
        DropTarget::Origin => cancel(state, active, "drop_on_origin"),
        DropTarget::Outside => cancel(state, active, "drop_outside"),
    }
}

/// Native drag-end: same cleanup as an outside drop, or nothing if a drop already ended the
/// session.
pub fn on_drag_end(mut state: ControllerState) -> Transition {
    match state.take_active() {
        Some(active) => cancel(state, active, "drag_end"),
        None => Transition::unchanged(state),
    }
}

fn cancel(state: ControllerState, active: ActiveDrag, kind: &'static str) -> Transition {
    let mut effects = Vec::with_capacity(6);
    clear_highlight(&active, &mut effects);
    effects.push(restore_source(&active));
    effects.push(Effect::Notify(ServerMessage::DragCancelled {
        source_slot: active.source,
        source_position: active.source_pos,
    }));
    teardown(&active, &mut effects);

    let note = format!(
        "session RELEASE id={} kind={kind} source={}",
        active.session_id, active.source
    );
    Transition::to(state, effects, note)
}

fn clear_highlight(active: &ActiveDrag, effects: &mut Vec<Effect>) {
    if let Some(slot) = active.highlighted {
        effects.push(Effect::ClearValidTarget { slot });
    }
}

fn restore_source(active: &ActiveDrag) -> Effect {
    Effect::SetVisual {
        slot: active.source,
        visual: SlotVisual::Card(active.token.clone()),
    }
}

/// Controller-owned transient state, cleared on every termination path.
fn teardown(active: &ActiveDrag, effects: &mut Vec<Effect>) {
    effects.push(Effect::RemoveClone);
    effects.push(Effect::Notify(ServerMessage::DraggedCard { card_token: None }));
    effects.push(Effect::Notify(ServerMessage::DragEnded {
        session: active.session_id,
    }));
}
