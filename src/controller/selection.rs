use crate::grid::SlotId;

use super::machine::{StepContext, Transition};
use super::server::{ServerMessage, SwapMethod, SwapRequest};
use super::session::ControllerState;
use super::surface::GridQuery;
use super::types::{Effect, Selection};

/// Click-to-swap: the first click selects a card, a second click on another slot asks the server
/// to swap the two. Clicking the selected card again deselects it.
pub fn on_click<G: GridQuery + ?Sized>(
    mut state: ControllerState,
    slot: SlotId,
    cx: &StepContext<'_, G>,
) -> Transition {
    if !cx.options.click_to_swap {
        return Transition::unchanged(state);
    }
    if state.is_dragging() {
        return Transition::ignored(state, format!("click {slot} ignored: drag in progress"));
    }
    let Some(token) = cx.grid.token_at(slot) else {
        return Transition::ignored(state, format!("click {slot} ignored: lookup failed"));
    };

    match state.selection.take() {
        None if token.is_blank() => Transition::unchanged(state),
        None => {
            let effects = vec![
                Effect::SetSelected {
                    slot,
                    selected: true,
                },
                Effect::Notify(ServerMessage::CardClicked {
                    card_token: Some(token.clone()),
                }),
            ];
            let note = format!("select {slot} token={token}");
            state.selection = Some(Selection { slot, token });
            Transition::to(state, effects, note)
        }
        Some(selected) if selected.slot == slot => {
            let effects = vec![
                Effect::SetSelected {
                    slot,
                    selected: false,
                },
                Effect::Notify(ServerMessage::CardClicked { card_token: None }),
            ];
            Transition::to(state, effects, format!("deselect {slot}"))
        }
        Some(selected) => {
            let note = format!("click swap source={} target={slot}", selected.slot);
            let effects = vec![
                Effect::SetSelected {
                    slot: selected.slot,
                    selected: false,
                },
                Effect::Notify(ServerMessage::SwapRequest(SwapRequest {
                    source_slot: selected.slot,
                    target_slot: slot,
                    source_token: selected.token,
                    target_token: token,
                    method: SwapMethod::Click,
                })),
                Effect::Notify(ServerMessage::CardClicked { card_token: None }),
            ];
            Transition::to(state, effects, note)
        }
    }
}
