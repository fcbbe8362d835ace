use std::sync::mpsc;

use crate::grid::{CardToken, GridPos, SlotId};

/// How a swap was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SwapMethod {
    Drag,
    Click,
}

/// Canonical swap payload: both endpoints, both tokens, and the interaction method.
///
/// The server resolves the endpoints and decides whether the swap is legal; the controller
/// never learns the outcome except through the next re-render.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SwapRequest {
    pub source_slot: SlotId,
    pub target_slot: SlotId,
    pub source_token: CardToken,
    pub target_token: CardToken,
    pub method: SwapMethod,
}

/// One-way notification to the server session.
///
/// With the `serde` feature this serializes to `{"event": <wire name>, ...payload}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")
)]
pub enum ServerMessage {
    DragStarted {
        card_token: CardToken,
        source_position: GridPos,
    },

    /// Transient "card in flight" indicator. `None` clears it.
    DraggedCard {
        card_token: Option<CardToken>,
    },

    #[cfg_attr(feature = "serde", serde(rename = "swap_cards"))]
    SwapRequest(SwapRequest),

    DragCancelled {
        source_slot: SlotId,
        source_position: GridPos,
    },

    /// Generic "gesture over" signal, sent on every termination path.
    DragEnded {
        session: u64,
    },

    /// Click selection changed. `None` clears it.
    CardClicked {
        card_token: Option<CardToken>,
    },
}

impl ServerMessage {
    /// The input name a server framework binds this message to.
    pub fn input_name(&self) -> &'static str {
        match self {
            Self::DragStarted { .. } => "drag_started",
            Self::DraggedCard { .. } => "dragged_card",
            Self::SwapRequest(_) => "swap_cards",
            Self::DragCancelled { .. } => "drag_cancelled",
            Self::DragEnded { .. } => "drag_ended",
            Self::CardClicked { .. } => "card_clicked",
        }
    }
}

/// The server side of the fire-and-forget channel.
///
/// Implementations must not block, and never report back to the controller: a lost message is
/// the server's problem, corrected on its next re-render.
pub trait ServerSession {
    fn notify(&mut self, message: ServerMessage);
}

/// Records every message, in order. Handy in tests and for replaying a gesture.
impl ServerSession for Vec<ServerMessage> {
    fn notify(&mut self, message: ServerMessage) {
        self.push(message);
    }
}

impl ServerSession for mpsc::Sender<ServerMessage> {
    fn notify(&mut self, message: ServerMessage) {
        if let Err(err) = self.send(message) {
            log::warn!(
                "server session disconnected, dropping {}",
                err.0.input_name()
            );
        }
    }
}

impl<S: ServerSession + ?Sized> ServerSession for &mut S {
    fn notify(&mut self, message: ServerMessage) {
        (**self).notify(message);
    }
}

/// Convenience helper: a [`ServerSession`] from a closure.
pub struct FnSession<F>(pub F);

impl<F: FnMut(ServerMessage)> ServerSession for FnSession<F> {
    fn notify(&mut self, message: ServerMessage) {
        (self.0)(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_session_forwards_and_survives_disconnect() {
        let (mut tx, rx) = mpsc::channel();
        tx.notify(ServerMessage::DragEnded { session: 1 });
        assert_eq!(rx.try_recv(), Ok(ServerMessage::DragEnded { session: 1 }));

        drop(rx);
        // Must not panic or block.
        tx.notify(ServerMessage::DragEnded { session: 2 });
    }

    #[test]
    fn closure_session_sees_messages() {
        let mut names = Vec::new();
        {
            let mut session = FnSession(|m: ServerMessage| names.push(m.input_name()));
            session.notify(ServerMessage::DraggedCard { card_token: None });
            session.notify(ServerMessage::CardClicked { card_token: None });
        }
        assert_eq!(names, ["dragged_card", "card_clicked"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn wire_shapes_match_server_inputs() {
        let started = ServerMessage::DragStarted {
            card_token: CardToken::from("Hearts:7"),
            source_position: GridPos::new(0, 5),
        };
        assert_eq!(
            serde_json::to_value(&started).expect("serialize"),
            serde_json::json!({
                "event": "drag_started",
                "cardToken": "Hearts:7",
                "sourcePosition": [0, 5],
            })
        );

        let swap = ServerMessage::SwapRequest(SwapRequest {
            source_slot: SlotId::from_index(5),
            target_slot: SlotId::from_index(6),
            source_token: CardToken::from("Hearts:7"),
            target_token: CardToken::from("Blank:S"),
            method: SwapMethod::Drag,
        });
        assert_eq!(
            serde_json::to_value(&swap).expect("serialize"),
            serde_json::json!({
                "event": "swap_cards",
                "sourceSlot": "card_5",
                "targetSlot": "card_6",
                "sourceToken": "Hearts:7",
                "targetToken": "Blank:S",
                "method": "drag",
            })
        );

        let cleared = ServerMessage::DraggedCard { card_token: None };
        assert_eq!(
            serde_json::to_value(&cleared).expect("serialize"),
            serde_json::json!({ "event": "dragged_card", "cardToken": null })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn cancelled_message_reads_back() {
        let text = r#"{"event":"drag_cancelled","sourceSlot":"card_5","sourcePosition":[0,5]}"#;
        let message: ServerMessage = serde_json::from_str(text).expect("deserialize");
        assert_eq!(
            message,
            ServerMessage::DragCancelled {
                source_slot: SlotId::from_index(5),
                source_position: GridPos::new(0, 5),
            }
        );
    }
}
