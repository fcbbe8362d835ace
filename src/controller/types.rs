use egui::{Pos2, Rect, Vec2};

use crate::grid::{CardToken, GridPos, SlotId};

use super::server::ServerMessage;

/// A pointer/drag gesture delivered by the host (DOM shim, egui view, tests).
///
/// For a single gesture the host delivers `DragStart`, then any number of `DragMove`,
/// `DragEnter` and `DragLeave`, then at least one terminal event (`Drop` and/or `DragEnd`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    DragStart {
        slot: SlotId,
        pointer: Pos2,

        /// Where the grabbed card is drawn, used for the grab offset and the clone size.
        card_rect: Rect,
    },
    DragMove {
        pointer: Pos2,
    },
    DragEnter {
        slot: SlotId,
    },
    DragLeave {
        slot: SlotId,
    },

    /// Pointer released. `None` means outside every slot (page background, outside the grid).
    Drop {
        target: Option<SlotId>,
    },

    /// Native drag-end. Also fires after drops the platform rejected.
    DragEnd,

    Click {
        slot: SlotId,
    },
}

impl GestureEvent {
    pub(super) fn kind(&self) -> &'static str {
        match self {
            Self::DragStart { .. } => "drag_start",
            Self::DragMove { .. } => "drag_move",
            Self::DragEnter { .. } => "drag_enter",
            Self::DragLeave { .. } => "drag_leave",
            Self::Drop { .. } => "drop",
            Self::DragEnd => "drag_end",
            Self::Click { .. } => "click",
        }
    }
}

/// What a slot currently displays.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SlotVisual {
    Card(CardToken),
    Blank,

    /// A blank slot hovered by an active drag.
    ValidTarget,
}

/// The detached clone that follows the pointer while dragging.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostClone {
    pub token: CardToken,
    pub rect: Rect,
}

/// A side effect produced by a transition. Applied by [`super::DragController`], or by any
/// other driver of the pure transition handlers.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Notify(ServerMessage),

    /// Replace the platform drag image with a transparent 1×1 placeholder.
    SuppressNativeGhost,

    AttachClone(GhostClone),
    MoveClone {
        min: Pos2,
    },
    RemoveClone,

    SetVisual {
        slot: SlotId,
        visual: SlotVisual,
    },

    /// Back to the plain blank, but only if the slot still shows [`SlotVisual::ValidTarget`].
    ClearValidTarget {
        slot: SlotId,
    },
    SetSelected {
        slot: SlotId,
        selected: bool,
    },
}

/// Per-gesture state, alive from `DragStart` to the first terminal event.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDrag {
    pub session_id: u64,
    pub source: SlotId,
    pub source_pos: GridPos,
    pub token: CardToken,
    pub grab_offset: Vec2,
    pub clone_rect: Rect,

    /// The blank slot currently showing the valid-target visual, if any.
    pub highlighted: Option<SlotId>,
}

impl ActiveDrag {
    /// Clone position for a pointer position: `pointer - grab_offset`.
    pub fn clone_min_for(&self, pointer: Pos2) -> Pos2 {
        pointer - self.grab_offset
    }
}

/// The slot selected by a click, waiting for a second click to swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub slot: SlotId,
    pub token: CardToken,
}
