//! Drag-and-drop interaction controller for card-grid game clients.
//!
//! A [`DragController`] turns pointer gestures on a fixed grid of card slots into visual feedback
//! and one-way notifications to a server session that owns the authoritative game state.
//! The transition handlers are pure functions and can be driven without any UI; a small egui
//! host ([`CardGridView`]) is included.

#![forbid(unsafe_code)]

pub mod assets;
pub mod controller;
pub mod grid;

pub use assets::AssetScheme;
pub use controller::{
    CardGridView, ControllerOptions, DragController, Effect, GestureEvent, GridGeometry,
    GridQuery, GridSurface, RetainedSurface, ServerMessage, ServerSession, SlotVisual,
    SwapMethod, SwapRequest,
};
pub use grid::{CardToken, GridLayout, GridPos, SlotId};

#[cfg(feature = "persistence")]
pub use controller::OptionsError;
