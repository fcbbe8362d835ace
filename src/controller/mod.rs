use std::collections::VecDeque;

mod debug;
mod drop_policy;
mod geometry;
mod machine;
mod options;
mod release;
mod selection;
mod server;
mod session;
mod surface;
mod types;
mod view;

#[cfg(feature = "persistence")]
mod persistence;

#[cfg(test)]
mod view_tests;

pub use geometry::GridGeometry;
pub use machine::{
    StepContext, Transition, on_drag_enter, on_drag_leave, on_drag_move, on_drag_start, step,
};
pub use options::ControllerOptions;
pub use release::{on_drag_end, on_drop};
pub use selection::on_click;
pub use server::{FnSession, ServerMessage, ServerSession, SwapMethod, SwapRequest};
pub use session::{ControllerState, DragPhase};
pub use surface::{GridQuery, GridSurface, RetainedSlot, RetainedSurface, SurfaceError};
pub use types::{ActiveDrag, Effect, GestureEvent, GhostClone, Selection, SlotVisual};
pub use view::CardGridView;

#[cfg(feature = "persistence")]
pub use persistence::OptionsError;

use crate::grid::GridLayout;

/// The drag interaction controller for one card grid.
///
/// Feed it [`GestureEvent`]s from the host; it keeps at most one drag session, draws transient
/// feedback into the [`GridSurface`] you pass along, and notifies the server session.
///
/// The grid itself belongs to the server. The controller only reads it, and tolerates it being
/// re-rendered at any point of a gesture.
#[derive(Debug)]
pub struct DragController<S> {
    pub options: ControllerOptions,

    layout: GridLayout,
    state: ControllerState,
    server: S,

    debug_log: VecDeque<String>,
    debug_event: u64,
}

impl<S: ServerSession> DragController<S> {
    pub fn new(layout: GridLayout, server: S) -> Self {
        Self::new_with_options(layout, server, ControllerOptions::default())
    }

    pub fn new_with_options(layout: GridLayout, server: S, options: ControllerOptions) -> Self {
        Self {
            options,
            layout,
            state: ControllerState::default(),
            server,
            debug_log: VecDeque::new(),
            debug_event: 0,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.state.active()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection.as_ref()
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn server_mut(&mut self) -> &mut S {
        &mut self.server
    }

    pub fn into_server(self) -> S {
        self.server
    }

    /// Run one transition and apply its effects.
    pub fn handle<G: GridSurface + ?Sized>(&mut self, event: GestureEvent, surface: &mut G) {
        self.debug_event = self.debug_event.wrapping_add(1);

        let state = std::mem::take(&mut self.state);
        let Transition {
            next,
            effects,
            note,
        } = {
            let cx = StepContext {
                layout: &self.layout,
                grid: &*surface,
                options: &self.options,
            };
            step(state, &event, &cx)
        };
        self.state = next;

        if let Some(note) = note {
            self.debug_log_event(format!("{} {note}", event.kind()));
        }
        for effect in effects {
            self.apply(effect, surface);
        }
    }

    fn apply<G: GridSurface + ?Sized>(&mut self, effect: Effect, surface: &mut G) {
        match effect {
            Effect::Notify(message) => self.server.notify(message),
            Effect::SuppressNativeGhost => surface.suppress_native_ghost(),
            Effect::AttachClone(clone) => surface.attach_clone(clone),
            Effect::MoveClone { min } => surface.move_clone(min),
            Effect::RemoveClone => {
                if !surface.remove_clone() {
                    self.debug_log_event("clone already removed");
                }
            }
            Effect::SetVisual { slot, visual } => {
                if let Err(err) = surface.set_slot_visual(slot, visual) {
                    log::warn!("skipping visual update: {err}");
                    self.debug_log_event(format!("visual skipped: {err}"));
                }
            }
            Effect::ClearValidTarget { slot } => match surface.clear_valid_target(slot) {
                Ok(true) => {}
                Ok(false) => self.debug_log_event(format!("highlight on {slot} already gone")),
                Err(err) => {
                    log::warn!("skipping highlight revert: {err}");
                    self.debug_log_event(format!("highlight revert skipped: {err}"));
                }
            },
            Effect::SetSelected { slot, selected } => {
                if let Err(err) = surface.set_slot_selected(slot, selected) {
                    log::warn!("skipping selection update: {err}");
                    self.debug_log_event(format!("selection skipped: {err}"));
                }
            }
        }
    }
}
