use crate::grid::{GridLayout, SlotId};

/// Where a release landed, relative to the gesture's source slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum DropTarget {
    /// A grid slot other than the source: request a swap.
    Distinct(SlotId),

    /// Back on the source slot: cancelled drag, nothing to swap.
    Origin,

    /// Page background, outside the grid, or a slot the layout does not know.
    Outside,
}

pub(super) fn classify_drop(
    layout: &GridLayout,
    source: SlotId,
    target: Option<SlotId>,
) -> DropTarget {
    match target {
        Some(target) if target == source => DropTarget::Origin,
        Some(target) if layout.contains(target) => DropTarget::Distinct(target),
        Some(_) | None => DropTarget::Outside,
    }
}
