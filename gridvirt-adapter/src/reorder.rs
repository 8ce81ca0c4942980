use gridvirt::OrderChange;

use crate::controller::GestureId;

/// An in-flight reorder drag on one column or row.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ReorderDrag {
    pub id: GestureId,
    start_index: usize,
    /// Grab point in content space at drag start.
    start_position: f64,
    target: Option<usize>,
}

/// Highlight flags to flip after a target change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct HighlightSwitch {
    pub cleared: Option<usize>,
    pub highlighted: Option<usize>,
}

impl ReorderDrag {
    pub fn new(id: GestureId, start_index: usize, start_position: f64) -> Self {
        Self {
            id,
            start_index,
            start_position,
            target: None,
        }
    }

    /// Re-selects the drop target for a cumulative drag delta.
    ///
    /// `candidates` yields `(index, position, extent)` for the non-frozen
    /// windowed entries; the target is the one whose span contains the
    /// projected grab point. The dragged entry's own slot is highlighted like
    /// any other; [`release`](Self::release) is what suppresses it. Returns
    /// `None` when the target did not change.
    pub fn select(
        &mut self,
        drag_delta: f64,
        candidates: impl Iterator<Item = (usize, f64, f64)>,
    ) -> Option<HighlightSwitch> {
        let projected = self.start_position + drag_delta;
        let mut hit = None;
        for (index, position, extent) in candidates {
            if (position + extent / 2.0 - projected).abs() < extent / 2.0 {
                hit = Some(index);
                break;
            }
        }
        if hit == self.target {
            return None;
        }
        let cleared = self.target;
        self.target = hit;
        Some(HighlightSwitch {
            cleared,
            highlighted: hit,
        })
    }

    /// The currently highlighted drop target.
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// The committed move, or `None` when the drag ended with no target or
    /// back over its own slot.
    pub fn release(self) -> Option<OrderChange> {
        self.target
            .filter(|&to_index| to_index != self.start_index)
            .map(|to_index| OrderChange {
                from_index: self.start_index,
                to_index,
            })
    }
}
