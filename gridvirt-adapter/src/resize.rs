use crate::controller::GestureId;

/// An in-flight resize drag on one column or row.
///
/// The clamp is applied to the live candidate size, not the emitted one: a
/// drag far past the minimum keeps the entry pinned at `min_size`, and the
/// size grows again only once the pointer comes back within range.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResizeDrag {
    pub id: GestureId,
    pub index: usize,
    base_size: f64,
    min_size: f64,
    applied: f64,
}

impl ResizeDrag {
    pub fn new(id: GestureId, index: usize, base_size: f64, min_size: f64) -> Self {
        Self {
            id,
            index,
            base_size,
            min_size,
            applied: base_size,
        }
    }

    /// The size for a cumulative drag delta, or `None` when the clamped size
    /// did not change.
    pub fn apply(&mut self, drag_delta: f64) -> Option<f64> {
        let next = (self.base_size + drag_delta).max(self.min_size);
        if next == self.applied {
            return None;
        }
        self.applied = next;
        Some(next)
    }
}
