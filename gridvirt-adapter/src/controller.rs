use gridvirt::{Grid, GridError, GridOptions, OrderChange};

use crate::inertia::{Coast, VelocityTracker};
use crate::reorder::ReorderDrag;
use crate::resize::ResizeDrag;

/// Identifies one gesture grant. Events carrying an id other than the active
/// drag's are stale (the gesture was superseded) and are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureId(pub u64);

#[derive(Clone, Copy, Debug)]
struct ScrollDrag {
    id: GestureId,
    prev_x: f64,
    prev_y: f64,
    tracker: VelocityTracker,
}

#[derive(Clone, Copy, Debug)]
enum ActiveDrag {
    Scroll(ScrollDrag),
    ColumnResize(ResizeDrag),
    RowResize(ResizeDrag),
    ColumnReorder(ReorderDrag),
    RowReorder(ReorderDrag),
}

/// Drives a [`Grid`] from gesture input.
///
/// At most one drag is active at a time; granting a new gesture supersedes
/// the previous drag and cancels any coast. Drag moves carry cumulative
/// deltas from the grant point, matching what pan recognizers report.
///
/// Timestamps are host-provided monotonic milliseconds. The host should call
/// [`tick`](Self::tick) once per frame while a drag, coast, or queued wheel
/// input is pending.
#[derive(Clone, Debug)]
pub struct GridController {
    grid: Grid,
    drag: Option<ActiveDrag>,
    coast: Option<Coast>,
    queued_wheel_x: f64,
    queued_wheel_y: f64,
}

impl GridController {
    pub fn new(options: GridOptions) -> Result<Self, GridError> {
        Ok(Self::from_grid(Grid::new(options)?))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            drag: None,
            coast: None,
            queued_wheel_x: 0.0,
            queued_wheel_y: 0.0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn is_coasting(&self) -> bool {
        self.coast.is_some()
    }

    pub fn cancel_coast(&mut self) {
        self.coast = None;
    }

    /// Applies a wheel delta immediately. Any in-flight coast is cancelled
    /// first so the wheel always wins.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) -> Result<(), GridError> {
        self.coast = None;
        self.grid.scroll_by(delta_x, delta_y)
    }

    /// Accumulates a wheel delta to be applied on the next [`tick`](Self::tick).
    /// High-rate wheel streams coalesce into one rebuild per tick this way.
    pub fn queue_wheel(&mut self, delta_x: f64, delta_y: f64) {
        self.queued_wheel_x += delta_x;
        self.queued_wheel_y += delta_y;
    }

    /// Grants a scroll drag.
    pub fn begin_scroll(&mut self, id: GestureId, now_ms: u64) {
        self.coast = None;
        self.clear_drag();
        self.drag = Some(ActiveDrag::Scroll(ScrollDrag {
            id,
            prev_x: 0.0,
            prev_y: 0.0,
            tracker: VelocityTracker::new(now_ms),
        }));
    }

    /// Moves a scroll drag. `cumulative_x`/`cumulative_y` are the pan
    /// translation from the grant point; the content follows the pointer, so
    /// the translation delta inverts into a scroll delta.
    pub fn scroll_move(
        &mut self,
        id: GestureId,
        cumulative_x: f64,
        cumulative_y: f64,
    ) -> Result<(), GridError> {
        let Some(ActiveDrag::Scroll(drag)) = self.drag.as_mut() else {
            return Ok(());
        };
        if drag.id != id {
            return Ok(());
        }
        let delta_x = drag.prev_x - cumulative_x;
        let delta_y = drag.prev_y - cumulative_y;
        drag.prev_x = cumulative_x;
        drag.prev_y = cumulative_y;
        drag.tracker.record(delta_x, delta_y);
        self.grid.scroll_by(delta_x, delta_y)
    }

    /// Releases a scroll drag, starting a kinetic coast when the release
    /// velocity clears the throw threshold.
    pub fn end_scroll(&mut self, id: GestureId, now_ms: u64) {
        let drag = match self.drag.take() {
            Some(ActiveDrag::Scroll(drag)) if drag.id == id => drag,
            other => {
                self.drag = other;
                return;
            }
        };
        let mut tracker = drag.tracker;
        tracker.sample(now_ms);
        let (amplitude_x, amplitude_y) = tracker.throw_amplitude();
        self.coast = Coast::new(amplitude_x, amplitude_y, now_ms);
        gtrace!(
            "scroll released: velocity {:?}, coasting: {}",
            tracker.velocity(),
            self.coast.is_some()
        );
    }

    /// Per-frame update: samples drag velocity, flushes queued wheel input,
    /// and advances any coast. Returns whether a coast is still running.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool, GridError> {
        if let Some(ActiveDrag::Scroll(drag)) = self.drag.as_mut() {
            drag.tracker.sample(now_ms);
        }
        if self.queued_wheel_x != 0.0 || self.queued_wheel_y != 0.0 {
            let delta_x = std::mem::take(&mut self.queued_wheel_x);
            let delta_y = std::mem::take(&mut self.queued_wheel_y);
            self.coast = None;
            self.grid.scroll_by(delta_x, delta_y)?;
        }
        if let Some(coast) = self.coast {
            let step = coast.step(now_ms);
            if step.done {
                self.coast = None;
            }
            self.grid.scroll_by(step.delta_x, step.delta_y)?;
        }
        Ok(self.coast.is_some())
    }

    /// Grants a resize drag on a windowed column.
    pub fn begin_column_resize(&mut self, id: GestureId, index: usize) {
        self.coast = None;
        self.clear_drag();
        let Some(spec) = self.grid.window().column(index) else {
            gwarn!("resize grant for column {index} outside the window");
            return;
        };
        let min = self.grid.options().min_column_width;
        self.drag = Some(ActiveDrag::ColumnResize(ResizeDrag::new(
            id, index, spec.width, min,
        )));
    }

    /// Moves a column resize drag by a cumulative delta from the grant point.
    pub fn column_resize_move(&mut self, id: GestureId, cumulative_dx: f64) {
        let Some(ActiveDrag::ColumnResize(drag)) = self.drag.as_mut() else {
            return;
        };
        if drag.id != id {
            return;
        }
        let index = drag.index;
        if let Some(width) = drag.apply(cumulative_dx) {
            self.grid.preview_column_width(index, width);
        }
    }

    /// Releases a column resize drag and rebuilds from the size lookups.
    pub fn end_column_resize(&mut self, id: GestureId) -> Result<(), GridError> {
        match self.drag {
            Some(ActiveDrag::ColumnResize(drag)) if drag.id == id => {}
            _ => return Ok(()),
        }
        self.drag = None;
        self.grid.commit_resize()
    }

    /// Grants a resize drag on a windowed row.
    pub fn begin_row_resize(&mut self, id: GestureId, index: usize) {
        self.coast = None;
        self.clear_drag();
        let Some(spec) = self.grid.window().row(index) else {
            gwarn!("resize grant for row {index} outside the window");
            return;
        };
        let min = self.grid.options().min_row_height;
        self.drag = Some(ActiveDrag::RowResize(ResizeDrag::new(
            id, index, spec.height, min,
        )));
    }

    pub fn row_resize_move(&mut self, id: GestureId, cumulative_dy: f64) {
        let Some(ActiveDrag::RowResize(drag)) = self.drag.as_mut() else {
            return;
        };
        if drag.id != id {
            return;
        }
        let index = drag.index;
        if let Some(height) = drag.apply(cumulative_dy) {
            self.grid.preview_row_height(index, height);
        }
    }

    pub fn end_row_resize(&mut self, id: GestureId) -> Result<(), GridError> {
        match self.drag {
            Some(ActiveDrag::RowResize(drag)) if drag.id == id => {}
            _ => return Ok(()),
        }
        self.drag = None;
        self.grid.commit_resize()
    }

    /// Grants a reorder drag on a windowed, non-frozen column. `grab_x` is
    /// the pointer offset from the column's left edge.
    pub fn begin_column_reorder(&mut self, id: GestureId, index: usize, grab_x: f64) {
        self.coast = None;
        self.clear_drag();
        let Some(spec) = self.grid.window().column(index) else {
            gwarn!("reorder grant for column {index} outside the window");
            return;
        };
        if spec.frozen {
            gwarn!("ignoring reorder grant on frozen column {index}");
            return;
        }
        let start_position = spec.x + grab_x;
        self.drag = Some(ActiveDrag::ColumnReorder(ReorderDrag::new(
            id,
            index,
            start_position,
        )));
    }

    /// Moves a column reorder drag, retargeting the drop highlight.
    pub fn column_reorder_move(&mut self, id: GestureId, cumulative_dx: f64) {
        let Some(ActiveDrag::ColumnReorder(drag)) = self.drag.as_mut() else {
            return;
        };
        if drag.id != id {
            return;
        }
        let switch = drag.select(
            cumulative_dx,
            self.grid
                .window()
                .columns
                .iter()
                .filter(|column| !column.frozen)
                .map(|column| (column.index, column.x, column.width)),
        );
        if let Some(switch) = switch {
            if let Some(index) = switch.cleared {
                self.grid.set_column_highlight(index, false);
            }
            if let Some(index) = switch.highlighted {
                self.grid.set_column_highlight(index, true);
            }
        }
    }

    /// Releases a column reorder drag. Clears the highlight and, when the
    /// drop lands on a new position, fires `on_change_column_order` and
    /// returns the move. The host applies the move to its data and calls
    /// [`Grid::force_update`] via [`grid_mut`](Self::grid_mut).
    pub fn end_column_reorder(&mut self, id: GestureId) -> Option<OrderChange> {
        let drag = match self.drag.take() {
            Some(ActiveDrag::ColumnReorder(drag)) if drag.id == id => drag,
            other => {
                self.drag = other;
                return None;
            }
        };
        if let Some(target) = drag.target() {
            self.grid.set_column_highlight(target, false);
        }
        let change = drag.release();
        if let Some(change) = change {
            gdebug!(
                "column reorder committed: {} -> {}",
                change.from_index,
                change.to_index
            );
            if let Some(on_change) = &self.grid.options().on_change_column_order {
                on_change(change);
            }
        }
        change
    }

    /// Grants a reorder drag on a windowed, non-frozen row. `grab_y` is the
    /// pointer offset from the row's top edge.
    pub fn begin_row_reorder(&mut self, id: GestureId, index: usize, grab_y: f64) {
        self.coast = None;
        self.clear_drag();
        let Some(spec) = self.grid.window().row(index) else {
            gwarn!("reorder grant for row {index} outside the window");
            return;
        };
        if spec.frozen {
            gwarn!("ignoring reorder grant on frozen row {index}");
            return;
        }
        let start_position = spec.y + grab_y;
        self.drag = Some(ActiveDrag::RowReorder(ReorderDrag::new(
            id,
            index,
            start_position,
        )));
    }

    pub fn row_reorder_move(&mut self, id: GestureId, cumulative_dy: f64) {
        let Some(ActiveDrag::RowReorder(drag)) = self.drag.as_mut() else {
            return;
        };
        if drag.id != id {
            return;
        }
        let switch = drag.select(
            cumulative_dy,
            self.grid
                .window()
                .rows
                .iter()
                .filter(|row| !row.frozen)
                .map(|row| (row.index, row.y, row.height)),
        );
        if let Some(switch) = switch {
            if let Some(index) = switch.cleared {
                self.grid.set_row_highlight(index, false);
            }
            if let Some(index) = switch.highlighted {
                self.grid.set_row_highlight(index, true);
            }
        }
    }

    pub fn end_row_reorder(&mut self, id: GestureId) -> Option<OrderChange> {
        let drag = match self.drag.take() {
            Some(ActiveDrag::RowReorder(drag)) if drag.id == id => drag,
            other => {
                self.drag = other;
                return None;
            }
        };
        if let Some(target) = drag.target() {
            self.grid.set_row_highlight(target, false);
        }
        let change = drag.release();
        if let Some(change) = change {
            if let Some(on_change) = &self.grid.options().on_change_row_order {
                on_change(change);
            }
        }
        change
    }

    /// Drops the active drag, clearing any reorder highlight it holds. Resize
    /// previews are left for the next rebuild to discard.
    fn clear_drag(&mut self) {
        match self.drag.take() {
            Some(ActiveDrag::ColumnReorder(drag)) => {
                if let Some(target) = drag.target() {
                    self.grid.set_column_highlight(target, false);
                }
            }
            Some(ActiveDrag::RowReorder(drag)) => {
                if let Some(target) = drag.target() {
                    self.grid.set_row_highlight(target, false);
                }
            }
            _ => {}
        }
    }
}
