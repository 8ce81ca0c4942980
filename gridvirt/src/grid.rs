use crate::error::GridError;
use crate::options::GridOptions;
use crate::types::{
    ContainerSize, Coordinate, FocusedCell, FrozenArea, VisibleArea, Window,
};
use crate::window::{self, column_width, row_height};

/// The virtualization engine: owns the scroll coordinate and the materialized
/// window, and rebuilds the window on every mutation.
///
/// All methods run on the caller's thread and complete synchronously; wrap the
/// grid in a lock if multiple threads drive it.
#[derive(Clone, Debug)]
pub struct Grid {
    options: GridOptions,
    coordinate: Coordinate,
    container: ContainerSize,
    window: Window,
    frozen_area: FrozenArea,
    visible_area: Option<VisibleArea>,
    focused: Option<FocusedCell>,
}

impl Grid {
    /// Builds a grid at the origin. Fails if a size lookup misbehaves for any
    /// initially visible index.
    pub fn new(options: GridOptions) -> Result<Self, GridError> {
        let container = options.initial_container.unwrap_or_default();
        let coordinate = Coordinate::origin(options.freeze_columns, options.freeze_rows);
        let mut grid = Self {
            options,
            coordinate,
            container,
            window: Window::default(),
            frozen_area: FrozenArea::default(),
            visible_area: None,
            focused: None,
        };
        grid.rebuild()?;
        Ok(grid)
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// The currently materialized window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn container_size(&self) -> ContainerSize {
        self.container
    }

    /// Extents of the frozen pane, reflecting any in-flight resize preview.
    pub fn frozen_area(&self) -> FrozenArea {
        self.frozen_area
    }

    /// The scrolling index range of the last rebuild, if both axes emitted
    /// scrolling entries.
    pub fn visible_area(&self) -> Option<VisibleArea> {
        self.visible_area
    }

    pub fn focused(&self) -> Option<FocusedCell> {
        self.focused
    }

    /// Updates the container size and rebuilds. The scroll position is kept:
    /// growing the container extends the window in place, shrinking trims it.
    pub fn set_container_size(&mut self, container: ContainerSize) -> Result<(), GridError> {
        if container == self.container {
            return Ok(());
        }
        gdebug!(
            "container resized to {} x {}",
            container.width,
            container.height
        );
        self.container = container;
        self.rebuild()
    }

    /// Applies a scroll delta to both axes and rebuilds once.
    ///
    /// Positive deltas scroll toward higher indices: the offset moves by
    /// `-delta`, matching wheel conventions. The anchor walk visits only the
    /// columns/rows the delta crosses, so cost tracks the scroll distance,
    /// not the position within the grid.
    pub fn scroll_by(&mut self, delta_x: f64, delta_y: f64) -> Result<(), GridError> {
        gtrace!("scroll by ({delta_x}, {delta_y})");
        self.scroll_axis_x(delta_x)?;
        self.scroll_axis_y(delta_y)?;
        self.rebuild()
    }

    fn scroll_axis_x(&mut self, delta: f64) -> Result<(), GridError> {
        if delta == 0.0 {
            return Ok(());
        }
        let freeze = self.options.freeze_columns;
        let count = self.options.column_count;
        let next = self.coordinate.offset_x - delta;
        if next > 0.0 {
            // Leading edge: clamp back to the origin.
            self.coordinate.offset_x = 0.0;
            self.coordinate.column_index = freeze;
            self.coordinate.left = 0.0;
            return Ok(());
        }
        self.coordinate.offset_x = next;
        let target = -next;
        let mut index = self.coordinate.column_index.max(freeze);
        let mut left = self.coordinate.left;
        if left <= target {
            if index < count {
                let mut right = left + column_width(&self.options, index)?;
                loop {
                    if right >= target || index + 1 >= count {
                        break;
                    }
                    index += 1;
                    left = right;
                    right += column_width(&self.options, index)?;
                }
            }
        } else {
            while left > target && index > freeze {
                index -= 1;
                left -= column_width(&self.options, index)?;
            }
        }
        self.coordinate.column_index = index;
        self.coordinate.left = left;
        Ok(())
    }

    fn scroll_axis_y(&mut self, delta: f64) -> Result<(), GridError> {
        if delta == 0.0 {
            return Ok(());
        }
        let freeze = self.options.freeze_rows;
        let count = self.options.row_count;
        let next = self.coordinate.offset_y - delta;
        if next > 0.0 {
            self.coordinate.offset_y = 0.0;
            self.coordinate.row_index = freeze;
            self.coordinate.top = 0.0;
            return Ok(());
        }
        self.coordinate.offset_y = next;
        let target = -next;
        let mut index = self.coordinate.row_index.max(freeze);
        let mut top = self.coordinate.top;
        if top <= target {
            if index < count {
                let mut bottom = top + row_height(&self.options, index)?;
                loop {
                    if bottom >= target || index + 1 >= count {
                        break;
                    }
                    index += 1;
                    top = bottom;
                    bottom += row_height(&self.options, index)?;
                }
            }
        } else {
            while top > target && index > freeze {
                index -= 1;
                top -= row_height(&self.options, index)?;
            }
        }
        self.coordinate.row_index = index;
        self.coordinate.top = top;
        Ok(())
    }

    /// Resets the scroll position to the origin, clears focus, and rebuilds
    /// with fresh size lookups. Call after the host mutates the data behind
    /// its lookups (reorder applied, bulk size change).
    pub fn force_update(&mut self) -> Result<(), GridError> {
        gdebug!("force update: resetting to origin");
        self.coordinate = Coordinate::origin(self.options.freeze_columns, self.options.freeze_rows);
        if self.focused.take().is_some() {
            self.notify_focus();
        }
        self.rebuild()
    }

    /// Moves focus to the cell at `(column_index, row_index)`.
    ///
    /// Frozen cells are not focusable; focusing one leaves the current focus
    /// untouched. Focus follows the cell while it stays in the window and
    /// clears (with a `None` notification) once a rebuild drops it.
    pub fn focus(&mut self, column_index: usize, row_index: usize) {
        if column_index < self.options.freeze_columns || row_index < self.options.freeze_rows {
            gwarn!("ignoring focus request on frozen cell ({column_index}, {row_index})");
            return;
        }
        let next = FocusedCell {
            column_index,
            row_index,
        };
        if self.focused == Some(next) {
            return;
        }
        self.clear_focus_flags();
        self.focused = Some(next);
        self.mark_focus_flags();
        self.notify_focus();
    }

    /// Clears focus, if any, and notifies.
    pub fn clear_focus(&mut self) {
        if self.focused.take().is_some() {
            self.clear_focus_flags();
            self.notify_focus();
        }
    }

    /// Previews a new width for `index` without touching the size lookup.
    ///
    /// The windowed spec is updated in place, trailing columns shift by the
    /// delta, and `on_change_column` fires. A later rebuild discards the
    /// preview unless the host has updated its lookup to match.
    pub fn preview_column_width(&mut self, index: usize, width: f64) {
        let Some(position) = self.window.columns.iter().position(|c| c.index == index) else {
            return;
        };
        let delta = width - self.window.columns[position].width;
        if delta == 0.0 {
            return;
        }
        let frozen = self.window.columns[position].frozen;
        self.window.columns[position].width = width;
        for column in &mut self.window.columns {
            if column.index > index {
                column.x += delta;
            }
        }
        if frozen {
            self.frozen_area.left += delta;
        }
        if let Some(on_change) = &self.options.on_change_column {
            on_change(index, width);
        }
    }

    /// Previews a new height for `index`; symmetric to
    /// [`preview_column_width`](Self::preview_column_width).
    pub fn preview_row_height(&mut self, index: usize, height: f64) {
        let Some(position) = self.window.rows.iter().position(|r| r.index == index) else {
            return;
        };
        let delta = height - self.window.rows[position].height;
        if delta == 0.0 {
            return;
        }
        let frozen = self.window.rows[position].frozen;
        self.window.rows[position].height = height;
        for row in &mut self.window.rows {
            if row.index > index {
                row.y += delta;
            }
        }
        if frozen {
            self.frozen_area.top += delta;
        }
        if let Some(on_change) = &self.options.on_change_row {
            on_change(index, height);
        }
    }

    /// Ends a resize preview: rebuilds from the size lookups, which the host
    /// is expected to have updated with the committed size.
    pub fn commit_resize(&mut self) -> Result<(), GridError> {
        self.rebuild()
    }

    /// Toggles the reorder drop-target highlight on a windowed column.
    pub fn set_column_highlight(&mut self, index: usize, highlight: bool) {
        if let Some(column) = self.window.columns.iter_mut().find(|c| c.index == index) {
            column.highlight = highlight;
        }
    }

    /// Toggles the reorder drop-target highlight on a windowed row.
    pub fn set_row_highlight(&mut self, index: usize, highlight: bool) {
        if let Some(row) = self.window.rows.iter_mut().find(|r| r.index == index) {
            row.highlight = highlight;
        }
    }

    /// Changes the column count. If the anchor falls past the new end the
    /// horizontal position resets to the origin.
    pub fn set_column_count(&mut self, count: usize) -> Result<(), GridError> {
        self.options.column_count = count;
        if self.coordinate.column_index >= count {
            self.coordinate.offset_x = 0.0;
            self.coordinate.column_index = self.options.freeze_columns;
            self.coordinate.left = 0.0;
        }
        self.rebuild()
    }

    /// Changes the row count; symmetric to
    /// [`set_column_count`](Self::set_column_count).
    pub fn set_row_count(&mut self, count: usize) -> Result<(), GridError> {
        self.options.row_count = count;
        if self.coordinate.row_index >= count {
            self.coordinate.offset_y = 0.0;
            self.coordinate.row_index = self.options.freeze_rows;
            self.coordinate.top = 0.0;
        }
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<(), GridError> {
        let built = window::build(&self.options, &self.coordinate, &self.container)?;
        self.window = built.window;
        self.frozen_area = built.frozen_area;
        self.visible_area = built.visible_area;
        self.resolve_focus();
        if let (Some(on_change), Some(area)) =
            (&self.options.on_change_visible_area, self.visible_area)
        {
            on_change(area);
        }
        Ok(())
    }

    /// Re-attaches focus flags after a rebuild, clearing focus entirely when
    /// the focused cell scrolled out of the window.
    fn resolve_focus(&mut self) {
        let Some(cell) = self.focused else {
            return;
        };
        let visible = self.window.column(cell.column_index).is_some()
            && self.window.row(cell.row_index).is_some();
        if visible {
            self.mark_focus_flags();
        } else {
            self.focused = None;
            self.notify_focus();
        }
    }

    fn mark_focus_flags(&mut self) {
        let Some(cell) = self.focused else {
            return;
        };
        if let Some(column) = self
            .window
            .columns
            .iter_mut()
            .find(|c| c.index == cell.column_index)
        {
            column.focused = true;
        }
        if let Some(row) = self
            .window
            .rows
            .iter_mut()
            .find(|r| r.index == cell.row_index)
        {
            row.focused = true;
        }
    }

    fn clear_focus_flags(&mut self) {
        for column in &mut self.window.columns {
            column.focused = false;
        }
        for row in &mut self.window.rows {
            row.focused = false;
        }
    }

    fn notify_focus(&self) {
        if let Some(on_focus) = &self.options.on_focus_change {
            on_focus(self.focused);
        }
    }
}
