use std::sync::Arc;

use crate::types::{ContainerSize, FocusedCell, OrderChange, VisibleArea};

/// Maps an index to the size of that column (width) or row (height).
///
/// Called on demand during window rebuilds and anchor walks; it should be
/// cheap. Returned values must be strictly positive and finite.
pub type SizeLookup = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// Invoked with `(index, new_size)` whenever a resize drag changes the
/// previewed size of a column or row.
pub type SizeChangeCallback = Arc<dyn Fn(usize, f64) + Send + Sync>;

/// Invoked once when a reorder drag is released over a new position.
pub type OrderChangeCallback = Arc<dyn Fn(OrderChange) + Send + Sync>;

/// Invoked after every rebuild that materialized at least one scrolling
/// column and row.
pub type VisibleAreaCallback = Arc<dyn Fn(VisibleArea) + Send + Sync>;

/// Invoked whenever the focused cell changes, with `None` when focus clears.
pub type FocusChangeCallback = Arc<dyn Fn(Option<FocusedCell>) + Send + Sync>;

/// Configuration for a [`Grid`](crate::Grid).
///
/// Construct with [`GridOptions::new`] and chain `with_*` builders:
///
/// ```
/// use gridvirt::GridOptions;
///
/// let options = GridOptions::new(1_000_000, 1_000_000)
///     .with_column_width(|index| if index == 0 { 160.0 } else { 100.0 })
///     .with_row_height(|_| 28.0)
///     .with_freeze_columns(1);
/// ```
pub struct GridOptions {
    /// Total number of columns, including frozen ones.
    pub column_count: usize,
    /// Total number of rows, including frozen ones.
    pub row_count: usize,
    pub get_column_width: SizeLookup,
    pub get_row_height: SizeLookup,
    /// Leading columns pinned to the left edge. Fixed for the grid's lifetime.
    pub freeze_columns: usize,
    /// Leading rows pinned to the top edge. Fixed for the grid's lifetime.
    pub freeze_rows: usize,
    /// Lower clamp applied while a column resize drag is in flight.
    pub min_column_width: f64,
    /// Lower clamp applied while a row resize drag is in flight.
    pub min_row_height: f64,
    /// Container size to use before the host reports a real one.
    pub initial_container: Option<ContainerSize>,
    pub on_change_column: Option<SizeChangeCallback>,
    pub on_change_row: Option<SizeChangeCallback>,
    pub on_change_column_order: Option<OrderChangeCallback>,
    pub on_change_row_order: Option<OrderChangeCallback>,
    pub on_change_visible_area: Option<VisibleAreaCallback>,
    pub on_focus_change: Option<FocusChangeCallback>,
}

impl GridOptions {
    /// Options with default sizes: 100-wide columns, 40-tall rows, no frozen
    /// panes, resize clamps of 120/32.
    pub fn new(column_count: usize, row_count: usize) -> Self {
        Self {
            column_count,
            row_count,
            get_column_width: Arc::new(|_| 100.0),
            get_row_height: Arc::new(|_| 40.0),
            freeze_columns: 0,
            freeze_rows: 0,
            min_column_width: 120.0,
            min_row_height: 32.0,
            initial_container: None,
            on_change_column: None,
            on_change_row: None,
            on_change_column_order: None,
            on_change_row_order: None,
            on_change_visible_area: None,
            on_focus_change: None,
        }
    }

    pub fn with_column_width(mut self, f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        self.get_column_width = Arc::new(f);
        self
    }

    pub fn with_row_height(mut self, f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        self.get_row_height = Arc::new(f);
        self
    }

    pub fn with_freeze_columns(mut self, count: usize) -> Self {
        self.freeze_columns = count;
        self
    }

    pub fn with_freeze_rows(mut self, count: usize) -> Self {
        self.freeze_rows = count;
        self
    }

    pub fn with_min_column_width(mut self, width: f64) -> Self {
        self.min_column_width = width;
        self
    }

    pub fn with_min_row_height(mut self, height: f64) -> Self {
        self.min_row_height = height;
        self
    }

    pub fn with_initial_container(mut self, container: ContainerSize) -> Self {
        self.initial_container = Some(container);
        self
    }

    pub fn with_on_change_column(mut self, f: impl Fn(usize, f64) + Send + Sync + 'static) -> Self {
        self.on_change_column = Some(Arc::new(f));
        self
    }

    pub fn with_on_change_row(mut self, f: impl Fn(usize, f64) + Send + Sync + 'static) -> Self {
        self.on_change_row = Some(Arc::new(f));
        self
    }

    pub fn with_on_change_column_order(
        mut self,
        f: impl Fn(OrderChange) + Send + Sync + 'static,
    ) -> Self {
        self.on_change_column_order = Some(Arc::new(f));
        self
    }

    pub fn with_on_change_row_order(
        mut self,
        f: impl Fn(OrderChange) + Send + Sync + 'static,
    ) -> Self {
        self.on_change_row_order = Some(Arc::new(f));
        self
    }

    pub fn with_on_change_visible_area(
        mut self,
        f: impl Fn(VisibleArea) + Send + Sync + 'static,
    ) -> Self {
        self.on_change_visible_area = Some(Arc::new(f));
        self
    }

    pub fn with_on_focus_change(
        mut self,
        f: impl Fn(Option<FocusedCell>) + Send + Sync + 'static,
    ) -> Self {
        self.on_focus_change = Some(Arc::new(f));
        self
    }
}

impl Clone for GridOptions {
    fn clone(&self) -> Self {
        Self {
            column_count: self.column_count,
            row_count: self.row_count,
            get_column_width: Arc::clone(&self.get_column_width),
            get_row_height: Arc::clone(&self.get_row_height),
            freeze_columns: self.freeze_columns,
            freeze_rows: self.freeze_rows,
            min_column_width: self.min_column_width,
            min_row_height: self.min_row_height,
            initial_container: self.initial_container,
            on_change_column: self.on_change_column.clone(),
            on_change_row: self.on_change_row.clone(),
            on_change_column_order: self.on_change_column_order.clone(),
            on_change_row_order: self.on_change_row_order.clone(),
            on_change_visible_area: self.on_change_visible_area.clone(),
            on_focus_change: self.on_focus_change.clone(),
        }
    }
}

impl core::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("column_count", &self.column_count)
            .field("row_count", &self.row_count)
            .field("freeze_columns", &self.freeze_columns)
            .field("freeze_rows", &self.freeze_rows)
            .field("min_column_width", &self.min_column_width)
            .field("min_row_height", &self.min_row_height)
            .field("initial_container", &self.initial_container)
            .finish_non_exhaustive()
    }
}
