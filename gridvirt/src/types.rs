/// Which grid axis a value refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Column,
    Row,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Column => f.write_str("column"),
            Self::Row => f.write_str("row"),
        }
    }
}

/// A windowed column. Rebuilt wholesale on every coordinate or container
/// change: `index` is the durable identity across rebuilds, the value itself
/// is not.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSpec {
    pub index: usize,
    /// Left edge in content space (independent of the scroll offset).
    pub x: f64,
    pub width: f64,
    /// Frozen columns render at a fixed position and never scroll.
    pub frozen: bool,
    pub focused: bool,
    /// Reorder drop-target highlight.
    pub highlight: bool,
}

impl ColumnSpec {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// A windowed row; symmetric to [`ColumnSpec`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowSpec {
    pub index: usize,
    /// Top edge in content space (independent of the scroll offset).
    pub y: f64,
    pub height: f64,
    pub frozen: bool,
    pub focused: bool,
    pub highlight: bool,
}

impl RowSpec {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The scroll position, tracked as an offset plus an anchor per axis.
///
/// Offsets are always `<= 0`: the content slides left/up under a fixed
/// viewport origin. The anchor is the first non-frozen column/row still
/// visible to the right of (below) the frozen pane, with `left`/`top` its
/// leading edge measured in the scrolling band (the space in which the first
/// non-frozen entry starts at 0).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub offset_x: f64,
    pub offset_y: f64,
    pub column_index: usize,
    pub row_index: usize,
    pub left: f64,
    pub top: f64,
}

impl Coordinate {
    /// The origin coordinate: offsets at 0, anchors on the first non-frozen
    /// column/row.
    pub fn origin(freeze_columns: usize, freeze_rows: usize) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            column_index: freeze_columns,
            row_index: freeze_rows,
            left: 0.0,
            top: 0.0,
        }
    }
}

/// The container's size, owned by the host layout and read-only to the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

/// Extents of the frozen pane: the summed sizes of the frozen leading
/// columns/rows, recomputed on every rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrozenArea {
    pub left: f64,
    pub top: f64,
}

/// The single focused cell. Frozen columns/rows are never focusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocusedCell {
    pub column_index: usize,
    pub row_index: usize,
}

/// The scrolling index range materialized by the last rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleArea {
    pub min_column: usize,
    pub max_column: usize,
    pub min_row: usize,
    pub max_row: usize,
}

/// A committed reorder: move the column/row at `from_index` to `to_index`.
///
/// The engine never reorders its own size-lookup mapping; the host applies
/// the move to its data and lookups upon receiving this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderChange {
    pub from_index: usize,
    pub to_index: usize,
}

/// The materialized visible set: frozen entries first, then the scrolling
/// entries from the anchor outward. Cells are the cross product.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<RowSpec>,
}
