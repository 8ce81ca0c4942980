//! Window construction: materializes the visible column/row set from a
//! coordinate and a container size. Cost is proportional to the number of
//! entries emitted, never to the grid extent.

use std::collections::HashSet;

use crate::error::GridError;
use crate::options::GridOptions;
use crate::types::{
    Axis, ColumnSpec, ContainerSize, Coordinate, FrozenArea, RowSpec, VisibleArea, Window,
};

/// Validated width lookup. Rejects non-positive and non-finite values before
/// they can corrupt a layout.
pub(crate) fn column_width(options: &GridOptions, index: usize) -> Result<f64, GridError> {
    let value = (options.get_column_width)(index);
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(GridError::InvalidSize {
            axis: Axis::Column,
            index,
            value,
        })
    }
}

/// Validated height lookup.
pub(crate) fn row_height(options: &GridOptions, index: usize) -> Result<f64, GridError> {
    let value = (options.get_row_height)(index);
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(GridError::InvalidSize {
            axis: Axis::Row,
            index,
            value,
        })
    }
}

pub(crate) struct BuiltWindow {
    pub window: Window,
    pub frozen_area: FrozenArea,
    /// `None` when either axis emitted no scrolling entries.
    pub visible_area: Option<VisibleArea>,
}

/// Builds the window for `coordinate` inside `container`.
///
/// Per axis: the frozen prefix is laid out at fixed cumulative positions from
/// 0, then scrolling entries are emitted from the anchor until one starts past
/// the far edge of the container (in content space, `-offset + extent`). The
/// loop emits the entry straddling the far edge before stopping, so the
/// window always covers the viewport when enough content exists.
pub(crate) fn build(
    options: &GridOptions,
    coordinate: &Coordinate,
    container: &ContainerSize,
) -> Result<BuiltWindow, GridError> {
    let mut window = Window::default();
    let mut frozen_area = FrozenArea::default();
    let mut column_range = None;
    let mut row_range = None;

    let freeze = options.freeze_columns.min(options.column_count);
    for index in 0..freeze {
        let width = column_width(options, index)?;
        window.columns.push(ColumnSpec {
            index,
            x: frozen_area.left,
            width,
            frozen: true,
            focused: false,
            highlight: false,
        });
        frozen_area.left += width;
    }
    let mut index = coordinate.column_index.max(freeze);
    let mut edge = frozen_area.left + coordinate.left;
    let limit = -coordinate.offset_x + container.width;
    while index < options.column_count {
        let width = column_width(options, index)?;
        window.columns.push(ColumnSpec {
            index,
            x: edge,
            width,
            frozen: false,
            focused: false,
            highlight: false,
        });
        column_range = match column_range {
            None => Some((index, index)),
            Some((min, _)) => Some((min, index)),
        };
        edge += width;
        index += 1;
        if edge > limit {
            break;
        }
    }

    let freeze = options.freeze_rows.min(options.row_count);
    for index in 0..freeze {
        let height = row_height(options, index)?;
        window.rows.push(RowSpec {
            index,
            y: frozen_area.top,
            height,
            frozen: true,
            focused: false,
            highlight: false,
        });
        frozen_area.top += height;
    }
    let mut index = coordinate.row_index.max(freeze);
    let mut edge = frozen_area.top + coordinate.top;
    let limit = -coordinate.offset_y + container.height;
    while index < options.row_count {
        let height = row_height(options, index)?;
        window.rows.push(RowSpec {
            index,
            y: edge,
            height,
            frozen: false,
            focused: false,
            highlight: false,
        });
        row_range = match row_range {
            None => Some((index, index)),
            Some((min, _)) => Some((min, index)),
        };
        edge += height;
        index += 1;
        if edge > limit {
            break;
        }
    }

    let visible_area = match (column_range, row_range) {
        (Some((min_column, max_column)), Some((min_row, max_row))) => Some(VisibleArea {
            min_column,
            max_column,
            min_row,
            max_row,
        }),
        _ => None,
    };

    if cfg!(debug_assertions) {
        if let Err(err) = window.check_consistency() {
            gwarn!("inconsistent window after rebuild: {err}");
            debug_assert!(false, "inconsistent window after rebuild: {err}");
        }
    }

    gtrace!(
        "built window: {} columns, {} rows, frozen ({}, {})",
        window.columns.len(),
        window.rows.len(),
        frozen_area.left,
        frozen_area.top
    );

    Ok(BuiltWindow {
        window,
        frozen_area,
        visible_area,
    })
}

impl Window {
    /// The windowed spec for `index`, if that column is currently visible.
    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.index == index)
    }

    /// The windowed spec for `index`, if that row is currently visible.
    pub fn row(&self, index: usize) -> Option<&RowSpec> {
        self.rows.iter().find(|row| row.index == index)
    }

    /// Verifies no index appears twice on either axis. Run automatically in
    /// debug builds after every rebuild.
    pub fn check_consistency(&self) -> Result<(), GridError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.index) {
                return Err(GridError::DuplicateIndex {
                    axis: Axis::Column,
                    index: column.index,
                });
            }
        }
        seen.clear();
        for row in &self.rows {
            if !seen.insert(row.index) {
                return Err(GridError::DuplicateIndex {
                    axis: Axis::Row,
                    index: row.index,
                });
            }
        }
        Ok(())
    }
}
