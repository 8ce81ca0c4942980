//! A headless virtualization engine for two-dimensional grids.
//!
//! For gesture-level utilities (kinetic scrolling, resize/reorder drags), see the
//! `gridvirt-adapter` crate.
//!
//! This crate focuses on the core algorithms needed to render effectively unbounded
//! grids (millions of rows and columns) inside a fixed-size viewport: anchor-based
//! window construction, incremental anchor walks for scroll deltas, frozen leading
//! panes, and single-cell focus tracking. Work per update is proportional to the
//! visible set (or the cells crossed by a scroll delta), never to the grid extent.
//!
//! It is UI-agnostic. A rendering layer is expected to provide:
//! - the container size (width/height)
//! - scroll deltas (wheel or drag)
//! - per-index size lookups for columns and rows
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod grid;
mod options;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::GridError;
pub use grid::Grid;
pub use options::{
    FocusChangeCallback, GridOptions, OrderChangeCallback, SizeChangeCallback, SizeLookup,
    VisibleAreaCallback,
};
pub use types::{
    Axis, ColumnSpec, ContainerSize, Coordinate, FocusedCell, FrozenArea, OrderChange, RowSpec,
    VisibleArea, Window,
};
