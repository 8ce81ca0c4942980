//! Gesture-level driver for [`gridvirt`]: translates pointer and wheel input
//! into grid updates.
//!
//! [`GridController`] wraps a [`gridvirt::Grid`] and adds the interaction
//! layer a UI shell needs but the core engine deliberately omits:
//!
//! - scroll drags with velocity tracking and kinetic coasting after release
//! - wheel deltas, immediate or coalesced into one update per tick
//! - column/row resize drags with live preview and a minimum-size clamp
//! - column/row reorder drags with drop-target highlighting
//!
//! The controller is clock-agnostic: the host calls [`GridController::tick`]
//! with a monotonic millisecond timestamp (typically once per frame) and the
//! controller samples velocity, flushes coalesced wheel input, and advances
//! any active coast.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod inertia;
mod reorder;
mod resize;


pub use controller::{GestureId, GridController};
pub use inertia::{Coast, CoastStep, VelocityTracker};
