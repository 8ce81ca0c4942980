use crate::types::Axis;

/// Errors surfaced by grid construction and scrolling.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A size lookup returned a value the layout cannot use. Sizes must be
    /// strictly positive and finite; anything else would corrupt the anchor
    /// walks, so the operation fails instead of guessing.
    #[error("{axis} size lookup returned {value} for index {index}; sizes must be positive and finite")]
    InvalidSize { axis: Axis, index: usize, value: f64 },

    /// The same index appeared twice in a rebuilt window. Only produced by
    /// [`Window::check_consistency`](crate::Window::check_consistency).
    #[error("duplicate {axis} index {index} in rebuilt window")]
    DuplicateIndex { axis: Axis, index: usize },
}
