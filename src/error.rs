//! Errors returned by keyboard mutation.

use thiserror::Error;

/// Errors that can occur while placing buttons into a keyboard.
///
/// Only two placement mistakes are hard failures; every other
/// out-of-range index is clamped into the nearest valid position
/// instead. A failed call leaves the keyboard untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// The requested row does not exist in the keyboard.
    #[error("row index {index} out of range (last row is {max})")]
    RowOutOfRange {
        /// Row index that was asked for.
        index: isize,
        /// Largest valid row index.
        max: usize,
    },
    /// An existing-row target and a new-row position were both given.
    #[error("'from_row' and 'insert_row' are not allowed to be passed in at the same time")]
    ConflictingPlacement,
}
