//! Itinerary reordering.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("index {index} is out of range for a list of {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// Relocate the element at `from` so that it ends up at `to`.
///
/// Equivalent to removing the element and re-inserting it at `to` in the
/// shortened list. Every other element keeps its relative order, and
/// `from == to` leaves the list untouched.
///
/// # Errors
///
/// Returns `MoveError::OutOfRange` if either index is not a position in
/// `items`; the list is not modified in that case.
pub fn move_item<T>(items: &mut [T], from: usize, to: usize) -> Result<(), MoveError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(MoveError::OutOfRange { index, len });
        }
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
    Ok(())
}

/// Copying variant of [`move_item`].
///
/// # Errors
///
/// Returns `MoveError::OutOfRange` if either index is not a position in `items`.
pub fn moved<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, MoveError> {
    let mut out = items.to_vec();
    move_item(&mut out, from, to)?;
    Ok(out)
}
