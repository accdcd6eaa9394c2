//! Position Model
//!
//! Columns within a board and cards within a column carry an integer
//! `position`. After every settled mutation the positions of a container
//! are exactly `0..len` with no duplicates.

/// Anything ordered by a dense integer position.
pub trait Positioned {
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

/// Set every element's position to its index, preserving order.
pub fn renumber<T: Positioned>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index as i64);
    }
}

/// Owned form of [`renumber`]. Empty input comes back empty.
pub fn normalize<T: Positioned>(mut items: Vec<T>) -> Vec<T> {
    renumber(&mut items);
    items
}

/// Stable sort by position; equal positions keep their incoming order.
pub fn sort_by_position<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
}

/// True when positions are exactly `0..len` in sequence.
pub fn is_dense<T: Positioned>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.position() == index as i64)
}

/// Clamp a requested slot into `[0, len]`.
pub fn clamp_index(target: i64, len: usize) -> usize {
    if target <= 0 {
        0
    } else if target as u64 >= len as u64 {
        len
    } else {
        target as usize
    }
}

/// Position for an entity appended to a container of `len` entities.
pub fn append_position(len: usize) -> i64 {
    len as i64
}
