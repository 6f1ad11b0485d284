use thiserror::Error;
use uuid::Uuid;

use crate::features::categories::models::Category;
use crate::features::products::models::Product;

/// An element of an ordered scope
pub trait Sortable: Clone {
    fn item_id(&self) -> Uuid;
    fn display_order(&self) -> i32;
    fn set_display_order(&mut self, order: i32);
}

impl Sortable for Category {
    fn item_id(&self) -> Uuid {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }
}

impl Sortable for Product {
    fn item_id(&self) -> Uuid {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("Index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Item '{0}' not found in scope")]
    ItemNotFound(Uuid),

    #[error("Scope '{0}' not found")]
    ScopeNotFound(Uuid),
}

/// Remove the element at `from` and reinsert it at `to`.
///
/// Returns a new list; the input is left untouched. `from == to` yields an
/// equal copy.
pub fn reorder_within_list<T: Clone>(
    list: &[T],
    from: usize,
    to: usize,
) -> Result<Vec<T>, OrderingError> {
    let len = list.len();
    for index in [from, to] {
        if index >= len {
            return Err(OrderingError::IndexOutOfBounds { index, len });
        }
    }

    let mut next = list.to_vec();
    if from != to {
        let item = next.remove(from);
        next.insert(to, item);
    }
    Ok(next)
}

/// Move `item_id` out of `source` into `dest` at `dest_index`.
///
/// The index is clamped to `0..=dest.len()`; `None` (drop on a container
/// rather than on an item) appends to the end.
pub fn move_between_lists<T: Sortable>(
    source: &[T],
    dest: &[T],
    item_id: Uuid,
    dest_index: Option<usize>,
) -> Result<(Vec<T>, Vec<T>), OrderingError> {
    let position = source
        .iter()
        .position(|item| item.item_id() == item_id)
        .ok_or(OrderingError::ItemNotFound(item_id))?;

    let mut next_source = source.to_vec();
    let moved = next_source.remove(position);

    let mut next_dest = dest.to_vec();
    let index = dest_index.unwrap_or(next_dest.len()).min(next_dest.len());
    next_dest.insert(index, moved);

    Ok((next_source, next_dest))
}

/// Rewrite display orders to match positions (`0..n`)
pub fn renumber<T: Sortable>(list: Vec<T>) -> Vec<T> {
    list.into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            item.set_display_order(index as i32);
            item
        })
        .collect()
}

/// Stable sort by display order, keeping insertion order on ties
pub fn sorted_by_display_order<T: Sortable>(mut list: Vec<T>) -> Vec<T> {
    list.sort_by_key(|item| item.display_order());
    list
}
