mod snapshot;
mod sortable;

pub use snapshot::{recompute_grouping, ItemKind, MenuSnapshot, ProductGrouping};
pub use sortable::{
    move_between_lists, renumber, reorder_within_list, sorted_by_display_order, OrderingError,
    Sortable,
};
