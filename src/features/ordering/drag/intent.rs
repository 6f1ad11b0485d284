use uuid::Uuid;

use crate::features::ordering::models::MenuSnapshot;

/// Ordering scope an item or drop region belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeId {
    /// The business's category list
    Categories,
    /// The product list of one category
    Category(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// A sortable member
    Item(Uuid),
    /// A scope's own drop region, valid even when the scope is empty
    Container(ScopeId),
}

/// Terminal event of a gesture: what was dragged and what it was released over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub active: Uuid,
    pub over: Option<DropTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    ReorderCategories {
        from: usize,
        to: usize,
    },
    ReorderProducts {
        category_id: Uuid,
        from: usize,
        to: usize,
    },
    MoveProduct {
        product_id: Uuid,
        from_category: Uuid,
        to_category: Uuid,
        /// `None` when dropped on the container itself: append
        to_index: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeList {
    pub scope: ScopeId,
    pub items: Vec<Uuid>,
}

/// Sortable members per scope, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct SortableLayout {
    pub lists: Vec<ScopeList>,
}

impl SortableLayout {
    pub fn for_categories(snapshot: &MenuSnapshot) -> Self {
        Self {
            lists: vec![ScopeList {
                scope: ScopeId::Categories,
                items: snapshot.categories.iter().map(|c| c.id).collect(),
            }],
        }
    }

    pub fn for_products(snapshot: &MenuSnapshot) -> Self {
        let lists = snapshot
            .categories
            .iter()
            .map(|category| ScopeList {
                scope: ScopeId::Category(category.id),
                items: snapshot.products_in(category.id).iter().map(|p| p.id).collect(),
            })
            .collect();
        Self { lists }
    }

    pub fn list(&self, scope: ScopeId) -> Option<&ScopeList> {
        self.lists.iter().find(|l| l.scope == scope)
    }

    pub fn locate(&self, item: Uuid) -> Option<(ScopeId, usize)> {
        self.lists.iter().find_map(|list| {
            list.items
                .iter()
                .position(|id| *id == item)
                .map(|index| (list.scope, index))
        })
    }
}

/// Turn a completed gesture into a move intent.
///
/// Returns `None` for drops that change nothing: no target, an unknown
/// target, the item's own position, or a cross-scope drop in the category
/// list. Dropping on the item's own container moves it to the end.
pub fn resolve_drop(layout: &SortableLayout, end: &DragEnd) -> Option<MoveIntent> {
    let (from_scope, from) = layout.locate(end.active)?;

    let (to_scope, to_index) = match end.over? {
        DropTarget::Item(id) => {
            let (scope, index) = layout.locate(id)?;
            (scope, Some(index))
        }
        DropTarget::Container(scope) => {
            layout.list(scope)?;
            (scope, None)
        }
    };

    if from_scope == to_scope {
        let len = layout.list(from_scope)?.items.len();
        let to = to_index.unwrap_or(len - 1);
        if from == to {
            return None;
        }
        return Some(match from_scope {
            ScopeId::Categories => MoveIntent::ReorderCategories { from, to },
            ScopeId::Category(category_id) => MoveIntent::ReorderProducts {
                category_id,
                from,
                to,
            },
        });
    }

    match (from_scope, to_scope) {
        (ScopeId::Category(from_category), ScopeId::Category(to_category)) => {
            Some(MoveIntent::MoveProduct {
                product_id: end.active,
                from_category,
                to_category,
                to_index,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(lists: Vec<(ScopeId, Vec<Uuid>)>) -> SortableLayout {
        SortableLayout {
            lists: lists
                .into_iter()
                .map(|(scope, items)| ScopeList { scope, items })
                .collect(),
        }
    }

    #[test]
    fn test_category_reorder_onto_item() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let layout = layout(vec![(ScopeId::Categories, ids.clone())]);

        let end = DragEnd {
            active: ids[0],
            over: Some(DropTarget::Item(ids[2])),
        };
        assert_eq!(
            resolve_drop(&layout, &end),
            Some(MoveIntent::ReorderCategories { from: 0, to: 2 })
        );
    }

    #[test]
    fn test_unresolved_drops_emit_nothing() {
        let ids: Vec<Uuid> = (0..2).map(|_| Uuid::new_v4()).collect();
        let layout = layout(vec![(ScopeId::Categories, ids.clone())]);

        let cancelled = DragEnd { active: ids[0], over: None };
        let on_itself = DragEnd {
            active: ids[1],
            over: Some(DropTarget::Item(ids[1])),
        };
        let unknown = DragEnd {
            active: ids[0],
            over: Some(DropTarget::Item(Uuid::new_v4())),
        };

        assert_eq!(resolve_drop(&layout, &cancelled), None);
        assert_eq!(resolve_drop(&layout, &on_itself), None);
        assert_eq!(resolve_drop(&layout, &unknown), None);
    }

    #[test]
    fn test_product_move_to_other_category_item() {
        let (x, y) = (Uuid::new_v4(), Uuid::new_v4());
        let (p1, p2, p3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let layout = layout(vec![
            (ScopeId::Category(x), vec![p1, p2]),
            (ScopeId::Category(y), vec![p3]),
        ]);

        let end = DragEnd {
            active: p1,
            over: Some(DropTarget::Item(p3)),
        };
        assert_eq!(
            resolve_drop(&layout, &end),
            Some(MoveIntent::MoveProduct {
                product_id: p1,
                from_category: x,
                to_category: y,
                to_index: Some(0),
            })
        );
    }

    #[test]
    fn test_drop_on_empty_category_container() {
        let (x, empty) = (Uuid::new_v4(), Uuid::new_v4());
        let p1 = Uuid::new_v4();
        let layout = layout(vec![
            (ScopeId::Category(x), vec![p1]),
            (ScopeId::Category(empty), vec![]),
        ]);

        let end = DragEnd {
            active: p1,
            over: Some(DropTarget::Container(ScopeId::Category(empty))),
        };
        assert_eq!(
            resolve_drop(&layout, &end),
            Some(MoveIntent::MoveProduct {
                product_id: p1,
                from_category: x,
                to_category: empty,
                to_index: None,
            })
        );
    }

    #[test]
    fn test_drop_on_own_container_moves_to_end() {
        let x = Uuid::new_v4();
        let (p1, p2, p3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let layout = layout(vec![(ScopeId::Category(x), vec![p1, p2, p3])]);

        let first = DragEnd {
            active: p1,
            over: Some(DropTarget::Container(ScopeId::Category(x))),
        };
        assert_eq!(
            resolve_drop(&layout, &first),
            Some(MoveIntent::ReorderProducts {
                category_id: x,
                from: 0,
                to: 2
            })
        );

        let last = DragEnd {
            active: p3,
            over: Some(DropTarget::Container(ScopeId::Category(x))),
        };
        assert_eq!(resolve_drop(&layout, &last), None);
    }
}
