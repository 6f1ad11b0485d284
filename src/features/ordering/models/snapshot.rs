use std::collections::HashMap;

use uuid::Uuid;

use super::sortable::{renumber, sorted_by_display_order, OrderingError};
use crate::features::business::models::Business;
use crate::features::categories::models::Category;
use crate::features::products::models::Product;

/// Which kind of menu item an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Category,
    Product,
}

/// Products grouped per category, each group ordered by display order.
///
/// Always derived from the flat product list; every category of the
/// snapshot has an entry, empty ones included. Uncategorized products are
/// not part of any group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductGrouping {
    groups: HashMap<Uuid, Vec<Product>>,
}

impl ProductGrouping {
    pub fn get(&self, category_id: Uuid) -> Option<&[Product]> {
        self.groups.get(&category_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

pub fn recompute_grouping(products: &[Product], categories: &[Category]) -> ProductGrouping {
    let mut groups: HashMap<Uuid, Vec<Product>> = categories
        .iter()
        .map(|category| (category.id, Vec::new()))
        .collect();

    for product in products {
        if let Some(group) = product.category_id.and_then(|id| groups.get_mut(&id)) {
            group.push(product.clone());
        }
    }

    for group in groups.values_mut() {
        group.sort_by_key(|p| p.display_order);
    }

    ProductGrouping { groups }
}

/// In-memory view of one business's menu
///
/// Snapshots are never edited in place: every transformation returns a new
/// snapshot that replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSnapshot {
    pub business: Business,
    /// Ordered by display order
    pub categories: Vec<Category>,
    /// Flat list as fetched, source of the grouping
    pub products: Vec<Product>,
    pub grouping: ProductGrouping,
}

impl MenuSnapshot {
    pub fn new(business: Business, categories: Vec<Category>, products: Vec<Product>) -> Self {
        let categories = sorted_by_display_order(categories);
        let grouping = recompute_grouping(&products, &categories);
        Self {
            business,
            categories,
            products,
            grouping,
        }
    }

    pub fn products_in(&self, category_id: Uuid) -> &[Product] {
        self.grouping.get(category_id).unwrap_or(&[])
    }

    pub fn category_position(&self, category_id: Uuid) -> Option<usize> {
        self.categories.iter().position(|c| c.id == category_id)
    }

    /// Replace the category order; display orders follow positions
    pub fn with_categories(&self, ordered: Vec<Category>) -> Self {
        let categories = renumber(ordered);
        let grouping = recompute_grouping(&self.products, &categories);
        Self {
            business: self.business.clone(),
            categories,
            products: self.products.clone(),
            grouping,
        }
    }

    /// Replace the member lists of the given product scopes.
    ///
    /// Each listed product is assigned to its scope with display order equal
    /// to its position; products outside the given scopes are untouched.
    pub fn with_product_scopes(&self, scopes: &[(Uuid, Vec<Product>)]) -> Self {
        let mut placement: HashMap<Uuid, (Uuid, i32)> = HashMap::new();
        for (category_id, members) in scopes {
            for (index, product) in members.iter().enumerate() {
                placement.insert(product.id, (*category_id, index as i32));
            }
        }

        let products: Vec<Product> = self
            .products
            .iter()
            .map(|product| match placement.get(&product.id) {
                Some((category_id, order)) => Product {
                    category_id: Some(*category_id),
                    display_order: *order,
                    ..product.clone()
                },
                None => product.clone(),
            })
            .collect();

        let grouping = recompute_grouping(&products, &self.categories);
        Self {
            business: self.business.clone(),
            categories: self.categories.clone(),
            products,
            grouping,
        }
    }

    pub fn with_availability(
        &self,
        kind: ItemKind,
        id: Uuid,
        is_available: bool,
    ) -> Result<Self, OrderingError> {
        let mut next = self.clone();
        let found = match kind {
            ItemKind::Category => next
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .map(|c| c.is_available = is_available),
            ItemKind::Product => next
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .map(|p| p.is_available = is_available),
        };
        found.ok_or(OrderingError::ItemNotFound(id))?;

        next.grouping = recompute_grouping(&next.products, &next.categories);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{business, category, product};

    #[test]
    fn test_grouping_contains_every_category_and_sorts_members() {
        let owner = business();
        let x = category(owner.id, "X", 0);
        let empty = category(owner.id, "Empty", 1);
        let late = product(owner.id, Some(x.id), "late", 2);
        let early = product(owner.id, Some(x.id), "early", 0);
        let loose = product(owner.id, None, "loose", 0);

        let grouping = recompute_grouping(&[late.clone(), early.clone(), loose], &[x.clone(), empty.clone()]);

        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping.get(x.id).unwrap(), &[early, late]);
        assert_eq!(grouping.get(empty.id).unwrap(), &[] as &[Product]);
    }

    #[test]
    fn test_grouping_ties_keep_insertion_order() {
        let owner = business();
        let x = category(owner.id, "X", 0);
        let first = product(owner.id, Some(x.id), "first", 0);
        let second = product(owner.id, Some(x.id), "second", 0);

        let grouping = recompute_grouping(&[first.clone(), second.clone()], &[x.clone()]);
        assert_eq!(grouping.get(x.id).unwrap(), &[first, second]);
    }

    #[test]
    fn test_new_sorts_categories() {
        let owner = business();
        let b = category(owner.id, "B", 1);
        let a = category(owner.id, "A", 0);

        let snapshot = MenuSnapshot::new(owner, vec![b.clone(), a.clone()], vec![]);
        assert_eq!(snapshot.categories, vec![a, b]);
    }

    #[test]
    fn test_with_product_scopes_reassigns_and_renumbers() {
        let owner = business();
        let x = category(owner.id, "X", 0);
        let y = category(owner.id, "Y", 1);
        let p1 = product(owner.id, Some(x.id), "p1", 0);
        let p2 = product(owner.id, Some(x.id), "p2", 1);
        let p3 = product(owner.id, Some(y.id), "p3", 0);
        let snapshot = MenuSnapshot::new(
            owner,
            vec![x.clone(), y.clone()],
            vec![p1.clone(), p2.clone(), p3.clone()],
        );

        let next = snapshot.with_product_scopes(&[
            (x.id, vec![p2.clone()]),
            (y.id, vec![p1.clone(), p3.clone()]),
        ]);

        let moved = next.products.iter().find(|p| p.id == p1.id).unwrap();
        assert_eq!(moved.category_id, Some(y.id));
        let y_members: Vec<(Uuid, i32)> = next
            .products_in(y.id)
            .iter()
            .map(|p| (p.id, p.display_order))
            .collect();
        assert_eq!(y_members, vec![(p1.id, 0), (p3.id, 1)]);
        assert_eq!(next.products_in(x.id)[0].display_order, 0);
        // The previous snapshot is left as it was
        assert_eq!(snapshot.products_in(x.id)[0].id, p1.id);
    }

    #[test]
    fn test_with_availability_unknown_item() {
        let owner = business();
        let snapshot = MenuSnapshot::new(owner, vec![], vec![]);
        let missing = Uuid::new_v4();

        assert_eq!(
            snapshot.with_availability(ItemKind::Product, missing, false),
            Err(OrderingError::ItemNotFound(missing))
        );
    }
}
