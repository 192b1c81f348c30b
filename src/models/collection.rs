//! The live product collection.

use super::{Coordinates, IdGenerator, Person, Product, ProductId, UnitOfMeasure};
use crate::{Error, Result};

/// Products keyed by unique id, plus the generator that names new ones.
///
/// Insertion order is preserved. Updates copy fields but do not validate;
/// callers that need the invariant should call [`Product::check`] afterwards.
#[derive(Debug, Default)]
pub struct ProductCollection {
    products: Vec<Product>,
    ids: IdGenerator,
}

impl ProductCollection {
    /// Creates an empty collection whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps products loaded from storage.
    ///
    /// The id generator is moved past the largest loaded id. Products whose id
    /// is already present are dropped; the loader never produces them.
    #[must_use]
    pub fn from_loaded(products: Vec<Product>) -> Self {
        let mut collection = Self::new();
        for product in products {
            if let Err(e) = collection.insert(product) {
                tracing::warn!(error = %e, "Dropping product while building collection");
            }
        }
        collection
    }

    /// Returns the id generator.
    #[must_use]
    pub const fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Creates a product with the next id and appends it.
    ///
    /// Returns the new product's id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the id space is exhausted.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        coordinates: Coordinates,
        price: Option<i32>,
        unit_of_measure: Option<UnitOfMeasure>,
        owner: Option<Person>,
    ) -> Result<ProductId> {
        let product = Product::new(
            &self.ids,
            name,
            coordinates,
            price,
            unit_of_measure,
            owner,
        )?;
        let id = product.id;
        self.insert(product)?;
        Ok(id)
    }

    /// Appends a product that already has an id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if the id is taken.
    pub fn insert(&mut self, product: Product) -> Result<()> {
        if self.contains(product.id) {
            return Err(Error::DuplicateId(product.id));
        }
        self.ids.advance_past(product.id);
        self.products.push(product);
        Ok(())
    }

    /// Returns true if a product has `id`.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Looks a product up by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks a product up by id for mutation.
    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Copies `other`'s fields onto the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no product has `id`.
    pub fn update(&mut self, id: ProductId, other: &Product) -> Result<()> {
        let product = self.get_mut(id).ok_or(Error::NotFound(id))?;
        product.update(other);
        Ok(())
    }

    /// Removes and returns the product with `id`.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let idx = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(idx))
    }

    /// Removes every product. The id generator keeps counting.
    pub fn clear(&mut self) {
        self.products.clear();
    }

    /// Returns the largest id in the collection.
    #[must_use]
    pub fn max_id(&self) -> Option<ProductId> {
        self.products.iter().map(|p| p.id).max()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Returns the products sorted by price, then name.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Product> {
        let mut sorted: Vec<&Product> = self.products.iter().collect();
        sorted.sort_by(|a, b| a.sort_order(b));
        sorted
    }

    /// Returns the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if there are no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

}

impl<'a> IntoIterator for &'a ProductCollection {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored(id: i64, name: &str) -> Product {
        Product::with_id(
            ProductId::new(id),
            name,
            Coordinates::new(1, 1.0),
            Utc::now(),
            Some(10),
            Some(UnitOfMeasure::Liters),
            None,
        )
    }

    #[test]
    fn test_from_loaded_advances_generator() {
        let mut collection = ProductCollection::from_loaded(vec![stored(7, "a"), stored(3, "b")]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.max_id(), Some(ProductId::new(7)));

        let id = collection.create("c", Coordinates::new(0, 0.0), None, None, None).unwrap();
        assert_eq!(id, ProductId::new(8));
    }

    #[test]
    fn test_from_loaded_drops_duplicate_ids() {
        let collection = ProductCollection::from_loaded(vec![stored(1, "a"), stored(1, "b")]);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(ProductId::new(1)).map(|p| p.name.as_str()), Some("a"));
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut collection = ProductCollection::new();
        collection.insert(stored(2, "a")).unwrap();
        let err = collection.insert(stored(2, "b")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == ProductId::new(2)));
    }

    #[test]
    fn test_update_and_remove() {
        let mut collection = ProductCollection::from_loaded(vec![stored(1, "a"), stored(2, "b")]);

        collection.update(ProductId::new(1), &stored(9, "renamed")).unwrap();
        assert_eq!(collection.get(ProductId::new(1)).unwrap().name, "renamed");
        assert!(!collection.contains(ProductId::new(9)));

        assert!(matches!(
            collection.update(ProductId::new(5), &stored(5, "x")),
            Err(Error::NotFound(_))
        ));

        let removed = collection.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.name, "b");
        assert!(collection.remove(ProductId::new(2)).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_clear_keeps_counting() {
        let mut collection = ProductCollection::new();
        collection.create("a", Coordinates::new(0, 0.0), None, None, None).unwrap();
        collection.clear();
        assert!(collection.is_empty());
        let id = collection.create("b", Coordinates::new(0, 0.0), None, None, None).unwrap();
        assert_eq!(id, ProductId::new(2));
    }

    #[test]
    fn test_create_at_id_space_end_fails_without_duplicates() {
        let mut collection = ProductCollection::from_loaded(vec![stored(i64::MAX, "last")]);

        let err = collection
            .create("next", Coordinates::new(0, 0.0), None, None, None)
            .unwrap_err();
        assert!(matches!(err, Error::OperationFailed { .. }));
        assert!(collection.create("again", Coordinates::new(0, 0.0), None, None, None).is_err());

        assert_eq!(collection.len(), 1);
        assert!(collection.iter().all(|p| p.id.is_valid()));
    }

    #[test]
    fn test_sorted() {
        let mut cheap = stored(1, "z");
        cheap.price = Some(1);
        let collection = ProductCollection::from_loaded(vec![stored(2, "b"), stored(3, "a"), cheap]);
        let ids: Vec<i64> = collection.sorted().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }
}
