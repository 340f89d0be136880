//! Product and catalog types.

use crate::cart::NewCartLine;
use crate::catalog::CategoryFilter;
use crate::error::CommerceError;
use crate::ids::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer rating summary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Average rating.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category name.
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Rating summary.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// The line to hand to [`crate::CartStore::add_item`].
    pub fn to_cart_line(&self) -> NewCartLine {
        NewCartLine::new(self.id, self.title.clone(), self.price, self.image.clone())
    }
}

/// A snapshot of the product catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse the catalog service's product list.
    ///
    /// Any parse failure is reported as [`CommerceError::CatalogUnavailable`].
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        serde_json::from_str::<Vec<Product>>(json)
            .map(Self::new)
            .map_err(|e| CommerceError::CatalogUnavailable(e.to_string()))
    }

    /// All products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get a product by ID.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct category names, in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Products matching a filter, in catalog order.
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id":1,"title":"Fjallraven Backpack","price":109.95,"description":"Fits 15 inch laptops",
         "category":"men's clothing","image":"https://example.test/1.jpg","rating":{"rate":3.9,"count":120}},
        {"id":5,"title":"Dragon Bracelet","price":695,"description":"Gold and silver",
         "category":"jewelery","image":"https://example.test/5.jpg","rating":{"rate":4.6,"count":400}},
        {"id":2,"title":"Slim Fit T-Shirt","price":22.3,"description":"",
         "category":"men's clothing","image":"https://example.test/2.jpg","rating":{"rate":4.1,"count":259}},
        {"id":9,"title":"External Hard Drive","price":64,
         "category":"electronics"}
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 4);

        let backpack = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(backpack.price, Decimal::new(10995, 2));
        assert_eq!(backpack.rating.count, 120);

        // Missing optional fields fall back to defaults
        let drive = catalog.get(ProductId::new(9)).unwrap();
        assert_eq!(drive.image, "");
        assert_eq!(drive.rating, Rating::default());
    }

    #[test]
    fn test_from_json_error() {
        let result = Catalog::from_json("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(CommerceError::CatalogUnavailable(_))));
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(
            catalog.categories(),
            vec!["men's clothing", "jewelery", "electronics"]
        );
    }

    #[test]
    fn test_filter() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.filter(&CategoryFilter::All).len(), 4);

        let clothing: Vec<u64> = catalog
            .filter(&CategoryFilter::category("men's clothing"))
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(clothing, vec![1, 2]);

        assert!(catalog.filter(&CategoryFilter::category("Jewelery")).is_empty());
    }

    #[test]
    fn test_to_cart_line() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let line = catalog.get(ProductId::new(2)).unwrap().to_cart_line();

        assert_eq!(line.product_id, ProductId::new(2));
        assert_eq!(line.title, "Slim Fit T-Shirt");
        assert_eq!(line.unit_price, Decimal::new(223, 1));
        assert_eq!(line.image_ref, "https://example.test/2.jpg");
    }
}
