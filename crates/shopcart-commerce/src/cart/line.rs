//! Cart line types.

use crate::ids::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product's presence in the cart.
///
/// Serialized with the field names of the stored cart format:
/// `productId`, `title`, `unitPrice`, `imageRef`, `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product this line is for. Unique within a cart.
    pub product_id: ProductId,
    /// Display title, captured when the line was first added.
    pub title: String,
    /// Price of one unit.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    /// Image URL; not interpreted.
    pub image_ref: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A product being added to the cart: a line without a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCartLine {
    /// Product to add.
    pub product_id: ProductId,
    /// Display title.
    pub title: String,
    /// Price of one unit.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    /// Image URL.
    pub image_ref: String,
}

impl NewCartLine {
    /// Create a new line to add.
    pub fn new(
        product_id: ProductId,
        title: impl Into<String>,
        unit_price: Decimal,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            title: title.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }

    /// Turn into a cart line with quantity 1.
    pub(crate) fn into_line(self) -> CartLine {
        CartLine {
            product_id: self.product_id,
            title: self.title,
            unit_price: self.unit_price,
            image_ref: self.image_ref,
            quantity: 1,
        }
    }
}
