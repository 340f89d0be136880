//! Simulated order placement.

use crate::cart::{CartLine, CartSummary};
use crate::checkout::CheckoutForm;
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::store::{CartPersistence, CartStore};
use serde::{Deserialize, Serialize};

/// What the customer sees once an order has been placed.
///
/// Holds no card details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Generated order identifier.
    pub order_id: OrderId,
    /// Customer name.
    pub full_name: String,
    /// Where the confirmation email would go.
    pub email: String,
    /// Shipping address on one line.
    pub ship_to: String,
    /// Cart lines at the time of placement.
    pub lines: Vec<CartLine>,
    /// Pricing at the time of placement.
    pub summary: CartSummary,
    /// Unix timestamp of placement.
    pub placed_at: i64,
}

/// Place an order for the store's current cart.
///
/// Fails with [`CommerceError::EmptyCart`] when there is nothing to buy and
/// with [`CommerceError::CheckoutIncomplete`] when the form is not filled in.
/// The cart itself is left as is.
pub fn place_order<P: CartPersistence>(
    store: &CartStore<P>,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CommerceError> {
    if store.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    form.validate()?;

    let confirmation = OrderConfirmation {
        order_id: OrderId::generate(),
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        ship_to: format!(
            "{}, {} {}",
            form.address.trim(),
            form.city.trim(),
            form.zip_code.trim()
        ),
        lines: store.lines().to_vec(),
        summary: store.summary(),
        placed_at: current_timestamp(),
    };

    tracing::info!(
        order_id = %confirmation.order_id,
        items = confirmation.summary.item_count,
        total = %confirmation.summary.total,
        "order placed"
    );

    Ok(confirmation)
}

/// A checkout session: the form being filled in and, once submitted, the
/// confirmation.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    form: CheckoutForm,
    confirmation: Option<OrderConfirmation>,
}

impl Checkout {
    /// Start a checkout with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a checkout with a prefilled form.
    pub fn with_form(form: CheckoutForm) -> Self {
        Self {
            form,
            confirmation: None,
        }
    }

    /// The form.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Edit the form.
    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Submit the form against the store's cart.
    ///
    /// A checkout places at most one order.
    pub fn submit<P: CartPersistence>(
        &mut self,
        store: &CartStore<P>,
    ) -> Result<&OrderConfirmation, CommerceError> {
        if let Some(existing) = &self.confirmation {
            return Err(CommerceError::OrderAlreadyPlaced(
                existing.order_id.to_string(),
            ));
        }
        let confirmation = place_order(store, &self.form)?;
        Ok(self.confirmation.insert(confirmation))
    }

    /// Whether an order has been placed.
    pub fn is_placed(&self) -> bool {
        self.confirmation.is_some()
    }

    /// The confirmation, once placed.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
