//! In-memory cart state container.
//!
//! The "quick cart": an ordered list of variant-keyed line items held in
//! the session, independent of any remote Shopify cart. Checkout drains it
//! into `cartCreate` line inputs. The session-backed remote cart (ID
//! stored per session, state fetched from Shopify) lives in the cart
//! routes; this container covers the flows that never create a remote
//! cart until the buyer pays.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solara_core::Money;

use crate::shopify::types::{CartLineInput, Product};

/// Errors adding items to the local cart.
///
/// Messages are customer-facing (Spanish), matching the storefront's
/// toasts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    /// The product has no variants at all.
    #[error("No hay variantes disponibles para este producto")]
    NoVariant,
    /// The chosen variant is not available for sale.
    #[error("Este producto no está disponible")]
    Unavailable,
}

/// A line item in the local cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalCartItem {
    /// Parent product ID.
    pub product_id: String,
    /// Variant ID (the line key).
    pub variant_id: String,
    /// Product title.
    pub name: String,
    /// Vendor (brand).
    pub vendor: Option<String>,
    /// Featured image URL.
    pub image: Option<String>,
    /// Unit price as returned by Shopify.
    pub price: String,
    /// ISO 4217 currency code of the unit price.
    pub currency_code: String,
    /// Units of this variant.
    pub quantity: u32,
}

/// An ordered, variant-keyed cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalCart {
    items: Vec<LocalCartItem>,
}

impl LocalCart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LocalCartItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Subtotal in COP across all lines.
    ///
    /// Lines with unparseable prices contribute nothing.
    #[must_use]
    pub fn subtotal_cop(&self) -> Decimal {
        self.items
            .iter()
            .filter_map(|item| {
                Money::parse(&item.price, &item.currency_code)
                    .ok()
                    .map(|m| m.in_cop() * Decimal::from(item.quantity))
            })
            .sum()
    }

    /// Add one unit of a product variant.
    ///
    /// Uses the given variant, or the product's first variant when `None`.
    /// Adding an already-present variant increments its quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NoVariant` if the variant (or any variant)
    /// doesn't exist, and `CartError::Unavailable` if it is not for sale.
    pub fn add(&mut self, product: &Product, variant_id: Option<&str>) -> Result<(), CartError> {
        let variant = match variant_id {
            Some(id) => product.variants.iter().find(|v| v.id == id),
            None => product.variants.first(),
        }
        .ok_or(CartError::NoVariant)?;

        if !variant.available_for_sale {
            return Err(CartError::Unavailable);
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.variant_id == variant.id)
        {
            existing.quantity += 1;
            return Ok(());
        }

        self.items.push(LocalCartItem {
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
            name: product.title.clone(),
            vendor: Some(product.vendor.clone()).filter(|v| !v.is_empty()),
            image: product.featured_image.as_ref().map(|i| i.url.clone()),
            price: variant.price.amount.clone(),
            currency_code: variant.price.currency_code.clone(),
            quantity: 1,
        });

        Ok(())
    }

    /// Set the quantity of a variant's line.
    ///
    /// A quantity of zero removes the line; an unknown variant is a no-op.
    pub fn update_quantity(&mut self, variant_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(variant_id);
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.variant_id == variant_id)
        {
            item.quantity = quantity;
        }
    }

    /// Remove a variant's line. Returns the removed item, if present.
    pub fn remove(&mut self, variant_id: &str) -> Option<LocalCartItem> {
        let pos = self
            .items
            .iter()
            .position(|item| item.variant_id == variant_id)?;
        Some(self.items.remove(pos))
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drain the cart into checkout line inputs.
    #[must_use]
    pub fn to_checkout_lines(&self) -> Vec<CartLineInput> {
        self.items
            .iter()
            .map(|item| CartLineInput {
                merchandise_id: item.variant_id.clone(),
                quantity: i64::from(item.quantity),
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::shopify::types::{Image, Money as WireMoney, ProductVariant};

    fn variant(id: &str, available: bool, usd_price: &str) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: "Default Title".to_string(),
            available_for_sale: available,
            quantity_available: None,
            price: WireMoney {
                amount: usd_price.to_string(),
                currency_code: "USD".to_string(),
            },
        }
    }

    fn product(id: &str, title: &str, variants: Vec<ProductVariant>) -> Product {
        Product {
            id: id.to_string(),
            handle: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            description: String::new(),
            vendor: "Solara".to_string(),
            product_type: String::new(),
            tags: vec![],
            featured_image: Some(Image {
                url: "https://cdn/img.jpg".to_string(),
                alt_text: None,
            }),
            images: vec![],
            variants,
        }
    }

    #[test]
    fn test_add_first_variant_by_default() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);

        cart.add(&p, None).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].variant_id, "v1");
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_existing_variant_increments() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);

        cart.add(&p, None).unwrap();
        cart.add(&p, Some("v1")).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_without_variants_fails() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![]);

        assert_eq!(cart.add(&p, None), Err(CartError::NoVariant));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_unknown_variant_fails() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);

        assert_eq!(cart.add(&p, Some("v9")), Err(CartError::NoVariant));
    }

    #[test]
    fn test_add_unavailable_variant_fails() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", false, "20.00")]);

        assert_eq!(cart.add(&p, None), Err(CartError::Unavailable));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        cart.add(&p, None).unwrap();

        cart.update_quantity("v1", 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        cart.add(&p, None).unwrap();

        cart.update_quantity("v1", 5);

        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_unknown_variant_is_noop() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        cart.add(&p, None).unwrap();

        cart.update_quantity("v9", 5);

        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_returns_item() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        cart.add(&p, None).unwrap();

        let removed = cart.remove("v1").unwrap();
        assert_eq!(removed.name, "Serum");
        assert!(cart.remove("v1").is_none());
    }

    #[test]
    fn test_subtotal_converts_to_cop() {
        let mut cart = LocalCart::new();
        let serum = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        let crema = product("p2", "Crema", vec![variant("v2", true, "10.00")]);
        cart.add(&serum, None).unwrap();
        cart.add(&serum, None).unwrap();
        cart.add(&crema, None).unwrap();

        // (2 * 20 + 10) USD * 4000 = 200,000 COP
        assert_eq!(cart.subtotal_cop(), Decimal::from(200_000));
    }

    #[test]
    fn test_checkout_lines_mirror_items() {
        let mut cart = LocalCart::new();
        let serum = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        cart.add(&serum, None).unwrap();
        cart.update_quantity("v1", 3);

        let lines = cart.to_checkout_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].merchandise_id, "v1");
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        cart.add(&p, None).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: LocalCart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = LocalCart::new();
        let p = product("p1", "Serum", vec![variant("v1", true, "20.00")]);
        cart.add(&p, None).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
