//! In-memory product filtering.
//!
//! Filters an already-fetched product list the way the catalog pages do:
//! search, then brand, then category/subcategory, then price bounds.

use rust_decimal::Decimal;

use solara_core::Money;

use super::taxonomy::{Category, Subcategory, category_matches, subcategory_matches};
use crate::shopify::types::Product;

/// Filter criteria for a product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Term matched against title, description, and vendor.
    pub search: Option<String>,
    /// Vendor (brand) equality, case-insensitive.
    pub brand: Option<String>,
    /// Category claiming products via the tag heuristic.
    pub category: Option<&'static Category>,
    /// Subcategory claiming products via the tag heuristic. Takes
    /// precedence over `category` when both are set.
    pub subcategory: Option<&'static Subcategory>,
    /// Minimum price in COP.
    pub min_price: Option<Decimal>,
    /// Maximum price in COP.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Apply the filter to a product list, preserving order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }

    /// Whether a single product passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let term = search.to_lowercase();
            let hit = product.title.to_lowercase().contains(&term)
                || product.description.to_lowercase().contains(&term)
                || product.vendor.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let Some(brand) = self.brand.as_deref().filter(|s| !s.is_empty())
            && !product.vendor.eq_ignore_ascii_case(brand)
        {
            return false;
        }

        if let Some(subcategory) = self.subcategory {
            if !subcategory_matches(subcategory, product) {
                return false;
            }
        } else if let Some(category) = self.category
            && !category_matches(category, product)
        {
            return false;
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let price = product_price_cop(product);
            if let Some(min) = self.min_price
                && price < min
            {
                return false;
            }
            if let Some(max) = self.max_price
                && price > max
            {
                return false;
            }
        }

        true
    }
}

/// The display price of a product in COP (first variant, converted).
///
/// Unparseable prices count as zero, matching the permissive behavior of
/// the price filter this replaces.
fn product_price_cop(product: &Product) -> Decimal {
    product
        .primary_variant()
        .and_then(|v| Money::parse(&v.price.amount, &v.price.currency_code).ok())
        .map_or(Decimal::ZERO, |m| m.in_cop())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::find_category;
    use crate::shopify::types::{Money as WireMoney, ProductVariant};

    fn product(title: &str, vendor: &str, tags: &[&str], usd_price: &str) -> Product {
        Product {
            id: format!("gid://shopify/Product/{title}"),
            handle: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            description: format!("{title} para tu rutina"),
            vendor: vendor.to_string(),
            product_type: String::new(),
            tags: tags.iter().map(ToString::to_string).collect(),
            featured_image: None,
            images: vec![],
            variants: vec![ProductVariant {
                id: format!("gid://shopify/ProductVariant/{title}"),
                title: "Default Title".to_string(),
                available_for_sale: true,
                quantity_available: None,
                price: WireMoney {
                    amount: usd_price.to_string(),
                    currency_code: "USD".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_search_matches_title_description_vendor() {
        let filter = ProductFilter {
            search: Some("joseon".to_string()),
            ..Default::default()
        };
        let products = vec![
            product("Relief Sun", "Beauty of Joseon", &["sunscreen"], "18.00"),
            product("Toner Pad", "Mediheal", &["toner"], "22.00"),
        ];

        let filtered = filter.apply(products);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].vendor, "Beauty of Joseon");
    }

    #[test]
    fn test_brand_is_case_insensitive_equality() {
        let filter = ProductFilter {
            brand: Some("MEDIHEAL".to_string()),
            ..Default::default()
        };
        let products = vec![
            product("Toner Pad", "Mediheal", &[], "22.00"),
            product("Relief Sun", "Beauty of Joseon", &[], "18.00"),
        ];

        let filtered = filter.apply(products);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Toner Pad");
    }

    #[test]
    fn test_category_filter_uses_tag_heuristic() {
        let filter = ProductFilter {
            category: find_category("skincare"),
            ..Default::default()
        };
        let products = vec![
            product("Relief Sun", "Beauty of Joseon", &["sunscreen"], "18.00"),
            product("Labial Mate", "Romand", &["lipstick"], "12.00"),
        ];

        let filtered = filter.apply(products);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Relief Sun");
    }

    #[test]
    fn test_price_bounds_in_cop() {
        // 18 USD -> 72,000 COP; 22 USD -> 88,000 COP
        let filter = ProductFilter {
            min_price: Some(Decimal::from(80_000)),
            ..Default::default()
        };
        let products = vec![
            product("Relief Sun", "Beauty of Joseon", &[], "18.00"),
            product("Toner Pad", "Mediheal", &[], "22.00"),
        ];

        let filtered = filter.apply(products);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Toner Pad");

        let filter = ProductFilter {
            max_price: Some(Decimal::from(80_000)),
            ..Default::default()
        };
        let products = vec![
            product("Relief Sun", "Beauty of Joseon", &[], "18.00"),
            product("Toner Pad", "Mediheal", &[], "22.00"),
        ];
        let filtered = filter.apply(products);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Relief Sun");
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = ProductFilter::default();
        let products = vec![
            product("Relief Sun", "Beauty of Joseon", &[], "18.00"),
            product("Toner Pad", "Mediheal", &[], "22.00"),
        ];
        assert_eq!(filter.apply(products).len(), 2);
    }
}
