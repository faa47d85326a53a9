//! Hand-authored category taxonomy and product filtering.
//!
//! Shopify does not expose the store's curated category tree, so it is
//! maintained here and products are assigned to it heuristically: a
//! subcategory claims a product when any of its tags appears (as a
//! case-insensitive substring) in the product's tags, title, or product
//! type.

mod filter;
mod taxonomy;

pub use filter::ProductFilter;
pub use taxonomy::{
    CATEGORIES, Category, FEATURED_CATEGORIES, FeaturedCategory, Subcategory, categorize,
    category_matches, find_category, find_subcategory, subcategory_matches,
};
