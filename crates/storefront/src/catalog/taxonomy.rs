//! The curated category tree and tag-matching heuristics.

use serde::Serialize;

use crate::shopify::types::Product;

/// A subcategory with the tags that claim products into it.
#[derive(Debug, Clone, Serialize)]
pub struct Subcategory {
    /// Display name (Spanish).
    pub name: &'static str,
    /// URL slug.
    pub slug: &'static str,
    /// Tags matched against product tags, title, and product type.
    pub tags: &'static [&'static str],
}

/// A top-level category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Display name.
    pub name: &'static str,
    /// URL slug.
    pub slug: &'static str,
    /// Subcategories in display order.
    pub subcategories: &'static [Subcategory],
}

/// The curated category tree, in display order.
///
/// Order matters: [`categorize`] returns the first match.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Skincare",
        slug: "skincare",
        subcategories: &[
            Subcategory {
                name: "Limpiadores",
                slug: "limpiadores",
                tags: &["cleanser", "cleansing", "limpiador"],
            },
            Subcategory {
                name: "Exfoliantes",
                slug: "exfoliantes",
                tags: &["exfoliant", "scrub", "exfoliante"],
            },
            Subcategory {
                name: "Tónicos",
                slug: "tonicos",
                tags: &["toner", "tonic", "tonico"],
            },
            Subcategory {
                name: "Esencias",
                slug: "esencias",
                tags: &["essence", "esencia"],
            },
            Subcategory {
                name: "Sérums/Ampollas",
                slug: "serums-ampollas",
                tags: &["serum", "ampoule", "ampolla"],
            },
            Subcategory {
                name: "Mascarillas",
                slug: "mascarillas",
                tags: &["mask", "sheet mask", "mascarilla"],
            },
            Subcategory {
                name: "Contorno de ojos",
                slug: "contorno-ojos",
                tags: &["eye cream", "eye care", "contorno"],
            },
            Subcategory {
                name: "Cremas",
                slug: "cremas",
                tags: &["moisturizer", "cream", "crema"],
            },
            Subcategory {
                name: "Protectores solares",
                slug: "protectores-solares",
                tags: &["sunscreen", "spf", "protector solar"],
            },
            Subcategory {
                name: "Beauty Tools",
                slug: "beauty-tools",
                tags: &["tool", "device", "herramienta"],
            },
            Subcategory {
                name: "Miniaturas",
                slug: "miniaturas",
                tags: &["mini", "travel size", "miniatura"],
            },
        ],
    },
    Category {
        name: "Makeup",
        slug: "makeup",
        subcategories: &[
            Subcategory {
                name: "Rostro",
                slug: "rostro",
                tags: &["foundation", "concealer", "powder"],
            },
            Subcategory {
                name: "Ojos",
                slug: "ojos",
                tags: &["eyeshadow", "eyeliner", "mascara"],
            },
            Subcategory {
                name: "Labios",
                slug: "labios",
                tags: &["lipstick", "lip gloss", "lip tint"],
            },
            Subcategory {
                name: "Cejas",
                slug: "cejas",
                tags: &["brow", "eyebrow"],
            },
        ],
    },
    Category {
        name: "Hair",
        slug: "hair",
        subcategories: &[
            Subcategory {
                name: "Shampoo",
                slug: "shampoo",
                tags: &["shampoo"],
            },
            Subcategory {
                name: "Acondicionador",
                slug: "acondicionador",
                tags: &["conditioner"],
            },
            Subcategory {
                name: "Mascarillas",
                slug: "mascarillas-cabello",
                tags: &["hair mask"],
            },
            Subcategory {
                name: "Tratamientos",
                slug: "tratamientos-cabello",
                tags: &["hair treatment"],
            },
        ],
    },
    Category {
        name: "Body",
        slug: "body",
        subcategories: &[
            Subcategory {
                name: "Manos",
                slug: "manos",
                tags: &["hand cream", "hand care"],
            },
            Subcategory {
                name: "Pies",
                slug: "pies",
                tags: &["foot cream", "foot care"],
            },
            Subcategory {
                name: "Cuerpo",
                slug: "cuerpo",
                tags: &["body lotion", "body care"],
            },
            Subcategory {
                name: "Tratamientos corporales",
                slug: "tratamientos-corporales",
                tags: &["body treatment"],
            },
        ],
    },
];

/// A category highlighted on the home surface.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedCategory {
    pub name: &'static str,
    pub slug: &'static str,
    pub count: u32,
}

/// Categories highlighted on the home surface.
///
/// Hand-maintained: the Storefront API does not expose the admin-side
/// category field these counts come from.
pub const FEATURED_CATEGORIES: &[FeaturedCategory] = &[
    FeaturedCategory {
        name: "Sunscreen",
        slug: "sunscreen",
        count: 1,
    },
    FeaturedCategory {
        name: "Eye Creams",
        slug: "eye-creams",
        count: 1,
    },
    FeaturedCategory {
        name: "Facial Cleansers",
        slug: "facial-cleansers",
        count: 1,
    },
];

/// Find a category by slug.
#[must_use]
pub fn find_category(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}

/// Find a subcategory by slug within a category.
#[must_use]
pub fn find_subcategory(category: &'static Category, slug: &str) -> Option<&'static Subcategory> {
    category.subcategories.iter().find(|s| s.slug == slug)
}

/// Whether a single taxonomy tag claims the product.
///
/// Case-insensitive substring match against the product's tags, title,
/// and product type.
fn tag_matches(tag: &str, product: &Product) -> bool {
    let tag = tag.to_lowercase();

    product
        .tags
        .iter()
        .any(|product_tag| product_tag.to_lowercase().contains(&tag))
        || product.title.to_lowercase().contains(&tag)
        || product.product_type.to_lowercase().contains(&tag)
}

/// Whether a subcategory claims the product.
#[must_use]
pub fn subcategory_matches(subcategory: &Subcategory, product: &Product) -> bool {
    subcategory.tags.iter().any(|tag| tag_matches(tag, product))
}

/// Whether a category claims the product.
///
/// The skincare category additionally claims anything whose product type
/// mentions skin; other categories union their subcategory tag lists.
#[must_use]
pub fn category_matches(category: &Category, product: &Product) -> bool {
    if category.slug == "skincare" {
        let product_type = product.product_type.to_lowercase();
        if product_type.contains("skincare") || product_type.contains("skin") {
            return true;
        }
    }

    category
        .subcategories
        .iter()
        .any(|sub| subcategory_matches(sub, product))
}

/// Assign a product to the first matching category/subcategory pair.
#[must_use]
pub fn categorize(product: &Product) -> Option<(&'static Category, &'static Subcategory)> {
    for category in CATEGORIES {
        for subcategory in category.subcategories {
            if subcategory_matches(subcategory, product) {
                return Some((category, subcategory));
            }
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::shopify::types::{Money, ProductVariant};

    fn product(title: &str, product_type: &str, tags: &[&str]) -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "test".to_string(),
            title: title.to_string(),
            description: String::new(),
            vendor: "Solara".to_string(),
            product_type: product_type.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            featured_image: None,
            images: vec![],
            variants: vec![ProductVariant {
                id: "gid://shopify/ProductVariant/1".to_string(),
                title: "Default Title".to_string(),
                available_for_sale: true,
                quantity_available: Some(5),
                price: Money {
                    amount: "10.00".to_string(),
                    currency_code: "USD".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_match_by_product_tag() {
        let p = product("Glow Serum", "", &["Serum", "brightening"]);
        let (category, subcategory) = categorize(&p).unwrap();
        assert_eq!(category.slug, "skincare");
        assert_eq!(subcategory.slug, "serums-ampollas");
    }

    #[test]
    fn test_match_by_title_substring() {
        let p = product("Crema Hidratante Intensa", "", &[]);
        let (_, subcategory) = categorize(&p).unwrap();
        assert_eq!(subcategory.slug, "cremas");
    }

    #[test]
    fn test_match_by_product_type() {
        let p = product("Rayito", "Sunscreen", &[]);
        let (_, subcategory) = categorize(&p).unwrap();
        assert_eq!(subcategory.slug, "protectores-solares");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let p = product("TONER REFRESCANTE", "", &[]);
        let (_, subcategory) = categorize(&p).unwrap();
        assert_eq!(subcategory.slug, "tonicos");
    }

    #[test]
    fn test_first_match_wins_in_declaration_order() {
        // "cleansing scrub" matches both limpiadores and exfoliantes;
        // limpiadores is declared first
        let p = product("Cleansing Scrub", "", &[]);
        let (_, subcategory) = categorize(&p).unwrap();
        assert_eq!(subcategory.slug, "limpiadores");
    }

    #[test]
    fn test_no_match_returns_none() {
        let p = product("Vela Aromática", "Candle", &["home"]);
        assert!(categorize(&p).is_none());
    }

    #[test]
    fn test_skincare_category_claims_skin_product_type() {
        let p = product("Misterioso", "Skin Care", &[]);
        let skincare = find_category("skincare").unwrap();
        assert!(category_matches(skincare, &p));
    }

    #[test]
    fn test_category_matches_via_subcategory_tags() {
        let p = product("Labial Mate", "", &["lipstick"]);
        let makeup = find_category("makeup").unwrap();
        assert!(category_matches(makeup, &p));

        let hair = find_category("hair").unwrap();
        assert!(!category_matches(hair, &p));
    }

    #[test]
    fn test_find_category_and_subcategory() {
        let body = find_category("body").unwrap();
        assert_eq!(body.name, "Body");
        assert!(find_subcategory(body, "manos").is_some());
        assert!(find_subcategory(body, "labios").is_none());
        assert!(find_category("desconocida").is_none());
    }
}
