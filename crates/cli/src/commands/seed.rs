//! Demo data seeding command.
//!
//! Inserts a handful of inventory rows so the catalog fallback has
//! something to show before the first Shopify sync.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::CommandError;

/// A demo inventory row.
struct DemoProduct {
    name: &'static str,
    category: &'static str,
    brand: &'static str,
    description: &'static str,
    /// Price in COP.
    price: i64,
    stock: i32,
    skin_types: &'static [&'static str],
}

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Protector Solar Relief Sun SPF50+",
        category: "Sunscreen",
        brand: "Beauty of Joseon",
        description: "Protector solar ligero de arroz y probióticos.",
        price: 78_000,
        stock: 25,
        skin_types: &["sunscreen", "spf", "todo tipo de piel"],
    },
    DemoProduct {
        name: "Limpiador Espumoso de Té Verde",
        category: "Facial Cleansers",
        brand: "Isntree",
        description: "Limpiador suave en espuma para uso diario.",
        price: 62_000,
        stock: 18,
        skin_types: &["cleanser", "piel grasa", "piel mixta"],
    },
    DemoProduct {
        name: "Crema Contorno de Ojos Retinal",
        category: "Eye Creams",
        brand: "Solara",
        description: "Contorno de ojos con retinal para líneas de expresión.",
        price: 95_000,
        stock: 10,
        skin_types: &["eye cream", "antiedad"],
    },
    DemoProduct {
        name: "Sérum de Niacinamida 10%",
        category: "Serums",
        brand: "Solara",
        description: "Sérum concentrado para poros y manchas.",
        price: 88_000,
        stock: 30,
        skin_types: &["serum", "piel grasa"],
    },
];

/// Seed the inventory table with demo products.
///
/// Existing rows with the same name are left untouched.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing or an insert
/// fails.
pub async fn run() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;

    let mut inserted = 0_u32;
    for product in DEMO_PRODUCTS {
        let skin_types: Vec<String> = product.skin_types.iter().map(ToString::to_string).collect();

        let result = sqlx::query(
            "INSERT INTO inventory (name, category, brand, description, price, stock, skin_types)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(product.name)
        .bind(product.category)
        .bind(product.brand)
        .bind(product.description)
        .bind(Decimal::from(product.price))
        .bind(product.stock)
        .bind(&skin_types)
        .execute(&pool)
        .await?;

        inserted += u32::try_from(result.rows_affected()).unwrap_or(0);
    }

    tracing::info!(inserted, total = DEMO_PRODUCTS.len(), "Seed finished");
    Ok(())
}
