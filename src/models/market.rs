use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Garment sizes a product can be ordered in.
pub const SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MarketCategory {
    pub uuid: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub price_fiptp: Decimal,
    pub price_dollar: Decimal,
    pub image: Option<String>,
    pub sizes: Vec<String>,
    pub category_uuid: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub uuid: Uuid,
    pub user_id: Option<i64>,
    pub product_uuid: Uuid,
    pub sizes: Vec<String>,
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
    pub is_shipping: bool,
    pub created_at: DateTime<Utc>,
}
