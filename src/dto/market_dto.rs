use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::market::{MarketCategory, Order, Product};
use crate::utils::media::media_url_opt;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarketCategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<MarketCategory> for MarketCategoryResponse {
    fn from(value: MarketCategory) -> Self {
        Self {
            uuid: value.uuid,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub price_fiptp: Decimal,
    pub price_dollar: Decimal,
    pub image: Option<String>,
    pub sizes: Vec<String>,
    pub category: MarketCategoryResponse,
    pub created_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn from_parts(product: Product, category: MarketCategory) -> Self {
        Self {
            uuid: product.uuid,
            name: product.name,
            price_fiptp: product.price_fiptp,
            price_dollar: product.price_dollar,
            image: media_url_opt(product.image.as_deref()),
            sizes: product.sizes,
            category: category.into(),
            created_at: product.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
#[serde(default)]
pub struct ProductListQuery {
    /// Case-insensitive name contains.
    pub name: Option<String>,
    /// Filter by category UUID.
    pub category: Option<Uuid>,
    /// Exact FIPTP price.
    pub price_fiptp: Option<Decimal>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<ProductResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderPayload {
    pub market: Uuid,
    #[validate(length(min = 1))]
    pub sizes: Vec<String>,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub country: String,
    #[validate(length(min = 1, max = 20))]
    pub zip_code: String,
    #[serde(default)]
    pub is_shipping: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub uuid: Uuid,
    pub user_id: Option<i64>,
    pub market: Uuid,
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

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        Self {
            uuid: value.uuid,
            user_id: value.user_id,
            market: value.product_uuid,
            sizes: value.sizes,
            full_name: value.full_name,
            email: value.email,
            address: value.address,
            city: value.city,
            country: value.country,
            zip_code: value.zip_code,
            is_shipping: value.is_shipping,
            created_at: value.created_at,
        }
    }
}
