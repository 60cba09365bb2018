use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::market_dto::{CreateOrderPayload, ProductListQuery};
use crate::error::{Error, Result};
use crate::models::market::{MarketCategory, Order, Product, SIZES};

const PRODUCT_COLUMNS: &str =
    "uuid, name, price_fiptp, price_dollar, image, sizes, category_uuid, created_at";
const ORDER_COLUMNS: &str = "uuid, user_id, product_uuid, sizes, full_name, email, address, \
     city, country, zip_code, is_shipping, created_at";

#[derive(Clone)]
pub struct MarketService {
    pool: PgPool,
}

pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl MarketService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> Result<Vec<MarketCategory>> {
        let categories = sqlx::query_as::<_, MarketCategory>(
            "SELECT uuid, name, created_at FROM market_categories ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn categories_by_uuid(
        &self,
        uuids: &[Uuid],
    ) -> Result<std::collections::HashMap<Uuid, MarketCategory>> {
        let categories = sqlx::query_as::<_, MarketCategory>(
            "SELECT uuid, name, created_at FROM market_categories WHERE uuid = ANY($1)",
        )
        .bind(uuids)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories.into_iter().map(|c| (c.uuid, c)).collect())
    }

    pub async fn list_products(&self, query: ProductListQuery) -> Result<ProductPage> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * page_size;

        let mut filters = Vec::new();
        let mut text_args: Vec<String> = Vec::new();
        let mut uuid_arg: Option<Uuid> = None;
        let mut price_arg: Option<Decimal> = None;
        let mut next_index = 1;

        if let Some(name) = query.name {
            filters.push(format!("name ILIKE ${}", next_index));
            text_args.push(format!("%{}%", name));
            next_index += 1;
        }
        if let Some(category) = query.category {
            filters.push(format!("category_uuid = ${}", next_index));
            uuid_arg = Some(category);
            next_index += 1;
        }
        if let Some(price) = query.price_fiptp {
            filters.push(format!("price_fiptp = ${}", next_index));
            price_arg = Some(price);
            next_index += 1;
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT {} FROM products {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            PRODUCT_COLUMNS,
            where_clause,
            next_index,
            next_index + 1
        );
        let total_query = format!("SELECT COUNT(*) FROM products {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Product>(&items_query);
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &text_args {
            items_statement = items_statement.bind(value);
            total_statement = total_statement.bind(value);
        }
        if let Some(category) = uuid_arg {
            items_statement = items_statement.bind(category);
            total_statement = total_statement.bind(category);
        }
        if let Some(price) = price_arg {
            items_statement = items_statement.bind(price);
            total_statement = total_statement.bind(price);
        }

        let items = items_statement
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let total = total_statement.fetch_one(&self.pool).await?;

        Ok(ProductPage {
            items,
            total,
            page,
            page_size,
        })
    }

    pub async fn get_product(&self, uuid: Uuid) -> Result<Product> {
        let query = format!("SELECT {} FROM products WHERE uuid = $1", PRODUCT_COLUMNS);
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Market item not found".to_string()))?;
        Ok(product)
    }

    pub async fn get_category(&self, uuid: Uuid) -> Result<MarketCategory> {
        let category = sqlx::query_as::<_, MarketCategory>(
            "SELECT uuid, name, created_at FROM market_categories WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn create_order(&self, user_id: i64, payload: CreateOrderPayload) -> Result<Order> {
        for size in &payload.sizes {
            if !SIZES.contains(&size.as_str()) {
                return Err(Error::BadRequest(format!("Unknown size: {}", size)));
            }
        }
        let product = self.get_product(payload.market).await?;
        for size in &payload.sizes {
            if !product.sizes.is_empty() && !product.sizes.contains(size) {
                return Err(Error::BadRequest(format!(
                    "Size {} is not available for this product",
                    size
                )));
            }
        }

        let query = format!(
            "INSERT INTO orders
                 (user_id, product_uuid, sizes, full_name, email, address, city, country,
                  zip_code, is_shipping)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {}",
            ORDER_COLUMNS
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(product.uuid)
            .bind(&payload.sizes)
            .bind(&payload.full_name)
            .bind(&payload.email)
            .bind(&payload.address)
            .bind(&payload.city)
            .bind(&payload.country)
            .bind(&payload.zip_code)
            .bind(payload.is_shipping)
            .fetch_one(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        let query = format!("SELECT {} FROM orders ORDER BY created_at DESC", ORDER_COLUMNS);
        let orders = sqlx::query_as::<_, Order>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn product_names(
        &self,
        uuids: &[Uuid],
    ) -> Result<std::collections::HashMap<Uuid, String>> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT uuid, name FROM products WHERE uuid = ANY($1)")
                .bind(uuids)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
