use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::market_dto::{
        CreateOrderPayload, MarketCategoryResponse, OrderResponse, ProductListQuery,
        ProductListResponse, ProductResponse,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/market/categories",
    responses(
        (status = 200, description = "Market categories", body = Vec<MarketCategoryResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.market_service.list_categories().await?;
    let response: Vec<MarketCategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/market/markets",
    params(
        ("name" = Option<String>, Query, description = "Filter by product name (case-insensitive)"),
        ("category" = Option<Uuid>, Query, description = "Filter by category UUID"),
        ("price_fiptp" = Option<String>, Query, description = "Filter by exact FIPTP price"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Number of results per page")
    ),
    responses(
        (status = 200, description = "Paginated products", body = ProductListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.market_service.list_products(query).await?;

    let category_uuids: Vec<Uuid> = page.items.iter().map(|p| p.category_uuid).collect();
    let categories = state.market_service.categories_by_uuid(&category_uuids).await?;

    let mut results = Vec::with_capacity(page.items.len());
    for product in page.items {
        let Some(category) = categories.get(&product.category_uuid).cloned() else {
            continue;
        };
        results.push(ProductResponse::from_parts(product, category));
    }

    let total_pages = (page.total + page.page_size - 1) / page.page_size;
    let next = (page.page < total_pages).then_some(page.page + 1);
    let previous = (page.page > 1).then_some(page.page - 1);

    Ok(Json(ProductListResponse {
        count: page.total,
        next,
        previous,
        results,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/market/markets/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Product UUID")
    ),
    responses(
        (status = 200, description = "Product detail", body = ProductResponse),
        (status = 400, description = "Invalid UUID format"),
        (status = 404, description = "Market item not found")
    )
)]
#[axum::debug_handler]
pub async fn get_product(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let product = state.market_service.get_product(uuid).await?;
    let category = state.market_service.get_category(product.category_uuid).await?;
    Ok(Json(ProductResponse::from_parts(product, category)))
}

#[utoipa::path(
    post,
    path = "/api/v1/market/orders/create",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Market item not found")
    )
)]
#[axum::debug_handler]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let order = state.market_service.create_order(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}
