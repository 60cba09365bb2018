use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{error::Result, services::export_service::ExportService, AppState};

/// Export the whole order book as XLSX.
#[utoipa::path(
    get,
    path = "/api/v1/market/orders/export",
    responses(
        (status = 200, description = "XLSX attachment with all orders")
    )
)]
#[axum::debug_handler]
pub async fn export_orders(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let orders = state.market_service.list_orders().await?;

    let product_uuids: Vec<Uuid> = orders.iter().map(|o| o.product_uuid).collect();
    let product_names = state.market_service.product_names(&product_uuids).await?;

    let buffer = ExportService::generate_orders_xlsx(&orders, &product_names)?;
    let filename = format!("orders_export_{}.xlsx", chrono::Utc::now().format("%Y%m%d_%H%M"));
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
