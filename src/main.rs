use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use fiptster_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::cors::permissive_cors,
    routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                match state.profile_service.accrue_hourly_profit().await {
                    Ok(profiles) => {
                        info!(profiles, "hourly profit accrued");
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "Profit accrual worker error");
                    }
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let auth_api = Router::new()
        .route(
            "/api/v1/account/auth/telegram",
            post(routes::account::telegram_auth),
        )
        .route(
            "/api/v1/account/auth/token",
            post(routes::account::password_login),
        )
        .route(
            "/api/v1/account/auth/token/refresh",
            post(routes::account::refresh_token),
        )
        .route(
            "/api/v1/account/referral-points",
            get(routes::account::referral_points),
        )
        .layer(axum::middleware::from_fn_with_state(
            fiptster_backend::middleware::rate_limit::new_rps_state(config.auth_rps),
            fiptster_backend::middleware::rate_limit::rps_middleware,
        ));

    let app_api = Router::new()
        .route("/api/v1/account/profile", get(routes::account::get_profile))
        .route("/api/v1/account/coin", patch(routes::account::update_coin))
        .route("/api/v1/account/sound", patch(routes::account::update_sound))
        .route(
            "/api/v1/account/profiles",
            get(routes::account::list_profiles),
        )
        .route(
            "/api/v1/account/referrals",
            get(routes::account::list_referrals),
        )
        .route("/api/v1/account/channels", get(routes::tasks::list_channels))
        .route(
            "/api/v1/account/channels/:uuid/check",
            get(routes::tasks::check_channel),
        )
        .route("/api/v1/feeds/categories", get(routes::feeds::list_categories))
        .route("/api/v1/feeds/feeds", get(routes::feeds::list_feeds))
        .route("/api/v1/feeds/feeds/:uuid", get(routes::feeds::get_feed))
        .route(
            "/api/v1/feeds/feeds/comments/:uuid",
            post(routes::feeds::create_comment),
        )
        .route(
            "/api/v1/feeds/feeds/comments/like/:uuid",
            post(routes::feeds::like_comment),
        )
        .route(
            "/api/v1/feeds/feeds/comments/dislike/:uuid",
            post(routes::feeds::dislike_comment),
        )
        .route(
            "/api/v1/feeds/feeds/likes/:uuid",
            post(routes::feeds::like_feed),
        )
        .route(
            "/api/v1/feeds/feeds/dislike/:uuid",
            post(routes::feeds::dislike_feed),
        )
        .route(
            "/api/v1/market/categories",
            get(routes::market::list_categories),
        )
        .route("/api/v1/market/markets", get(routes::market::list_products))
        .route(
            "/api/v1/market/markets/:uuid",
            get(routes::market::get_product),
        )
        .route(
            "/api/v1/market/orders/create",
            post(routes::market::create_order),
        )
        .route(
            "/api/v1/market/orders/export",
            get(routes::export::export_orders),
        )
        .route(
            "/api/v1/token_swap/token-swap",
            post(routes::swap::create_swap),
        )
        .layer(axum::middleware::from_fn(
            fiptster_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            fiptster_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            fiptster_backend::middleware::rate_limit::rps_middleware,
        ));

    info!("Serving media from: {}", config.media_dir);

    let app = base_routes
        .merge(auth_api)
        .merge(app_api)
        .nest_service(
            "/media",
            tower_http::services::ServeDir::new(config.media_dir.clone()),
        )
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
