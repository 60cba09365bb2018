pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    account_service::AccountService, feed_service::FeedService, market_service::MarketService,
    profile_service::ProfileService, referral_service::ReferralService, swap_service::SwapService,
    task_service::TaskService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub account_service: AccountService,
    pub profile_service: ProfileService,
    pub referral_service: ReferralService,
    pub feed_service: FeedService,
    pub market_service: MarketService,
    pub swap_service: SwapService,
    pub task_service: TaskService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let account_service = AccountService::new(pool.clone());
        let profile_service = ProfileService::new(pool.clone());
        let referral_service = ReferralService::new(pool.clone());
        let feed_service = FeedService::new(pool.clone());
        let market_service = MarketService::new(pool.clone());
        let swap_service = SwapService::new(pool.clone());
        let task_service = TaskService::new(pool.clone());

        Self {
            pool,
            account_service,
            profile_service,
            referral_service,
            feed_service,
            market_service,
            swap_service,
            task_service,
        }
    }
}
