pub mod account_service;
pub mod export_service;
pub mod feed_service;
pub mod market_service;
pub mod profile_service;
pub mod referral_service;
pub mod swap_service;
pub mod task_service;
