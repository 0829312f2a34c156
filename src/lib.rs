// Library exports for testing and reusability

pub mod cache;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::ItineraryLibrary;
use rate_limit::RateLimiter;
use services::planner::Planner;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub planner: Planner,
    pub library: Arc<ItineraryLibrary>,
    pub limiter: Arc<RateLimiter>,
    pub generative_enabled: bool,
}
