use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tugende::cache::ItineraryLibrary;
use tugende::catalog::Catalog;
use tugende::config::GenerationConfig;
use tugende::rate_limit::RateLimiter;
use tugende::services::gemini::GeminiClient;
use tugende::services::planner::Planner;
use tugende::AppState;

pub const TEST_API_KEY: &str = "test-key";

/// Generation settings pointed at a mock server, or with no credentials.
#[allow(dead_code)]
pub fn generation_config(base_url: Option<&str>, timeout_secs: u64) -> GenerationConfig {
    match base_url {
        Some(url) => GenerationConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            base_url: url.to_string(),
            timeout_secs,
            ..GenerationConfig::default()
        },
        None => GenerationConfig::default(),
    }
}

#[allow(dead_code)]
pub fn build_planner(generation: &GenerationConfig) -> Planner {
    let catalog = Arc::new(Catalog::embedded().expect("embedded catalog"));
    let library = Arc::new(ItineraryLibrary::embedded(&catalog).expect("embedded library"));
    Planner::with_default_chain(
        catalog,
        GeminiClient::with_config(generation),
        library,
        7,
    )
}

/// The API router without network access to a generative service.
#[allow(dead_code)]
pub fn build_app(max_requests: u32) -> axum::Router {
    let generation = generation_config(None, 30);
    let catalog = Arc::new(Catalog::embedded().expect("embedded catalog"));
    let library = Arc::new(ItineraryLibrary::embedded(&catalog).expect("embedded library"));
    let gemini = GeminiClient::with_config(&generation);

    let state = Arc::new(AppState {
        generative_enabled: gemini.has_credentials(),
        planner: Planner::with_default_chain(catalog, gemini, library.clone(), 7),
        library,
        limiter: Arc::new(RateLimiter::new(max_requests, Duration::from_secs(60))),
    });

    axum::Router::new().nest("/api", tugende::routes::create_router(state))
}

#[allow(dead_code)]
pub fn quiz(interests: &[&str], group: &str, duration: &str) -> Value {
    json!({
        "answers": {
            "origin": "international",
            "groupType": group,
            "duration": duration,
            "budgetStyle": "mid-range",
            "interests": interests,
            "travelMonth": 7,
            "travelStyle": "comfortable"
        }
    })
}
