use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tugende::cache::ItineraryLibrary;
use tugende::catalog::Catalog;
use tugende::config::Config;
use tugende::error::panic_response;
use tugende::rate_limit::RateLimiter;
use tugende::services::gemini::GeminiClient;
use tugende::services::planner::Planner;
use tugende::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tugende=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Tugende itinerary API server");
    tracing::info!("Configuration loaded successfully");

    // Destination catalog: a configured file, or the one compiled in
    let catalog = match config.catalog_path {
        Some(ref path) => {
            tracing::info!("Loading destination catalog from {}", path);
            Catalog::from_path(path)?
        }
        None => Catalog::embedded()?,
    };
    let catalog = Arc::new(catalog);
    tracing::info!("Destination catalog ready: {} destinations", catalog.len());

    let library = Arc::new(ItineraryLibrary::embedded(&catalog)?);
    tracing::info!("Itinerary library ready: {} entries", library.len());

    let gemini = GeminiClient::with_config(&config.generation);
    let generative_enabled = gemini.has_credentials();
    if !generative_enabled {
        tracing::warn!(
            "GEMINI_API_KEY not set. Itineraries will come from the library or the rule-based generator."
        );
    }

    let planner = Planner::with_default_chain(
        catalog.clone(),
        gemini,
        library.clone(),
        config.rank_limit,
    );
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max_requests,
        config.rate_limit_window(),
    ));

    // Create application state
    let state = Arc::new(AppState {
        planner,
        library,
        limiter,
        generative_enabled,
    });

    // Build router with panic recovery, CORS and tracing
    let app = Router::new()
        .nest("/api", tugende::routes::create_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CatchPanicLayer::custom(panic_response)),
        );

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
