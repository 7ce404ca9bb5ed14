pub mod handlers;
pub mod types;

use crate::{
    config::{Config, CorsConfig},
    predictor::{ProcessScorer, Scorer},
    Error, Result,
};
use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Builds the relay routes around any scorer.
pub fn router(scorer: Arc<dyn Scorer>, cors: &CorsConfig) -> Result<Router> {
    let app_state = AppState { scorer };

    let app = Router::new()
        .route("/", get(handlers::root))
        .route(
            "/predict",
            get(handlers::predict_probe).post(handlers::predict),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)?),
        )
        .with_state(app_state);

    Ok(app)
}

pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| Error::config(format!("Invalid CORS origin '{}': {}", origin, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

pub async fn run(config: Config) -> Result<()> {
    // Initialize scorer
    let scorer = ProcessScorer::new(config.predictor.clone())?;
    info!(
        "Predictor command: {} {:?}",
        config.predictor.command,
        scorer.base_args()
    );

    // Create router
    let app = router(Arc::new(scorer), &config.server.cors)?;

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
