use axum::{http::HeaderValue, Router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labtrack::api::{
    health_routes, protected_notification_routes, protected_profile_routes,
    protected_results_routes,
};
use labtrack::config::Config;
use labtrack::middleware::{LoggingLayer, RateLimitLayer, RateLimiter, RequestIdLayer};
use labtrack::models::AuditSink;
use labtrack::repository::{
    AuditRepository, NotificationRepository, ProfileRepository, ResultsRepository,
};
use labtrack::services::{NotificationService, ProfileService, ResultsService};

/// Health endpoints get a more permissive budget than the API routes.
const HEALTH_RATE_LIMIT: u32 = 100;
const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labtrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting LabTrack results service on {}", config.server_addr());

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Create repositories and services
    let results_source = Arc::new(ResultsRepository::new(pool.clone()));
    let audit_sink: Arc<dyn AuditSink> = Arc::new(AuditRepository::new(pool.clone()));
    let results_service = Arc::new(
        ResultsService::new(results_source).with_excluded_rows(config.report_excluded_rows),
    );
    let profile_service = Arc::new(ProfileService::new(Arc::new(ProfileRepository::new(
        pool.clone(),
    ))));
    let notification_service = Arc::new(NotificationService::new(Arc::new(
        NotificationRepository::new(pool.clone()),
    )));

    let window = Duration::from_secs(config.rate_limit_window_secs);
    let api_limiter = Arc::new(RateLimiter::new(config.rate_limit_max_requests, window));
    let health_limiter = Arc::new(RateLimiter::new(HEALTH_RATE_LIMIT, window));
    spawn_rate_limit_pruning(vec![api_limiter.clone(), health_limiter.clone()]);

    // Build application routes
    let app = Router::new()
        .merge(protected_results_routes(
            results_service,
            audit_sink.clone(),
            api_limiter.clone(),
        ))
        .merge(protected_profile_routes(profile_service, api_limiter.clone()))
        .merge(protected_notification_routes(
            notification_service,
            audit_sink,
            api_limiter,
        ))
        .merge(health_routes(Arc::new(pool)).layer(RateLimitLayer::new(health_limiter)))
        .layer(LoggingLayer)
        .layer(RequestIdLayer)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server_addr()).await?;
    tracing::info!("Listening on {}", config.server_addr());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

fn spawn_rate_limit_pruning(limiters: Vec<Arc<RateLimiter>>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let pruned: usize = limiters.iter().map(|l| l.prune()).sum();
            if pruned > 0 {
                tracing::debug!(pruned, "Pruned expired rate limit windows");
            }
        }
    });
}
