use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payknox::config::Config;
use payknox::middleware::{ApiKeyAuth, RateLimiter, RequestId};
use payknox::modules::locales::repositories::LocaleRepository;
use payknox::modules::locales::services::LocaleService;
use payknox::modules::payments::services::{CardknoxPaymentProcessor, PaymentMethodRegistry};
use payknox::modules::settings::repositories::SettingRepository;
use payknox::modules::settings::services::SettingService;
use payknox::modules::{health, payments, settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payknox=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Payknox Card Payment Service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} max connections)",
        config.database.max_connections
    );

    // Shared services
    let setting_service = Arc::new(SettingService::new(SettingRepository::new(db_pool.clone())));
    let locale_service = Arc::new(LocaleService::new(LocaleRepository::new(db_pool.clone())));

    let processor = Arc::new(CardknoxPaymentProcessor::new(
        setting_service.clone(),
        locale_service.clone(),
        config.cardknox.clone(),
    ));

    let mut registry = PaymentMethodRegistry::new();
    registry.register_method(processor);
    let registry = Arc::new(registry);

    tracing::info!(
        methods = registry.list_methods().len(),
        "Payment methods registered"
    );

    let rate_limit = config.security.rate_limit_per_minute;
    let workers = config.server.workers;
    let bind_address = config.server.bind_address();

    // Start HTTP server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RateLimiter::new(rate_limit))
            .wrap(RequestId)
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(setting_service.clone()))
            .app_data(web::Data::new(locale_service.clone()))
            .app_data(web::Data::new(registry.clone()))
            .configure(health::configure)
            .route("/", web::get().to(index))
            .service(
                web::scope("/api")
                    .wrap(ApiKeyAuth::new(db_pool.clone()))
                    .configure(payments::configure),
            )
            .service(
                web::scope("/admin")
                    .wrap(ApiKeyAuth::settings_admin(db_pool.clone()))
                    .configure(settings::configure),
            )
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Payknox Card Payment Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
