use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use directory_service::config::Config;
use directory_service::domain::contact::service::ContactService;
use directory_service::domain::user::service::UserService;
use directory_service::inbound::http::router::create_router;
use directory_service::outbound::cache::RedisContactCache;
use directory_service::outbound::email::SmtpEmailNotifier;
use directory_service::outbound::events::KafkaEventProducer;
use directory_service::outbound::repositories::PostgresContactRepository;
use directory_service::outbound::repositories::PostgresUserRepository;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "directory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "directory-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        kafka_brokers = %config.kafka.brokers,
        kafka_topic = %config.kafka.topic,
        cache_ttl_seconds = config.redis.cache_ttl_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_connection = ConnectionManager::new(redis_client).await?;
    tracing::info!(cache = "redis", "Cache connection established");

    // Signing secret and cache handle are injected once here; nothing
    // downstream reaches for ambient globals
    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let event_producer = Arc::new(KafkaEventProducer::new(&config)?);
    let email_notifier = Arc::new(SmtpEmailNotifier::new(&config.email)?);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let user_service = Arc::new(UserService::new(
        user_repository,
        event_producer.clone(),
        email_notifier,
        authenticator.clone(),
        config.jwt.expiration_hours,
    ));

    let contact_repository = Arc::new(PostgresContactRepository::new(pg_pool));
    let contact_cache = Arc::new(RedisContactCache::new(
        redis_connection,
        Duration::from_secs(config.redis.cache_ttl_seconds),
    ));
    let contact_service = Arc::new(ContactService::new(
        contact_repository,
        contact_cache,
        event_producer,
    ));

    let router = create_router(user_service, contact_service, authenticator);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(address = %http_address, "HTTP server listening");

    axum::serve(http_listener, router).await?;

    Ok(())
}
