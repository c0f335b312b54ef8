use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_contact::create_contact;
use super::handlers::delete_contact::delete_contact;
use super::handlers::forget_password::forget_password;
use super::handlers::get_contact::get_contact;
use super::handlers::list_contacts::list_contacts;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::reset_password::reset_password;
use super::handlers::update_contact::update_contact;
use super::middleware::authenticate as auth_middleware;
use crate::domain::contact::service::ContactService;
use crate::domain::user::service::UserService;
use crate::outbound::cache::RedisContactCache;
use crate::outbound::email::SmtpEmailNotifier;
use crate::outbound::events::KafkaEventProducer;
use crate::outbound::repositories::contact::PostgresContactRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service:
        Arc<UserService<PostgresUserRepository, KafkaEventProducer, SmtpEmailNotifier>>,
    pub contact_service:
        Arc<ContactService<PostgresContactRepository, RedisContactCache, KafkaEventProducer>>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository, KafkaEventProducer, SmtpEmailNotifier>>,
    contact_service: Arc<
        ContactService<PostgresContactRepository, RedisContactCache, KafkaEventProducer>,
    >,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        contact_service,
        authenticator,
    };

    // Registration, login, and the reset flow are the only anonymous
    // operations; everything touching contacts requires a verified token
    let public_routes = Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/forget-password", post(forget_password))
        .route("/api/users/reset-password", post(reset_password));

    let protected_routes = Router::new()
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts", post(create_contact))
        .route("/api/contacts/:contact_id", get(get_contact))
        .route("/api/contacts/:contact_id", put(update_contact))
        .route("/api/contacts/:contact_id", delete(delete_contact))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
