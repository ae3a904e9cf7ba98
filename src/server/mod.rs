use axum::{
    routing::get,
    Router,
    http::HeaderValue,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::config::{self, ServerSettings};
use crate::graphql::{ContactSchema, SchemaOptions, build_schema};
use crate::storage::ContactStore;

pub mod routes;

/// Where the GraphQL handler is mounted
pub const GRAPHQL_PATH: &str = "/graphql";

/// Plain-text body for every other path
pub const FALLBACK_BODY: &str = "contactql: send GraphQL requests to /graphql";

/// Server state
pub struct AppState {
    pub schema: ContactSchema,
    pub graphiql: bool,
}

/// Assemble the router: GraphQL endpoint, fallback, CORS and request tracing
pub fn build_router(schema: ContactSchema, settings: &ServerSettings) -> Router {
    let state = Arc::new(AppState {
        schema,
        graphiql: settings.graphiql,
    });

    Router::new()
        .route(GRAPHQL_PATH, get(routes::graphql_get).post(routes::graphql_post))
        .fallback(routes::fallback)
        .layer(cors_layer(settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(settings: &ServerSettings) -> CorsLayer {
    if settings.cors_is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = settings
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn start_server(settings: ServerSettings) -> anyhow::Result<()> {
    config::ensure_db_dir(&settings.database)?;
    let store = ContactStore::open(&settings.database).await?;
    tracing::info!("Using database {}", settings.database.display());

    let schema = build_schema(store, SchemaOptions { strict_ids: settings.strict_ids });
    let app = build_router(schema, &settings);

    let addr = settings.socket_addr()?;
    tracing::info!("Starting server on {}", addr);
    println!("🌍 GraphQL endpoint at http://{}{}", addr, GRAPHQL_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
