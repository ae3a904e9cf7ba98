use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use async_graphql::http::GraphiQLSource;
use async_graphql::parser::types::OperationType;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use crate::server::{AppState, FALLBACK_BODY, GRAPHQL_PATH};
use std::sync::Arc;

/// POST /graphql - JSON body with query, variables, operationName
pub async fn graphql_post(
    State(state): State<Arc<AppState>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GET /graphql - query string form, or the GraphiQL console for browsers
pub async fn graphql_get(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let raw = raw.unwrap_or_default();
    let has_query = raw.split('&').any(|pair| pair.starts_with("query="));

    if !has_query {
        if state.graphiql && accepts_html(&headers) {
            return Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response();
        }
        return (StatusCode::BAD_REQUEST, "Must provide query string.").into_response();
    }

    let request = match async_graphql::http::parse_query_string(&raw) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    if selects_mutation(&request) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST")],
            "Can only perform a mutation operation from a POST request.",
        )
            .into_response();
    }

    GraphQLResponse::from(state.schema.execute(request).await).into_response()
}

/// Every path other than /graphql
pub async fn fallback() -> &'static str {
    FALLBACK_BODY
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}

/// Whether the operation this request would run is a mutation
///
/// Unparseable documents return false and fail later in execution.
fn selects_mutation(request: &async_graphql::Request) -> bool {
    let Ok(doc) = async_graphql::parser::parse_query(&request.query) else {
        return false;
    };

    doc.operations.iter().any(|(name, op)| {
        let selected = match (&request.operation_name, name) {
            (Some(wanted), Some(name)) => name.as_str() == wanted.as_str(),
            (Some(_), None) => false,
            (None, _) => true,
        };
        selected && op.node.ty == OperationType::Mutation
    })
}
