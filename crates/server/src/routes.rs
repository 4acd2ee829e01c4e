use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use common::types::Record;
use service::store::RecordStore;

use crate::errors::ApiError;

/// Defensive ceiling; store operations are in-memory and never
/// approach it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Result slot of the dispatcher. Serialized untagged so each branch
/// keeps its own wire shape: array, object, or bare string.
#[derive(Serialize, Debug)]
#[serde(untagged)]
enum DispatchResult {
    Records(Vec<Record>),
    Record(Record),
    Literal(&'static str),
}

/// Build the application router: a single path, every verb funneled
/// into one dispatch handler so unsupported methods reach our own
/// error path instead of a framework-level 405.
pub fn build_router(store: RecordStore, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/strings", any(dispatch))
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

async fn dispatch(State(store): State<RecordStore>, method: Method, body: Bytes) -> Response {
    info!(method = %method, "request received");

    let result = match tokio::time::timeout(REQUEST_TIMEOUT, handle(&store, &method, &body)).await
    {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout),
    };

    match result {
        Ok(value) => match serde_json::to_vec(&value) {
            Ok(buf) => ([(header::CONTENT_TYPE, "application/json")], buf).into_response(),
            Err(err) => ApiError::Serialization(err).into_response(),
        },
        Err(err) => err.into_response(),
    }
}

async fn handle(
    store: &RecordStore,
    method: &Method,
    body: &Bytes,
) -> Result<DispatchResult, ApiError> {
    let mut result = match *method {
        Method::GET => DispatchResult::Records(store.list().await),
        Method::POST => {
            // A key in the body is ignored; the store assigns one.
            let item = decode(body)?;
            DispatchResult::Record(store.create(item.value).await)
        }
        Method::PUT => {
            let item = decode(body)?;
            DispatchResult::Record(store.update(item.key, item.value).await?)
        }
        Method::DELETE => {
            let item = decode(body)?;
            store.delete(item.key).await?;
            DispatchResult::Literal("OK")
        }
        _ => return Err(ApiError::UnsupportedMethod),
    };

    // GET re-reads unconditionally after the switch so the serialized
    // snapshot is the freshest one available at response time.
    if *method == Method::GET {
        result = DispatchResult::Records(store.list().await);
    }

    Ok(result)
}

fn decode(body: &Bytes) -> Result<Record, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::MalformedInput)
}
