//! Application router configuration with session-guarded and public route definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState, Error, endpoints,
    logging::logging_middleware,
    session::session_guard,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_summary_endpoint, get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Creating a transaction is the only route that works without a session
/// cookie, since it is how a session is started. Every other route is
/// rejected with 401 Unauthorized before its handler runs if the cookie is
/// missing.
pub fn build_router(state: AppState) -> Router {
    let public_routes =
        Router::new().route(endpoints::TRANSACTIONS, post(create_transaction_endpoint));

    let session_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), session_guard));

    session_routes
        .merge(public_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
