//! Defines the endpoint for the net balance of a session.

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::{
    Error,
    session::SessionId,
    transaction::{Summary, TransactionState, get_summary},
};

/// The response body for the summary endpoint.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    summary: Summary,
}

/// A route handler that sums the amounts of the session's transactions.
pub async fn get_summary_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<SummaryResponse>, Error> {
    let connection = state.connection()?;
    let summary = get_summary(session_id, &connection)?;

    Ok(Json(SummaryResponse { summary }))
}
