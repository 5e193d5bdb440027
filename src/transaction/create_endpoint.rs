//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    Error,
    extract::JsonBody,
    session::{SessionId, get_session_id_from_cookies, set_session_cookie},
    transaction::{NewTransaction, TransactionPayload, TransactionState, create_transaction},
};

/// A route handler for creating a new transaction.
///
/// Requests without a valid session cookie start a new session: a fresh
/// session ID is minted, the transaction is stored under it and the session
/// cookie is set on the `201 Created` response. Requests with a valid cookie
/// reuse its session and the cookie is left untouched.
///
/// The body is validated before a session is minted or anything is stored.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    jar: PrivateCookieJar,
    JsonBody(payload): JsonBody<TransactionPayload>,
) -> Result<Response, Error> {
    let transaction = NewTransaction::try_from(payload)?;

    let (session_id, jar) = match get_session_id_from_cookies(&jar) {
        Ok(session_id) => (session_id, jar),
        Err(_) => {
            let session_id = SessionId::new_random();
            tracing::info!("Starting new session {session_id}");
            let jar = set_session_cookie(
                jar,
                session_id,
                state.session_duration,
                state.secure_cookies,
            );
            (session_id, jar)
        }
    };

    let connection = state.connection()?;
    let transaction = create_transaction(&transaction, session_id, &connection)?;
    tracing::debug!("Created transaction {} for session {session_id}", transaction.id);

    Ok((StatusCode::CREATED, jar).into_response())
}
