//! Defines the endpoint for deleting a transaction.

use axum::{Extension, extract::State, http::StatusCode};

use crate::{
    Error,
    extract::PathParam,
    session::SessionId,
    transaction::{TransactionId, TransactionState, delete_transaction},
};

/// A route handler for deleting a transaction.
///
/// Responds with `202 Accepted` whether or not a transaction was deleted, so
/// deleting twice, or deleting another session's transaction, looks the same
/// as a successful delete.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
    PathParam(transaction_id): PathParam<TransactionId>,
) -> Result<StatusCode, Error> {
    let connection = state.connection()?;

    match delete_transaction(transaction_id, session_id, &connection)? {
        0 => tracing::debug!(
            "Delete of transaction {transaction_id} for session {session_id} matched no rows"
        ),
        _ => tracing::debug!("Deleted transaction {transaction_id}"),
    }

    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;
    use uuid::Uuid;

    use crate::{
        endpoints::{self, format_endpoint},
        transaction::test_utils::{
            create_in_session, get_test_server, start_session, transaction_json,
        },
    };

    #[tokio::test]
    async fn delete_twice_is_accepted_both_times() {
        let server = get_test_server();
        let session_cookie = start_session(&server).await;
        let id = create_in_session(
            &server,
            &session_cookie,
            &transaction_json("Coffee", 5.5, "debit"),
        )
        .await;
        let path = format_endpoint(endpoints::TRANSACTION, &id);

        for _ in 0..2 {
            server
                .delete(&path)
                .add_cookie(session_cookie.clone())
                .await
                .assert_status(StatusCode::ACCEPTED);
        }

        let body: Value = server.get(&path).add_cookie(session_cookie).await.json();
        assert_eq!(body["transaction"], Value::Null);
    }

    #[tokio::test]
    async fn delete_other_sessions_transaction_has_no_effect() {
        let server = get_test_server();
        let owner = start_session(&server).await;
        let intruder = start_session(&server).await;
        let id = create_in_session(&server, &owner, &transaction_json("Coffee", 5.5, "debit")).await;
        let path = format_endpoint(endpoints::TRANSACTION, &id);

        server
            .delete(&path)
            .add_cookie(intruder)
            .await
            .assert_status(StatusCode::ACCEPTED);

        let body: Value = server.get(&path).add_cookie(owner).await.json();
        assert_eq!(body["transaction"]["title"], "Coffee");
    }

    #[tokio::test]
    async fn delete_with_malformed_id_is_bad_request() {
        let server = get_test_server();
        let session_cookie = start_session(&server).await;

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, "1234"))
            .add_cookie(session_cookie)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_requires_session() {
        let server = get_test_server();

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
