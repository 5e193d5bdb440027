//! Defines the endpoint for updating a transaction.

use axum::{Extension, extract::State, http::StatusCode};

use crate::{
    Error,
    extract::{JsonBody, PathParam},
    session::SessionId,
    transaction::{
        NewTransaction, TransactionId, TransactionPayload, TransactionState, update_transaction,
    },
};

/// A route handler for replacing the title and amount of a transaction.
///
/// Responds with `202 Accepted` whether or not a transaction was changed, so
/// a client cannot discover transactions that belong to other sessions.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
    PathParam(transaction_id): PathParam<TransactionId>,
    JsonBody(payload): JsonBody<TransactionPayload>,
) -> Result<StatusCode, Error> {
    let transaction = NewTransaction::try_from(payload)?;

    let connection = state.connection()?;
    let rows_affected = update_transaction(transaction_id, session_id, &transaction, &connection)?;

    if rows_affected == 0 {
        tracing::debug!(
            "Update of transaction {transaction_id} for session {session_id} matched no rows"
        );
    }

    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::{
        endpoints::{self, format_endpoint},
        transaction::test_utils::{
            create_in_session, get_test_server, start_session, transaction_json,
        },
    };

    #[tokio::test]
    async fn update_changes_title_and_sign() {
        let server = get_test_server();
        let session_cookie = start_session(&server).await;
        let id = create_in_session(
            &server,
            &session_cookie,
            &transaction_json("Coffee", 5.5, "debit"),
        )
        .await;
        let path = format_endpoint(endpoints::TRANSACTION, &id);

        let response = server
            .put(&path)
            .add_cookie(session_cookie.clone())
            .json(&transaction_json("Coffee2", 10.0, "credit"))
            .await;

        response.assert_status(StatusCode::ACCEPTED);
        let body: Value = server.get(&path).add_cookie(session_cookie).await.json();
        assert_eq!(body["transaction"]["title"], "Coffee2");
        assert_eq!(body["transaction"]["amount"], "10.00");
    }

    #[tokio::test]
    async fn update_other_sessions_transaction_is_silent_no_op() {
        let server = get_test_server();
        let owner = start_session(&server).await;
        let intruder = start_session(&server).await;
        let id = create_in_session(&server, &owner, &transaction_json("Coffee", 5.5, "debit")).await;
        let path = format_endpoint(endpoints::TRANSACTION, &id);

        let response = server
            .put(&path)
            .add_cookie(intruder)
            .json(&transaction_json("Hacked", 1000.0, "credit"))
            .await;

        response.assert_status(StatusCode::ACCEPTED);
        let body: Value = server.get(&path).add_cookie(owner).await.json();
        assert_eq!(body["transaction"]["title"], "Coffee");
        assert_eq!(body["transaction"]["amount"], "-5.50");
    }

    #[tokio::test]
    async fn update_missing_transaction_is_accepted() {
        let server = get_test_server();
        let session_cookie = start_session(&server).await;

        server
            .put(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .add_cookie(session_cookie)
            .json(&transaction_json("Nothing", 1.0, "credit"))
            .await
            .assert_status(StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn update_requires_session() {
        let server = get_test_server();

        server
            .put(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .json(&transaction_json("Coffee", 1.0, "credit"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn update_rejects_invalid_input() {
        let server = get_test_server();
        let session_cookie = start_session(&server).await;

        server
            .put(&format_endpoint(endpoints::TRANSACTION, "not-a-uuid"))
            .add_cookie(session_cookie.clone())
            .json(&transaction_json("Coffee", 1.0, "credit"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .add_cookie(session_cookie)
            .json(&json!({ "title": "Coffee", "amount": 1.0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_rejects_string_amount() {
        let server = get_test_server();
        let session_cookie = start_session(&server).await;
        let id = create_in_session(
            &server,
            &session_cookie,
            &transaction_json("Coffee", 5.5, "debit"),
        )
        .await;
        let path = format_endpoint(endpoints::TRANSACTION, &id);

        server
            .put(&path)
            .add_cookie(session_cookie.clone())
            .json(&json!({ "title": "Coffee", "amount": "10.00", "type": "credit" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let body: Value = server.get(&path).add_cookie(session_cookie).await.json();
        assert_eq!(body["transaction"]["amount"], "-5.50");
    }
}
