//! Defines the endpoints for reading a session's transactions.

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::{
    Error,
    extract::PathParam,
    session::SessionId,
    transaction::{
        Transaction, TransactionId, TransactionState, get_transaction, list_transactions,
    },
};

/// The response body for listing transactions.
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    transactions: Vec<Transaction>,
}

/// The response body for getting a single transaction.
///
/// `transaction` is `null` when the ID does not match one of the session's
/// transactions.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    transaction: Option<Transaction>,
}

/// A route handler that lists all of the session's transactions in the order
/// they were created.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<TransactionsResponse>, Error> {
    let connection = state.connection()?;
    let transactions = list_transactions(session_id, &connection)?;

    Ok(Json(TransactionsResponse { transactions }))
}

/// A route handler that gets one of the session's transactions by ID.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
    PathParam(transaction_id): PathParam<TransactionId>,
) -> Result<Json<TransactionResponse>, Error> {
    let connection = state.connection()?;
    let transaction = get_transaction(transaction_id, session_id, &connection)?;

    Ok(Json(TransactionResponse { transaction }))
}
