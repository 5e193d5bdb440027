//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the credit/debit sign convention
//! - Database functions for storing, querying and summing a session's transactions
//! - Route handlers for the transaction API

mod amount;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod payload;
mod state;
mod summary_endpoint;

#[cfg(test)]
pub(crate) mod test_utils;

pub use amount::TransactionType;
pub use core::{
    NewTransaction, Summary, Transaction, TransactionId, create_transaction,
    create_transaction_table, delete_transaction, get_summary, get_transaction,
    list_transactions, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::{get_transaction_endpoint, list_transactions_endpoint};
pub use payload::TransactionPayload;
pub use state::TransactionState;
pub use summary_endpoint::get_summary_endpoint;
