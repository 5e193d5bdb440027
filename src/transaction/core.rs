//! Defines the core data models and database queries for transactions.
//!
//! Every query is scoped by a [SessionId]. A transaction that belongs to
//! another session behaves exactly like one that does not exist.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, OptionalExtension, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Error,
    session::SessionId,
    transaction::{
        TransactionType,
        amount::{from_cents, signed_amount, to_cents},
    },
};

// ============================================================================
// MODELS
// ============================================================================

/// A newtype wrapper for the UUID that identifies a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a new, random transaction ID.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TransactionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ToSql for TransactionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for TransactionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// The number of rows changed by an update or delete.
pub type RowsAffected = usize;

/// A credit or debit recorded by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The session that owns the transaction.
    pub session_id: SessionId,
    /// A text label for what the transaction was for.
    pub title: String,
    /// The signed amount of money, positive for credits and negative for debits.
    pub amount: Decimal,
    /// When the transaction was recorded, set by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated fields for creating or updating a transaction.
///
/// To create a new `NewTransaction`, use [NewTransaction::new].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    title: String,
    amount_cents: i64,
}

impl NewTransaction {
    /// Validate the fields for a transaction and resolve the signed amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `title` is empty or only whitespace, or
    /// if `amount` is too large to store.
    pub fn new(
        title: &str,
        amount: Decimal,
        transaction_type: TransactionType,
    ) -> Result<Self, Error> {
        if title.trim().is_empty() {
            return Err(Error::Validation("the title must not be empty".to_owned()));
        }

        let amount_cents = to_cents(signed_amount(amount, transaction_type))?;

        Ok(Self {
            title: title.to_owned(),
            amount_cents,
        })
    }

    /// The transaction's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The signed amount that will be stored.
    pub fn amount(&self) -> Decimal {
        from_cents(self.amount_cents)
    }
}

/// The net balance of a session's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of the amounts of all the session's transactions.
    pub amount: Decimal,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction owned by `session_id`.
///
/// The transaction ID is generated here and the creation time is set by the
/// database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: &NewTransaction,
    session_id: SessionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let id = TransactionId::new_random();

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (id, session_id, title, amount)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, session_id, title, amount, created_at",
        )?
        .query_row(
            (id, session_id, &transaction.title, transaction.amount_cents),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve the transaction `id` if it belongs to `session_id`.
///
/// Returns `None` both when the transaction does not exist and when it
/// belongs to another session.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transaction(
    id: TransactionId,
    session_id: SessionId,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, session_id, title, amount, created_at FROM \"transaction\"
             WHERE id = :id AND session_id = :session_id",
        )?
        .query_row(
            rusqlite::named_params! {
                ":id": id,
                ":session_id": session_id,
            },
            map_transaction_row,
        )
        .optional()?;

    Ok(transaction)
}

/// Retrieve all the transactions that belong to `session_id` in the order
/// they were created.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_transactions(
    session_id: SessionId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, session_id, title, amount, created_at FROM \"transaction\"
             WHERE session_id = :session_id
             ORDER BY rowid",
        )?
        .query_map(&[(":session_id", &session_id)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Overwrite the title and amount of the transaction `id` if it belongs to
/// `session_id`.
///
/// Zero rows affected is not an error. The caller cannot tell a missing
/// transaction from one owned by another session.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn update_transaction(
    id: TransactionId,
    session_id: SessionId,
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE \"transaction\" SET title = ?1, amount = ?2 WHERE id = ?3 AND session_id = ?4",
            (&transaction.title, transaction.amount_cents, id, session_id),
        )
        .map_err(Error::from)
}

/// Delete the transaction `id` if it belongs to `session_id`.
///
/// Zero rows affected is not an error, see [update_transaction].
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    session_id: SessionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND session_id = ?2",
            (id, session_id),
        )
        .map_err(Error::from)
}

/// Sum the amounts of all the transactions that belong to `session_id`.
///
/// A session with no transactions has a summary of zero.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
/// This includes SQLite's integer overflow error when the total does not fit
/// in 64-bit cents, which the endpoints report as a server error.
pub fn get_summary(session_id: SessionId, connection: &Connection) -> Result<Summary, Error> {
    let total_cents: Option<i64> = connection.query_row(
        "SELECT SUM(amount) FROM \"transaction\" WHERE session_id = ?1",
        (session_id,),
        |row| row.get(0),
    )?;

    Ok(Summary {
        amount: from_cents(total_cents.unwrap_or(0)),
    })
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id TEXT PRIMARY KEY NOT NULL,
                session_id TEXT NOT NULL,
                title TEXT NOT NULL,
                amount INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                )",
        (),
    )?;

    // Every query filters on the session.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_session_id ON \"transaction\"(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let session_id = row.get(1)?;
    let title = row.get(2)?;
    let amount = from_cents(row.get(3)?);
    let created_at = row.get(4)?;

    Ok(Transaction {
        id,
        session_id,
        title,
        amount,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
