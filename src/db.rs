//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Create the tables and indexes for the domain models.
///
/// All statements use `IF NOT EXISTS`, so this is safe to call on a database
/// that has already been initialized.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the schema statements fail, in
/// which case no changes are committed.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
