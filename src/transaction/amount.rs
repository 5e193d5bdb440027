//! Monetary amounts and the credit/debit sign convention.
//!
//! Amounts are [Decimal]s in Rust and whole hundredths (cents) in the
//! database, which keeps exactly two fractional digits without any floating
//! point rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The number of fractional digits kept for amounts.
const AMOUNT_SCALE: u32 = 2;

/// The direction money moved in a transaction.
///
/// The type is only used to decide the sign of the stored amount and is
/// never persisted itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, stored as a positive amount.
    Credit,
    /// Money going out, stored as a negative amount.
    Debit,
}

/// Get the amount to store for a transaction of `transaction_type`.
///
/// The sign of `amount` as given by the client is ignored: credits are
/// always positive and debits always negative. The result is rounded to two
/// decimal places, with midpoints rounded away from zero.
pub fn signed_amount(amount: Decimal, transaction_type: TransactionType) -> Decimal {
    let magnitude = round_amount(amount.abs());

    match transaction_type {
        TransactionType::Credit => magnitude,
        TransactionType::Debit => -magnitude,
    }
}

fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert `amount` to a whole number of cents.
///
/// # Errors
///
/// Returns [Error::Validation] if the amount does not fit in 64 bits of cents.
pub(crate) fn to_cents(amount: Decimal) -> Result<i64, Error> {
    let mut rounded = round_amount(amount);
    rounded.rescale(AMOUNT_SCALE);

    if rounded.scale() != AMOUNT_SCALE {
        return Err(Error::Validation(format!("the amount {amount} is too large")));
    }

    i64::try_from(rounded.mantissa())
        .map_err(|_| Error::Validation(format!("the amount {amount} is too large")))
}

/// Convert a whole number of cents back into a decimal amount.
pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, AMOUNT_SCALE)
}
