//! The JSON request body shared by the create and update endpoints.

use std::fmt;

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};

use crate::{
    Error,
    transaction::{NewTransaction, TransactionType},
};

/// The request body for creating or updating a transaction.
///
/// The amount must be a JSON number. Strings such as `"5.50"` are rejected.
#[derive(Debug, Deserialize)]
pub struct TransactionPayload {
    /// Text describing the transaction.
    pub title: String,
    /// The size of the transaction. Its sign is replaced by the one implied by `type`.
    #[serde(deserialize_with = "deserialize_json_number")]
    pub amount: Decimal,
    /// Whether money came in or went out.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// Deserialize a [Decimal] from a JSON number only.
///
/// `Decimal`'s own `Deserialize` also accepts strings.
fn deserialize_json_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumberVisitor;

    impl Visitor<'_> for NumberVisitor {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(value))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Decimal, E> {
            Decimal::from_f64(value)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}

impl TryFrom<TransactionPayload> for NewTransaction {
    type Error = Error;

    fn try_from(payload: TransactionPayload) -> Result<Self, Self::Error> {
        NewTransaction::new(&payload.title, payload.amount, payload.transaction_type)
    }
}
