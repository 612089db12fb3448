//! Wire and domain types shared by the API client and the view state.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::Date;

/// Server-assigned transaction identifier.
///
/// The service may send either a string or a number; both are kept as text
/// and only ever echoed back in URLs and update bodies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Signed(id) => Self(id.to_string()),
            RawId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[serde(alias = "CREDIT")]
    Credit,
    #[serde(alias = "DEBIT")]
    Debit,
}

impl PaymentType {
    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Credit => "Credit",
            PaymentType::Debit => "Debit",
        }
    }
}

/// A recorded credit or debit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(with = "iso_date")]
    pub transaction_date: Date,
    pub description: String,
    /// Minor units (cents).
    pub amount: u64,
    pub payment_type: PaymentType,
}

/// The body of a create request: a [Transaction] without its ID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(with = "iso_date")]
    pub transaction_date: Date,
    pub description: String,
    pub amount: u64,
    pub payment_type: PaymentType,
}

impl NewTransaction {
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            transaction_date: self.transaction_date,
            description: self.description,
            amount: self.amount,
            payment_type: self.payment_type,
        }
    }
}

/// Monthly totals computed by the service, in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: i64,
    pub credit: i64,
    pub debit: i64,
}

/// `transactionDate` is written as `YYYY-MM-DD`. Reading also accepts a full
/// ISO 8601 date-time, of which only the date part is kept.
mod iso_date {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Date};

    const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        let date_part = text.split('T').next().unwrap_or_default();
        Date::parse(date_part, FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use super::{NewTransaction, PaymentType, Summary, Transaction, TransactionId};

    #[test]
    fn transaction_reads_camel_case_fields() {
        let body = json!({
            "id": "c0ffee",
            "transactionDate": "2024-05-01",
            "description": "Salary",
            "amount": 15000,
            "paymentType": "credit"
        });

        let transaction: Transaction = serde_json::from_value(body).unwrap();

        assert_eq!(
            transaction,
            Transaction {
                id: TransactionId::new("c0ffee"),
                transaction_date: date!(2024 - 05 - 01),
                description: "Salary".to_string(),
                amount: 15000,
                payment_type: PaymentType::Credit,
            }
        );
    }

    #[test]
    fn transaction_accepts_numeric_ids_and_date_times() {
        let body = json!({
            "id": 42,
            "transactionDate": "2024-05-01T00:00:00.000Z",
            "description": "Rent",
            "amount": 120000,
            "paymentType": "DEBIT"
        });

        let transaction: Transaction = serde_json::from_value(body).unwrap();

        assert_eq!(transaction.id, TransactionId::new("42"));
        assert_eq!(transaction.transaction_date, date!(2024 - 05 - 01));
        assert_eq!(transaction.payment_type, PaymentType::Debit);
    }

    #[test]
    fn new_transaction_omits_id() {
        let payload = NewTransaction {
            transaction_date: date!(2024 - 05 - 01),
            description: "Salary".to_string(),
            amount: 15000,
            payment_type: PaymentType::Credit,
        };

        let got = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            got,
            json!({
                "transactionDate": "2024-05-01",
                "description": "Salary",
                "amount": 15000,
                "paymentType": "credit"
            })
        );
    }

    #[test]
    fn update_body_carries_id() {
        let transaction = NewTransaction {
            transaction_date: date!(2023 - 12 - 31),
            description: "Groceries".to_string(),
            amount: 4599,
            payment_type: PaymentType::Debit,
        }
        .with_id(TransactionId::new("7"));

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(got["id"], json!("7"));
        assert_eq!(got["transactionDate"], json!("2023-12-31"));
        assert_eq!(got["paymentType"], json!("debit"));
    }

    #[test]
    fn rejects_malformed_dates() {
        let body = json!({
            "id": "1",
            "transactionDate": "01/05/2024",
            "description": "Salary",
            "amount": 15000,
            "paymentType": "credit"
        });

        assert!(serde_json::from_value::<Transaction>(body).is_err());
    }

    #[test]
    fn summary_defaults_to_zero() {
        assert_eq!(
            Summary::default(),
            Summary {
                total: 0,
                credit: 0,
                debit: 0
            }
        );
    }
}
