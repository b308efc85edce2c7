use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{null_as_empty, Amount};

/// A payment row as the list endpoint returns it: relationships by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentRecord {
    pub id: i32,
    #[serde(default)]
    pub total_amount: Amount,
    #[serde(default)]
    pub paid_amount: Amount,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub project_name: String,
}

impl PaymentRecord {
    /// Always derived locally; the wire value is ignored.
    pub fn pending_amount(&self) -> Amount {
        self.total_amount - self.paid_amount
    }
}

/// Body of `POST /payments` and `PUT /payments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentPayload {
    pub client_id: i32,
    pub project_id: i32,
    pub total_amount: Amount,
    pub paid_amount: Amount,
    pub payment_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_derived_not_read() {
        let payment: PaymentRecord = serde_json::from_str(
            r#"{"id": 11, "total_amount": 5000, "paid_amount": 1250.25,
                "pending_amount": 1, "payment_date": "2024-05-02",
                "client_name": "Acme", "project_name": "Website"}"#,
        )
        .unwrap();
        assert_eq!(payment.pending_amount(), Amount::from_paise(374_975));
        assert_eq!(payment.payment_date, NaiveDate::from_ymd_opt(2024, 5, 2));
    }
}
