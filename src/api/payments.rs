use tracing::info;

use super::ApiClient;
use crate::error::ConsoleResult;
use crate::models::{PaymentPayload, PaymentRecord};

impl ApiClient {
    /// Payments newest first, with client and project given by name.
    pub async fn list_payments(&self) -> ConsoleResult<Vec<PaymentRecord>> {
        self.get("payments").await?.into_field("payments")
    }

    pub async fn create_payment(&self, payment: &PaymentPayload) -> ConsoleResult<Option<i32>> {
        let payload = self.post("payments", payment).await?;
        let id = payload.created_id("payment_id");
        info!(?id, client_id = payment.client_id, project_id = payment.project_id, "payment created");
        Ok(id)
    }

    pub async fn update_payment(&self, id: i32, payment: &PaymentPayload) -> ConsoleResult<()> {
        self.put(&format!("payments/{id}"), payment).await?;
        info!(id, paid = %payment.paid_amount, "payment updated");
        Ok(())
    }

    pub async fn delete_payment(&self, id: i32) -> ConsoleResult<()> {
        self.delete(&format!("payments/{id}")).await?;
        info!(id, "payment deleted");
        Ok(())
    }
}
