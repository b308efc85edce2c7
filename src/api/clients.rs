use tracing::info;

use super::ApiClient;
use crate::error::ConsoleResult;
use crate::models::{Client, DropdownItem};

impl ApiClient {
    pub async fn list_clients(&self) -> ConsoleResult<Vec<Client>> {
        self.get("clients").await?.into_field("clients")
    }

    /// Clients ordered by name, for selection widgets.
    pub async fn client_dropdown(&self) -> ConsoleResult<Vec<DropdownItem>> {
        self.get("clients-dropdown").await?.into_field("clients")
    }

    pub async fn create_client(&self, client: &Client) -> ConsoleResult<Option<i32>> {
        let payload = self.post("clients", client).await?;
        let id = payload.created_id("id");
        info!(?id, name = %client.name, "client created");
        Ok(id)
    }

    pub async fn update_client(&self, client: &Client) -> ConsoleResult<()> {
        self.put(&format!("clients/{}", client.id), client).await?;
        info!(id = client.id, "client updated");
        Ok(())
    }

    pub async fn delete_client(&self, id: i32) -> ConsoleResult<()> {
        self.delete(&format!("clients/{id}")).await?;
        info!(id, "client deleted");
        Ok(())
    }
}
