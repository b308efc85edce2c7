use tracing::info;

use super::ApiClient;
use crate::error::ConsoleResult;
use crate::models::{DropdownItem, TeamMember};

impl ApiClient {
    pub async fn list_team_members(&self) -> ConsoleResult<Vec<TeamMember>> {
        self.get("teams").await?.into_field("team_members")
    }

    pub async fn team_member_dropdown(&self) -> ConsoleResult<Vec<DropdownItem>> {
        self.get("team-members").await?.into_field("team_members")
    }

    pub async fn create_team_member(&self, member: &TeamMember) -> ConsoleResult<Option<i32>> {
        let payload = self.post("teams", member).await?;
        let id = payload.created_id("id");
        info!(?id, name = %member.name, "team member created");
        Ok(id)
    }

    pub async fn update_team_member(&self, member: &TeamMember) -> ConsoleResult<()> {
        self.put(&format!("teams/{}", member.id), member).await?;
        info!(id = member.id, "team member updated");
        Ok(())
    }

    pub async fn delete_team_member(&self, id: i32) -> ConsoleResult<()> {
        self.delete(&format!("teams/{id}")).await?;
        info!(id, "team member deleted");
        Ok(())
    }
}
