use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::ApiClient;
use crate::error::ConsoleResult;
use crate::models::{DropdownItem, Project, ProjectPayload};
use crate::reconcile::MembershipApi;
use crate::resolve::ProjectLookup;

#[derive(Serialize)]
struct Assignment<'a> {
    team_member_id: i32,
    role: &'a str,
}

impl ApiClient {
    pub async fn list_projects(&self) -> ConsoleResult<Vec<Project>> {
        self.get("projects").await?.into_field("projects")
    }

    /// Projects owned by one client, ordered by name.
    pub async fn projects_by_client(&self, client_id: i32) -> ConsoleResult<Vec<DropdownItem>> {
        self.get(&format!("projects-by-client/{client_id}"))
            .await?
            .into_field("projects")
    }

    pub async fn create_project(&self, project: &ProjectPayload) -> ConsoleResult<Option<i32>> {
        let payload = self.post("projects", project).await?;
        let id = payload.created_id("project_id");
        info!(?id, name = %project.name, "project created");
        Ok(id)
    }

    pub async fn update_project(&self, id: i32, project: &ProjectPayload) -> ConsoleResult<()> {
        self.put(&format!("projects/{id}"), project).await?;
        info!(id, "project updated");
        Ok(())
    }

    pub async fn delete_project(&self, id: i32) -> ConsoleResult<()> {
        self.delete(&format!("projects/{id}")).await?;
        info!(id, "project deleted");
        Ok(())
    }
}

#[async_trait]
impl MembershipApi for ApiClient {
    async fn remove_team_member(&self, project_id: i32, team_member_id: i32) -> ConsoleResult<()> {
        self.delete(&format!("projects/{project_id}/team/{team_member_id}"))
            .await?;
        Ok(())
    }

    async fn assign_team_member(
        &self,
        project_id: i32,
        team_member_id: i32,
        role: &str,
    ) -> ConsoleResult<()> {
        let body = Assignment {
            team_member_id,
            role,
        };
        self.post(&format!("projects/{project_id}/team"), &body).await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectLookup for ApiClient {
    async fn projects_for_client(&self, client_id: i32) -> ConsoleResult<Vec<DropdownItem>> {
        self.projects_by_client(client_id).await
    }
}
