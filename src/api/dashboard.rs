use super::ApiClient;
use crate::error::ConsoleResult;
use crate::models::DashboardSummary;

impl ApiClient {
    pub async fn fetch_summary(&self) -> ConsoleResult<DashboardSummary> {
        self.get("dashboard-data").await?.into_field("dashboard")
    }
}
