use serde::{Deserialize, Serialize};

use super::Amount;

/// Aggregates computed by the backend; the console only formats them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_clients: u64,
    #[serde(default)]
    pub total_team_members: u64,
    #[serde(default)]
    pub total_projects: u64,
    #[serde(default)]
    pub total_amount: Amount,
    #[serde(default)]
    pub pending_amount: Amount,
    #[serde(default)]
    pub total_payments: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_camel_case_payload() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"totalClients": 4, "totalTeamMembers": 7, "totalProjects": 5,
                "totalAmount": 100000, "pendingAmount": 2500.5, "totalPayments": 9}"#,
        )
        .unwrap();
        assert_eq!(summary.total_clients, 4);
        assert_eq!(summary.total_team_members, 7);
        assert_eq!(summary.total_projects, 5);
        assert_eq!(summary.total_amount, Amount::from_rupees(100_000));
        assert_eq!(summary.pending_amount, Amount::from_paise(250_050));
        assert_eq!(summary.total_payments, 9);
    }
}
