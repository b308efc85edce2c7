use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::info;

use crate::currency::format_inr;
use crate::models::{Amount, Client, PaymentRecord, Project};

/// Payment totals for one project, matched by project name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentTotals {
    pub count: usize,
    pub total: Amount,
    pub paid: Amount,
    pub pending: Amount,
    pub first_payment_date: Option<NaiveDate>,
}

impl PaymentTotals {
    pub fn for_project(project_name: &str, payments: &[PaymentRecord]) -> Self {
        let wanted = project_name.trim().to_lowercase();
        let matching: Vec<&PaymentRecord> = payments
            .iter()
            .filter(|p| !wanted.is_empty() && p.project_name.trim().to_lowercase() == wanted)
            .collect();

        let total: Amount = matching.iter().map(|p| p.total_amount).sum();
        let paid: Amount = matching.iter().map(|p| p.paid_amount).sum();
        Self {
            count: matching.len(),
            total,
            paid,
            pending: total - paid,
            first_payment_date: matching.iter().filter_map(|p| p.payment_date).min(),
        }
    }
}

/// Everything printed on a project statement.
#[derive(Debug, Clone)]
pub struct ProjectStatement {
    pub project: Project,
    pub client_contact: Option<String>,
    pub totals: PaymentTotals,
    pub generated_on: NaiveDate,
}

impl ProjectStatement {
    pub fn new(project: &Project, clients: &[Client], payments: &[PaymentRecord]) -> Self {
        let client_contact = clients
            .iter()
            .find(|c| c.id == project.client_id)
            .map(|c| c.contact.clone())
            .filter(|c| !c.is_empty());

        Self {
            project: project.clone(),
            client_contact,
            totals: PaymentTotals::for_project(&project.name, payments),
            generated_on: Local::now().date_naive(),
        }
    }

    pub fn file_name(&self) -> String {
        let slug: String = self
            .project
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        format!("project_{}_{}.md", self.project.id, slug.trim_matches('_'))
    }

    pub fn to_markdown(&self) -> String {
        let project = &self.project;
        let mut content = String::new();

        content.push_str(&format!("# Project Statement: {}\n\n", project.name));
        content.push_str(&format!("Generated on {}\n\n", self.generated_on.format("%Y-%m-%d")));

        content.push_str("## Project\n\n");
        content.push_str("| Field | Value |\n|---|---|\n");
        content.push_str(&format!("| Client | {} |\n", or_na(&project.client_name)));
        if let Some(contact) = &self.client_contact {
            content.push_str(&format!("| Contact | {} |\n", contact));
        }
        content.push_str(&format!("| Status | {} |\n", project.status.as_str()));
        content.push_str(&format!("| Start Date | {} |\n", format_date(project.start_date)));
        content.push_str(&format!("| End Date | {} |\n", format_date(project.end_date)));
        if !project.description.is_empty() {
            content.push_str(&format!("\n{}\n", project.description));
        }

        content.push_str("\n## Payments\n\n");
        content.push_str("| Total Amount | Paid Amount | Pending Amount | First Payment |\n");
        content.push_str("|---:|---:|---:|---|\n");
        content.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            format_inr(self.totals.total),
            format_inr(self.totals.paid),
            format_inr(self.totals.pending),
            format_date(self.totals.first_payment_date),
        ));

        content.push_str("\n## Team Members\n\n");
        if project.team_members.is_empty() {
            content.push_str("No team members assigned.\n");
        } else {
            for member in &project.team_members {
                content.push_str(&format!("- {}\n", or_na(&member.team_member_name)));
            }
        }

        content
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Not set".to_string())
}

/// Writes statements as Markdown files into one directory
pub struct StatementWriter {
    output_dir: PathBuf,
}

impl StatementWriter {
    pub fn new(output_dir: &Path) -> Result<Self> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn write(&self, statement: &ProjectStatement) -> Result<PathBuf> {
        let path = self.output_dir.join(statement.file_name());
        let mut file = File::create(&path)?;
        file.write_all(statement.to_markdown().as_bytes())?;

        info!(project = statement.project.id, path = %path.display(), "statement written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectMember, ProjectStatus};

    fn payment(project_name: &str, total: i64, paid: i64, date: Option<(i32, u32, u32)>) -> PaymentRecord {
        PaymentRecord {
            id: 0,
            total_amount: Amount::from_rupees(total),
            paid_amount: Amount::from_rupees(paid),
            payment_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            client_name: "Acme".into(),
            project_name: project_name.into(),
        }
    }

    fn project() -> Project {
        Project {
            id: 12,
            name: "Website Redesign".into(),
            client_id: 3,
            client_name: "Acme".into(),
            status: ProjectStatus::Ongoing,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            team_members: vec![ProjectMember::new(1, "Asha"), ProjectMember::new(2, "Ravi")],
            ..Project::default()
        }
    }

    #[test]
    fn totals_only_count_the_named_project() {
        let payments = vec![
            payment("website redesign", 50_000, 20_000, Some((2024, 3, 1))),
            payment("Website Redesign", 25_000, 25_000, Some((2024, 2, 1))),
            payment("Mobile App", 90_000, 0, Some((2023, 1, 1))),
        ];
        let totals = PaymentTotals::for_project("Website Redesign", &payments);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.total, Amount::from_rupees(75_000));
        assert_eq!(totals.paid, Amount::from_rupees(45_000));
        assert_eq!(totals.pending, Amount::from_rupees(30_000));
        assert_eq!(totals.first_payment_date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn markdown_lists_client_team_and_amounts() {
        let clients = vec![Client {
            id: 3,
            name: "Acme".into(),
            contact: "98450 12345".into(),
            ..Client::default()
        }];
        let payments = vec![payment("Website Redesign", 100_000, 40_000, None)];
        let statement = ProjectStatement::new(&project(), &clients, &payments);

        let markdown = statement.to_markdown();
        assert!(markdown.contains("| Contact | 98450 12345 |"));
        assert!(markdown.contains("| ₹1,00,000 | ₹40,000 | ₹60,000 | Not set |"));
        assert!(markdown.contains("- Asha\n- Ravi\n"));
        assert_eq!(statement.file_name(), "project_12_website_redesign.md");
    }
}
