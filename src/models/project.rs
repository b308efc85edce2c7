use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum ProjectStatus {
    #[default]
    Ongoing,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Ongoing,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// Missing or unknown labels fall back to the backend's own default.
impl From<Option<String>> for ProjectStatus {
    fn from(label: Option<String>) -> Self {
        match label.as_deref().map(str::trim) {
            Some(l) if l.eq_ignore_ascii_case("completed") => ProjectStatus::Completed,
            Some(l) if l.eq_ignore_ascii_case("on hold") => ProjectStatus::OnHold,
            Some(l) if l.eq_ignore_ascii_case("cancelled") => ProjectStatus::Cancelled,
            _ => ProjectStatus::Ongoing,
        }
    }
}

impl From<ProjectStatus> for &'static str {
    fn from(status: ProjectStatus) -> Self {
        status.as_str()
    }
}

/// One row of a project's membership list.
///
/// The list endpoint spells it `{id, name, role}`; the console's own
/// selection uses `{team_member_id, team_member_name}`. Both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    #[serde(alias = "id")]
    pub team_member_id: i32,
    #[serde(alias = "name", default, deserialize_with = "null_as_empty")]
    pub team_member_name: String,
}

impl ProjectMember {
    pub fn new(team_member_id: i32, team_member_name: impl Into<String>) -> Self {
        Self {
            team_member_id,
            team_member_name: team_member_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub client_id: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub team_members: Vec<ProjectMember>,
}

impl Project {
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn member_names(&self) -> String {
        self.team_members
            .iter()
            .map(|m| m.team_member_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRef {
    pub team_member_id: i32,
}

/// Body of `POST /projects` and `PUT /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPayload {
    pub name: String,
    pub client_id: i32,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub team_members: Vec<MemberRef>,
}

impl ProjectPayload {
    pub fn from_project(project: &Project, members: &[ProjectMember]) -> Self {
        Self {
            name: project.name.clone(),
            client_id: project.client_id,
            description: project.description.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
            status: project.status,
            team_members: members
                .iter()
                .map(|m| MemberRef {
                    team_member_id: m.team_member_id,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_list_payload() {
        let project: Project = serde_json::from_str(
            r#"{"id": 3, "name": "Website Redesign", "client_id": 1, "client_name": "Acme",
                "description": null, "start_date": "2024-01-15", "end_date": null,
                "status": "On Hold",
                "team_members": [{"id": 7, "name": "Ravi", "role": "Member"}]}"#,
        )
        .unwrap();
        assert_eq!(project.status, ProjectStatus::OnHold);
        assert_eq!(project.description, "");
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(project.end_date, None);
        assert_eq!(project.team_members, vec![ProjectMember::new(7, "Ravi")]);
    }

    #[test]
    fn unknown_status_falls_back_to_ongoing() {
        let project: Project =
            serde_json::from_str(r#"{"id": 1, "name": "X", "status": null}"#).unwrap();
        assert_eq!(project.status, ProjectStatus::Ongoing);
    }

    #[test]
    fn payload_carries_member_ids_only() {
        let project = Project {
            name: "Portal".into(),
            client_id: 2,
            status: ProjectStatus::Completed,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Project::default()
        };
        let body = serde_json::to_value(ProjectPayload::from_project(
            &project,
            &[ProjectMember::new(4, "Asha")],
        ))
        .unwrap();
        assert_eq!(body["status"], "Completed");
        assert_eq!(body["start_date"], "2024-03-01");
        assert_eq!(body["end_date"], serde_json::Value::Null);
        assert_eq!(body["team_members"], serde_json::json!([{"team_member_id": 4}]));
    }

    #[test]
    fn status_cycles_through_every_option() {
        let mut status = ProjectStatus::Ongoing;
        for _ in 0..ProjectStatus::ALL.len() {
            status = status.next();
        }
        assert_eq!(status, ProjectStatus::Ongoing);
        assert_eq!(ProjectStatus::Ongoing.previous(), ProjectStatus::Cancelled);
    }
}
