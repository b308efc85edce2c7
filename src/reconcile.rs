//! Converging a project's team membership with the selection made in the UI.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{ConsoleError, ConsoleResult};
use crate::models::ProjectMember;

/// Role sent with every assignment.
pub const DEFAULT_ROLE: &str = "Member";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipOp {
    Remove {
        project_id: i32,
        team_member_id: i32,
    },
    Add {
        project_id: i32,
        team_member_id: i32,
        role: String,
    },
}

/// The membership calls of the projects resource.
#[async_trait]
pub trait MembershipApi: Send + Sync {
    async fn remove_team_member(&self, project_id: i32, team_member_id: i32) -> ConsoleResult<()>;

    async fn assign_team_member(
        &self,
        project_id: i32,
        team_member_id: i32,
        role: &str,
    ) -> ConsoleResult<()>;
}

/// Decides which calls turn `current` into `desired`.
pub trait ReconcilePolicy: Send + Sync {
    fn plan(
        &self,
        project_id: i32,
        current: &[ProjectMember],
        desired: &[ProjectMember],
    ) -> Vec<MembershipOp>;
}

/// Remove every current member, then add every desired one.
///
/// Members present on both sides are removed and re-added.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullReplace;

impl ReconcilePolicy for FullReplace {
    fn plan(
        &self,
        project_id: i32,
        current: &[ProjectMember],
        desired: &[ProjectMember],
    ) -> Vec<MembershipOp> {
        let removals = current.iter().map(|m| MembershipOp::Remove {
            project_id,
            team_member_id: m.team_member_id,
        });
        let additions = desired.iter().map(|m| MembershipOp::Add {
            project_id,
            team_member_id: m.team_member_id,
            role: DEFAULT_ROLE.to_string(),
        });
        removals.chain(additions).collect()
    }
}

/// The ordered, duplicate-free set of members the user wants on a project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberSelection {
    members: Vec<ProjectMember>,
}

impl MemberSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a backend list, keeping the first of any repeated id.
    pub fn from_members(members: &[ProjectMember]) -> Self {
        let mut selection = Self::new();
        for member in members {
            if !selection.contains(member.team_member_id) {
                selection.members.push(member.clone());
            }
        }
        selection
    }

    pub fn add(&mut self, member: ProjectMember) -> ConsoleResult<()> {
        if self.contains(member.team_member_id) {
            return Err(ConsoleError::DuplicateMembership {
                team_member_id: member.team_member_id,
            });
        }
        self.members.push(member);
        Ok(())
    }

    pub fn remove(&mut self, team_member_id: i32) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.team_member_id != team_member_id);
        self.members.len() != before
    }

    pub fn contains(&self, team_member_id: i32) -> bool {
        self.members.iter().any(|m| m.team_member_id == team_member_id)
    }

    pub fn members(&self) -> &[ProjectMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Run `ops` one after another, stopping at the first failure.
///
/// Calls that already succeeded are not undone. Returns how many ran.
pub async fn apply(api: &dyn MembershipApi, ops: &[MembershipOp]) -> ConsoleResult<usize> {
    for (applied, op) in ops.iter().enumerate() {
        let result = match op {
            MembershipOp::Remove {
                project_id,
                team_member_id,
            } => api.remove_team_member(*project_id, *team_member_id).await,
            MembershipOp::Add {
                project_id,
                team_member_id,
                role,
            } => {
                api.assign_team_member(*project_id, *team_member_id, role)
                    .await
            }
        };

        if let Err(err) = result {
            warn!(
                applied,
                total = ops.len(),
                ?op,
                error = %err,
                "team reconciliation aborted, earlier changes were kept"
            );
            return Err(err);
        }
    }
    Ok(ops.len())
}

pub async fn reconcile(
    api: &dyn MembershipApi,
    policy: &dyn ReconcilePolicy,
    project_id: i32,
    current: &[ProjectMember],
    desired: &MemberSelection,
) -> ConsoleResult<usize> {
    let ops = policy.plan(project_id, current, desired.members());
    let applied = apply(api, &ops).await?;
    info!(project_id, applied, members = desired.len(), "team membership saved");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<MembershipOp>>,
        fail_on_call: Option<usize>,
    }

    impl RecordingApi {
        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::default()
            }
        }

        fn record(&self, op: MembershipOp) -> ConsoleResult<()> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(op);
            if self.fail_on_call == Some(index) {
                return Err(ConsoleError::Application(
                    "Team member not found".to_string(),
                ));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<MembershipOp> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MembershipApi for RecordingApi {
        async fn remove_team_member(
            &self,
            project_id: i32,
            team_member_id: i32,
        ) -> ConsoleResult<()> {
            self.record(MembershipOp::Remove {
                project_id,
                team_member_id,
            })
        }

        async fn assign_team_member(
            &self,
            project_id: i32,
            team_member_id: i32,
            role: &str,
        ) -> ConsoleResult<()> {
            self.record(MembershipOp::Add {
                project_id,
                team_member_id,
                role: role.to_string(),
            })
        }
    }

    fn members(ids: &[i32]) -> Vec<ProjectMember> {
        ids.iter()
            .map(|id| ProjectMember::new(*id, format!("member {id}")))
            .collect()
    }

    fn remove(team_member_id: i32) -> MembershipOp {
        MembershipOp::Remove {
            project_id: 10,
            team_member_id,
        }
    }

    fn add(team_member_id: i32) -> MembershipOp {
        MembershipOp::Add {
            project_id: 10,
            team_member_id,
            role: DEFAULT_ROLE.to_string(),
        }
    }

    #[test]
    fn full_replace_is_not_a_minimal_diff() {
        let ops = FullReplace.plan(10, &members(&[1, 2]), &members(&[2, 3]));
        assert_eq!(ops, vec![remove(1), remove(2), add(2), add(3)]);
    }

    #[test]
    fn full_replace_handles_empty_sides() {
        assert_eq!(FullReplace.plan(10, &[], &members(&[4])), vec![add(4)]);
        assert_eq!(FullReplace.plan(10, &members(&[4]), &[]), vec![remove(4)]);
        assert!(FullReplace.plan(10, &[], &[]).is_empty());
    }

    #[test]
    fn selection_rejects_duplicates() {
        let mut selection = MemberSelection::from_members(&members(&[1, 2]));
        let err = selection.add(ProjectMember::new(2, "again")).unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::DuplicateMembership { team_member_id: 2 }
        ));
        assert_eq!(selection.len(), 2);

        selection.add(ProjectMember::new(3, "new")).unwrap();
        assert!(selection.remove(1));
        assert!(!selection.remove(1));
        let ids: Vec<i32> = selection.members().iter().map(|m| m.team_member_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn seeding_drops_repeated_ids() {
        let mut seed = members(&[5, 6]);
        seed.push(ProjectMember::new(5, "dup"));
        let selection = MemberSelection::from_members(&seed);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.members()[0].team_member_name, "member 5");
    }

    #[tokio::test]
    async fn duplicate_add_makes_no_calls() {
        let api = RecordingApi::default();
        let mut selection = MemberSelection::from_members(&members(&[1]));
        assert!(selection.add(ProjectMember::new(1, "member 1")).is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn reconcile_issues_calls_in_plan_order() {
        let api = RecordingApi::default();
        let desired = MemberSelection::from_members(&members(&[2, 3]));

        let applied = reconcile(&api, &FullReplace, 10, &members(&[1, 2]), &desired)
            .await
            .unwrap();

        assert_eq!(applied, 4);
        assert_eq!(api.calls(), vec![remove(1), remove(2), add(2), add(3)]);
    }

    #[tokio::test]
    async fn first_failure_stops_the_sequence_without_rollback() {
        let api = RecordingApi::failing_on(2);
        let desired = MemberSelection::from_members(&members(&[2, 3]));

        let err = reconcile(&api, &FullReplace, 10, &members(&[1, 2]), &desired)
            .await
            .unwrap_err();

        assert!(matches!(err, ConsoleError::Application(_)));
        // Both removals stay applied; the failing add is the last call made.
        assert_eq!(api.calls(), vec![remove(1), remove(2), add(2)]);
    }
}
