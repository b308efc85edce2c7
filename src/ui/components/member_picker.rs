use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{DropdownItem, ProjectMember};
use crate::reconcile::MemberSelection;
use crate::ui::components::select::SelectState;

/// Team dropdown plus the members chosen from it so far.
pub struct MemberPicker {
    pub candidates: SelectState,
    selection: MemberSelection,
}

impl MemberPicker {
    pub fn new(candidates: Vec<DropdownItem>, current: &[ProjectMember]) -> Self {
        Self {
            candidates: SelectState::new(candidates, None),
            selection: MemberSelection::from_members(current),
        }
    }

    pub fn selection(&self) -> &MemberSelection {
        &self.selection
    }

    /// Add the highlighted candidate to the selection.
    pub fn add_highlighted(&mut self) -> ConsoleResult<()> {
        let Some(candidate) = self.candidates.selected() else {
            return Err(ConsoleError::validation("Please select a team member"));
        };
        self.selection
            .add(ProjectMember::new(candidate.id, candidate.name.clone()))
    }

    pub fn remove(&mut self, team_member_id: i32) -> bool {
        self.selection.remove(team_member_id)
    }

    pub fn remove_last(&mut self) -> bool {
        match self.selection.members().last() {
            Some(last) => {
                let id = last.team_member_id;
                self.selection.remove(id)
            }
            None => false,
        }
    }

    pub fn summary(&self) -> String {
        if self.selection.is_empty() {
            return "None".to_string();
        }
        self.selection
            .members()
            .iter()
            .map(|m| m.team_member_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> MemberPicker {
        MemberPicker::new(
            vec![DropdownItem::new(1, "Asha"), DropdownItem::new(2, "Ravi")],
            &[ProjectMember::new(1, "Asha")],
        )
    }

    #[test]
    fn picking_an_assigned_member_is_a_duplicate() {
        let mut picker = picker();
        picker.candidates.next();
        let err = picker.add_highlighted().unwrap_err();
        assert!(matches!(err, ConsoleError::DuplicateMembership { team_member_id: 1 }));
        assert_eq!(picker.selection().len(), 1);
    }

    #[test]
    fn adds_and_removes_in_order() {
        let mut picker = picker();
        assert!(picker.add_highlighted().is_err());

        picker.candidates.previous();
        picker.add_highlighted().unwrap();
        assert_eq!(picker.summary(), "Asha, Ravi");

        assert!(picker.remove_last());
        assert!(picker.remove(1));
        assert_eq!(picker.summary(), "None");
    }
}
