use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::error::ConsoleError;
use crate::models::{DropdownItem, Project, ProjectMember};
use crate::reconcile::MemberSelection;
use crate::ui::components::form::{render_help, render_title};
use crate::ui::components::member_picker::MemberPicker;
use crate::ui::components::popup::centered_rect;

/// Team dialog for one project. Saving converges the backend to the list.
pub struct TeamAssignmentState {
    project_id: i32,
    project_name: String,
    current: Vec<ProjectMember>,
    picker: MemberPicker,
    list_state: ListState,
}

pub enum TeamAssignmentAction {
    Close,
    Save {
        project_id: i32,
        current: Vec<ProjectMember>,
        desired: MemberSelection,
    },
    Warn(ConsoleError),
}

impl TeamAssignmentState {
    pub fn new(project: &Project, team: Vec<DropdownItem>) -> Self {
        let picker = MemberPicker::new(team, &project.team_members);
        let mut list_state = ListState::default();
        if !picker.selection().is_empty() {
            list_state.select(Some(0));
        }

        Self {
            project_id: project.id,
            project_name: project.name.clone(),
            current: project.team_members.clone(),
            picker,
            list_state,
        }
    }

    fn selected_member_id(&self) -> Option<i32> {
        self.list_state
            .selected()
            .and_then(|i| self.picker.selection().members().get(i))
            .map(|m| m.team_member_id)
    }

    fn move_selection(&mut self, forward: bool) {
        let len = self.picker.selection().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let i = match (self.list_state.selected(), forward) {
            (Some(i), true) if i + 1 < len => i + 1,
            (Some(_), true) | (None, _) => 0,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn remove_selected(&mut self) {
        if let Some(id) = self.selected_member_id() {
            self.picker.remove(id);
            let len = self.picker.selection().len();
            let next = self.list_state.selected().map(|i| i.min(len.saturating_sub(1)));
            self.list_state.select(if len == 0 { None } else { next });
        }
    }
}

pub fn render_team_assignment<B: Backend>(f: &mut Frame<B>, state: &mut TeamAssignmentState) {
    let area = centered_rect(70, 70, f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    f.render_widget(Clear, area);
    render_title(f, chunks[0], &format!("Manage Team: {}", state.project_name));

    let picker = Paragraph::new(state.picker.candidates.display("Select team member"))
        .block(Block::default().title("Add Member").borders(Borders::ALL));
    f.render_widget(picker, chunks[1]);

    let items: Vec<ListItem> = if state.picker.selection().is_empty() {
        vec![ListItem::new("No team members assigned to this project.")]
    } else {
        state
            .picker
            .selection()
            .members()
            .iter()
            .map(|m| ListItem::new(m.team_member_name.clone()))
            .collect()
    };
    let list = List::new(items)
        .block(Block::default().title("Assigned").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, chunks[2], &mut state.list_state);

    render_help(
        f,
        chunks[3],
        "Left/Right - Choose | A - Add | Up/Down - Move | D - Remove | S - Save | Esc - Close",
    );
}

pub fn handle_input(state: &mut TeamAssignmentState) -> Result<Option<TeamAssignmentAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut TeamAssignmentState, key: KeyCode) -> Option<TeamAssignmentAction> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => return Some(TeamAssignmentAction::Close),
        KeyCode::Right => state.picker.candidates.next(),
        KeyCode::Left => state.picker.candidates.previous(),
        KeyCode::Down => state.move_selection(true),
        KeyCode::Up => state.move_selection(false),
        KeyCode::Char('a') | KeyCode::Enter => {
            if let Err(err) = state.picker.add_highlighted() {
                return Some(TeamAssignmentAction::Warn(err));
            }
            if state.list_state.selected().is_none() {
                state.list_state.select(Some(0));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => state.remove_selected(),
        KeyCode::Char('s') => {
            return Some(TeamAssignmentAction::Save {
                project_id: state.project_id,
                current: state.current.clone(),
                desired: state.picker.selection().clone(),
            });
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TeamAssignmentState {
        let project = Project {
            id: 12,
            name: "Website".into(),
            team_members: vec![ProjectMember::new(1, "Asha"), ProjectMember::new(2, "Ravi")],
            ..Project::default()
        };
        TeamAssignmentState::new(
            &project,
            vec![
                DropdownItem::new(1, "Asha"),
                DropdownItem::new(2, "Ravi"),
                DropdownItem::new(3, "Meera"),
            ],
        )
    }

    #[test]
    fn save_hands_over_current_and_desired() {
        let mut state = state();
        handle_key(&mut state, KeyCode::Char('d'));
        handle_key(&mut state, KeyCode::Left);
        assert!(handle_key(&mut state, KeyCode::Char('a')).is_none());

        match handle_key(&mut state, KeyCode::Char('s')) {
            Some(TeamAssignmentAction::Save {
                project_id,
                current,
                desired,
            }) => {
                assert_eq!(project_id, 12);
                assert_eq!(current.len(), 2);
                let ids: Vec<i32> = desired.members().iter().map(|m| m.team_member_id).collect();
                assert_eq!(ids, vec![2, 3]);
            }
            _ => panic!("expected a save"),
        }
    }

    #[test]
    fn duplicate_pick_is_a_warning() {
        let mut state = state();
        handle_key(&mut state, KeyCode::Right);
        let Some(TeamAssignmentAction::Warn(err)) = handle_key(&mut state, KeyCode::Char('a')) else {
            panic!("expected a warning");
        };
        assert!(err.is_warning());
    }
}
