use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, Frame};

use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{DropdownItem, Project, ProjectPayload};
use crate::ui::components::date_input::DateInputState;
use crate::ui::components::form::{
    edit_text, render_fields, render_help, render_title, wizard_layout, FormRow,
};
use crate::ui::components::member_picker::MemberPicker;
use crate::ui::components::select::SelectState;

/// What the projects screen needs to persist a wizard.
pub struct ProjectDraft {
    /// `None` for a project that does not exist yet.
    pub id: Option<i32>,
    pub payload: ProjectPayload,
}

pub enum ProjectWizardAction {
    Cancel,
    Save(ProjectDraft),
    Invalid(ConsoleError),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ProjectField {
    Name,
    Client,
    Description,
    StartDate,
    EndDate,
    Status,
    Team,
}

const FIELDS: [ProjectField; 7] = [
    ProjectField::Name,
    ProjectField::Client,
    ProjectField::Description,
    ProjectField::StartDate,
    ProjectField::EndDate,
    ProjectField::Status,
    ProjectField::Team,
];

pub struct ProjectWizardState {
    pub project: Project,
    pub current_field: ProjectField,
    pub editing: bool,
    pub clients: SelectState,
    pub team: MemberPicker,
    pub start_date_state: DateInputState,
    pub end_date_state: DateInputState,
}

impl ProjectWizardState {
    pub fn new(clients: Vec<DropdownItem>, team: Vec<DropdownItem>) -> Self {
        Self::from_existing(Project::default(), clients, team)
    }

    pub fn from_existing(
        project: Project,
        clients: Vec<DropdownItem>,
        team: Vec<DropdownItem>,
    ) -> Self {
        let selected_client = (project.client_id != 0).then_some(project.client_id);
        Self {
            clients: SelectState::new(clients, selected_client),
            team: MemberPicker::new(team, &project.team_members),
            start_date_state: DateInputState::new(project.start_date),
            end_date_state: DateInputState::new(project.end_date),
            project,
            current_field: ProjectField::Name,
            editing: false,
        }
    }

    fn index(&self) -> usize {
        self.current_field as usize
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        match self.current_field {
            ProjectField::StartDate => self.start_date_state.toggle_editing(),
            ProjectField::EndDate => self.end_date_state.toggle_editing(),
            _ => {}
        }
        self.sync_dates();
    }

    fn sync_dates(&mut self) {
        self.project.start_date = self.start_date_state.date;
        self.project.end_date = self.end_date_state.date;
    }

    pub fn next_field(&mut self) {
        self.current_field = FIELDS[(self.index() + 1) % FIELDS.len()];
    }

    pub fn previous_field(&mut self) {
        self.current_field = FIELDS[(self.index() + FIELDS.len() - 1) % FIELDS.len()];
    }

    /// Returns a warning to show when a team pick was rejected.
    pub fn edit_current_field(&mut self, key: KeyCode) -> Option<ConsoleError> {
        if !self.editing {
            return None;
        }

        match self.current_field {
            ProjectField::Name => edit_text(&mut self.project.name, key),
            ProjectField::Description => edit_text(&mut self.project.description, key),
            ProjectField::Client => match key {
                KeyCode::Right => self.clients.next(),
                KeyCode::Left => self.clients.previous(),
                _ => {}
            },
            ProjectField::StartDate => self.start_date_state.handle_input(key),
            ProjectField::EndDate => self.end_date_state.handle_input(key),
            ProjectField::Status => match key {
                KeyCode::Right => self.project.status = self.project.status.next(),
                KeyCode::Left => self.project.status = self.project.status.previous(),
                _ => {}
            },
            ProjectField::Team => match key {
                KeyCode::Right => self.team.candidates.next(),
                KeyCode::Left => self.team.candidates.previous(),
                KeyCode::Char('a') => return self.team.add_highlighted().err(),
                KeyCode::Backspace => {
                    self.team.remove_last();
                }
                _ => {}
            },
        }
        self.sync_dates();
        None
    }

    /// Name and client are required; end may not precede start.
    pub fn validate(&self) -> ConsoleResult<ProjectDraft> {
        let client_id = self.clients.selected_id();
        if self.project.name.trim().is_empty() || client_id.is_none() {
            return Err(ConsoleError::validation("Project name and client are required"));
        }
        if let (Some(start), Some(end)) = (self.project.start_date, self.project.end_date) {
            if end < start {
                return Err(ConsoleError::validation("End date cannot be before the start date"));
            }
        }

        let mut project = self.project.clone();
        project.name = project.name.trim().to_string();
        project.client_id = client_id.unwrap_or_default();
        Ok(ProjectDraft {
            id: (!project.is_new()).then_some(project.id),
            payload: ProjectPayload::from_project(&project, self.team.selection().members()),
        })
    }
}

pub fn render_project_wizard<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState) {
    let chunks = wizard_layout(f.size());

    let title = if state.project.is_new() {
        "Add New Project"
    } else {
        "Edit Project"
    };
    render_title(f, chunks[0], title);

    let team_value = if state.editing && state.current_field == ProjectField::Team {
        format!("{}  add: {}", state.team.summary(), state.team.candidates.display("Select team member"))
    } else {
        state.team.summary()
    };
    let rows = [
        FormRow::new("Name", state.project.name.as_str()),
        FormRow::choice("Client", state.clients.display("Select client")),
        FormRow::new("Description", state.project.description.as_str()),
        FormRow::choice("Start Date", state.start_date_state.get_display_string()),
        FormRow::choice("End Date", state.end_date_state.get_display_string()),
        FormRow::choice("Status", format!("< {} >", state.project.status.as_str())),
        FormRow::choice("Team", team_value),
    ];
    render_fields(f, chunks[1], "Project Details", &rows, state.index(), state.editing);

    let help = if state.editing {
        match state.current_field {
            ProjectField::Name | ProjectField::Description => "Enter - Save field | Esc - Stop editing",
            ProjectField::StartDate | ProjectField::EndDate => {
                "Enter - Save field | Left/Right - Switch date part | Del - Clear date"
            }
            ProjectField::Client | ProjectField::Status => "Left/Right - Change | Enter - Done",
            ProjectField::Team => "Left/Right - Choose member | A - Add | Backspace - Remove last | Enter - Done",
        }
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save project | Esc - Cancel"
    };
    render_help(f, chunks[2], help);
}

pub fn handle_input(state: &mut ProjectWizardState) -> Result<Option<ProjectWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut ProjectWizardState, key: KeyCode) -> Option<ProjectWizardAction> {
    match key {
        KeyCode::Esc | KeyCode::Enter if state.editing => state.toggle_editing(),
        KeyCode::Esc => return Some(ProjectWizardAction::Cancel),
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            return Some(match state.validate() {
                Ok(draft) => ProjectWizardAction::Save(draft),
                Err(err) => ProjectWizardAction::Invalid(err),
            });
        }
        _ if state.editing => {
            if let Some(warning) = state.edit_current_field(key) {
                return Some(ProjectWizardAction::Invalid(warning));
            }
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{ProjectMember, ProjectStatus};

    fn clients() -> Vec<DropdownItem> {
        vec![DropdownItem::new(1, "Acme"), DropdownItem::new(2, "Globex")]
    }

    fn team() -> Vec<DropdownItem> {
        vec![DropdownItem::new(7, "Asha"), DropdownItem::new(8, "Ravi")]
    }

    fn goto(state: &mut ProjectWizardState, field: ProjectField) {
        while state.current_field != field {
            handle_key(state, KeyCode::Down);
        }
    }

    #[test]
    fn client_is_required() {
        let mut state = ProjectWizardState::new(clients(), team());
        state.project.name = "Portal".into();
        assert!(matches!(
            handle_key(&mut state, KeyCode::Char('s')),
            Some(ProjectWizardAction::Invalid(ConsoleError::Validation(_)))
        ));

        goto(&mut state, ProjectField::Client);
        handle_key(&mut state, KeyCode::Enter);
        handle_key(&mut state, KeyCode::Right);
        handle_key(&mut state, KeyCode::Enter);

        let Some(ProjectWizardAction::Save(draft)) = handle_key(&mut state, KeyCode::Char('s')) else {
            panic!("expected a save");
        };
        assert_eq!(draft.id, None);
        assert_eq!(draft.payload.client_id, 1);
        assert_eq!(draft.payload.status, ProjectStatus::Ongoing);
    }

    #[test]
    fn editing_keeps_id_and_team() {
        let project = Project {
            id: 4,
            name: "Website".into(),
            client_id: 2,
            team_members: vec![ProjectMember::new(7, "Asha")],
            ..Project::default()
        };
        let mut state = ProjectWizardState::from_existing(project, clients(), team());

        goto(&mut state, ProjectField::Team);
        handle_key(&mut state, KeyCode::Enter);
        handle_key(&mut state, KeyCode::Right);
        assert!(matches!(
            handle_key(&mut state, KeyCode::Char('a')),
            Some(ProjectWizardAction::Invalid(ConsoleError::DuplicateMembership { .. }))
        ));
        handle_key(&mut state, KeyCode::Right);
        assert!(handle_key(&mut state, KeyCode::Char('a')).is_none());
        handle_key(&mut state, KeyCode::Enter);

        let draft = state.validate().unwrap();
        assert_eq!(draft.id, Some(4));
        assert_eq!(draft.payload.client_id, 2);
        let ids: Vec<i32> = draft.payload.team_members.iter().map(|m| m.team_member_id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let project = Project {
            id: 4,
            name: "Website".into(),
            client_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            ..Project::default()
        };
        let state = ProjectWizardState::from_existing(project, clients(), team());
        assert!(state.validate().is_err());
    }
}
