use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, Frame};

use crate::error::{ConsoleError, ConsoleResult};
use crate::models::TeamMember;
use crate::ui::components::form::{
    edit_text, render_fields, render_help, render_title, wizard_layout, FormRow,
};

pub enum TeamMemberWizardAction {
    Cancel,
    Save(TeamMember),
    Invalid(ConsoleError),
}

#[derive(Clone, PartialEq, Copy)]
pub enum TeamMemberField {
    Name,
    Email,
    Contact,
    JobRole,
}

const FIELDS: [TeamMemberField; 4] = [
    TeamMemberField::Name,
    TeamMemberField::Email,
    TeamMemberField::Contact,
    TeamMemberField::JobRole,
];

pub struct TeamMemberWizardState {
    pub member: TeamMember,
    pub current_field: TeamMemberField,
    pub editing: bool,
}

impl TeamMemberWizardState {
    pub fn new() -> Self {
        Self::from_existing(TeamMember::default())
    }

    pub fn from_existing(member: TeamMember) -> Self {
        Self {
            member,
            current_field: TeamMemberField::Name,
            editing: false,
        }
    }

    fn index(&self) -> usize {
        self.current_field as usize
    }

    pub fn next_field(&mut self) {
        self.current_field = FIELDS[(self.index() + 1) % FIELDS.len()];
    }

    pub fn previous_field(&mut self) {
        self.current_field = FIELDS[(self.index() + FIELDS.len() - 1) % FIELDS.len()];
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        let field_value = match self.current_field {
            TeamMemberField::Name => &mut self.member.name,
            TeamMemberField::Email => &mut self.member.email,
            TeamMemberField::Contact => &mut self.member.contact,
            TeamMemberField::JobRole => &mut self.member.job_role,
        };
        edit_text(field_value, key);
    }

    pub fn validate(&self) -> ConsoleResult<TeamMember> {
        let m = &self.member;
        if [&m.name, &m.email, &m.contact, &m.job_role]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(ConsoleError::validation("Please fill in all the fields"));
        }
        if !m.email.contains('@') {
            return Err(ConsoleError::validation("Please enter a valid email address"));
        }
        Ok(m.clone())
    }
}

pub fn render_team_member_wizard<B: Backend>(f: &mut Frame<B>, state: &mut TeamMemberWizardState) {
    let chunks = wizard_layout(f.size());

    let title = if state.member.is_new() {
        "Add Team Member"
    } else {
        "Edit Team Member"
    };
    render_title(f, chunks[0], title);

    let m = &state.member;
    let rows = [
        FormRow::new("Name", m.name.as_str()),
        FormRow::new("Email", m.email.as_str()),
        FormRow::new("Contact", m.contact.as_str()),
        FormRow::new("Job Role", m.job_role.as_str()),
    ];
    render_fields(f, chunks[1], "Member Details", &rows, state.index(), state.editing);

    let help = if state.editing {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save member | Esc - Cancel"
    };
    render_help(f, chunks[2], help);
}

pub fn handle_input(state: &mut TeamMemberWizardState) -> Result<Option<TeamMemberWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut TeamMemberWizardState, key: KeyCode) -> Option<TeamMemberWizardAction> {
    match key {
        KeyCode::Esc if state.editing => state.editing = false,
        KeyCode::Esc => return Some(TeamMemberWizardAction::Cancel),
        KeyCode::Enter => state.editing = !state.editing,
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            return Some(match state.validate() {
                Ok(member) => TeamMemberWizardAction::Save(member),
                Err(err) => TeamMemberWizardAction::Invalid(err),
            });
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }
    None
}
