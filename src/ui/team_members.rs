use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, layout::Constraint, Frame};

use crate::models::TeamMember;
use crate::ui::components::popup::render_confirmation;
use crate::ui::components::table::{list_layout, render_keys, render_table, TableNav};

pub struct TeamMembersState {
    members: Vec<TeamMember>,
    nav: TableNav,
    show_delete_confirmation: bool,
}

pub enum TeamMemberAction {
    Back,
    NewMember,
    EditMember(TeamMember),
    DeleteMember(i32),
}

impl TeamMembersState {
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self {
            nav: TableNav::new(members.len()),
            members,
            show_delete_confirmation: false,
        }
    }

    pub fn selected_member(&self) -> Option<&TeamMember> {
        self.nav.selected().and_then(|i| self.members.get(i))
    }
}

pub fn render_team_members<B: Backend>(frame: &mut Frame<B>, state: &mut TeamMembersState) {
    let chunks = list_layout(frame.size());

    let rows = state
        .members
        .iter()
        .map(|m| vec![m.name.clone(), m.email.clone(), m.contact.clone(), m.job_role.clone()])
        .collect();

    render_table(
        frame,
        chunks[0],
        "Team Members",
        &["Name", "Email", "Contact", "Job Role"],
        rows,
        &[
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ],
        &mut state.nav,
    );

    let keys = if state.selected_member().is_some() {
        "<N> New Member | <E> Edit Member | <D> Delete Member | <Esc> Back"
    } else {
        "<N> New Member | <Esc> Back"
    };
    render_keys(frame, chunks[1], keys);

    if state.show_delete_confirmation {
        render_confirmation(frame, "this team member");
    }
}

pub fn handle_input(state: &mut TeamMembersState) -> Result<Option<TeamMemberAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut TeamMembersState, key: KeyCode) -> Option<TeamMemberAction> {
    if state.show_delete_confirmation {
        state.show_delete_confirmation = false;
        if key == KeyCode::Char('y') {
            return state.selected_member().map(|m| TeamMemberAction::DeleteMember(m.id));
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(TeamMemberAction::Back),
        KeyCode::Char('n') => return Some(TeamMemberAction::NewMember),
        KeyCode::Char('e') | KeyCode::Enter => {
            return state.selected_member().cloned().map(TeamMemberAction::EditMember);
        }
        KeyCode::Char('d') => state.show_delete_confirmation = state.selected_member().is_some(),
        KeyCode::Down => state.nav.next(),
        KeyCode::Up => state.nav.previous(),
        _ => {}
    }
    None
}
