use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, layout::Constraint, Frame};

use crate::models::Project;
use crate::ui::components::popup::render_confirmation;
use crate::ui::components::table::{list_layout, render_keys, render_table, TableNav};

// Represents the state of the project list screen
pub struct ProjectsState {
    projects: Vec<Project>,
    nav: TableNav,
    show_delete_confirmation: bool,
}

pub enum ProjectAction {
    Back,
    NewProject,
    EditProject(Project),
    DeleteProject(i32), // Contains project_id
    ManageTeam(Project),
    ExportStatement(Project),
}

impl ProjectsState {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            nav: TableNav::new(projects.len()),
            projects,
            show_delete_confirmation: false,
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.nav.selected().and_then(|i| self.projects.get(i))
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }
}

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_projects<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState) {
    let chunks = list_layout(frame.size());

    let rows = state
        .projects
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.client_name.clone(),
                p.status.as_str().to_string(),
                date_cell(p.start_date),
                date_cell(p.end_date),
                p.member_names(),
            ]
        })
        .collect();

    render_table(
        frame,
        chunks[0],
        "Projects",
        &["Name", "Client", "Status", "Start", "End", "Team"],
        rows,
        &[
            Constraint::Percentage(20),
            Constraint::Percentage(16),
            Constraint::Percentage(11),
            Constraint::Percentage(11),
            Constraint::Percentage(11),
            Constraint::Percentage(31),
        ],
        &mut state.nav,
    );

    let keys = if state.selected_project().is_some() {
        "<N> New | <E> Edit | <D> Delete | <T> Team | <X> Export Statement | <Esc> Back"
    } else {
        "<N> New Project | <Esc> Back"
    };
    render_keys(frame, chunks[1], keys);

    if state.show_delete_confirmation {
        render_confirmation(frame, "this project");
    }
}

pub fn handle_input(state: &mut ProjectsState) -> Result<Option<ProjectAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut ProjectsState, key: KeyCode) -> Option<ProjectAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return state.selected_project().map(|p| ProjectAction::DeleteProject(p.id));
            }
            KeyCode::Char('n') | KeyCode::Esc => state.toggle_delete_confirmation(),
            _ => {}
        }
        return None;
    }

    let selected = state.selected_project().cloned();
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(ProjectAction::Back),
        KeyCode::Char('n') => Some(ProjectAction::NewProject),
        KeyCode::Char('e') | KeyCode::Enter => selected.map(ProjectAction::EditProject),
        KeyCode::Char('t') => selected.map(ProjectAction::ManageTeam),
        KeyCode::Char('x') => selected.map(ProjectAction::ExportStatement),
        KeyCode::Char('d') => {
            if selected.is_some() {
                state.toggle_delete_confirmation();
            }
            None
        }
        KeyCode::Down => {
            state.nav.next();
            None
        }
        KeyCode::Up => {
            state.nav.previous();
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i32, name: &str) -> Project {
        Project {
            id,
            name: name.into(),
            ..Project::default()
        }
    }

    #[test]
    fn actions_carry_the_selected_project() {
        let mut state = ProjectsState::new(vec![project(3, "Portal"), project(8, "App")]);
        handle_key(&mut state, KeyCode::Up);
        assert!(matches!(
            handle_key(&mut state, KeyCode::Char('t')),
            Some(ProjectAction::ManageTeam(p)) if p.id == 8
        ));
        assert!(matches!(
            handle_key(&mut state, KeyCode::Char('x')),
            Some(ProjectAction::ExportStatement(p)) if p.id == 8
        ));
    }

    #[test]
    fn nothing_to_act_on_in_an_empty_list() {
        let mut state = ProjectsState::new(Vec::new());
        assert!(handle_key(&mut state, KeyCode::Char('e')).is_none());
        assert!(handle_key(&mut state, KeyCode::Char('d')).is_none());
        assert!(!state.show_delete_confirmation);
        assert!(matches!(handle_key(&mut state, KeyCode::Char('n')), Some(ProjectAction::NewProject)));
    }
}
