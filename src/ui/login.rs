use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::auth::{Authenticator, Credentials, Session};
use crate::ui::components::popup::centered_rect;

#[derive(Clone, Copy, PartialEq)]
enum LoginField {
    Username,
    Password,
}

pub struct LoginState {
    credentials: Credentials,
    field: LoginField,
    error: Option<String>,
}

pub enum LoginAction {
    Quit,
    Submit(Credentials),
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            credentials: Credentials::default(),
            field: LoginField::Username,
            error: None,
        }
    }

    /// Check the typed credentials; a failure stays on the screen.
    pub fn attempt(&mut self, auth: &dyn Authenticator, credentials: &Credentials) -> Option<Session> {
        match auth.authenticate(credentials) {
            Ok(session) => Some(session),
            Err(err) => {
                self.error = Some(err.to_string());
                self.credentials.password.clear();
                self.field = LoginField::Password;
                None
            }
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

pub fn render_login<B: Backend>(f: &mut Frame<B>, state: &mut LoginState) {
    let area = centered_rect(50, 50, f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new("Admin Login")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let masked = "*".repeat(state.credentials.password.chars().count());
    let fields = [
        (LoginField::Username, "Username", state.credentials.username.clone(), chunks[1]),
        (LoginField::Password, "Password", masked, chunks[2]),
    ];
    for (field, label, value, rect) in fields {
        let style = if state.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let cursor = if state.field == field { "|" } else { "" };
        let input = Paragraph::new(format!("{value}{cursor}"))
            .block(Block::default().title(label).borders(Borders::ALL).border_style(style));
        f.render_widget(input, rect);
    }

    if let Some(error) = &state.error {
        let error = Paragraph::new(Spans::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )))
        .alignment(Alignment::Center);
        f.render_widget(error, chunks[3]);
    }

    let help = Paragraph::new("Tab - Switch field | Enter - Login | Esc - Quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[4]);
}

pub fn handle_input(state: &mut LoginState) -> Result<Option<LoginAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut LoginState, key: KeyCode) -> Option<LoginAction> {
    match key {
        KeyCode::Esc => return Some(LoginAction::Quit),
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => state.toggle_field(),
        KeyCode::Enter => {
            if state.field == LoginField::Username {
                state.toggle_field();
            } else {
                return Some(LoginAction::Submit(state.credentials.clone()));
            }
        }
        KeyCode::Char(c) => {
            state.error = None;
            match state.field {
                LoginField::Username => state.credentials.username.push(c),
                LoginField::Password => state.credentials.password.push(c),
            }
        }
        KeyCode::Backspace => match state.field {
            LoginField::Username => {
                state.credentials.username.pop();
            }
            LoginField::Password => {
                state.credentials.password.pop();
            }
        },
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    fn type_text(state: &mut LoginState, text: &str) {
        for c in text.chars() {
            handle_key(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_moves_to_password_then_submits() {
        let mut state = LoginState::new();
        type_text(&mut state, "admin");
        assert!(handle_key(&mut state, KeyCode::Enter).is_none());
        type_text(&mut state, "Edu@123");

        let Some(LoginAction::Submit(credentials)) = handle_key(&mut state, KeyCode::Enter) else {
            panic!("expected a submit");
        };
        assert_eq!(credentials.username, "admin");
        assert_eq!(credentials.password, "Edu@123");
    }

    #[test]
    fn failed_attempt_clears_the_password() {
        let auth = StaticCredentials::new("admin", "Edu@123");
        let mut state = LoginState::new();
        type_text(&mut state, "admin");
        handle_key(&mut state, KeyCode::Tab);
        type_text(&mut state, "wrong");

        let credentials = state.credentials.clone();
        assert!(state.attempt(&auth, &credentials).is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid Credentials"));
        assert!(state.credentials.password.is_empty());
    }
}
