use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, layout::Constraint, Frame};

use crate::models::Client;
use crate::ui::components::popup::render_confirmation;
use crate::ui::components::table::{list_layout, render_keys, render_table, TableNav};

// Represents the state of the client list screen
pub struct ClientsState {
    clients: Vec<Client>,
    nav: TableNav,
    show_delete_confirmation: bool,
}

pub enum ClientAction {
    Back,
    NewClient,
    EditClient(Client),
    DeleteClient(i32), // Contains client_id
}

impl ClientsState {
    pub fn new(clients: Vec<Client>) -> Self {
        Self {
            nav: TableNav::new(clients.len()),
            clients,
            show_delete_confirmation: false,
        }
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.nav.selected().and_then(|i| self.clients.get(i))
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }
}

pub fn render_clients<B: Backend>(frame: &mut Frame<B>, state: &mut ClientsState) {
    let chunks = list_layout(frame.size());

    let rows = state
        .clients
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.email.clone(),
                c.contact.clone(),
                c.company.clone(),
                c.address.clone(),
            ]
        })
        .collect();

    render_table(
        frame,
        chunks[0],
        "Clients",
        &["Name", "Email", "Contact", "Company", "Address"],
        rows,
        &[
            Constraint::Percentage(18),
            Constraint::Percentage(24),
            Constraint::Percentage(14),
            Constraint::Percentage(18),
            Constraint::Percentage(26),
        ],
        &mut state.nav,
    );

    let keys = if state.selected_client().is_some() {
        "<N> New Client | <E> Edit Client | <D> Delete Client | <Esc> Back"
    } else {
        "<N> New Client | <Esc> Back"
    };
    render_keys(frame, chunks[1], keys);

    if state.show_delete_confirmation {
        render_confirmation(frame, "this client");
    }
}

pub fn handle_input(state: &mut ClientsState) -> Result<Option<ClientAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut ClientsState, key: KeyCode) -> Option<ClientAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return state.selected_client().map(|c| ClientAction::DeleteClient(c.id));
            }
            KeyCode::Char('n') | KeyCode::Esc => state.toggle_delete_confirmation(),
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(ClientAction::Back),
        KeyCode::Char('n') => return Some(ClientAction::NewClient),
        KeyCode::Char('e') | KeyCode::Enter => {
            return state.selected_client().cloned().map(ClientAction::EditClient);
        }
        KeyCode::Char('d') => {
            if state.selected_client().is_some() {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Down => state.nav.next(),
        KeyCode::Up => state.nav.previous(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: i32, name: &str) -> Client {
        Client {
            id,
            name: name.into(),
            ..Client::default()
        }
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut state = ClientsState::new(vec![client(1, "Acme"), client(2, "Globex")]);
        handle_key(&mut state, KeyCode::Down);
        assert!(handle_key(&mut state, KeyCode::Char('d')).is_none());
        assert!(handle_key(&mut state, KeyCode::Char('e')).is_none());

        match handle_key(&mut state, KeyCode::Char('y')) {
            Some(ClientAction::DeleteClient(id)) => assert_eq!(id, 2),
            _ => panic!("expected a delete"),
        }
    }

    #[test]
    fn cancelled_confirmation_deletes_nothing() {
        let mut state = ClientsState::new(vec![client(1, "Acme")]);
        handle_key(&mut state, KeyCode::Char('d'));
        assert!(handle_key(&mut state, KeyCode::Char('n')).is_none());
        assert!(matches!(
            handle_key(&mut state, KeyCode::Char('e')),
            Some(ClientAction::EditClient(c)) if c.id == 1
        ));
    }
}
