use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, Frame};

use crate::error::{ConsoleError, ConsoleResult};
use crate::models::Client;
use crate::ui::components::form::{
    edit_text, render_fields, render_help, render_title, wizard_layout, FormRow,
};

pub enum ClientWizardAction {
    Cancel,
    Save(Client),
    Invalid(ConsoleError),
}

#[derive(Clone, PartialEq, Copy)]
pub enum ClientField {
    Name,
    Email,
    Contact,
    Company,
    Address,
}

const FIELDS: [ClientField; 5] = [
    ClientField::Name,
    ClientField::Email,
    ClientField::Contact,
    ClientField::Company,
    ClientField::Address,
];

pub struct ClientWizardState {
    pub client: Client,
    pub current_field: ClientField,
    pub editing: bool,
}

impl ClientWizardState {
    pub fn new() -> Self {
        Self::from_existing(Client::default())
    }

    pub fn from_existing(client: Client) -> Self {
        Self {
            client,
            current_field: ClientField::Name,
            editing: false,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
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
        if !self.editing {
            return;
        }

        let field_value = match self.current_field {
            ClientField::Name => &mut self.client.name,
            ClientField::Email => &mut self.client.email,
            ClientField::Contact => &mut self.client.contact,
            ClientField::Company => &mut self.client.company,
            ClientField::Address => &mut self.client.address,
        };
        edit_text(field_value, key);
    }

    /// Every field is required.
    pub fn validate(&self) -> ConsoleResult<Client> {
        let c = &self.client;
        let values = [&c.name, &c.email, &c.contact, &c.company, &c.address];
        if values.iter().any(|v| v.trim().is_empty()) {
            return Err(ConsoleError::validation("Please fill in all fields"));
        }
        if !c.email.contains('@') {
            return Err(ConsoleError::validation("Please enter a valid email address"));
        }

        let mut client = c.clone();
        client.name = client.name.trim().to_string();
        client.email = client.email.trim().to_string();
        Ok(client)
    }
}

pub fn render_client_wizard<B: Backend>(f: &mut Frame<B>, state: &mut ClientWizardState) {
    let chunks = wizard_layout(f.size());

    let title = if state.client.is_new() {
        "Add New Client"
    } else {
        "Edit Client"
    };
    render_title(f, chunks[0], title);

    let c = &state.client;
    let rows = [
        FormRow::new("Name", c.name.as_str()),
        FormRow::new("Email", c.email.as_str()),
        FormRow::new("Contact", c.contact.as_str()),
        FormRow::new("Company", c.company.as_str()),
        FormRow::new("Address", c.address.as_str()),
    ];
    render_fields(f, chunks[1], "Client Details", &rows, state.index(), state.editing);

    let help = if state.editing {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save client | Esc - Cancel"
    };
    render_help(f, chunks[2], help);
}

pub fn handle_input(state: &mut ClientWizardState) -> Result<Option<ClientWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut ClientWizardState, key: KeyCode) -> Option<ClientWizardAction> {
    match key {
        KeyCode::Esc if state.editing => state.toggle_editing(),
        KeyCode::Esc => return Some(ClientWizardAction::Cancel),
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            return Some(match state.validate() {
                Ok(client) => ClientWizardAction::Save(client),
                Err(err) => ClientWizardAction::Invalid(err),
            });
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }
    None
}
