//! Payment form. The [`Ledger`] owns the amounts; the text inputs are only
//! committed into it when a field is left.

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, Frame};

use crate::currency::{format_inr, parse_inr};
use crate::error::{ConsoleError, ConsoleResult};
use crate::ledger::Ledger;
use crate::models::{Amount, DropdownItem, PaymentPayload, PaymentRecord};
use crate::resolve::PaymentLinks;
use crate::ui::components::date_input::DateInputState;
use crate::ui::components::form::{
    edit_amount, render_fields, render_help, render_title, wizard_layout, FormRow,
};
use crate::ui::components::select::SelectState;

pub struct PaymentDraft {
    pub id: Option<i32>,
    pub payload: PaymentPayload,
}

pub enum PaymentWizardAction {
    Cancel,
    Save(PaymentDraft),
    Invalid(ConsoleError),
    /// The client changed; its projects must be loaded.
    ClientChanged(i32),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum PaymentField {
    Client,
    Project,
    Total,
    Paid,
    ApplyPayment,
    Date,
}

const FIELDS: [PaymentField; 6] = [
    PaymentField::Client,
    PaymentField::Project,
    PaymentField::Total,
    PaymentField::Paid,
    PaymentField::ApplyPayment,
    PaymentField::Date,
];

pub struct PaymentWizardState {
    payment_id: Option<i32>,
    pub clients: SelectState,
    pub projects: SelectState,
    ledger: Ledger,
    /// Zero is a valid total, so an untouched field is tracked separately.
    total_entered: bool,
    total_input: String,
    paid_input: String,
    apply_input: String,
    pub date_state: DateInputState,
    pub current_field: PaymentField,
    pub editing: bool,
}

fn amount_text(amount: Amount) -> String {
    if amount == Amount::ZERO {
        String::new()
    } else {
        amount.to_string()
    }
}

fn parse_amount(text: &str) -> ConsoleResult<Amount> {
    if text.trim().is_empty() {
        return Ok(Amount::ZERO);
    }
    parse_inr(text).ok_or_else(|| ConsoleError::validation(format!("\"{text}\" is not a valid amount")))
}

impl PaymentWizardState {
    pub fn new(clients: Vec<DropdownItem>) -> Self {
        Self {
            payment_id: None,
            clients: SelectState::new(clients, None),
            projects: SelectState::default(),
            ledger: Ledger::for_new(),
            total_entered: false,
            total_input: String::new(),
            paid_input: String::new(),
            apply_input: String::new(),
            date_state: DateInputState::new(Some(Local::now().date_naive())),
            current_field: PaymentField::Client,
            editing: false,
        }
    }

    /// Open a recorded payment using the ids recovered from its names.
    pub fn from_record(
        record: &PaymentRecord,
        clients: Vec<DropdownItem>,
        links: PaymentLinks,
    ) -> ConsoleResult<Self> {
        let ledger = Ledger::existing(record.total_amount, record.paid_amount)?;
        Ok(Self {
            payment_id: Some(record.id),
            clients: SelectState::new(clients, links.client_id),
            projects: SelectState::new(links.projects, links.project_id),
            total_input: ledger.total().to_string(),
            paid_input: amount_text(ledger.paid()),
            apply_input: String::new(),
            ledger,
            total_entered: true,
            date_state: DateInputState::new(
                record.payment_date.or_else(|| Some(Local::now().date_naive())),
            ),
            current_field: PaymentField::Client,
            editing: false,
        })
    }

    pub fn is_new(&self) -> bool {
        self.payment_id.is_none()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Options for the project field after a client change.
    pub fn set_projects(&mut self, projects: Vec<DropdownItem>) {
        self.projects.set_items(projects);
    }

    fn index(&self) -> usize {
        self.current_field as usize
    }

    fn is_locked(&self, field: PaymentField) -> bool {
        field == PaymentField::Total && self.ledger.is_total_locked()
    }

    pub fn next_field(&mut self) {
        self.current_field = FIELDS[(self.index() + 1) % FIELDS.len()];
    }

    pub fn previous_field(&mut self) {
        self.current_field = FIELDS[(self.index() + FIELDS.len() - 1) % FIELDS.len()];
    }

    fn start_editing(&mut self) {
        if self.is_locked(self.current_field) {
            return;
        }
        self.editing = true;
        if self.current_field == PaymentField::Date {
            self.date_state.toggle_editing();
        }
    }

    /// Leave the current field, writing typed amounts into the ledger.
    ///
    /// On error the input is reset to what the ledger holds.
    pub fn finish_editing(&mut self) -> ConsoleResult<()> {
        self.editing = false;
        let result = match self.current_field {
            PaymentField::Total => {
                let entered = !self.total_input.trim().is_empty();
                let result =
                    parse_amount(&self.total_input).and_then(|total| self.ledger.set_total(total));
                if result.is_ok() {
                    self.total_entered = entered;
                }
                result
            }
            PaymentField::Paid => {
                parse_amount(&self.paid_input).and_then(|paid| self.ledger.set_paid(paid))
            }
            PaymentField::ApplyPayment => {
                let entered = parse_amount(&self.apply_input);
                self.apply_input.clear();
                entered.and_then(|e| self.ledger.apply_partial_payment(e).map(|_| ()))
            }
            PaymentField::Date => {
                self.date_state.toggle_editing();
                Ok(())
            }
            PaymentField::Client | PaymentField::Project => Ok(()),
        };

        self.total_input = if self.total_entered {
            self.ledger.total().to_string()
        } else {
            String::new()
        };
        self.paid_input = amount_text(self.ledger.paid());
        result
    }

    fn edit_current_field(&mut self, key: KeyCode) -> Option<PaymentWizardAction> {
        match self.current_field {
            PaymentField::Client => {
                let before = self.clients.selected_id();
                match key {
                    KeyCode::Right => self.clients.next(),
                    KeyCode::Left => self.clients.previous(),
                    _ => return None,
                }
                let after = self.clients.selected_id();
                if after != before {
                    self.projects.set_items(Vec::new());
                    return after.map(PaymentWizardAction::ClientChanged);
                }
            }
            PaymentField::Project => match key {
                KeyCode::Right => self.projects.next(),
                KeyCode::Left => self.projects.previous(),
                _ => {}
            },
            PaymentField::Total => edit_amount(&mut self.total_input, key),
            PaymentField::Paid => edit_amount(&mut self.paid_input, key),
            PaymentField::ApplyPayment => edit_amount(&mut self.apply_input, key),
            PaymentField::Date => self.date_state.handle_input(key),
        }
        None
    }

    pub fn validate(&self) -> ConsoleResult<PaymentDraft> {
        let (Some(client_id), Some(project_id), Some(payment_date)) = (
            self.clients.selected_id(),
            self.projects.selected_id(),
            self.date_state.date,
        ) else {
            return Err(ConsoleError::validation("Please fill in all required fields"));
        };
        if !self.total_entered {
            return Err(ConsoleError::validation("Please fill in all required fields"));
        }

        Ok(PaymentDraft {
            id: self.payment_id,
            payload: PaymentPayload {
                client_id,
                project_id,
                total_amount: self.ledger.total(),
                paid_amount: self.ledger.paid(),
                payment_date,
            },
        })
    }
}

pub fn render_payment_wizard<B: Backend>(f: &mut Frame<B>, state: &mut PaymentWizardState) {
    let chunks = wizard_layout(f.size());

    let title = if state.is_new() {
        "Add New Payment"
    } else {
        "Edit Payment"
    };
    render_title(f, chunks[0], title);

    let editing_field = |field: PaymentField| state.editing && state.current_field == field;
    let amount_row = |label, input: &str, field, value: Amount| {
        let shown = if editing_field(field) {
            input.to_string()
        } else {
            format_inr(value)
        };
        FormRow::new(label, shown)
    };

    let rows = [
        FormRow::choice("Client", state.clients.display("Select client")),
        FormRow::choice("Project", state.projects.display("Select project")),
        amount_row("Total Amount", &state.total_input, PaymentField::Total, state.ledger.total())
            .disabled(state.ledger.is_total_locked()),
        amount_row("Paid Amount", &state.paid_input, PaymentField::Paid, state.ledger.paid()),
        FormRow::new("Apply Payment", state.apply_input.as_str()),
        FormRow::choice("Payment Date", state.date_state.get_display_string()),
        FormRow::new("Pending Amount", format_inr(state.ledger.pending())).disabled(true),
    ];
    render_fields(f, chunks[1], "Payment Details", &rows, state.index(), state.editing);

    let help = if state.editing {
        match state.current_field {
            PaymentField::Client | PaymentField::Project => "Left/Right - Change | Enter - Done",
            PaymentField::Date => "Left/Right - Switch date part | Del - Clear | Enter - Done",
            PaymentField::ApplyPayment => "Type the amount received | Enter - Apply | Esc - Apply",
            _ => "Enter - Save field | Esc - Stop editing",
        }
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save payment | Esc - Cancel"
    };
    render_help(f, chunks[2], help);
}

pub fn handle_input(state: &mut PaymentWizardState) -> Result<Option<PaymentWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut PaymentWizardState, key: KeyCode) -> Option<PaymentWizardAction> {
    match key {
        KeyCode::Esc | KeyCode::Enter if state.editing => {
            if let Err(err) = state.finish_editing() {
                return Some(PaymentWizardAction::Invalid(err));
            }
        }
        KeyCode::Esc => return Some(PaymentWizardAction::Cancel),
        KeyCode::Enter => state.start_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            return Some(match state.validate() {
                Ok(draft) => PaymentWizardAction::Save(draft),
                Err(err) => PaymentWizardAction::Invalid(err),
            });
        }
        _ if state.editing => return state.edit_current_field(key),
        _ => {}
    }
    None
}
