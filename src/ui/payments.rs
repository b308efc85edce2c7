use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, layout::Constraint, Frame};

use crate::currency::format_inr;
use crate::models::PaymentRecord;
use crate::ui::components::popup::render_confirmation;
use crate::ui::components::table::{list_layout, render_keys, render_table, TableNav};

pub struct PaymentsState {
    payments: Vec<PaymentRecord>,
    nav: TableNav,
    show_delete_confirmation: bool,
}

pub enum PaymentAction {
    Back,
    NewPayment,
    EditPayment(PaymentRecord),
    DeletePayment(i32),
}

impl PaymentsState {
    pub fn new(payments: Vec<PaymentRecord>) -> Self {
        Self {
            nav: TableNav::new(payments.len()),
            payments,
            show_delete_confirmation: false,
        }
    }

    pub fn selected_payment(&self) -> Option<&PaymentRecord> {
        self.nav.selected().and_then(|i| self.payments.get(i))
    }
}

pub fn render_payments<B: Backend>(frame: &mut Frame<B>, state: &mut PaymentsState) {
    let chunks = list_layout(frame.size());

    let rows = state
        .payments
        .iter()
        .map(|p| {
            vec![
                p.client_name.clone(),
                p.project_name.clone(),
                format_inr(p.total_amount),
                format_inr(p.paid_amount),
                format_inr(p.pending_amount()),
                p.payment_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    render_table(
        frame,
        chunks[0],
        "Payments",
        &["Client", "Project", "Total", "Paid", "Pending", "Date"],
        rows,
        &[
            Constraint::Percentage(18),
            Constraint::Percentage(22),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ],
        &mut state.nav,
    );

    let keys = if state.selected_payment().is_some() {
        "<N> New Payment | <E> Edit Payment | <D> Delete Payment | <Esc> Back"
    } else {
        "<N> New Payment | <Esc> Back"
    };
    render_keys(frame, chunks[1], keys);

    if state.show_delete_confirmation {
        render_confirmation(frame, "this payment");
    }
}

pub fn handle_input(state: &mut PaymentsState) -> Result<Option<PaymentAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

pub fn handle_key(state: &mut PaymentsState, key: KeyCode) -> Option<PaymentAction> {
    if state.show_delete_confirmation {
        state.show_delete_confirmation = false;
        if key == KeyCode::Char('y') {
            return state.selected_payment().map(|p| PaymentAction::DeletePayment(p.id));
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(PaymentAction::Back),
        KeyCode::Char('n') => return Some(PaymentAction::NewPayment),
        KeyCode::Char('e') | KeyCode::Enter => {
            return state.selected_payment().cloned().map(PaymentAction::EditPayment);
        }
        KeyCode::Char('d') => state.show_delete_confirmation = state.selected_payment().is_some(),
        KeyCode::Down => state.nav.next(),
        KeyCode::Up => state.nav.previous(),
        _ => {}
    }
    None
}
