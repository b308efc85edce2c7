use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::currency::format_inr;
use crate::models::DashboardSummary;

pub struct DashboardState {
    username: String,
    summary: DashboardSummary,
}

pub enum DashboardAction {
    Quit,
    Logout,
    Refresh,
    OpenClients,
    OpenTeamMembers,
    OpenProjects,
    OpenPayments,
}

impl DashboardState {
    pub fn new(username: impl Into<String>, summary: DashboardSummary) -> Self {
        Self {
            username: username.into(),
            summary,
        }
    }

    /// Label/value pairs in display order.
    pub fn cards(&self) -> [(&'static str, String, Color); 6] {
        let s = &self.summary;
        [
            ("Total Clients", s.total_clients.to_string(), Color::Blue),
            ("Team Members", s.total_team_members.to_string(), Color::Magenta),
            ("Projects", s.total_projects.to_string(), Color::Cyan),
            ("Total Amount", format_inr(s.total_amount), Color::Green),
            ("Pending Amount", format_inr(s.pending_amount), Color::Red),
            ("Payments", s.total_payments.to_string(), Color::Yellow),
        ]
    }
}

pub fn render_dashboard<B: Backend>(f: &mut Frame<B>, state: &mut DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let header = Paragraph::new(Spans::from(vec![
        Span::styled("Dashboard", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  signed in as {}", state.username)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let cards = state.cards();
    for (row, rect) in [chunks[1], chunks[2]].into_iter().enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3].as_ref())
            .split(rect);
        for (col, area) in columns.into_iter().enumerate() {
            let (label, value, color) = &cards[row * 3 + col];
            render_card(f, area, label, value, *color);
        }
    }

    let help = Paragraph::new(
        "1 - Clients | 2 - Team Members | 3 - Projects | 4 - Payments | R - Refresh | L - Logout | Q - Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .style(Style::default().fg(Color::White));
    f.render_widget(help, chunks[4]);
}

fn render_card<B: Backend>(f: &mut Frame<B>, area: Rect, label: &str, value: &str, color: Color) {
    let card = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(label.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(card, area);
}

pub fn handle_input(_state: &mut DashboardState) -> Result<Option<DashboardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(key.code));
    }
    Ok(None)
}

pub fn handle_key(key: KeyCode) -> Option<DashboardAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(DashboardAction::Quit),
        KeyCode::Char('l') => Some(DashboardAction::Logout),
        KeyCode::Char('r') => Some(DashboardAction::Refresh),
        KeyCode::Char('1') => Some(DashboardAction::OpenClients),
        KeyCode::Char('2') => Some(DashboardAction::OpenTeamMembers),
        KeyCode::Char('3') => Some(DashboardAction::OpenProjects),
        KeyCode::Char('4') => Some(DashboardAction::OpenPayments),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    #[test]
    fn amounts_use_rupee_formatting() {
        let state = DashboardState::new(
            "admin",
            DashboardSummary {
                total_clients: 4,
                total_amount: Amount::from_rupees(1_250_000),
                pending_amount: Amount::from_paise(5_000_050),
                ..DashboardSummary::default()
            },
        );
        let cards = state.cards();
        assert_eq!(cards[0].1, "4");
        assert_eq!(cards[3].1, "₹12,50,000");
        assert_eq!(cards[4].1, "₹50,000.50");
    }
}
