use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// One labelled row of a wizard form.
pub struct FormRow {
    pub label: &'static str,
    pub value: String,
    pub disabled: bool,
    /// Typed into directly, so it shows a cursor while editing.
    pub text: bool,
}

impl FormRow {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            disabled: false,
            text: true,
        }
    }

    /// A row changed with arrow keys rather than typing.
    pub fn choice(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            text: false,
            ..Self::new(label, value)
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Title / fields / help layout shared by all wizards.
pub fn wizard_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area)
}

pub fn render_title<B: Backend>(f: &mut Frame<B>, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

pub fn render_help<B: Backend>(f: &mut Frame<B>, area: Rect, help: &str) {
    let help = Paragraph::new(help.to_string())
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn render_fields<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    title: &str,
    rows: &[FormRow],
    current: usize,
    editing: bool,
) {
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let label_style = if row.disabled {
                Style::default().fg(Color::DarkGray)
            } else if i == current {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let value = if i == current && editing {
                let cursor = if row.text { "|" } else { "" };
                Span::styled(
                    format!("{}{}", row.value, cursor),
                    Style::default().add_modifier(Modifier::BOLD),
                )
            } else if row.disabled {
                Span::styled(row.value.clone(), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(row.value.clone())
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", row.label), label_style),
                value,
            ]))
        })
        .collect();

    let form_list = List::new(items).block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(form_list, area);
}

/// Apply a typing key to a text field.
pub fn edit_text(value: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
}

/// Like [`edit_text`], restricted to what an amount can contain.
pub fn edit_amount(value: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
}
