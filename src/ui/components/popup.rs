use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A message shown on top of the current screen until any key is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }

    /// Several problems collapse into one notice, one per line.
    pub fn from_errors(errors: &[ConsoleError]) -> Option<Self> {
        let first = errors.first()?;
        let mut notice = Notice::from(first);
        if errors.len() > 1 {
            notice.message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            if errors.iter().any(|e| !e.is_warning()) {
                notice.kind = NoticeKind::Error;
            }
        }
        Some(notice)
    }

    fn color(&self) -> Color {
        match self.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Warning => Color::Yellow,
            NoticeKind::Error => Color::Red,
        }
    }
}

impl From<&ConsoleError> for Notice {
    fn from(err: &ConsoleError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.to_string(),
            kind: if err.is_warning() {
                NoticeKind::Warning
            } else {
                NoticeKind::Error
            },
        }
    }
}

impl From<ConsoleError> for Notice {
    fn from(err: ConsoleError) -> Self {
        Notice::from(&err)
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn render_notice<B: Backend>(frame: &mut Frame<B>, notice: &Notice) {
    let area = centered_rect(60, 30, frame.size());
    let color = notice.color();

    let mut lines = vec![Spans::from("")];
    lines.extend(notice.message.lines().map(|l| Spans::from(l.to_string())));
    lines.push(Spans::from(""));
    lines.push(Spans::from(Span::styled(
        "Press any key to continue",
        Style::default().fg(Color::Gray),
    )));

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    notice.title.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Yes/no prompt drawn over a list before anything is deleted.
pub fn render_confirmation<B: Backend>(frame: &mut Frame<B>, what: &str) {
    let area = centered_rect(50, 20, frame.size());

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(format!("Delete {what}?")),
        Spans::from(""),
        Spans::from("You won't be able to revert this!"),
        Spans::from(""),
        Spans::from("<Y> Yes, delete it  <N> Cancel"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().title("Are You Sure?").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_and_failures_look_different() {
        let warning = Notice::from(ConsoleError::Unresolved {
            kind: "project",
            name: "Website".into(),
        });
        assert_eq!(warning.kind, NoticeKind::Warning);
        assert_eq!(warning.title, "Warning");

        let failure = Notice::from(ConsoleError::Application("Client not found".into()));
        assert_eq!(failure.kind, NoticeKind::Error);
        assert_eq!(failure.message, "Client not found");
    }

    #[test]
    fn several_errors_become_one_notice() {
        let errors = vec![
            ConsoleError::Unresolved {
                kind: "project",
                name: "Website".into(),
            },
            ConsoleError::Network("HTTP 500".into()),
        ];
        let notice = Notice::from_errors(&errors).unwrap();
        assert_eq!(notice.message.lines().count(), 2);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(Notice::from_errors(&[]).is_none());
    }
}
