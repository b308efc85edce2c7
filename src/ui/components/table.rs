use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Selection over a table of `len` rows, wrapping at both ends.
pub struct TableNav {
    pub state: TableState,
    len: usize,
}

impl TableNav {
    pub fn new(len: usize) -> Self {
        let mut state = TableState::default();
        if len > 0 {
            state.select(Some(0));
        }
        Self { state, len }
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected().filter(|i| *i < self.len)
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

/// Body / key bar split used by the list screens.
pub fn list_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(area)
}

pub fn render_table<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    title: &str,
    headers: &[&str],
    rows: Vec<Vec<String>>,
    widths: &[Constraint],
    nav: &mut TableNav,
) {
    let header = Row::new(headers.iter().map(|h| Cell::from(h.to_string())))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let rows = rows
        .into_iter()
        .map(|cells| Row::new(cells.into_iter().map(Cell::from)));

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .widths(widths)
        .column_spacing(2)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut nav.state);
}

pub fn render_keys<B: Backend>(frame: &mut Frame<B>, area: Rect, keys: &str) {
    let buttons = Paragraph::new(keys.to_string())
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, area);
}
