use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// Segment-by-segment date entry. `None` means the date is not set.
pub struct DateInputState {
    pub date: Option<NaiveDate>,
    pub editing: bool,
    pub date_part: DatePart,
    pub current_date_input: String,
}

impl DateInputState {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            editing: false,
            date_part: DatePart::Year,
            current_date_input: String::new(),
        }
    }

    /// Editing an unset date starts from today.
    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.date_part = DatePart::Year;
            self.current_date_input.clear();
            if self.date.is_none() {
                self.date = Some(Local::now().date_naive());
            }
        }
    }

    pub fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.current_date_input.clear();
    }

    pub fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.current_date_input.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => self.push_digit(c),
            KeyCode::Backspace => {
                self.current_date_input.pop();
            }
            KeyCode::Delete => {
                self.date = None;
                self.current_date_input.clear();
            }
            KeyCode::Right => self.next_date_part(),
            KeyCode::Left => self.previous_date_part(),
            _ => {}
        }
    }

    fn push_digit(&mut self, c: char) {
        let Some(date) = self.date else {
            return;
        };
        self.current_date_input.push(c);

        let width = match self.date_part {
            DatePart::Year => 4,
            DatePart::Month | DatePart::Day => 2,
        };
        if self.current_date_input.len() < width {
            return;
        }

        let entered = self.current_date_input.parse::<u32>().ok();
        self.current_date_input.clear();
        let Some(value) = entered else {
            return;
        };

        let updated = match self.date_part {
            DatePart::Year if (1900..=2100).contains(&value) => {
                clamped_date(value as i32, date.month(), date.day())
            }
            DatePart::Month if (1..=12).contains(&value) => clamped_date(date.year(), value, date.day()),
            DatePart::Day => NaiveDate::from_ymd_opt(date.year(), date.month(), value),
            _ => None,
        };
        if let Some(updated) = updated {
            self.date = Some(updated);
        }
    }

    pub fn get_display_string(&self) -> String {
        let Some(date) = self.date else {
            return "Not set".to_string();
        };
        if !self.editing {
            return date.format("%Y-%m-%d").to_string();
        }

        let (year, month, day) = (
            format!("{:04}", date.year()),
            format!("{:02}", date.month()),
            format!("{:02}", date.day()),
        );
        let current_input = if !self.current_date_input.is_empty() {
            format!("[{}]", self.current_date_input)
        } else {
            match self.date_part {
                DatePart::Year => "[YYYY]".to_string(),
                DatePart::Month => "[MM]".to_string(),
                DatePart::Day => "[DD]".to_string(),
            }
        };

        match self.date_part {
            DatePart::Year => format!("{}{}-{}-{}", year, current_input, month, day),
            DatePart::Month => format!("{}-{}{}-{}", year, month, current_input, day),
            DatePart::Day => format!("{}-{}-{}{}", year, month, day, current_input),
        }
    }
}

// Keep the day inside the target month, e.g. Jan 31 -> Feb 29.
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}
