use crate::models::DropdownItem;

/// A single choice out of a dropdown list, cycled with Left/Right.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    items: Vec<DropdownItem>,
    selected: Option<usize>,
}

impl SelectState {
    pub fn new(items: Vec<DropdownItem>, selected_id: Option<i32>) -> Self {
        let mut state = Self {
            items,
            selected: None,
        };
        if let Some(id) = selected_id {
            state.select_id(id);
        }
        state
    }

    /// Replace the options and drop the current choice.
    pub fn set_items(&mut self, items: Vec<DropdownItem>) {
        self.items = items;
        self.selected = None;
    }

    pub fn items(&self) -> &[DropdownItem] {
        &self.items
    }

    pub fn select_id(&mut self, id: i32) -> bool {
        self.selected = self.items.iter().position(|item| item.id == id);
        self.selected.is_some()
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        });
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        });
    }

    pub fn selected(&self) -> Option<&DropdownItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn selected_id(&self) -> Option<i32> {
        self.selected().map(|item| item.id)
    }

    pub fn display(&self, placeholder: &str) -> String {
        match self.selected() {
            Some(item) => format!("< {} >", item.name),
            None if self.items.is_empty() => "(none available)".to_string(),
            None => format!("< {} >", placeholder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<DropdownItem> {
        vec![
            DropdownItem::new(4, "Acme"),
            DropdownItem::new(9, "Globex"),
            DropdownItem::new(2, "Initech"),
        ]
    }

    #[test]
    fn starts_on_the_given_id() {
        let state = SelectState::new(options(), Some(9));
        assert_eq!(state.selected_id(), Some(9));
        assert_eq!(SelectState::new(options(), Some(99)).selected_id(), None);
    }

    #[test]
    fn cycles_in_both_directions() {
        let mut state = SelectState::new(options(), None);
        state.next();
        assert_eq!(state.selected_id(), Some(4));
        state.previous();
        assert_eq!(state.selected_id(), Some(2));
        state.next();
        assert_eq!(state.selected_id(), Some(4));
    }

    #[test]
    fn new_items_clear_the_choice() {
        let mut state = SelectState::new(options(), Some(4));
        state.set_items(vec![DropdownItem::new(4, "Acme")]);
        assert_eq!(state.selected_id(), None);
        assert_eq!(state.display("Select"), "< Select >");
    }
}
