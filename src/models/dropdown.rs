use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// The `{id, name}` projection used to fill selection widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownItem {
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

#[cfg(test)]
impl DropdownItem {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
