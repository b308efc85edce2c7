use serde::{Deserialize, Serialize};

use super::null_as_empty;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default, skip_serializing)]
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_role: String,
}

impl TeamMember {
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}
