use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A customer of the business. The same shape is posted back without `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing)]
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
}

impl Client {
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}
