mod amount;
mod client;
mod dashboard;
mod dropdown;
mod payment;
mod project;
mod team_member;

pub use amount::Amount;
pub use client::Client;
pub use dashboard::DashboardSummary;
pub use dropdown::DropdownItem;
pub use payment::{PaymentPayload, PaymentRecord};
pub use project::{Project, ProjectMember, ProjectPayload};
#[cfg(test)]
pub use project::ProjectStatus;
pub use team_member::TeamMember;

use serde::{Deserialize, Deserializer};

/// The backend sends `null` for text columns that were never filled in.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
