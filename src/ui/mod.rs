pub mod client_wizard;
pub mod clients;
pub mod components;
pub mod dashboard;
pub mod login;
pub mod payment_wizard;
pub mod payments;
pub mod project_wizard;
pub mod projects;
pub mod team_assignment;
pub mod team_member_wizard;
pub mod team_members;
