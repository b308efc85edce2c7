//! Name → id resolution for payment rows.
//!
//! The payments list names its client and project, while the update call
//! wants ids. These functions recover the ids from the dropdown lists.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{DropdownItem, PaymentRecord};

/// Source of a client's project list.
#[async_trait]
pub trait ProjectLookup: Send + Sync {
    async fn projects_for_client(&self, client_id: i32) -> ConsoleResult<Vec<DropdownItem>>;
}

/// Pick the candidate a displayed name refers to.
///
/// First hit wins, in this order: case-insensitive equality, case-insensitive
/// containment either way, the only candidate when there is exactly one.
pub fn match_by_name<'a>(name: &str, candidates: &'a [DropdownItem]) -> Option<&'a DropdownItem> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    let lowered: Vec<String> = candidates.iter().map(|c| c.name.to_lowercase()).collect();

    if let Some(i) = lowered.iter().position(|n| *n == wanted) {
        return Some(&candidates[i]);
    }
    if let Some(i) = lowered
        .iter()
        .position(|n| n.contains(&wanted) || wanted.contains(n.as_str()))
    {
        return Some(&candidates[i]);
    }
    match candidates {
        [only] => Some(only),
        _ => None,
    }
}

pub fn resolve_client_id(client_name: &str, clients: &[DropdownItem]) -> Option<i32> {
    match_by_name(client_name, clients).map(|c| c.id)
}

pub fn resolve_project_id(project_name: &str, projects: &[DropdownItem]) -> Option<i32> {
    match_by_name(project_name, projects).map(|p| p.id)
}

/// Ids recovered for one payment, plus what the edit form needs to show.
#[derive(Debug, Default)]
pub struct PaymentLinks {
    pub client_id: Option<i32>,
    pub project_id: Option<i32>,
    /// The selected client's projects; empty when no client resolved.
    pub projects: Vec<DropdownItem>,
    /// Misses and fetch failures, in the order they happened.
    pub issues: Vec<ConsoleError>,
}

/// Client resolution → project-list fetch → project resolution.
///
/// A client miss skips the rest. A failed fetch leaves the project empty.
pub async fn resolve_payment_links(
    lookup: &dyn ProjectLookup,
    clients: &[DropdownItem],
    payment: &PaymentRecord,
) -> PaymentLinks {
    let mut links = PaymentLinks::default();

    let Some(client_id) = resolve_client_id(&payment.client_name, clients) else {
        warn!(payment = payment.id, client = %payment.client_name, "client name did not resolve");
        links.issues.push(ConsoleError::Unresolved {
            kind: "client",
            name: payment.client_name.clone(),
        });
        return links;
    };
    links.client_id = Some(client_id);

    match lookup.projects_for_client(client_id).await {
        Ok(projects) => links.projects = projects,
        Err(err) => {
            warn!(payment = payment.id, client_id, error = %err, "could not load client projects");
            links.issues.push(err);
            return links;
        }
    }

    links.project_id = resolve_project_id(&payment.project_name, &links.projects);
    match links.project_id {
        Some(project_id) => debug!(payment = payment.id, client_id, project_id, "payment links resolved"),
        None => {
            warn!(payment = payment.id, project = %payment.project_name, "project name did not resolve");
            links.issues.push(ConsoleError::Unresolved {
                kind: "project",
                name: payment.project_name.clone(),
            });
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::models::Amount;

    fn items(pairs: &[(i32, &str)]) -> Vec<DropdownItem> {
        pairs.iter().map(|(id, name)| DropdownItem::new(*id, *name)).collect()
    }

    #[derive(Default)]
    struct FakeLookup {
        projects: HashMap<i32, Vec<DropdownItem>>,
        fail: bool,
        requested: Mutex<Vec<i32>>,
    }

    #[async_trait]
    impl ProjectLookup for FakeLookup {
        async fn projects_for_client(&self, client_id: i32) -> ConsoleResult<Vec<DropdownItem>> {
            self.requested.lock().unwrap().push(client_id);
            if self.fail {
                return Err(ConsoleError::Network("HTTP 500 Internal Server Error".into()));
            }
            Ok(self.projects.get(&client_id).cloned().unwrap_or_default())
        }
    }

    fn payment(client_name: &str, project_name: &str) -> PaymentRecord {
        PaymentRecord {
            id: 1,
            total_amount: Amount::from_rupees(1000),
            paid_amount: Amount::ZERO,
            payment_date: None,
            client_name: client_name.to_string(),
            project_name: project_name.to_string(),
        }
    }

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(resolve_client_id("Acme", &items(&[(1, "ACME")])), Some(1));
    }

    #[test]
    fn exact_match_beats_an_earlier_partial_match() {
        let projects = items(&[(1, "Website Redesign"), (2, "website")]);
        assert_eq!(resolve_project_id("Website", &projects), Some(2));
    }

    #[test]
    fn containment_works_in_both_directions() {
        assert_eq!(resolve_project_id("Website", &items(&[(5, "Website Redesign")])), Some(5));
        let projects = items(&[(3, "App"), (6, "Portal")]);
        assert_eq!(resolve_project_id("Customer Portal v2", &projects), Some(6));
    }

    #[test]
    fn single_candidate_is_used_as_a_fallback() {
        assert_eq!(resolve_project_id("Foo", &items(&[(9, "Bar")])), Some(9));
        assert_eq!(resolve_project_id("Foo", &items(&[(9, "Bar"), (10, "Baz")])), None);
        assert_eq!(resolve_project_id("Foo", &[]), None);
    }

    #[test]
    fn blank_names_never_match() {
        assert_eq!(resolve_client_id("  ", &items(&[(1, "Acme")])), None);
    }

    #[tokio::test]
    async fn resolves_the_whole_chain() {
        let lookup = FakeLookup {
            projects: HashMap::from([(2, items(&[(7, "Mobile App"), (8, "Website Redesign")]))]),
            ..FakeLookup::default()
        };
        let clients = items(&[(1, "Globex"), (2, "Acme Corp")]);

        let links = resolve_payment_links(&lookup, &clients, &payment("acme corp", "website")).await;

        assert_eq!(links.client_id, Some(2));
        assert_eq!(links.project_id, Some(8));
        assert_eq!(links.projects.len(), 2);
        assert!(links.issues.is_empty());
        assert_eq!(*lookup.requested.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn client_miss_skips_the_project_fetch() {
        let lookup = FakeLookup::default();
        let clients = items(&[(1, "Globex"), (2, "Initech")]);

        let links = resolve_payment_links(&lookup, &clients, &payment("Acme", "Website")).await;

        assert_eq!(links.client_id, None);
        assert_eq!(links.project_id, None);
        assert!(lookup.requested.lock().unwrap().is_empty());
        assert!(matches!(links.issues[..], [ConsoleError::Unresolved { kind: "client", .. }]));
    }

    #[tokio::test]
    async fn fetch_failure_keeps_the_client_and_empties_the_project() {
        let lookup = FakeLookup {
            fail: true,
            ..FakeLookup::default()
        };
        let clients = items(&[(4, "Acme")]);

        let links = resolve_payment_links(&lookup, &clients, &payment("Acme", "Website")).await;

        assert_eq!(links.client_id, Some(4));
        assert_eq!(links.project_id, None);
        assert!(matches!(links.issues[..], [ConsoleError::Network(_)]));
    }

    #[tokio::test]
    async fn project_miss_is_reported() {
        let lookup = FakeLookup {
            projects: HashMap::from([(4, items(&[(1, "Alpha"), (2, "Beta")]))]),
            ..FakeLookup::default()
        };
        let links =
            resolve_payment_links(&lookup, &items(&[(4, "Acme")]), &payment("Acme", "Gamma")).await;

        assert_eq!(links.client_id, Some(4));
        assert_eq!(links.project_id, None);
        assert!(matches!(links.issues[..], [ConsoleError::Unresolved { kind: "project", .. }]));
    }
}
