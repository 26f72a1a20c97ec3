//! Service and host searches.

use crate::model::{ServiceEntry, StatusSnapshot};
use crate::Result;

use super::matcher::Predicate;

/// A service that satisfied a search, borrowed from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceMatch<'a> {
    pub host: &'a str,
    pub service: &'a str,
    pub entry: &'a ServiceEntry,
}

/// Caller-facing selectors for a service search.
///
/// `for_host` and `with_service` take raw selector input (literal or
/// `/regex/`). Every (host, service) selector pair becomes one search; the
/// flag fields are added to every search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSelection {
    pub for_host: Vec<String>,
    pub with_service: Vec<String>,
    /// Maps to `notifications_enabled`.
    pub notify_enabled: Option<bool>,
    /// Maps to `problem_has_been_acknowledged`.
    pub acknowledged: Option<bool>,
    /// Only passive services: active checks off, passive checks on.
    pub passive: bool,
    pub current_state: Option<String>,
}

impl ServiceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_host(mut self, selector: impl Into<String>) -> Self {
        self.for_host.push(selector.into());
        self
    }

    pub fn with_service(mut self, selector: impl Into<String>) -> Self {
        self.with_service.push(selector.into());
        self
    }

    pub fn notify_enabled(mut self, enabled: bool) -> Self {
        self.notify_enabled = Some(enabled);
        self
    }

    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.acknowledged = Some(acknowledged);
        self
    }

    pub fn passive(mut self) -> Self {
        self.passive = true;
        self
    }

    pub fn current_state(mut self, state: impl Into<String>) -> Self {
        self.current_state = Some(state.into());
        self
    }

    /// Listing template to use when the caller gave none: filtering on
    /// notifications prints `host:service` pairs.
    pub fn default_template(&self) -> Option<&'static str> {
        self.notify_enabled.map(|_| "${host}:${service}")
    }

    /// Predicates shared by every search of this selection.
    fn common_predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(state) = &self.current_state {
            predicates.push(Predicate::exact("current_state", state.as_str()));
        }
        if let Some(enabled) = self.notify_enabled {
            predicates.push(Predicate::exact("notifications_enabled", bool_flag(enabled)));
        }
        if let Some(acked) = self.acknowledged {
            predicates.push(Predicate::exact("problem_has_been_acknowledged", bool_flag(acked)));
        }
        if self.passive {
            predicates.push(Predicate::exact("active_checks_enabled", "0"));
            predicates.push(Predicate::exact("passive_checks_enabled", "1"));
        }
        predicates
    }

    /// Expand into one AND-ed predicate set per (host, service) selector pair.
    pub fn predicate_sets(&self) -> Result<Vec<Vec<Predicate>>> {
        let hosts = optional_selectors(&self.for_host);
        let services = optional_selectors(&self.with_service);
        let common = self.common_predicates();

        let mut sets = Vec::with_capacity(hosts.len() * services.len());
        for host in &hosts {
            for service in &services {
                let mut set = Vec::with_capacity(common.len() + 2);
                if let Some(h) = host {
                    set.push(Predicate::parse("host_name", h)?);
                }
                if let Some(s) = service {
                    set.push(Predicate::parse("service_description", s)?);
                }
                set.extend(common.iter().cloned());
                sets.push(set);
            }
        }
        Ok(sets)
    }
}

fn bool_flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn optional_selectors(selectors: &[String]) -> Vec<Option<&str>> {
    if selectors.is_empty() {
        vec![None]
    } else {
        selectors.iter().map(|s| Some(s.as_str())).collect()
    }
}

/// Visit every service in stored order: hosts as parsed, then each host's
/// services as parsed.
fn each_service(snapshot: &StatusSnapshot) -> impl Iterator<Item = ServiceMatch<'_>> {
    snapshot.hosts.iter().flat_map(|(host, entry)| {
        entry.services.iter().map(move |(service, svc)| ServiceMatch {
            host,
            service,
            entry: svc,
        })
    })
}

/// All services satisfying every predicate, in stored order.
///
/// An empty predicate list matches every service.
pub fn find_with_properties<'a>(
    snapshot: &'a StatusSnapshot,
    predicates: &[Predicate],
) -> Vec<ServiceMatch<'a>> {
    each_service(snapshot)
        .filter(|m| predicates.iter().all(|p| p.matches(m.entry)))
        .collect()
}

/// Services matching any of the selection's searches, in stored order and
/// without duplicates.
pub fn find_services<'a>(
    selection: &ServiceSelection,
    snapshot: &'a StatusSnapshot,
) -> Result<Vec<ServiceMatch<'a>>> {
    let sets = selection.predicate_sets()?;
    Ok(each_service(snapshot)
        .filter(|m| sets.iter().any(|set| set.iter().all(|p| p.matches(m.entry))))
        .collect())
}

/// Names of hosts with at least one matching service, sorted and unique.
pub fn find_hosts(selection: &ServiceSelection, snapshot: &StatusSnapshot) -> Result<Vec<String>> {
    let mut hosts: Vec<String> = find_services(selection, snapshot)?
        .into_iter()
        .map(|m| m.host.to_string())
        .collect();
    hosts.sort();
    hosts.dedup();
    Ok(hosts)
}
