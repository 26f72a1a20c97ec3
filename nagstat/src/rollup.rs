//! Aggregate check: roll many service states up into one result.
//!
//! Lots of small checks can alert once through a single aggregate instead of
//! N times. Only services that would actually notify are counted, and a
//! service mid-way through a soft state transition counts with its last hard
//! state.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use crate::model::{ServiceEntry, StatusSnapshot};

/// Environment variable the daemon sets to the description of the running
/// service check.
pub const SELF_SERVICE_VAR: &str = "NAGIOS_SERVICEDESC";

/// Named states, in report order.
pub const STATES: [(&str, &str); 4] = [("0", "OK"), ("1", "WARNING"), ("2", "CRITICAL"), ("3", "UNKNOWN")];

/// Which services take part in the rollup.
#[derive(Debug, Clone, Default)]
pub struct RollupFilter {
    pub service: Option<Regex>,
    pub host: Option<Regex>,
    /// Description of the aggregate check itself, never counted.
    pub self_service: Option<String>,
}

impl RollupFilter {
    /// Compile optional host/service patterns; the self service is taken from
    /// the environment.
    pub fn new(service: Option<&str>, host: Option<&str>) -> crate::Result<Self> {
        Ok(Self {
            service: service.map(Regex::new).transpose()?,
            host: host.map(Regex::new).transpose()?,
            self_service: std::env::var(SELF_SERVICE_VAR).ok(),
        })
    }
}

/// A service counted by the rollup, with its effective state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollupEntry<'a> {
    pub host: &'a str,
    pub service: &'a str,
    pub entry: &'a ServiceEntry,
    /// `current_state` when hard, `last_hard_state` otherwise.
    pub state: &'a str,
    /// True when the service is in a soft state.
    pub soft: bool,
}

/// State a caller should see for this service.
pub fn effective_state(entry: &ServiceEntry) -> (&str, bool) {
    if entry.get("state_type") == Some("1") {
        (entry.get("current_state").unwrap_or_default(), false)
    } else {
        (entry.get("last_hard_state").unwrap_or_default(), true)
    }
}

/// Services eligible for the rollup, in stored order.
pub fn rollup_services<'a>(snapshot: &'a StatusSnapshot, filter: &RollupFilter) -> Vec<RollupEntry<'a>> {
    let mut out = Vec::new();
    for (host, info) in snapshot.hosts.iter() {
        if info.services.is_empty() || info.in_downtime() {
            continue;
        }
        if filter.host.as_ref().is_some_and(|re| !re.is_match(host)) {
            continue;
        }
        for (service, entry) in info.services.iter() {
            if filter.service.as_ref().is_some_and(|re| !re.is_match(service)) {
                continue;
            }
            if filter.self_service.as_deref() == Some(service) {
                continue;
            }
            if entry.int("notifications_enabled") == 0 || entry.int("scheduled_downtime_depth") > 0 {
                continue;
            }
            let (state, soft) = effective_state(entry);
            out.push(RollupEntry {
                host,
                service,
                entry,
                state,
                soft,
            });
        }
    }
    debug!(services = out.len(), "rollup selection");
    out
}

/// Name of the bucket a state falls in.
pub fn state_label(state: &str) -> String {
    STATES
        .iter()
        .find(|(code, _)| *code == state)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("UNKNOWN(state={})", state))
}

/// Services grouped by state label.
#[derive(Debug, Clone, Default)]
pub struct RollupReport<'a> {
    buckets: BTreeMap<String, Vec<RollupEntry<'a>>>,
}

impl<'a> RollupReport<'a> {
    pub fn build(entries: Vec<RollupEntry<'a>>) -> Self {
        let mut buckets: BTreeMap<String, Vec<RollupEntry<'a>>> = BTreeMap::new();
        for entry in entries {
            buckets.entry(state_label(entry.state)).or_default().push(entry);
        }
        Self { buckets }
    }

    pub fn count(&self, label: &str) -> usize {
        self.buckets.get(label).map_or(0, Vec::len)
    }

    pub fn services(&self, label: &str) -> &[RollupEntry<'a>] {
        self.buckets.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `OK=n WARNING=n CRITICAL=n UNKNOWN=n services=/S/ hosts=/H/`
    pub fn summary_line(&self, filter: &RollupFilter) -> String {
        let mut parts: Vec<String> = STATES
            .iter()
            .map(|(_, name)| format!("{}={}", name, self.count(name)))
            .collect();
        parts.push(format!("services=/{}/", filter.service.as_ref().map_or("", Regex::as_str)));
        parts.push(format!("hosts=/{}/", filter.host.as_ref().map_or("", Regex::as_str)));
        parts.join(" ")
    }

    /// Per-state listing of every non-OK bucket, services sorted by host.
    pub fn detail_lines(&self) -> Vec<String> {
        let named = STATES.iter().skip(1).map(|(_, name)| name.to_string());
        let odd = self
            .buckets
            .keys()
            .filter(|k| !STATES.iter().any(|(_, name)| *name == k.as_str()))
            .cloned();

        let mut lines = Vec::new();
        for label in named.chain(odd) {
            let mut services = self.services(&label).to_vec();
            if services.is_empty() {
                continue;
            }
            services.sort_by(|a, b| a.host.cmp(b.host));
            lines.push(format!("Services in {}:", label));
            lines.extend(services.iter().map(|s| format!("  {} => {}", s.host, s.service)));
        }
        lines
    }

    /// 2 on any critical, 1 on any warning, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.count("CRITICAL") > 0 {
            2
        } else if self.count("WARNING") > 0 {
            1
        } else {
            0
        }
    }
}
