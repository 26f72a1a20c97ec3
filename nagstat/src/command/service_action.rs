//! Canned per-service actions for mass operations.

use std::str::FromStr;

use crate::query::ServiceMatch;
use crate::Error;

use super::format::CommandRequest;

pub const DEFAULT_ACK_COMMENT: &str = "Acknowledged from CLI";

/// Operations applied to every selected service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    EnableNotify,
    DisableNotify,
    EnableChecks,
    DisableChecks,
    ForceCheck,
    Acknowledge,
}

impl ServiceAction {
    pub const ALL: [ServiceAction; 6] = [
        ServiceAction::EnableNotify,
        ServiceAction::DisableNotify,
        ServiceAction::EnableChecks,
        ServiceAction::DisableChecks,
        ServiceAction::ForceCheck,
        ServiceAction::Acknowledge,
    ];

    /// Name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceAction::EnableNotify => "enable-notify",
            ServiceAction::DisableNotify => "disable-notify",
            ServiceAction::EnableChecks => "enable-checks",
            ServiceAction::DisableChecks => "disable-checks",
            ServiceAction::ForceCheck => "force-check",
            ServiceAction::Acknowledge => "acknowledge",
        }
    }

    /// External command this action sends.
    pub fn command_name(self) -> &'static str {
        match self {
            ServiceAction::EnableNotify => "ENABLE_SVC_NOTIFICATIONS",
            ServiceAction::DisableNotify => "DISABLE_SVC_NOTIFICATIONS",
            ServiceAction::EnableChecks => "ENABLE_SVC_CHECK",
            ServiceAction::DisableChecks => "DISABLE_SVC_CHECK",
            ServiceAction::ForceCheck => "SCHEDULE_FORCED_SVC_CHECK",
            ServiceAction::Acknowledge => "ACKNOWLEDGE_SVC_PROBLEM",
        }
    }

    /// Build the command request for one matched service.
    pub fn request(self, service: &ServiceMatch<'_>, tstamp: i64, author: &str, comment: Option<&str>) -> CommandRequest {
        let request = CommandRequest::new(self.command_name())
            .field("host_name", service.host)
            .field("service_description", service.service)
            .at(tstamp);
        match self {
            ServiceAction::ForceCheck => request.field("check_time", tstamp),
            ServiceAction::Acknowledge => request
                .field("sticky", 1)
                .field("notify", 0)
                .field("persistent", 1)
                .field("author", author)
                .field("comment", comment.unwrap_or(DEFAULT_ACK_COMMENT)),
            _ => request,
        }
    }
}

impl FromStr for ServiceAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|a| a.as_str()).collect();
                Error::Config(format!("Unknown action '{}', expected one of: {}", s, known.join(", ")))
            })
    }
}

impl std::fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
