//! nagstat: read and drive a Nagios-compatible monitoring daemon.
//!
//! Parses the daemon's `status.dat` snapshot into a host/service tree, queries
//! services by attribute, rolls their states up into one result and formats
//! external commands for the daemon's command file.

pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod nagios_cfg;
pub mod objects;
pub mod query;
pub mod rollup;
pub mod status;

#[cfg(test)]
mod fixtures;

pub use command::{format_command, lookup_action, CommandChannel, CommandRequest, ServiceAction};
pub use config::{FileKind, Settings};
pub use error::{Error, Result};
pub use model::{Attributes, HostEntry, OrderedMap, ServiceEntry, StatusSnapshot};
pub use nagios_cfg::NagiosConfig;
pub use objects::ObjectCache;
pub use query::{find_hosts, find_services, Matcher, Predicate, ServiceMatch, ServiceSelection};
pub use rollup::{RollupFilter, RollupReport};
