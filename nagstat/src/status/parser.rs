//! Line-oriented block parser and per-block handlers.

use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::model::{Attributes, Comment, ServiceEntry, StatusSnapshot};
use crate::{Error, Result};

/// Block types the snapshot knows how to fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Info,
    ProgramStatus,
    HostStatus,
    ServiceStatus,
    ContactStatus,
    HostComment,
    ServiceComment,
    HostDowntime,
    ServiceDowntime,
}

impl BlockKind {
    /// Map a block header name to its kind. `None` for types we ignore.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "info" => BlockKind::Info,
            "programstatus" => BlockKind::ProgramStatus,
            "hoststatus" => BlockKind::HostStatus,
            "servicestatus" => BlockKind::ServiceStatus,
            "contactstatus" => BlockKind::ContactStatus,
            "hostcomment" => BlockKind::HostComment,
            "servicecomment" => BlockKind::ServiceComment,
            "hostdowntime" => BlockKind::HostDowntime,
            "servicedowntime" => BlockKind::ServiceDowntime,
            _ => return None,
        };
        Some(kind)
    }

    fn handler(self) -> BlockHandler {
        match self {
            BlockKind::Info => handle_info,
            BlockKind::ProgramStatus => handle_programstatus,
            BlockKind::HostStatus => handle_hoststatus,
            BlockKind::ServiceStatus => handle_servicestatus,
            BlockKind::ContactStatus => handle_contactstatus,
            BlockKind::HostComment => handle_hostcomment,
            BlockKind::ServiceComment => handle_servicecomment,
            BlockKind::HostDowntime => handle_hostdowntime,
            BlockKind::ServiceDowntime => handle_servicedowntime,
        }
    }
}

/// The lines of one closed block, ready for a handler.
struct Block<'a> {
    name: &'a str,
    /// Line number of the closing brace, for error reporting.
    line: usize,
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Block<'a> {
    /// First value for a key, matched on the whole key.
    fn require(&self, key: &str) -> Result<&'a str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| Error::Parse {
                line: self.line,
                block: self.name.to_string(),
                message: format!("can't find {} in block", key),
            })
    }

    fn attributes_except(&self, skip: Option<&str>) -> Attributes {
        self.pairs
            .iter()
            .filter(|(k, _)| Some(*k) != skip)
            .map(|(k, v)| (*k, v.to_string()))
            .collect()
    }
}

type BlockHandler = fn(&mut StatusSnapshot, &Block<'_>) -> Result<()>;

fn block_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\w+) \{\s*$").expect("valid block header regex"))
}

fn key_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s+(\w+)=(.*)$").expect("valid key=value regex"))
}

/// Decode raw status bytes. Valid UTF-8 is borrowed as-is; anything else is
/// read as Latin-1, which maps every byte to a char and cannot fail.
pub fn decode_status_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            warn!("status data is not valid UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| b as char).collect())
        }
    }
}

/// Parse status text into a fresh snapshot.
///
/// Any block missing one of its identifying keys aborts the whole parse.
pub fn parse_status(text: &str) -> Result<StatusSnapshot> {
    let mut snapshot = StatusSnapshot::default();
    let mut current: Option<&str> = None;
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    let mut handled = 0usize;
    let mut ignored = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(caps) = block_start().captures(line) {
            pairs.clear();
            current = caps.get(1).map(|m| m.as_str());
            continue;
        }

        let Some(name) = current else {
            continue;
        };

        if let Some(caps) = key_value().captures(line) {
            if let (Some(k), Some(v)) = (caps.get(1), caps.get(2)) {
                pairs.push((k.as_str(), v.as_str()));
            }
            continue;
        }

        if line.contains('}') {
            let block = Block {
                name,
                line: idx + 1,
                pairs: std::mem::take(&mut pairs),
            };
            match BlockKind::from_name(name) {
                Some(kind) => {
                    (kind.handler())(&mut snapshot, &block)?;
                    handled += 1;
                }
                None => {
                    debug!(block = name, line = idx + 1, "ignoring unrecognized block type");
                    ignored += 1;
                }
            }
            current = None;
        }
    }

    debug!(
        blocks = handled,
        ignored,
        hosts = snapshot.hosts.len(),
        services = snapshot.service_count(),
        "parsed status snapshot"
    );
    Ok(snapshot)
}

impl StatusSnapshot {
    /// Parse status text. See [`parse_status`].
    pub fn parse(text: &str) -> Result<Self> {
        parse_status(text)
    }

    /// Read and parse a status file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Status file {} does not exist",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "reading status file");
        parse_status(&decode_status_bytes(&bytes))
    }
}

fn handle_info(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    for (k, v) in &block.pairs {
        snapshot.info.insert(*k, v.to_string());
    }
    Ok(())
}

fn handle_programstatus(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    for (k, v) in &block.pairs {
        snapshot.process.insert(*k, v.to_string());
    }
    Ok(())
}

fn handle_hoststatus(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    let host = block.require("host_name")?;
    let status = snapshot
        .host_mut(host)
        .hoststatus
        .get_or_insert_with(Attributes::new);
    for (k, v) in &block.pairs {
        status.insert(*k, v.to_string());
    }
    Ok(())
}

fn handle_servicestatus(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    let host = block.require("host_name")?;
    let service = block.require("service_description")?;
    let entry = snapshot
        .host_mut(host)
        .services
        .get_or_insert_with(service, ServiceEntry::default);
    for (k, v) in &block.pairs {
        // host_name is pinned to the extracted value even if repeated.
        let value = if *k == "host_name" { host } else { *v };
        entry.attributes.insert(*k, value.to_string());
    }
    Ok(())
}

fn handle_contactstatus(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    let contact = block.require("contact_name")?;
    let attrs = snapshot.contacts.entry_or_default(contact);
    for (k, v) in block.pairs.iter().filter(|(k, _)| *k != "contact_name") {
        attrs.insert(*k, v.to_string());
    }
    Ok(())
}

fn handle_hostcomment(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    let host = block.require("host_name")?;
    let comment: Comment = block.attributes_except(Some("host_name"));
    snapshot.host_mut(host).hostcomments.push(comment);
    Ok(())
}

fn handle_servicecomment(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    let host = block.require("host_name")?;
    let service = block.require("service_description")?;
    let comment: Comment = block.attributes_except(Some("service_name"));
    snapshot
        .host_mut(host)
        .servicecomments
        .entry_or_default(service)
        .push(comment);
    Ok(())
}

fn handle_hostdowntime(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    let host = block.require("host_name")?;
    let downtime_id = block.require("downtime_id")?;
    snapshot.host_mut(host).hostdowntime = Some(downtime_id.to_string());
    Ok(())
}

fn handle_servicedowntime(snapshot: &mut StatusSnapshot, block: &Block<'_>) -> Result<()> {
    let host = block.require("host_name")?;
    let service = block.require("service_description")?;
    let downtime_id = block.require("downtime_id")?;
    snapshot
        .host_mut(host)
        .servicedowntime
        .insert(service, downtime_id.to_string());
    Ok(())
}
