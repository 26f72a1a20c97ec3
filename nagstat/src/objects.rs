//! Reader for `objects.cache`, the daemon's dump of every configured object.
//!
//! ```text
//! define contactgroup {
//!         contactgroup_name       admins
//!         alias   Nagios Administrators
//!         members root
//!         }
//! ```
//!
//! Objects are grouped by type and keyed by their `<type>_name` attribute.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::model::{Attributes, OrderedMap};
use crate::query::Matcher;
use crate::status::decode_status_bytes;
use crate::{Error, Result};

fn define_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*define\s+(\w+)\s*\{\s*$").expect("valid define regex"))
}

fn attribute_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\w+)\s+(\S.*?)\s*$").expect("valid attribute regex"))
}

/// All objects from one `objects.cache`, by type then name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectCache {
    objects: BTreeMap<String, OrderedMap<Attributes>>,
}

impl ObjectCache {
    pub fn parse(text: &str) -> Result<Self> {
        let mut cache = Self::default();
        let mut current: Option<(String, Attributes)> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(caps) = define_start().captures(line) {
                if let Some((kind, _)) = &current {
                    return Err(Error::Parse {
                        line: idx + 1,
                        block: kind.clone(),
                        message: "block opened before previous block closed".to_string(),
                    });
                }
                current = Some((caps[1].to_string(), Attributes::new()));
                continue;
            }

            if trimmed == "}" {
                if let Some((kind, attrs)) = current.take() {
                    cache.insert(kind, attrs);
                }
                continue;
            }

            if let (Some((_, attrs)), Some(caps)) = (current.as_mut(), attribute_line().captures(line)) {
                attrs.insert(&caps[1], caps[2].to_string());
            }
        }

        debug!(types = cache.objects.len(), "parsed objects cache");
        Ok(cache)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!("File {} does not exist", path.display())));
        }
        let bytes = std::fs::read(path)?;
        Self::parse(&decode_status_bytes(&bytes))
    }

    fn insert(&mut self, kind: String, attrs: Attributes) {
        let objects = self.objects.entry(kind.clone()).or_default();
        let name = object_name(&kind, &attrs).unwrap_or_else(|| objects.len().to_string());
        objects.insert(name, attrs);
    }

    /// Object types present, sorted.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// All objects of one type, in file order.
    pub fn objects(&self, kind: &str) -> Option<&OrderedMap<Attributes>> {
        self.objects.get(kind)
    }

    /// First object of `kind` whose `attribute` matches.
    pub fn find(&self, kind: &str, attribute: &str, matcher: &Matcher) -> Option<&Attributes> {
        self.objects(kind)?
            .values()
            .find(|attrs| attr_matches(attrs, attribute, matcher))
    }

    /// Every object of `kind` whose `attribute` matches, in file order.
    pub fn find_all(&self, kind: &str, attribute: &str, matcher: &Matcher) -> Vec<&Attributes> {
        self.objects(kind)
            .map(|objs| {
                objs.values()
                    .filter(|attrs| attr_matches(attrs, attribute, matcher))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn attr_matches(attrs: &Attributes, attribute: &str, matcher: &Matcher) -> bool {
    attrs.get(attribute).is_some_and(|v| matcher.is_match(v))
}

/// Key for an object: `<type>_name`, or `host;service` for services.
fn object_name(kind: &str, attrs: &Attributes) -> Option<String> {
    if let Some(name) = attrs.get(&format!("{}_name", kind)) {
        return Some(name.clone());
    }
    if kind == "service" {
        let host = attrs.get("host_name")?;
        let service = attrs.get("service_description")?;
        return Some(format!("{};{}", host, service));
    }
    None
}
