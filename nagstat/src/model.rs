//! In-memory model of one parsed status snapshot.
//!
//! All attribute values are kept as the strings read from the file. Numeric
//! and boolean meaning is applied by callers through the explicit helpers
//! below (`int`, `flag`), never by the model itself.

use std::collections::HashMap;
use std::num::IntErrorKind;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A string-keyed map that remembers insertion order.
///
/// Re-inserting an existing key replaces the value in place, so iteration
/// order is always the order in which keys were first seen in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Insert or replace, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Get the value for `key`, inserting `make()` first if absent.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.to_string(), i);
                self.entries.push((key.to_string(), make()));
                i
            }
        };
        &mut self.entries[i].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V: Default> OrderedMap<V> {
    pub fn entry_or_default(&mut self, key: &str) -> &mut V {
        self.get_or_insert_with(key, V::default)
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Free-form key/value attributes of one block.
pub type Attributes = OrderedMap<String>;

/// One comment instance (host or service).
pub type Comment = Attributes;

/// Parse an attribute value as an integer the lenient way: anything that
/// is not a number counts as zero, and out-of-range numbers saturate.
pub fn lenient_int(value: Option<&str>) -> i64 {
    value
        .map(str::trim)
        .and_then(|v| {
            let end = v
                .char_indices()
                .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
                .map(|(i, _)| i)
                .unwrap_or(v.len());
            match v[..end].parse::<i64>() {
                Ok(n) => Some(n),
                Err(e) => match e.kind() {
                    IntErrorKind::PosOverflow => Some(i64::MAX),
                    IntErrorKind::NegOverflow => Some(i64::MIN),
                    _ => None,
                },
            }
        })
        .unwrap_or(0)
}

/// Root aggregate for everything parsed out of one status file.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct StatusSnapshot {
    pub hosts: OrderedMap<HostEntry>,
    pub info: Attributes,
    pub process: Attributes,
    pub contacts: OrderedMap<Attributes>,
}

impl StatusSnapshot {
    pub fn host(&self, name: &str) -> Option<&HostEntry> {
        self.hosts.get(name)
    }

    /// Look up a single service by host name and description.
    pub fn service(&self, host: &str, description: &str) -> Option<&ServiceEntry> {
        self.hosts.get(host)?.services.get(description)
    }

    /// Total number of services across all hosts.
    pub fn service_count(&self) -> usize {
        self.hosts.values().map(|h| h.services.len()).sum()
    }

    pub(crate) fn host_mut(&mut self, name: &str) -> &mut HostEntry {
        self.hosts.entry_or_default(name)
    }
}

/// Everything known about one host.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct HostEntry {
    /// Absent when the file only reported services for this host.
    pub hoststatus: Option<Attributes>,
    pub services: OrderedMap<ServiceEntry>,
    pub hostdowntime: Option<String>,
    pub hostcomments: Vec<Comment>,
    pub servicedowntime: OrderedMap<String>,
    pub servicecomments: OrderedMap<Vec<Comment>>,
}

impl HostEntry {
    /// True when the host's downtime id marks it as in scheduled downtime.
    pub fn in_downtime(&self) -> bool {
        lenient_int(self.hostdowntime.as_deref()) > 0
    }
}

/// Flat attribute map of one `servicestatus` block.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ServiceEntry {
    pub attributes: Attributes,
}

impl ServiceEntry {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn host_name(&self) -> &str {
        self.get("host_name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.get("service_description").unwrap_or_default()
    }

    /// Attribute as an integer, non-numeric or missing values read as 0.
    pub fn int(&self, key: &str) -> i64 {
        lenient_int(self.get(key))
    }

    /// Attribute as a nagios boolean (`1` is true).
    pub fn flag(&self, key: &str) -> bool {
        self.int(key) != 0
    }
}
