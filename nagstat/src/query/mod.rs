//! Attribute-matching query engine over a parsed snapshot.
//!
//! # Selector syntax
//!
//! - **Literal**: `web1` matches the attribute exactly
//! - **Regex**: `/^web/` searches the attribute with the pattern
//!
//! Predicates inside one search are ANDed. Each literal the caller passes
//! for a host or service selector becomes its own search, and the results
//! of all searches are unioned.

mod engine;
mod matcher;
mod render;

pub use engine::{find_hosts, find_services, find_with_properties, ServiceMatch, ServiceSelection};
pub use matcher::{Matcher, Predicate};
pub use render::{render_details, render_host_listing, render_json, render_listing, state_name};
