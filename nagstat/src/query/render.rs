//! Output rendering for search results.

use crate::command::expand_template;
use crate::model::lenient_int;
use crate::Result;

use super::engine::ServiceMatch;

const STATE_NAMES: [&str; 4] = ["OK", "Warning", "Critical", "Unknown"];

const HOST_WIDTH: usize = 25;
const SERVICE_WIDTH: usize = 35;
const STATE_WIDTH: usize = 8;
const OUTPUT_WIDTH: usize = 120;

/// Display name for a numeric service state; out-of-range states print as
/// the number itself.
pub fn state_name(value: &str) -> String {
    let state = lenient_int(Some(value));
    usize::try_from(state)
        .ok()
        .and_then(|i| STATE_NAMES.get(i))
        .map(|s| s.to_string())
        .unwrap_or_else(|| state.to_string())
}

/// Pad with spaces or truncate to exactly `width` chars.
fn fixed(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Service listing, sorted and de-duplicated.
///
/// With a template each match is expanded through the `${host}`,
/// `${service}`, `${tstamp}` placeholders; without one the service
/// description is printed.
pub fn render_listing(matches: &[ServiceMatch<'_>], template: Option<&str>, tstamp: i64) -> Vec<String> {
    let mut lines: Vec<String> = matches
        .iter()
        .map(|m| expand_template(template, m.host, m.service, tstamp, m.service))
        .collect();
    lines.sort();
    lines.dedup();
    lines
}

/// Host listing, sorted and de-duplicated. Defaults to the host name.
pub fn render_host_listing(hosts: &[String], template: Option<&str>, tstamp: i64) -> Vec<String> {
    let mut lines: Vec<String> = hosts
        .iter()
        .map(|h| expand_template(template, h, "", tstamp, h))
        .collect();
    lines.sort();
    lines.dedup();
    lines
}

/// Fixed-width columns in discovery order: host, service, state, output.
pub fn render_details(matches: &[ServiceMatch<'_>]) -> Vec<String> {
    matches
        .iter()
        .map(|m| {
            let state = state_name(m.entry.get("current_state").unwrap_or_default());
            [
                fixed(m.entry.host_name(), HOST_WIDTH),
                fixed(m.entry.description(), SERVICE_WIDTH),
                fixed(&state, STATE_WIDTH),
                fixed(m.entry.get("plugin_output").unwrap_or_default(), OUTPUT_WIDTH),
            ]
            .join(" ")
        })
        .collect()
}

/// Bracketed list of the matched records, one object per record.
pub fn render_json(matches: &[ServiceMatch<'_>]) -> Result<Vec<String>> {
    let records = matches
        .iter()
        .map(|m| serde_json::to_string(&m.entry.attributes))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(vec!["[".to_string(), records.join(", \n"), "]".to_string()])
}
