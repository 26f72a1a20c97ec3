//! External command formatting and submission.
//!
//! Commands are single lines of the form
//!
//! ```text
//! [1700000000] ACKNOWLEDGE_SVC_PROBLEM;web1;disk;1;0;1;ops;Acknowledged from CLI
//! ```
//!
//! appended to the file the monitoring daemon polls. Every action has a fixed,
//! ordered list of required fields (see [`ACTIONS`]).

mod actions;
mod channel;
mod format;
mod service_action;

pub use actions::{all_fields, lookup_action, ActionSpec, ACTIONS};
pub use channel::{BatchReport, CommandChannel, CommandOutcome};
pub use format::{current_timestamp, expand_template, format_command, validate, CommandRequest};
pub use service_action::ServiceAction;
