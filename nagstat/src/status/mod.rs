//! Parser for the block-structured `status.dat` snapshot.
//!
//! # Format
//!
//! ```text
//! # comment
//! hoststatus {
//!     host_name=web1
//!     current_state=0
//!     }
//! servicestatus {
//!     host_name=web1
//!     service_description=disk
//!     current_state=2
//!     }
//! ```
//!
//! Each block type is dispatched to a handler that folds its `key=value`
//! lines into a [`StatusSnapshot`](crate::StatusSnapshot). Unknown block
//! types are skipped.

mod parser;

pub use parser::{decode_status_bytes, parse_status, BlockKind};

#[cfg(test)]
mod tests;
