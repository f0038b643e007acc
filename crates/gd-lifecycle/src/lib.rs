//! gd-lifecycle
//!
//! Order lifecycle gate. Decides whether an order may be edited or deleted
//! given its stored status and the status a client asks for.
//!
//! Rules:
//! - Edits may target pending, preparing or out-for-delivery.
//! - Nothing moves an order to delivered through an edit, and a delivered
//!   order accepts no further edits.
//! - Deletion only from pending.
//!
//! Pure logic. No IO, no locks; the daemon maps failures to HTTP 400.

mod engine;
mod types;

pub use engine::{check_deletable, check_editable, check_update_status, parse_status};
pub use types::*;
