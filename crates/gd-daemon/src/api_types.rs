//! Request and response types for the gd-daemon HTTP endpoints.
//!
//! Inbound payload fields are raw JSON values so any well-formed object
//! deserializes; the validation chain, not the deserializer, decides which
//! message a client sees. No business logic lives here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Inbound `{ "data": ... }`. A body without `data` is treated as an empty
/// payload so every field reports as missing. Absent `Option` fields
/// deserialize as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope<T> {
    pub data: Option<T>,
}

impl<T: Default> RequestEnvelope<T> {
    pub fn into_data(self) -> T {
        self.data.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// /health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// /dishes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishPayload {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
    pub image_url: Option<Value>,
}

// ---------------------------------------------------------------------------
// /orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub id: Option<Value>,
    pub deliver_to: Option<Value>,
    pub mobile_number: Option<Value>,
    pub status: Option<Value>,
    /// Expected to be a list of line items; checked by the validation chain.
    pub dishes: Option<Value>,
}
