//! Shared runtime state for gd-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. The two collections
//! are plain vectors scanned linearly by id; a mutating handler holds the
//! write lock across lookup, validation and mutation.

use std::sync::Arc;

use gd_schemas::{Dish, Order};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// BuildInfo
// ---------------------------------------------------------------------------

/// Static build metadata included in health responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Static build metadata.
    pub build: BuildInfo,
    /// Menu. Dishes are never deleted.
    pub dishes: Arc<RwLock<Vec<Dish>>>,
    /// Orders in creation order.
    pub orders: Arc<RwLock<Vec<Order>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_seed(Vec::new(), Vec::new())
    }

    /// Boot with pre-existing dishes and orders (seed files, tests).
    pub fn with_seed(dishes: Vec<Dish>, orders: Vec<Order>) -> Self {
        Self {
            build: BuildInfo {
                service: "gd-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            dishes: Arc::new(RwLock::new(dishes)),
            orders: Arc::new(RwLock::new(orders)),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fresh entity id: 32 lowercase hex chars (random 128 bits).
pub fn next_id() -> String {
    Uuid::new_v4().simple().to_string()
}
