use gd_schemas::OrderStatus;

use crate::LifecycleError;

/// Parse a wire status literal. Anything outside the four known values is
/// [`LifecycleError::InvalidStatus`].
pub fn parse_status(raw: &str) -> Result<OrderStatus, LifecycleError> {
    OrderStatus::parse(raw).ok_or_else(|| LifecycleError::InvalidStatus {
        got: raw.to_string(),
    })
}

/// Check the status a client asks an update to move to.
///
/// `delivered` gets its own error; unknown literals get the generic one.
pub fn check_update_status(requested: &str) -> Result<OrderStatus, LifecycleError> {
    match parse_status(requested)? {
        OrderStatus::Delivered => Err(LifecycleError::Delivered),
        st => Ok(st),
    }
}

/// A stored order accepts edits unless it has already been delivered.
pub fn check_editable(current: OrderStatus) -> Result<(), LifecycleError> {
    if current == OrderStatus::Delivered {
        return Err(LifecycleError::Delivered);
    }
    Ok(())
}

/// Deletion is allowed from `pending` only.
pub fn check_deletable(current: OrderStatus) -> Result<(), LifecycleError> {
    if current == OrderStatus::Pending {
        Ok(())
    } else {
        Err(LifecycleError::NotPending { current })
    }
}
