use gd_schemas::OrderStatus;

/// Why a lifecycle check refused an order mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Either the stored or the requested status is `delivered`.
    Delivered,
    /// The requested status is not one of the four known literals.
    InvalidStatus { got: String },
    /// Delete attempted on an order that is no longer pending.
    NotPending { current: OrderStatus },
}

impl LifecycleError {
    /// Client-facing message. Stable: clients match on these strings.
    pub fn message(&self) -> &'static str {
        match self {
            LifecycleError::Delivered => "A delivered order cannot be changed",
            LifecycleError::InvalidStatus { .. } => {
                "Order must have a status of pending, preparing, out-for-delivery, delivered"
            }
            LifecycleError::NotPending { .. } => "An order cannot be deleted unless it is pending",
        }
    }
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LifecycleError {}
