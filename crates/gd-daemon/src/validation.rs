//! Per-field validation chains for dish and order payloads.
//!
//! Each chain is an ordered run of independent checks; the first failing
//! check decides the 400 message. "Present" follows JSON truthiness: null,
//! `false`, `0` and `""` all count as missing. Text fields must also be JSON
//! strings; any other type reports the field as missing.

use gd_lifecycle::{check_editable, check_update_status, parse_status, LifecycleError};
use gd_schemas::{Dish, LineItem, Order, OrderStatus};
use serde_json::{Map, Value};

use crate::api_types::{DishPayload, OrderPayload};
use crate::error::ApiError;

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// A dish payload that passed its chain. Carries everything except the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl DishDraft {
    pub fn into_dish(self, id: String) -> Dish {
        Dish {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
        }
    }

    /// Overwrite every mutable field; the id stays.
    pub fn apply_to(self, dish: &mut Dish) {
        dish.name = self.name;
        dish.description = self.description;
        dish.price = self.price;
        dish.image_url = self.image_url;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<LineItem>,
}

impl OrderDraft {
    pub fn into_order(self, id: String) -> Order {
        Order {
            id,
            deliver_to: self.deliver_to,
            mobile_number: self.mobile_number,
            status: self.status,
            dishes: self.dishes,
        }
    }

    pub fn apply_to(self, order: &mut Order) {
        order.deliver_to = self.deliver_to;
        order.mobile_number = self.mobile_number;
        order.status = self.status;
        order.dishes = self.dishes;
    }
}

// ---------------------------------------------------------------------------
// Dish chain
// ---------------------------------------------------------------------------

/// name → description → price → image_url presence, then price shape.
pub fn validate_dish(p: &DishPayload) -> Result<DishDraft, ApiError> {
    let name = require_str("Dish", "name", p.name.as_ref())?;
    let description = require_str("Dish", "description", p.description.as_ref())?;
    let price = require_value("Dish", "price", p.price.as_ref())?;
    let image_url = require_str("Dish", "image_url", p.image_url.as_ref())?;

    let price = positive_integer(price).ok_or_else(|| {
        ApiError::bad_request("Dish must have a price that is an integer greater than 0")
    })?;

    Ok(DishDraft {
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_url: image_url.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Order chains
// ---------------------------------------------------------------------------

/// Create chain. `status` is optional and defaults to pending; when given it
/// must be one of the four known literals.
pub fn validate_new_order(p: &OrderPayload) -> Result<OrderDraft, ApiError> {
    let (deliver_to, mobile_number, dishes) = order_common(p)?;

    let status = match p.status.as_ref() {
        Some(v) if is_truthy(v) => parse_status(status_literal(v)?)?,
        _ => OrderStatus::default(),
    };

    Ok(OrderDraft {
        deliver_to,
        mobile_number,
        status,
        dishes,
    })
}

/// Update chain for an order currently stored with status `current`.
///
/// Field checks run first, then the lifecycle gate (stored status, then the
/// requested one). The route-id check is left to the caller.
pub fn validate_order_update(
    p: &OrderPayload,
    current: OrderStatus,
) -> Result<OrderDraft, ApiError> {
    let deliver_to = require_str("Order", "deliverTo", p.deliver_to.as_ref())?;
    let mobile_number = require_str("Order", "mobileNumber", p.mobile_number.as_ref())?;
    let dishes = require_value("Order", "dishes", p.dishes.as_ref())?;
    let status = require_value("Order", "status", p.status.as_ref())?;

    let dishes = line_items(dishes)?;

    check_editable(current)?;
    let status = check_update_status(status_literal(status)?)?;

    Ok(OrderDraft {
        deliver_to: deliver_to.to_string(),
        mobile_number: mobile_number.to_string(),
        status,
        dishes,
    })
}

fn order_common(p: &OrderPayload) -> Result<(String, String, Vec<LineItem>), ApiError> {
    let deliver_to = require_str("Order", "deliverTo", p.deliver_to.as_ref())?;
    let mobile_number = require_str("Order", "mobileNumber", p.mobile_number.as_ref())?;
    let dishes = require_value("Order", "dishes", p.dishes.as_ref())?;
    let dishes = line_items(dishes)?;
    Ok((deliver_to.to_string(), mobile_number.to_string(), dishes))
}

/// `dishes` must be a non-empty list whose every entry carries a positive
/// integer `quantity`.
fn line_items(v: &Value) -> Result<Vec<LineItem>, ApiError> {
    let items = match v.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ApiError::bad_request("Order must include at least one dish")),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let quantity = item
                .get("quantity")
                .and_then(positive_integer)
                .ok_or_else(|| {
                    ApiError::bad_request(format!(
                        "Dish {index} must have a quantity that is an integer greater than 0"
                    ))
                })?;
            Ok(line_item(item, quantity))
        })
        .collect()
}

fn line_item(item: &Value, quantity: u64) -> LineItem {
    let mut details: Map<String, Value> = item.as_object().cloned().unwrap_or_default();
    details.remove("quantity");
    let id = match details.remove("id") {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            details.insert("id".to_string(), other);
            None
        }
        None => None,
    };
    LineItem {
        id,
        quantity,
        details,
    }
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

/// A truthy body `id` must equal the route id. Non-string ids never match.
pub fn check_route_id(
    entity: &str,
    body_id: Option<&Value>,
    route_id: &str,
) -> Result<(), ApiError> {
    let Some(id) = body_id.filter(|v| is_truthy(v)) else {
        return Ok(());
    };
    if id.as_str() == Some(route_id) {
        return Ok(());
    }
    let shown = match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Err(ApiError::bad_request(format!(
        "{entity} id does not match route id. {entity}: {shown}, Route: {route_id}"
    )))
}

fn require_str<'a>(
    entity: &str,
    field: &str,
    v: Option<&'a Value>,
) -> Result<&'a str, ApiError> {
    match v {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(missing(entity, field)),
    }
}

/// Status literals are strings; a truthy value of any other type is an
/// invalid status.
fn status_literal(v: &Value) -> Result<&str, ApiError> {
    v.as_str().ok_or_else(|| {
        ApiError::from(LifecycleError::InvalidStatus {
            got: v.to_string(),
        })
    })
}

fn require_value<'a>(
    entity: &str,
    field: &str,
    v: Option<&'a Value>,
) -> Result<&'a Value, ApiError> {
    match v {
        Some(v) if is_truthy(v) => Ok(v),
        _ => Err(missing(entity, field)),
    }
}

fn missing(entity: &str, field: &str) -> ApiError {
    ApiError::bad_request(format!("{entity} must include a {field}"))
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integer > 0. Floats with no fractional part (`5.0`) count as integers;
/// strings never do.
fn positive_integer(v: &Value) -> Option<u64> {
    let Value::Number(n) = v else {
        return None;
    };
    if let Some(u) = n.as_u64() {
        return (u > 0).then_some(u);
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f > 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}
