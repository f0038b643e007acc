//! Axum router and all HTTP handlers for gd-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. Tests compose the bare router directly.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, MethodRouter},
    Json, Router,
};
use gd_lifecycle::check_deletable;
use gd_schemas::{DataEnvelope, Dish, Order};
use tracing::info;

use crate::{
    api_types::{DishPayload, HealthResponse, OrderPayload, RequestEnvelope},
    error::ApiError,
    state::{next_id, AppState},
    validation::{check_route_id, validate_dish, validate_new_order, validate_order_update},
};

type Body<T> = Result<Json<RequestEnvelope<T>>, JsonRejection>;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new().route("/health", get(health));
    let router = resource(router, "/dishes", get(list_dishes).post(create_dish));
    let router = resource(router, "/dishes/:dish_id", get(read_dish).put(update_dish));
    let router = resource(router, "/orders", get(list_orders).post(create_order));
    let router = resource(
        router,
        "/orders/:order_id",
        get(read_order).put(update_order).delete(delete_order),
    );
    router.fallback(path_not_found).with_state(state)
}

/// Mount `methods` at `path` and at `path/`; any other method is a 405.
fn resource(
    router: Router<Arc<AppState>>,
    path: &str,
    methods: MethodRouter<Arc<AppState>>,
) -> Router<Arc<AppState>> {
    let methods = methods.fallback(method_not_allowed);
    router
        .route(path, methods.clone())
        .route(&format!("{path}/"), methods)
}

pub(crate) async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::method_not_allowed(format!("{method} not allowed for {}", uri.path()))
}

pub(crate) async fn path_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("Path not found: {}", uri.path()))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// /dishes
// ---------------------------------------------------------------------------

fn dish_not_found(dish_id: &str) -> ApiError {
    ApiError::not_found(format!("Dish does not exist: {dish_id}"))
}

pub(crate) async fn list_dishes(State(st): State<Arc<AppState>>) -> Json<DataEnvelope<Vec<Dish>>> {
    let dishes = st.dishes.read().await.clone();
    Json(DataEnvelope::new(dishes))
}

pub(crate) async fn create_dish(
    State(st): State<Arc<AppState>>,
    body: Body<DishPayload>,
) -> Result<(StatusCode, Json<DataEnvelope<Dish>>), ApiError> {
    let Json(body) = body?;
    let dish = validate_dish(&body.into_data())?.into_dish(next_id());

    st.dishes.write().await.push(dish.clone());

    info!(dish_id = %dish.id, "dishes/create");
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(dish))))
}

pub(crate) async fn read_dish(
    State(st): State<Arc<AppState>>,
    Path(dish_id): Path<String>,
) -> Result<Json<DataEnvelope<Dish>>, ApiError> {
    let dishes = st.dishes.read().await;
    let dish = dishes
        .iter()
        .find(|d| d.id == dish_id)
        .cloned()
        .ok_or_else(|| dish_not_found(&dish_id))?;
    Ok(Json(DataEnvelope::new(dish)))
}

pub(crate) async fn update_dish(
    State(st): State<Arc<AppState>>,
    Path(dish_id): Path<String>,
    body: Body<DishPayload>,
) -> Result<Json<DataEnvelope<Dish>>, ApiError> {
    let Json(body) = body?;
    let payload = body.into_data();

    let mut dishes = st.dishes.write().await;
    let dish = dishes
        .iter_mut()
        .find(|d| d.id == dish_id)
        .ok_or_else(|| dish_not_found(&dish_id))?;

    let draft = validate_dish(&payload)?;
    check_route_id("Dish", payload.id.as_ref(), &dish_id)?;

    draft.apply_to(dish);
    let updated = dish.clone();
    drop(dishes);

    info!(dish_id = %updated.id, "dishes/update");
    Ok(Json(DataEnvelope::new(updated)))
}

// ---------------------------------------------------------------------------
// /orders
// ---------------------------------------------------------------------------

fn order_not_found(order_id: &str) -> ApiError {
    ApiError::not_found(format!("Order does not exist: {order_id}"))
}

pub(crate) async fn list_orders(
    State(st): State<Arc<AppState>>,
) -> Json<DataEnvelope<Vec<Order>>> {
    let orders = st.orders.read().await.clone();
    Json(DataEnvelope::new(orders))
}

pub(crate) async fn create_order(
    State(st): State<Arc<AppState>>,
    body: Body<OrderPayload>,
) -> Result<(StatusCode, Json<DataEnvelope<Order>>), ApiError> {
    let Json(body) = body?;
    let order = validate_new_order(&body.into_data())?.into_order(next_id());

    st.orders.write().await.push(order.clone());

    info!(order_id = %order.id, status = %order.status, "orders/create");
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(order))))
}

pub(crate) async fn read_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<DataEnvelope<Order>>, ApiError> {
    let orders = st.orders.read().await;
    let order = orders
        .iter()
        .find(|o| o.id == order_id)
        .cloned()
        .ok_or_else(|| order_not_found(&order_id))?;
    Ok(Json(DataEnvelope::new(order)))
}

pub(crate) async fn update_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    body: Body<OrderPayload>,
) -> Result<Json<DataEnvelope<Order>>, ApiError> {
    let Json(body) = body?;
    let payload = body.into_data();

    let mut orders = st.orders.write().await;
    let order = orders
        .iter_mut()
        .find(|o| o.id == order_id)
        .ok_or_else(|| order_not_found(&order_id))?;

    let draft = validate_order_update(&payload, order.status)?;
    check_route_id("Order", payload.id.as_ref(), &order_id)?;

    let from = order.status;
    draft.apply_to(order);
    let updated = order.clone();
    drop(orders);

    info!(order_id = %updated.id, from = %from, to = %updated.status, "orders/update");
    Ok(Json(DataEnvelope::new(updated)))
}

/// Remove a pending order. Any other status is a 400.
pub(crate) async fn delete_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut orders = st.orders.write().await;
    let idx = orders
        .iter()
        .position(|o| o.id == order_id)
        .ok_or_else(|| order_not_found(&order_id))?;

    check_deletable(orders[idx].status)?;
    orders.remove(idx);
    drop(orders);

    info!(order_id = %order_id, "orders/delete");
    Ok(StatusCode::NO_CONTENT)
}
