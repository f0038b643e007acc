//! Dishes: list / create / read / update through the HTTP surface.

use std::sync::Arc;

use axum::http::{Request, StatusCode};
use gd_daemon::{routes, state};
use gd_schemas::Dish;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // oneshot

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn call(st: &Arc<state::AppState>, req: Request<axum::body::Body>) -> (StatusCode, Value) {
    let resp = routes::build_router(Arc::clone(st))
        .oneshot(req)
        .await
        .expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("body is not valid JSON")
    };
    (status, json)
}

fn json_req(method: &str, uri: &str, body: Value) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

fn seeded() -> Arc<state::AppState> {
    let dish = Dish {
        id: "d1".to_string(),
        name: "Dolcelatte and chickpea spaghetti".to_string(),
        description: "Spaghetti topped with a blend of dolcelatte and chickpeas".to_string(),
        price: 19,
        image_url: "https://images.example/spaghetti.jpg".to_string(),
    };
    Arc::new(state::AppState::with_seed(vec![dish], Vec::new()))
}

fn valid_dish() -> Value {
    json!({
        "name": "Falafel and tahini bagel",
        "description": "A warm bagel filled with falafel and tahini",
        "price": 6,
        "image_url": "https://images.example/bagel.jpg"
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_assigned_id_and_appends() {
    let st = seeded();

    let (status, body) = call(&st, json_req("POST", "/dishes", json!({ "data": valid_dish() }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let data = &body["data"];
    assert_eq!(data["name"], "Falafel and tahini bagel");
    assert_eq!(data["price"], 6);
    let id = data["id"].as_str().expect("id assigned");
    assert_eq!(id.len(), 32);

    let (_, list) = call(&st, get("/dishes")).await;
    let list = list["data"].as_array().unwrap().clone();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1]["id"], id, "new dish is appended");
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["id"] = json!("client-chosen");

    let (status, body) = call(&st, json_req("POST", "/dishes", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["data"]["id"], "client-chosen");
}

#[tokio::test]
async fn create_rejects_each_missing_field() {
    for field in ["name", "description", "price", "image_url"] {
        let st = seeded();
        let mut dish = valid_dish();
        dish.as_object_mut().unwrap().remove(field);

        let (status, body) = call(&st, json_req("POST", "/dishes", json!({ "data": dish }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field={field}");
        assert_eq!(body["message"], format!("Dish must include a {field}"));
    }
}

#[tokio::test]
async fn create_rejects_empty_string_fields() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["description"] = json!("");

    let (status, body) = call(&st, json_req("POST", "/dishes", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Dish must include a description");
}

#[tokio::test]
async fn create_rejects_zero_price() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["price"] = json!(0);

    let (status, _) = call(&st, json_req("POST", "/dishes", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = call(&st, get("/dishes")).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1, "nothing appended");
}

#[tokio::test]
async fn create_rejects_non_integer_price() {
    for bad in [json!(-1), json!("17"), json!(3.5)] {
        let st = seeded();
        let mut dish = valid_dish();
        dish["price"] = bad.clone();

        let (status, body) = call(&st, json_req("POST", "/dishes", json!({ "data": dish }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price={bad}");
        assert_eq!(
            body["message"],
            "Dish must have a price that is an integer greater than 0"
        );
    }
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn read_existing_dish() {
    let st = seeded();
    let (status, body) = call(&st, get("/dishes/d1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "d1");
    assert_eq!(body["data"]["price"], 19);
}

#[tokio::test]
async fn read_missing_dish_is_404() {
    let st = seeded();
    let (status, body) = call(&st, get("/dishes/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dish does not exist: nope");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_overwrites_fields_and_keeps_id() {
    let st = seeded();

    let (status, body) = call(
        &st,
        json_req("PUT", "/dishes/d1", json!({ "data": valid_dish() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "d1");
    assert_eq!(body["data"]["name"], "Falafel and tahini bagel");

    let (_, read) = call(&st, get("/dishes/d1")).await;
    assert_eq!(read["data"]["price"], 6, "mutation is persisted in memory");
}

#[tokio::test]
async fn update_accepts_matching_body_id() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["id"] = json!("d1");

    let (status, _) = call(&st, json_req("PUT", "/dishes/d1", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_rejects_mismatched_body_id() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["id"] = json!("other");

    let (status, body) = call(&st, json_req("PUT", "/dishes/d1", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Dish id does not match route id. Dish: other, Route: d1"
    );

    let (_, read) = call(&st, get("/dishes/d1")).await;
    assert_eq!(read["data"]["price"], 19, "rejected update leaves dish untouched");
}

#[tokio::test]
async fn update_missing_dish_is_404_before_validation() {
    let st = seeded();
    let (status, body) = call(&st, json_req("PUT", "/dishes/nope", json!({ "data": {} }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dish does not exist: nope");
}

#[tokio::test]
async fn update_missing_dish_with_wrongly_typed_id_is_404() {
    let st = seeded();
    let (status, body) = call(
        &st,
        json_req("PUT", "/dishes/missing", json!({ "data": { "id": 7 } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dish does not exist: missing");
}

#[tokio::test]
async fn create_reports_wrongly_typed_name_by_field() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["name"] = json!(5);

    let (status, body) = call(&st, json_req("POST", "/dishes", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Dish must include a name");
}

#[tokio::test]
async fn update_rejects_numeric_body_id() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["id"] = json!(7);

    let (status, body) = call(&st, json_req("PUT", "/dishes/d1", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Dish id does not match route id. Dish: 7, Route: d1"
    );
}

#[tokio::test]
async fn update_runs_the_field_chain() {
    let st = seeded();
    let mut dish = valid_dish();
    dish["price"] = json!("free");

    let (status, body) = call(&st, json_req("PUT", "/dishes/d1", json!({ "data": dish }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Dish must have a price that is an integer greater than 0"
    );
}
