use axum::Json;
use serde_json::{Value, json};

pub async fn ping() -> Json<Value> {
    Json(json!({ "msg": "pong" }))
}

pub async fn banner() -> &'static str {
    "PDF Generation Service is running!"
}
