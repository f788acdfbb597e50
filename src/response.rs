//! Response envelopes: `{message, data: [...]}` for reads, `{message}` for deletes.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

pub const SUCCESS: &str = "success";

#[derive(Serialize)]
pub struct SuccessMany {
    pub message: String,
    pub data: Vec<Value>,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn success_many(data: Vec<Value>) -> (StatusCode, Json<SuccessMany>) {
    (
        StatusCode::OK,
        Json(SuccessMany {
            message: SUCCESS.into(),
            data,
        }),
    )
}

/// A freshly created entry, unwrapped.
pub fn created(entry: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(entry))
}

pub fn ok(entry: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(entry))
}

pub fn message(message: String) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { message }))
}
