// Visitor message endpoints. Submission is public (contact form); listing
// and moderation live behind the admin surface.
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::content::{sanitize::bool_or, sanitize_message_item};
use crate::error::ApiError;
use crate::state::AppState;

const MESSAGES_KEY: &str = "messages_data";

/// POST /api/messages - public contact-form submission. Prepends the new
/// message so stored order is newest first.
pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("Invalid JSON body"))?;
    let obj = payload
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Expected a message object"))?;

    let mut item = sanitize_message_item(obj)?;
    item.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
    item.insert("read".into(), Value::Bool(false));
    item.insert("created_at".into(), Value::String(Utc::now().to_rfc3339()));

    let mut messages = stored_messages(&state).await;
    messages.insert(0, Value::Object(item));

    state.store.set(MESSAGES_KEY, Value::Array(messages)).await?;
    state.store.record_update(MESSAGES_KEY).await;

    Ok(Json(json!({ "message": "Message sent" })))
}

/// PUT /api/admin/messages/:id - guarded; toggles the read flag.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("Invalid JSON body"))?;
    let obj = payload
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Expected a message object"))?;
    let read = bool_or(obj, "read", true);

    let mut messages = stored_messages(&state).await;
    let item = messages
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .find(|item| id_matches(item, &id))
        .ok_or_else(|| ApiError::not_found(format!("No message with id {}", id)))?;
    item.insert("read".into(), Value::Bool(read));

    state.store.set(MESSAGES_KEY, Value::Array(messages)).await?;
    state.store.record_update(MESSAGES_KEY).await;

    Ok(Json(json!({ "message": "Message updated" })))
}

/// DELETE /api/admin/messages/:id - guarded; rewrites the collection with
/// the item filtered out.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let messages = stored_messages(&state).await;
    let before = messages.len();
    let remaining: Vec<Value> = messages
        .into_iter()
        .filter(|item| !item.as_object().map(|o| id_matches(o, &id)).unwrap_or(false))
        .collect();

    if remaining.len() == before {
        return Err(ApiError::not_found(format!("No message with id {}", id)));
    }

    state.store.set(MESSAGES_KEY, Value::Array(remaining)).await?;
    state.store.record_update(MESSAGES_KEY).await;

    Ok(Json(json!({ "message": "Message deleted" })))
}

async fn stored_messages(state: &AppState) -> Vec<Value> {
    match state.store.get(MESSAGES_KEY).await {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Ids may be caller-supplied numbers or strings; compare both against the
/// path segment's text form.
fn id_matches(item: &Map<String, Value>, id: &str) -> bool {
    match item.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}
