// Generic content endpoints: one GET/POST pair parameterized by the entity
// registry instead of a handler per content type.
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::content::{self, EntityDef, Shape};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::META_KEY;

/// GET /api/:entity - public site read.
pub async fn public_get(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let def = content::lookup(&entity)
        .filter(|def| def.public)
        .ok_or_else(|| unknown_entity(&entity))?;

    Ok(Json(read_entity(&state, def).await))
}

/// GET /api/admin/:entity - admin read, includes non-public entities.
pub async fn admin_get(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let def = content::lookup(&entity).ok_or_else(|| unknown_entity(&entity))?;
    Ok(Json(read_entity(&state, def).await))
}

/// POST /api/admin/:entity - guarded whole-value replacement.
pub async fn admin_post(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let def = content::lookup(&entity).ok_or_else(|| unknown_entity(&entity))?;

    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("Invalid JSON body"))?;
    let sanitized = (def.sanitize)(payload)?;

    state.store.set(def.key, sanitized).await?;
    state.store.record_update(def.key).await;

    Ok(Json(json!({ "message": format!("{} saved", def.label) })))
}

/// GET /api/admin/meta - per-key last-updated timestamps.
pub async fn admin_meta(State(state): State<AppState>) -> Json<Value> {
    match state.store.get(META_KEY).await {
        Some(meta @ Value::Object(_)) => Json(meta),
        _ => Json(json!({})),
    }
}

/// Read an entity, degrading to its compiled-in default when the key was
/// never written or the store is unreachable. Uniform across shapes: the
/// public site never hard-fails just because storage is down.
pub async fn read_entity(state: &AppState, def: &EntityDef) -> Value {
    match state.store.get(def.key).await {
        Some(stored) => match def.shape {
            Shape::Singleton => content::merge_defaults((def.default)(), stored),
            Shape::Collection => stored,
        },
        None => (def.default)(),
    }
}

fn unknown_entity(entity: &str) -> ApiError {
    ApiError::not_found(format!("Unknown content type: {}", entity))
}
