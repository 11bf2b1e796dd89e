//! The `/entries` access functions: list/read, create, multi-field update,
//! delete.
//!
//! The store stays schemaless; the only shape checks are the generic create
//! validator and the id-immutability rule. Authorship is checked on delete
//! only — create and update deliberately accept any authenticated caller,
//! matching the observed service.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use pocketpost_models::entry::fields;
use pocketpost_models::{Entry, normalize, validate_entry};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};
use uuid::Uuid;

use crate::AppState;
use crate::auth;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// GET /entries — every record; GET /entries?id=<id> — one record or 404.
pub async fn list_entries(
    State(storage): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    match query.id {
        Some(id) => match storage.entries.get(&id)? {
            Some(entry) => Ok(Json(serde_json::to_value(entry).map_err(anyhow::Error::from)?)),
            None => Err(ApiError::not_found(&id)),
        },
        None => {
            let entries = storage.entries.list()?;
            debug!(count = entries.len(), "scanned entries table");
            Ok(Json(
                serde_json::to_value(entries).map_err(anyhow::Error::from)?,
            ))
        }
    }
}

/// POST /entries — assign an id when absent, validate, persist. 201 {"id"}.
pub async fn create_entry(
    State(storage): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Value::Object(mut record) = body else {
        return Err(ApiError::BadRequest("Please provide right args!!".into()));
    };

    // Callers may supply their own id (profiles do); everything else gets a
    // generated one.
    let id = match record.remove(fields::ID) {
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    };
    normalize_public_flag(&mut record);

    let entry = Entry { id, fields: record };
    validate_entry(&entry)?;
    storage.entries.create(&entry)?;
    info!(id = %entry.id, "created entry");

    Ok((StatusCode::CREATED, Json(json!({ "id": entry.id }))))
}

/// PUT /entries?id=<id> — overwrite the named fields atomically, echo them.
pub async fn update_entry(
    State(storage): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = require_id(query)?;
    let Value::Object(mut updates) = body else {
        return Err(ApiError::BadRequest("Please provide right args!!".into()));
    };
    if updates.is_empty() || (updates.len() == 1 && updates.contains_key(fields::ID)) {
        return Err(ApiError::BadRequest("Please provide right args!!".into()));
    }
    normalize_public_flag(&mut updates);

    match storage.entries.update_fields(&id, &updates)? {
        Some(applied) => {
            debug!(id = %id, fields = applied.len(), "updated entry");
            Ok(Json(Value::Object(applied)))
        }
        None => Err(ApiError::not_found(&id)),
    }
}

/// DELETE /entries?id=<id> — admin or author only.
pub async fn delete_entry(
    State(storage): State<AppState>,
    Query(query): Query<IdQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let id = require_id(query)?;
    let caller = auth::caller_from_headers(&headers);

    if !caller.is_admin {
        let Some(username) = caller.username.as_deref() else {
            return Err(ApiError::Unauthorized(
                "Not authorized! Username not found.".into(),
            ));
        };

        let Some(entry) = storage.entries.get(&id)? else {
            return Err(ApiError::not_found(&id));
        };
        // Records without a recorded author deny every non-admin.
        let Some(author_id) = entry.get_text(fields::AUTHOR_ID) else {
            return Err(ApiError::Forbidden(
                "Not authorized! Post author information not found.".into(),
            ));
        };
        if author_id.trim() != username.trim() {
            return Err(ApiError::Forbidden(
                "Not authorized! You can only delete your own posts.".into(),
            ));
        }
    }

    if !storage.entries.delete(&id)? {
        return Err(ApiError::not_found(&id));
    }
    info!(id = %id, admin = caller.is_admin, "deleted entry");

    Ok(Json(json!(format!("Deleted post with id {}", id))))
}

fn require_id(query: IdQuery) -> Result<String, ApiError> {
    match query.id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ApiError::BadRequest("Please provide right args!!".into())),
    }
}

/// Parse-on-write: `isPublic` is persisted as a genuine boolean. Only rows
/// written before this service exercise the read-side string tolerance.
fn normalize_public_flag(record: &mut Map<String, Value>) {
    if let Some(value) = record.get(fields::IS_PUBLIC) {
        record.insert(
            fields::IS_PUBLIC.to_string(),
            Value::Bool(normalize::flag(Some(value))),
        );
    }
}
