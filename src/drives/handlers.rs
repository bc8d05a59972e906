use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    drives::{
        dto::DriveRequest,
        repo::{Drive, DriveWithLocation},
    },
    error::{is_foreign_key_violation, ApiError},
    extract::Json,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/drives", get(list_drives))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/drives", post(create_drive))
        .route("/drives/:id", put(update_drive).delete(delete_drive))
}

#[instrument(skip(state))]
pub async fn list_drives(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriveWithLocation>>, ApiError> {
    let drives = Drive::list_with_locations(&state.db).await?;
    Ok(Json(drives))
}

#[instrument(skip(state, payload))]
pub async fn create_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<DriveRequest>,
) -> Result<(StatusCode, Json<Drive>), ApiError> {
    let location_ref = payload.validate()?;
    let location_id = location_ref.resolve(&state.db).await?;

    // Locations are static but the FK still backstops the resolve above.
    let drive = Drive::create(
        &state.db,
        user.id,
        payload.organizer_name.trim(),
        payload.drive_date,
        location_id,
    )
    .await
    .map_err(map_write_error)?;

    info!(drive_id = %drive.id, user_id = %user.id, "drive created");
    Ok((StatusCode::CREATED, Json(drive)))
}

#[instrument(skip(state, payload))]
pub async fn update_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DriveRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let location_ref = payload.validate()?;
    let location_id = location_ref.resolve(&state.db).await?;

    let updated = Drive::update(
        &state.db,
        id,
        user.id,
        payload.organizer_name.trim(),
        payload.drive_date,
        location_id,
    )
    .await
    .map_err(map_write_error)?;

    if !updated {
        warn!(drive_id = %id, user_id = %user.id, "update matched no owned drive");
        return Err(ApiError::NotFound(
            "Drive not found or you do not have permission to edit it".into(),
        ));
    }

    info!(drive_id = %id, user_id = %user.id, "drive updated");
    Ok(Json(json!({ "message": "Drive updated successfully" })))
}

#[instrument(skip(state))]
pub async fn delete_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = Drive::delete(&state.db, id, user.id).await?;

    if !deleted {
        warn!(drive_id = %id, user_id = %user.id, "delete matched no owned drive");
        return Err(ApiError::NotFound(
            "Drive not found or you do not have permission to delete it".into(),
        ));
    }

    info!(drive_id = %id, user_id = %user.id, "drive deleted");
    Ok(Json(json!({ "message": "Drive deleted successfully" })))
}

/// A drive write can trip the location FK if the catalog changes between
/// resolution and the statement; that is bad input, not a server fault.
fn map_write_error(e: sqlx::Error) -> ApiError {
    if is_foreign_key_violation(&e) {
        warn!("drive write referenced unknown location");
        ApiError::InvalidInput("Unknown location".into())
    } else {
        e.into()
    }
}
