use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{error::ApiError, locations::repo::Location, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/locations", get(list_locations))
}

#[instrument(skip(state))]
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let locations = Location::list_all(&state.db).await?;
    Ok(Json(locations))
}
