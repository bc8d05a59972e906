use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::ApiError;

/// A named place a drive can be held at. Static reference data, seeded by
/// migration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<Location>> {
        sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, latitude, longitude
            FROM locations
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i32) -> sqlx::Result<Option<Location>> {
        sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, latitude, longitude
            FROM locations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_name(db: &PgPool, name: &str) -> sqlx::Result<Option<Location>> {
        sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, latitude, longitude
            FROM locations
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(db)
        .await
    }
}

/// How a client names the location of a drive. Older clients send the bare
/// location name; newer ones send the catalog id. Both resolve through the
/// catalog so drives always reference a known location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRef {
    Id(i32),
    Name(String),
}

impl LocationRef {
    /// Build a reference from optional request fields. Exactly one of the
    /// two must be present.
    pub fn from_fields(id: Option<i32>, name: Option<&str>) -> Result<Self, ApiError> {
        match (id, name) {
            (Some(id), None) => Ok(LocationRef::Id(id)),
            (None, Some(name)) if !name.trim().is_empty() => {
                Ok(LocationRef::Name(name.trim().to_string()))
            }
            (Some(_), Some(_)) => Err(ApiError::InvalidInput(
                "Provide either location_id or location_name, not both".into(),
            )),
            _ => Err(ApiError::InvalidInput(
                "A location is required".into(),
            )),
        }
    }

    /// Resolve to a catalog id, failing with InvalidInput when the referenced
    /// location does not exist.
    pub async fn resolve(&self, db: &PgPool) -> Result<i32, ApiError> {
        let found = match self {
            LocationRef::Id(id) => Location::find_by_id(db, *id).await?,
            LocationRef::Name(name) => Location::find_by_name(db, name).await?,
        };
        found
            .map(|l| l.id)
            .ok_or_else(|| ApiError::InvalidInput("Unknown location".into()))
    }
}
