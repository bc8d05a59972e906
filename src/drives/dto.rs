use serde::Deserialize;
use time::Date;

use crate::{error::ApiError, locations::repo::LocationRef};

/// Request body for creating or updating a drive. The location may be given
/// as a catalog id or as a bare name (older clients).
#[derive(Debug, Deserialize)]
pub struct DriveRequest {
    pub organizer_name: String,
    pub drive_date: Date,
    pub location_id: Option<i32>,
    pub location_name: Option<String>,
}

impl DriveRequest {
    /// Validate the body and pick out the location reference.
    pub fn validate(&self) -> Result<LocationRef, ApiError> {
        if self.organizer_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("All fields are required".into()));
        }
        LocationRef::from_fields(self.location_id, self.location_name.as_deref())
    }
}
