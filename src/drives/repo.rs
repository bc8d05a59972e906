use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Drive record as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Drive {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organizer_name: String,
    pub drive_date: Date,
    pub location_id: i32,
    pub created_at: OffsetDateTime,
}

/// Listing row: a drive joined with its location, as shown on the map.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriveWithLocation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organizer_name: String,
    pub drive_date: Date,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Drive {
    /// All drives with their location, soonest first.
    pub async fn list_with_locations(db: &PgPool) -> sqlx::Result<Vec<DriveWithLocation>> {
        sqlx::query_as::<_, DriveWithLocation>(
            r#"
            SELECT d.id, d.user_id, d.organizer_name, d.drive_date,
                   l.name AS location_name, l.latitude, l.longitude
            FROM drives d
            JOIN locations l ON l.id = d.location_id
            ORDER BY d.drive_date ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        organizer_name: &str,
        drive_date: Date,
        location_id: i32,
    ) -> sqlx::Result<Drive> {
        sqlx::query_as::<_, Drive>(
            r#"
            INSERT INTO drives (user_id, organizer_name, drive_date, location_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, organizer_name, drive_date, location_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(organizer_name)
        .bind(drive_date)
        .bind(location_id)
        .fetch_one(db)
        .await
    }

    /// Update a drive the caller owns. The ownership check is part of the
    /// statement itself, so there is no window between check and write.
    /// Returns false when no row matched both id and owner.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        organizer_name: &str,
        drive_date: Date,
        location_id: i32,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE drives
            SET organizer_name = $1, drive_date = $2, location_id = $3
            WHERE id = $4 AND user_id = $5
            "#,
        )
        .bind(organizer_name)
        .bind(drive_date)
        .bind(location_id)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a drive the caller owns; same atomic ownership condition as
    /// [`Drive::update`].
    pub async fn delete(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM drives
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::User;
    use time::macros::date;

    // Needs live Postgres; run with DATABASE_URL set:
    //   cargo test -- --ignored
    #[sqlx::test]
    #[ignore]
    async fn mutations_only_match_the_owner(db: PgPool) {
        let owner = User::create(&db, "owner@example.com", "hash-a").await.unwrap();
        let intruder = User::create(&db, "intruder@example.com", "hash-b").await.unwrap();
        let drive = Drive::create(&db, owner.id, "Red Cross Accra", date!(2025 - 01 - 01), 1)
            .await
            .unwrap();

        // Another user's id never matches the conditional statement
        assert!(
            !Drive::update(&db, drive.id, intruder.id, "Hijacked", date!(2025 - 02 - 02), 1)
                .await
                .unwrap()
        );
        assert!(!Drive::delete(&db, drive.id, intruder.id).await.unwrap());

        let listed = Drive::list_with_locations(&db).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].organizer_name, "Red Cross Accra");
        assert_eq!(listed[0].user_id, owner.id);

        // The owner's mutations do match
        assert!(
            Drive::update(&db, drive.id, owner.id, "Red Cross Tema", drive.drive_date, 1)
                .await
                .unwrap()
        );
        assert!(Drive::delete(&db, drive.id, owner.id).await.unwrap());
        assert!(Drive::list_with_locations(&db).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[ignore]
    async fn listing_orders_by_date_ascending(db: PgPool) {
        let owner = User::create(&db, "owner@example.com", "hash").await.unwrap();
        Drive::create(&db, owner.id, "Later", date!(2025 - 06 - 01), 1)
            .await
            .unwrap();
        Drive::create(&db, owner.id, "Sooner", date!(2025 - 01 - 01), 2)
            .await
            .unwrap();

        let listed = Drive::list_with_locations(&db).await.unwrap();
        let names: Vec<_> = listed.iter().map(|d| d.organizer_name.as_str()).collect();
        assert_eq!(names, ["Sooner", "Later"]);
    }

    #[test]
    fn listing_row_has_map_fields() {
        let row = DriveWithLocation {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            organizer_name: "Red Cross Accra".into(),
            drive_date: date!(2025 - 01 - 01),
            location_name: "Tema".into(),
            latitude: 5.6667,
            longitude: 0.0167,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["organizer_name"], "Red Cross Accra");
        assert_eq!(json["drive_date"], "2025-01-01");
        assert_eq!(json["location_name"], "Tema");
        assert_eq!(json["latitude"], 5.6667);
        assert_eq!(json["longitude"], 0.0167);
    }
}
