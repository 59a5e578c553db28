use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{participant::Participant, trip::Trip},
};

const TRIP_COLUMNS: &str = "id, destination, starts_at, ends_at, is_confirmed, created_at";
const PARTICIPANT_COLUMNS: &str = "id, name, email, is_confirmed, is_owner, trip_id";

#[derive(Clone)]
pub struct StorageService {
    db: DbPool,
}

impl StorageService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_trip_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(trip)
    }

    pub async fn create_trip(
        &self,
        destination: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(&format!(
            "INSERT INTO trips (id, destination, starts_at, ends_at, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {TRIP_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(destination)
        .bind(starts_at)
        .bind(ends_at)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;
        Ok(trip)
    }

    /// Adds `email` to the trip. Repeated invites for the same address each get a new row.
    pub async fn insert_participant(
        &self,
        email: &str,
        trip_id: Uuid,
    ) -> Result<Participant, AppError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "INSERT INTO participants (id, email, trip_id) VALUES (?, ?, ?) \
             RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(trip_id)
        .fetch_one(&self.db)
        .await?;
        Ok(participant)
    }

    pub async fn list_participants(&self, trip_id: Uuid) -> Result<Vec<Participant>, AppError> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE trip_id = ? ORDER BY rowid"
        ))
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(participants)
    }
}
