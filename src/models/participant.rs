use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Someone invited to a trip. Starts unconfirmed until they follow the emailed link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub is_confirmed: bool,
    pub is_owner: bool,
    pub trip_id: Uuid,
}
