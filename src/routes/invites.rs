use axum::{extract::State, routing::post, Json, Router};

use crate::{
    error::AppError,
    extract::{ValidJson, ValidPath},
    models::invite::{CreateInviteBody, CreateInviteResponse, TripParams},
    services::invite,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/trips/:tripId/invites", post(create_invite))
}

async fn create_invite(
    State(state): State<AppState>,
    ValidPath(params): ValidPath<TripParams>,
    ValidJson(body): ValidJson<CreateInviteBody>,
) -> Result<Json<CreateInviteResponse>, AppError> {
    let participant = invite::create_invite(&state, params.trip_id, &body.email).await?;
    Ok(Json(CreateInviteResponse {
        participant_id: participant.id,
    }))
}
