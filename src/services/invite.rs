use askama::Template;
use tracing::info;
use uuid::Uuid;

use crate::{
    dates::format_long_date,
    error::AppError,
    models::participant::Participant,
    services::mail::{MailError, MailMessage, Sender},
    state::AppState,
};

#[derive(Template)]
#[template(path = "email/invite.html")]
struct InviteEmailTemplate<'a> {
    destination: &'a str,
    starts_at: String,
    ends_at: String,
    confirmation_link: String,
}

pub fn confirmation_link(api_base_url: &str, participant_id: Uuid) -> String {
    format!("{api_base_url}/participants/{participant_id}/confirm")
}

/// Adds `email` to the trip and mails them a confirmation link.
///
/// Fails with `AppError::NotFound` before touching anything when the trip is unknown.
/// The participant row is written before the mail goes out, and a transport failure
/// is returned as-is without removing it.
pub async fn create_invite(
    state: &AppState,
    trip_id: Uuid,
    email: &str,
) -> Result<Participant, AppError> {
    let trip = state
        .storage
        .find_trip_by_id(trip_id)
        .await?
        .ok_or(AppError::NotFound("Trip"))?;

    let participant = state.storage.insert_participant(email, trip.id).await?;

    let locale = state.config.mail.date_locale;
    let html = InviteEmailTemplate {
        destination: &trip.destination,
        starts_at: format_long_date(trip.starts_at, locale),
        ends_at: format_long_date(trip.ends_at, locale),
        confirmation_link: confirmation_link(&state.config.api_base_url, participant.id),
    }
    .render()
    .map_err(MailError::from)?;

    let message = MailMessage {
        from: Sender {
            name: state.config.mail.from_name.clone(),
            address: state.config.mail.from_address.clone(),
        },
        to: participant.email.clone(),
        subject: format!("Confirm your attendance on the trip to {}", trip.destination),
        html,
    };

    let delivery = state.mailer.send(message).await?;
    match &delivery.preview {
        Some(preview) => info!(participant_id = %participant.id, "invite mail preview: {preview}"),
        None => info!(
            participant_id = %participant.id,
            "invite mail sent as {}", delivery.message_id
        ),
    }

    Ok(participant)
}
