use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct TripParams {
    #[serde(rename = "tripId")]
    pub trip_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInviteBody {
    #[validate(
        email(message = "Invalid email"),
        custom(function = "mailable_address", message = "Invalid email")
    )]
    pub email: String,
}

/// The mail transport parses recipients with its own grammar, which is stricter than
/// the `email` rule (no dot runs, no IP-literal domains).
fn mailable_address(email: &str) -> Result<(), ValidationError> {
    email
        .parse::<lettre::Address>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("email"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteResponse {
    pub participant_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(email: &str) -> CreateInviteBody {
        CreateInviteBody {
            email: email.into(),
        }
    }

    #[test]
    fn rejects_addresses_the_mailer_cannot_parse() {
        for email in ["a..b@example.com", ".a@example.com", "a@[127.0.0.1]"] {
            assert!(body(email).validate().is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn accepts_ordinary_addresses() {
        for email in ["a@b.com", "first.last+trip@example.co.uk"] {
            assert!(body(email).validate().is_ok(), "{email} should be accepted");
        }
    }
}
