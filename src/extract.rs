use async_trait::async_trait;
use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, RawPathParams, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, FieldErrors};

/// Path parameters whose parse failures come back as `AppError::Validation`.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

/// JSON body that must deserialize and then pass its `Validate` rules.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                // serde's custom errors (uuid, chrono...) don't carry the key, so fall back
                // to the route's only parameter when there is just one.
                let sole_key = RawPathParams::from_request_parts(parts, state)
                    .await
                    .ok()
                    .and_then(|params| {
                        let mut keys = params.iter().map(|(key, _)| key.to_string());
                        match (keys.next(), keys.next()) {
                            (Some(key), None) => Some(key),
                            _ => None,
                        }
                    });
                Err(path_rejection(rejection, sole_key))
            }
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        value.validate().map_err(validation_errors)?;
        Ok(Self(value))
    }
}

fn path_rejection(rejection: PathRejection, sole_key: Option<String>) -> AppError {
    let message = rejection.body_text();
    let field = match &rejection {
        PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
            ErrorKind::ParseErrorAtKey { key, .. } | ErrorKind::InvalidUtf8InPathParam { key } => {
                Some(key.clone())
            }
            _ => sole_key,
        },
        _ => None,
    };
    AppError::validation(field.unwrap_or_else(|| "params".to_string()), message)
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::validation("body", rejection.body_text())
}

fn validation_errors(errors: ValidationErrors) -> AppError {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let mut messages: Vec<String> = errs
            .iter()
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| err.code.to_string())
            })
            .collect();
        messages.dedup();
        fields.insert(field.to_string(), messages);
    }
    AppError::Validation(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invite::CreateInviteBody;

    #[test]
    fn email_rule_is_reported_under_its_field() {
        let body = CreateInviteBody {
            email: "not-an-email".into(),
        };
        let err = validation_errors(body.validate().unwrap_err());
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.get("email"), Some(&vec!["Invalid email".to_string()]));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn dot_run_email_is_reported_once() {
        let body = CreateInviteBody {
            email: "a..b@example.com".into(),
        };
        let err = validation_errors(body.validate().unwrap_err());
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.get("email"), Some(&vec!["Invalid email".to_string()]));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn well_formed_email_passes() {
        let body = CreateInviteBody {
            email: "a@b.com".into(),
        };
        assert!(body.validate().is_ok());
    }
}
