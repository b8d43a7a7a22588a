//! JSON body extractors that run `validator` rules before the handler.

use anyhow::anyhow;
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use shule_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let text = rejection.body_text();

    if let Some(field) = text
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return AppError::unprocessable(anyhow!("{} is required", field));
    }

    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        )),
        JsonRejection::JsonDataError(_) => {
            AppError::bad_request(anyhow!("Invalid field type in request"))
        }
        _ => AppError::bad_request(anyhow!("Invalid request body")),
    }
}

/// `Json<T>` that must also pass `T::validate()`.
///
/// Missing fields and failed rules are 422; malformed JSON is 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        validate(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// Like [`ValidatedJson`], but an empty body yields `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for OptionalValidatedJson<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!("Invalid request body")))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalValidatedJson(T::default()));
        }

        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::bad_request(anyhow!("Invalid request body: {}", e)))?;

        validate(&value)?;
        Ok(OptionalValidatedJson(value))
    }
}
