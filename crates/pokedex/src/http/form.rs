//! Extraction of the `record` form field.

use std::collections::HashMap;

use axum::async_trait;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;

use pokedex_core::Record;
use pokedex_core::error::{Error, InvalidInputError};

use super::ApiError;
use crate::repo::RepoError;

/// Name of the form field carrying the record as JSON text.
pub const RECORD_FIELD: &str = "record";

/// A record posted as JSON text in the `record` field of a form.
///
/// Both `application/x-www-form-urlencoded` and `multipart/form-data`
/// bodies are accepted.
#[derive(Debug)]
pub struct RecordForm(pub Record);

#[async_trait]
impl<S> FromRequest<S> for RecordForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        let text = if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;

            let mut found = None;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?
            {
                if field.name() == Some(RECORD_FIELD) {
                    found = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| ApiError::bad_request(e.body_text()))?,
                    );
                    break;
                }
            }
            found
        } else {
            let Form(mut fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            fields.remove(RECORD_FIELD)
        };

        let text = text.ok_or_else(|| {
            ApiError::bad_request(format!("missing form field '{}'", RECORD_FIELD))
        })?;

        Record::from_json_str(&text).map(RecordForm).map_err(|e| {
            let reason = match e {
                Error::InvalidInput(InvalidInputError::Record { reason }) => reason,
                other => other.to_string(),
            };
            RepoError::InvalidRecord { reason }.into()
        })
    }
}
