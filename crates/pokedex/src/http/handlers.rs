//! Route handlers for the pokemon collection.

use axum::Json;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::LOCATION;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use serde_json::json;
use tracing::instrument;

use pokedex_core::Record;

use super::form::RecordForm;
use super::{ApiError, AppState};
use crate::repo::PokemonRepository;

/// `GET /health`: returns `{ "ok": true }`.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `POST /api/pokemons`: create a record from the `record` form field.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn create_pokemon(
    State(state): State<AppState>,
    uri: Uri,
    RecordForm(fields): RecordForm,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.repo().create(fields).await?;

    let location = record
        .id()
        .map(|id| state.repo().resource_path(id))
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(json!({ "path": uri.path() })),
    ))
}

/// `GET /api/pokemons/:id`: fetch one record.
#[instrument(skip_all, fields(%id))]
pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let id = PokemonRepository::parse_id(&id)?;
    Ok(Json(state.repo().get_one(id).await?))
}

/// `GET /api/pokemons`: fetch every record.
#[instrument(skip_all)]
pub async fn list_pokemons(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.repo().get_all().await?))
}

/// `PUT /api/pokemons/:id`: replace one record.
///
/// The body is only decoded once the record is known to exist, so a missing
/// id answers 404 whatever was posted.
#[instrument(skip_all, fields(%id))]
pub async fn update_pokemon(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<StatusCode, ApiError> {
    let id = PokemonRepository::parse_id(&id)?;
    state.repo().get_one(id).await?;

    let RecordForm(payload) = RecordForm::from_request(request, &state).await?;
    state.repo().update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/pokemons/:id`: delete one record.
#[instrument(skip_all, fields(%id))]
pub async fn delete_pokemon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = PokemonRepository::parse_id(&id)?;
    state.repo().delete_one(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/pokemons`: delete every record and reset ids.
#[instrument(skip_all)]
pub async fn delete_all_pokemons(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.repo().delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
