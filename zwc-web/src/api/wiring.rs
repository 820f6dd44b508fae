//! Hardware wiring endpoints
//!
//! Profile files are read and written on the blocking pool.

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use tokio::task;

use crate::form::{ConfigPage, FormData};
use crate::wiring::store::{ProfileCollection, ProfileStore};
use crate::wiring::WiringHandler;
use crate::{ApiError, ApiResult, AppState};

/// Decode an urlencoded body, keeping repeated keys
pub fn form_data(
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> ApiResult<FormData> {
    let Form(pairs) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(FormData::from_pairs(pairs))
}

/// GET /api/hw-wiring
pub async fn get_wiring(State(state): State<AppState>) -> ApiResult<Json<ConfigPage>> {
    let page = task::spawn_blocking(move || {
        let store = ProfileStore::new(state.settings.profiles_dir());
        WiringHandler::new(&store, state.env.as_ref()).get()
    })
    .await?;
    Ok(Json(page))
}

/// POST /api/hw-wiring
pub async fn post_wiring(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> ApiResult<Json<ConfigPage>> {
    let data = form_data(form)?;
    let page = task::spawn_blocking(move || {
        let store = ProfileStore::new(state.settings.profiles_dir());
        WiringHandler::new(&store, state.env.as_ref()).post(&data)
    })
    .await?;
    Ok(Json(page))
}

/// GET /api/hw-wiring/profiles
///
/// Completed profiles plus the unknown keys found in each file.
pub async fn get_wiring_profiles(
    State(state): State<AppState>,
) -> ApiResult<Json<ProfileCollection>> {
    let dir = state.settings.profiles_dir();
    let profiles = task::spawn_blocking(move || ProfileStore::new(dir).list()).await?;
    Ok(Json(profiles))
}
