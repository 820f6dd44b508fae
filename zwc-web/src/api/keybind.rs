//! Keyboard binding endpoints

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use tokio::task;
use tracing::{info, warn};

use super::wiring::form_data;
use crate::keybind::{KeybindPage, KeybindingMap, ACTION_KEY, SAVE_ACTION};
use crate::{ApiError, ApiResult, AppState};

fn load_map(state: &AppState) -> (KeybindingMap, Vec<String>) {
    let mut map = KeybindingMap::new(state.settings.keybinding_path());
    let mut errors = Vec::new();
    if let Err(e) = map.load() {
        warn!("Can't load keyboard binding: {}", e);
        errors.push(format!("Can't load keyboard binding: {}", e));
    }
    (map, errors)
}

/// GET /api/ui-keybind
pub async fn get_keybind(State(state): State<AppState>) -> ApiResult<Json<KeybindPage>> {
    let page = task::spawn_blocking(move || {
        let (map, errors) = load_map(&state);
        KeybindPage::new(&map, errors)
    })
    .await?;
    Ok(Json(page))
}

/// POST /api/ui-keybind
///
/// `ZYNTHIAN_KEYBIND_ACTION=SAVE_KEYBIND` stores the submitted bindings. An
/// unreadable binding file is never overwritten. A missing or empty action
/// just renders the page again.
pub async fn post_keybind(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> ApiResult<Json<KeybindPage>> {
    let data = form_data(form)?;
    match data.first(ACTION_KEY) {
        Some(SAVE_ACTION) => {}
        None | Some("") => return get_keybind(State(state)).await,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "unknown keybind action '{}'",
                other
            )))
        }
    }

    let page = task::spawn_blocking(move || {
        let (mut map, mut errors) = load_map(&state);
        if errors.is_empty() {
            let applied = map.apply_form(&data);
            info!("Applied {} key binding fields", applied);
            match map.save() {
                Ok(()) => info!("UI restart requested to pick up new key bindings"),
                Err(e) => {
                    warn!("Can't save keyboard binding: {}", e);
                    errors.push(format!("Can't save keyboard binding: {}", e));
                }
            }
        }
        KeybindPage::new(&map, errors)
    })
    .await?;
    Ok(Json(page))
}
