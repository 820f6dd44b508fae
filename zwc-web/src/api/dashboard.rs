//! Dashboard endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::dashboard::{Dashboard, DashboardBuilder};
use crate::{ApiResult, AppState};

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    let builder = DashboardBuilder::new(state.env.as_ref(), &state.settings, &state.runner);
    Json(builder.build().await)
}

#[derive(Debug, Serialize)]
pub struct IssueUrlResponse {
    pub url: String,
}

/// GET /api/dashboard/issue-url
///
/// New-issue link with the bug report template filled from the live system.
pub async fn get_issue_url(State(state): State<AppState>) -> ApiResult<Json<IssueUrlResponse>> {
    let builder = DashboardBuilder::new(state.env.as_ref(), &state.settings, &state.runner);
    let url = builder.issue_url().await?;
    Ok(Json(IssueUrlResponse { url }))
}
