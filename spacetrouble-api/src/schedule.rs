use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bookings::parse_launch_date;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub launch_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub launch_date: NaiveDate,
    pub launchpads: BTreeMap<String, i32>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/schedule", get(get_schedule))
}

/// GET /schedule
/// Destination each launchpad serves on the given day
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let raw = query
        .launch_date
        .ok_or_else(|| AppError::BadRequest("launch_date is required".to_string()))?;
    let launch_date = parse_launch_date(&raw)?;

    let timetable = state.validator.timetable(launch_date).await?;

    Ok(Json(ScheduleResponse {
        launch_date: timetable.launch_date(),
        launchpads: timetable.assignments().clone(),
    }))
}
