use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spacetrouble_core::{Booking, BookingFilter, BookingRequest, CollaboratorError, Gender, ValidationError};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 300;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Raw `POST /booking` body. Missing fields deserialize to empty values and
/// are reported by field validation instead of the JSON decoder.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookFlightPayload {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: String,
    pub launchpad_id: String,
    pub destination_id: i32,
    pub launch_date: String,
}

impl BookFlightPayload {
    pub fn into_request(self) -> Result<BookingRequest, AppError> {
        let launch_date = NaiveDate::parse_from_str(&self.launch_date, DATE_FORMAT).map_err(|e| {
            AppError::BadRequest(format!("Invalid launch date. Should be in format YYYY-MM-DD: {}", e))
        })?;
        let birthday = NaiveDate::parse_from_str(&self.birthday, DATE_FORMAT).map_err(|e| {
            AppError::BadRequest(format!("Invalid birthday date. Should be in format YYYY-MM-DD: {}", e))
        })?;
        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if self.first_name.is_empty() {
            return Err(AppError::BadRequest("field first_name can't be empty".to_string()));
        }
        if self.last_name.is_empty() {
            return Err(AppError::BadRequest("field last_name can't be empty".to_string()));
        }

        Ok(BookingRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            gender,
            birthday,
            launchpad_id: self.launchpad_id,
            destination_id: self.destination_id,
            launch_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub launch_date: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl ListBookingsQuery {
    pub fn into_filter(self) -> Result<BookingFilter, AppError> {
        let launch_date = self
            .launch_date
            .map(|raw| parse_launch_date(&raw))
            .transpose()?;

        let offset = match self.offset {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::BadRequest("offset should be an integer and be >=0".to_string())
            })?,
            None => 0,
        };

        let limit = match self.limit {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|limit| (1..=MAX_LIMIT).contains(limit))
                .ok_or_else(|| {
                    AppError::BadRequest("limit should be an integer and be > 0 and <= 300".to_string())
                })?,
            None => DEFAULT_LIMIT,
        };

        Ok(BookingFilter {
            launch_date,
            offset: Some(offset),
            limit: Some(limit),
        })
    }
}

pub(crate) fn parse_launch_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest("launch_date should be in format YYYY-MM-DD".to_string()))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BookingResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: i32,
    pub launch_date: NaiveDate,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            first_name: b.first_name,
            last_name: b.last_name,
            gender: b.gender,
            birthday: b.birthday,
            launchpad_id: b.launchpad_id,
            destination_id: b.destination_id,
            launch_date: b.launch_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingsResponse {
    pub bookings: Vec<BookingResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/booking", get(list_bookings).post(book_flight))
        .route("/booking/{id}", delete(delete_booking))
}

/// POST /booking
/// Validate the request against the launch schedule and persist it
pub async fn book_flight(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let payload: BookFlightPayload =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let request = payload.into_request()?;

    if let Err(err) = state.validator.validate(&request).await {
        if let ValidationError::Rejected(reason) = &err {
            info!("Booking rejected: {}", reason.reason);
        }
        return Err(err.into());
    }

    match state.bookings.create(&request.clone().into_new_booking()).await {
        Ok(()) => {}
        // Lost the race against a concurrent booking for another destination that day.
        Err(CollaboratorError::Constraint(detail)) => {
            warn!("Booking for {} rejected by storage: {}", request.launch_date, detail);
            return Err(AppError::BadRequest(
                "Flight can't be booked: the launch date is already taken by another destination".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    }

    info!(
        "Booked {} {} to destination {} from {} on {}",
        request.first_name, request.last_name, request.destination_id, request.launchpad_id, request.launch_date
    );
    Ok(StatusCode::CREATED)
}

/// GET /booking
/// List bookings, optionally for one launch date
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<BookingsResponse>, AppError> {
    let filter = query.into_filter()?;
    let bookings = state.bookings.find(&filter).await?;

    Ok(Json(BookingsResponse {
        bookings: bookings.into_iter().map(BookingResponse::from).collect(),
    }))
}

/// DELETE /booking/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = id
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("booking id should be an integer and >0".to_string()))?;

    if !state.bookings.exists_by_id(id).await? {
        return Err(AppError::BadRequest("booking doesn't exist".to_string()));
    }

    state.bookings.delete_by_id(id).await?;
    info!("Deleted booking {}", id);
    Ok(StatusCode::NO_CONTENT)
}
