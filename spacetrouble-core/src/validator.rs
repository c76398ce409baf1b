use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{Booking, BookingFilter, BookingRequest, Destination, DestinationId, UpcomingLaunch};
use crate::provider::LaunchProvider;
use crate::repository::{BookingStore, CollaboratorError, DestinationCatalog};
use crate::timetable::Timetable;

/// Business rejection; the reason is safe to show to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Flight can't be booked: {reason}")]
pub struct ScheduleError {
    pub reason: String,
}

impl ScheduleError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn destination_not_found(id: DestinationId) -> Self {
        Self::new(format!("Destination with ID {} not found", id))
    }

    fn launchpad_busy() -> Self {
        Self::new("SpaceX uses the launchpad on that day")
    }

    fn day_pinned_to(destination_id: DestinationId) -> Self {
        Self::new(format!(
            "On that day bookings only for destination {} are allowed",
            destination_id
        ))
    }

    fn launchpad_not_found(id: &str) -> Self {
        Self::new(format!("Requested launchpad with ID {:?} not found", id))
    }

    fn no_launches(destination_id: DestinationId, name: &str, launchpad_id: &str, date: NaiveDate) -> Self {
        Self::new(format!(
            "No launches available for destination {}({}) on launchpad {} on {}",
            destination_id,
            name,
            launchpad_id,
            date.format("%Y-%m-%d")
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Rejected(#[from] ScheduleError),
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Decides whether a booking request fits the day's launch schedule.
///
/// Every call fetches fresh snapshots from its collaborators; nothing is
/// cached between requests.
#[derive(Clone)]
pub struct BookingValidator {
    catalog: Arc<dyn DestinationCatalog>,
    provider: Arc<dyn LaunchProvider>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingValidator {
    pub fn new(
        catalog: Arc<dyn DestinationCatalog>,
        provider: Arc<dyn LaunchProvider>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        Self { catalog, provider, bookings }
    }

    /// Run the validation pipeline, stopping at the first failed stage.
    pub async fn validate(&self, request: &BookingRequest) -> Result<(), ValidationError> {
        // 1. Destination must exist in the catalog
        let destinations = destination_map(&self.catalog.list().await?);
        let destination_name = destinations
            .get(&request.destination_id)
            .ok_or_else(|| ScheduleError::destination_not_found(request.destination_id))?;

        // 2. Provider missions take the pad for the whole day
        let upcoming = self.provider.list_upcoming_launches().await?;
        if launchpad_busy(&upcoming, &request.launchpad_id, request.launch_date) {
            return Err(ScheduleError::launchpad_busy().into());
        }

        // 3. A day with bookings is pinned to their destination
        let same_day = self.bookings.find(&BookingFilter::on_date(request.launch_date)).await?;
        if let Some(existing) = same_day.iter().find(|b| b.destination_id != request.destination_id) {
            return Err(ScheduleError::day_pinned_to(existing.destination_id).into());
        }

        // 4. Launchpad must be known to the provider
        let launchpad_ids: Vec<String> = self
            .provider
            .list_launchpads()
            .await?
            .into_iter()
            .map(|pad| pad.id)
            .collect();
        if !launchpad_ids.iter().any(|id| *id == request.launchpad_id) {
            return Err(ScheduleError::launchpad_not_found(&request.launchpad_id).into());
        }

        // 5. Requested pair must match the day's timetable
        let scheduled = scheduled_destination(
            request.launch_date,
            &launchpad_ids,
            destinations.len(),
            &request.launchpad_id,
        )?;
        debug!(
            launchpad_id = %request.launchpad_id,
            launch_date = %request.launch_date,
            scheduled,
            "Computed timetable slot"
        );

        if scheduled != request.destination_id {
            if already_booked(&same_day, &request.launchpad_id, request.destination_id) {
                info!(
                    "Timetable assigns launchpad {} to {} on {}, accepting destination {} since it is already booked that day",
                    request.launchpad_id, scheduled, request.launch_date, request.destination_id
                );
            } else {
                return Err(ScheduleError::no_launches(
                    request.destination_id,
                    destination_name,
                    &request.launchpad_id,
                    request.launch_date,
                )
                .into());
            }
        }

        Ok(())
    }

    /// Timetable for `launch_date` over the current catalog and launchpads.
    pub async fn timetable(&self, launch_date: NaiveDate) -> Result<Timetable, ValidationError> {
        let destination_count = self.catalog.list().await?.len();
        let launchpads = self.provider.list_launchpads().await?;
        Timetable::compute(launch_date, launchpads.iter().map(|pad| pad.id.as_str()), destination_count)
            .map_err(|err| ScheduleError::new(err.to_string()).into())
    }
}

pub fn destination_map(destinations: &[Destination]) -> HashMap<DestinationId, String> {
    destinations
        .iter()
        .map(|d| (d.id, d.name.clone()))
        .collect()
}

/// True when the provider already launches from `launchpad_id` on `date` (UTC).
pub fn launchpad_busy(upcoming: &[UpcomingLaunch], launchpad_id: &str, date: NaiveDate) -> bool {
    upcoming.iter().any(|launch| launch.occupies(launchpad_id, date))
}

/// Destination the timetable assigns to `launchpad_id` on `launch_date`.
fn scheduled_destination(
    launch_date: NaiveDate,
    launchpad_ids: &[String],
    destination_count: usize,
    launchpad_id: &str,
) -> Result<DestinationId, ScheduleError> {
    Timetable::compute(launch_date, launchpad_ids, destination_count)
        .and_then(|timetable| timetable.destination_for(launchpad_id))
        .map_err(|err| ScheduleError::new(err.to_string()))
}

// Exemption requires both the launchpad and the destination to match.
fn already_booked(same_day: &[Booking], launchpad_id: &str, destination_id: DestinationId) -> bool {
    same_day
        .iter()
        .any(|b| b.launchpad_id == launchpad_id && b.destination_id == destination_id)
}
