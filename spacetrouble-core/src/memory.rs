//! In-memory collaborators, used for local runs and tests.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Booking, BookingFilter, BookingId, Destination, Launchpad, NewBooking, UpcomingLaunch};
use crate::provider::LaunchProvider;
use crate::repository::{BookingStore, CollaboratorResult, DestinationCatalog};

pub struct InMemoryDestinationCatalog {
    destinations: Vec<Destination>,
}

impl InMemoryDestinationCatalog {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }
}

#[async_trait]
impl DestinationCatalog for InMemoryDestinationCatalog {
    async fn list(&self) -> CollaboratorResult<Vec<Destination>> {
        Ok(self.destinations.clone())
    }
}

/// Booking store backed by a vector. Ids increase monotonically and are never
/// reused after a delete.
pub struct InMemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
    next_id: AtomicI32,
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::with_bookings(Vec::new())
    }
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        let next_id = bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            bookings: RwLock::new(bookings),
            next_id: AtomicI32::new(next_id),
        }
    }

    pub async fn snapshot(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn find(&self, filter: &BookingFilter) -> CollaboratorResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut matching: Vec<Booking> = bookings
            .iter()
            .filter(|b| filter.launch_date.map_or(true, |date| b.launch_date == date))
            .cloned()
            .collect();
        matching.sort_by_key(|b| b.id);

        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn create(&self, booking: &NewBooking) -> CollaboratorResult<()> {
        let mut bookings = self.bookings.write().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        bookings.push(Booking {
            id,
            first_name: booking.first_name.clone(),
            last_name: booking.last_name.clone(),
            gender: booking.gender,
            birthday: booking.birthday,
            launchpad_id: booking.launchpad_id.clone(),
            destination_id: booking.destination_id,
            launch_date: booking.launch_date,
        });
        Ok(())
    }

    async fn exists_by_id(&self, id: BookingId) -> CollaboratorResult<bool> {
        Ok(self.bookings.read().await.iter().any(|b| b.id == id))
    }

    async fn delete_by_id(&self, id: BookingId) -> CollaboratorResult<()> {
        self.bookings.write().await.retain(|b| b.id != id);
        Ok(())
    }
}

/// Launch provider answering from fixed lists.
pub struct StaticLaunchProvider {
    launchpads: Vec<Launchpad>,
    upcoming: Vec<UpcomingLaunch>,
}

impl StaticLaunchProvider {
    pub fn new(launchpads: Vec<Launchpad>, upcoming: Vec<UpcomingLaunch>) -> Self {
        Self { launchpads, upcoming }
    }
}

#[async_trait]
impl LaunchProvider for StaticLaunchProvider {
    async fn list_launchpads(&self) -> CollaboratorResult<Vec<Launchpad>> {
        Ok(self.launchpads.clone())
    }

    async fn list_upcoming_launches(&self) -> CollaboratorResult<Vec<UpcomingLaunch>> {
        Ok(self.upcoming.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::NaiveDate;

    fn new_booking(destination_id: i32, launch_date: NaiveDate) -> NewBooking {
        NewBooking {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            gender: Gender::Female,
            birthday: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            launchpad_id: "pad1".to_string(),
            destination_id,
            launch_date,
        }
    }

    #[tokio::test]
    async fn test_booking_store_lifecycle() {
        let store = InMemoryBookingStore::new();
        let day = NaiveDate::from_ymd_opt(2022, 10, 8).unwrap();
        let other_day = day.succ_opt().unwrap();

        store.create(&new_booking(3, day)).await.unwrap();
        store.create(&new_booking(4, other_day)).await.unwrap();
        store.create(&new_booking(3, day)).await.unwrap();

        let on_day = store.find(&BookingFilter::on_date(day)).await.unwrap();
        assert_eq!(on_day.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3]);

        let page = store
            .find(&BookingFilter { launch_date: None, offset: Some(1), limit: Some(1) })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 2);

        assert!(store.exists_by_id(2).await.unwrap());
        store.delete_by_id(2).await.unwrap();
        assert!(!store.exists_by_id(2).await.unwrap());
        assert_eq!(store.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let day = NaiveDate::from_ymd_opt(2022, 10, 8).unwrap();
        let store = InMemoryBookingStore::new();
        store.create(&new_booking(3, day)).await.unwrap();
        store.create(&new_booking(3, day)).await.unwrap();

        store.delete_by_id(2).await.unwrap();
        store.create(&new_booking(3, day)).await.unwrap();

        let ids: Vec<i32> = store.snapshot().await.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
