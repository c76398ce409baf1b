use std::sync::Arc;
use spacetrouble_core::{BookingStore, BookingValidator, DestinationCatalog, LaunchProvider};

#[derive(Clone)]
pub struct AppState {
    pub validator: BookingValidator,
    pub bookings: Arc<dyn BookingStore>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn DestinationCatalog>,
        provider: Arc<dyn LaunchProvider>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            validator: BookingValidator::new(catalog, provider, bookings.clone()),
            bookings,
        }
    }
}
