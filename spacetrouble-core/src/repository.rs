use async_trait::async_trait;
use crate::models::{Booking, BookingFilter, BookingId, Destination, NewBooking};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a storage or upstream collaborator. Never shown to API callers.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("I/O failure: {0}")]
    Io(#[source] BoxError),
    #[error("upstream responded with status {status}")]
    Upstream { status: u16 },
    #[error("failed to decode upstream payload: {0}")]
    Decode(String),
    #[error("storage constraint violated: {0}")]
    Constraint(String),
}

impl CollaboratorError {
    pub fn io(err: impl Into<BoxError>) -> Self {
        CollaboratorError::Io(err.into())
    }
}

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Read access to the destination catalog
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    async fn list(&self) -> CollaboratorResult<Vec<Destination>>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings matching `filter`, ordered by id.
    async fn find(&self, filter: &BookingFilter) -> CollaboratorResult<Vec<Booking>>;

    async fn create(&self, booking: &NewBooking) -> CollaboratorResult<()>;

    async fn exists_by_id(&self, id: BookingId) -> CollaboratorResult<bool>;

    async fn delete_by_id(&self, id: BookingId) -> CollaboratorResult<()>;
}
