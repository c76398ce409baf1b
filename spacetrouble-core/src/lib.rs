pub mod models;
pub mod repository;
pub mod provider;
pub mod timetable;
pub mod validator;
pub mod memory;

pub use models::{Booking, BookingFilter, BookingRequest, Destination, Gender, Launchpad, NewBooking, UpcomingLaunch};
pub use provider::LaunchProvider;
pub use repository::{BookingStore, CollaboratorError, DestinationCatalog};
pub use timetable::{Timetable, TimetableError};
pub use validator::{BookingValidator, ScheduleError, ValidationError};
