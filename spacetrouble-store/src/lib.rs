pub mod app_config;
pub mod database;
pub mod booking_repo;
pub mod destination_repo;

pub use database::DbClient;
pub use booking_repo::StoreBookingRepository;
pub use destination_repo::StoreDestinationCatalog;
