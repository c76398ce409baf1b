//! Launch provider gateway backed by the public SpaceX API.

pub mod client;
mod dto;

pub use client::{SpacexClient, DEFAULT_BASE_URL};
