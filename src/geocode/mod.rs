//! Address geocoding via the Google Maps Geocoding API.

mod client;
mod resolve;

pub use client::GeocodeClient;
pub use resolve::resolve_coordinates;
