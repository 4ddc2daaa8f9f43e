// campusgate-api: Async Rust client for the campusgate web-filtering service.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
