pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::{JobApi, WorldApi};
pub use client::HeadlessClient;
pub use error::RemoteError;
