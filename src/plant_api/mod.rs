//! Access to the plant data service: endpoint layout, wire models and the
//! reading sources the view controller can be driven by.

pub mod client;
pub mod endpoints;
pub mod mock;
pub mod models;

use std::future::Future;

pub use client::PlantApiClient;
pub use endpoints::{EndpointResolver, ResourceAddress};
pub use mock::MockReadingSource;
pub use models::{Reading, WindowSelector};

use crate::error::FetchError;

/// Something that can produce the readings stored at a resource address.
///
/// Implementations perform exactly one attempt per call and classify every
/// failure into a [`FetchError`]; retries are left to the caller.
pub trait ReadingSource: Send + Sync + 'static {
    fn fetch(
        &self,
        address: &ResourceAddress,
    ) -> impl Future<Output = Result<Vec<Reading>, FetchError>> + Send;
}
