//! Application state shared by every request.
//!
//! Everything here is built once at startup. The user table and title are
//! immutable; the admission bucket carries its own lock.

use std::sync::Arc;
use std::time::Instant;

use smscode_core::admission::{AdmissionController, BucketConfig};
use smscode_core::auth::Authenticator;
use smscode_core::service::listing::ListingService;
use smscode_infra::sqlite::store::SqliteMessageStore;
use smscode_types::config::AppConfig;

/// Listing service pinned to the SQLite store.
pub type ConcreteListingService = ListingService<SqliteMessageStore>;

#[derive(Clone)]
pub struct AppState {
    pub admission: Arc<AdmissionController>,
    pub authenticator: Arc<Authenticator>,
    pub listing: Arc<ConcreteListingService>,
    /// Process-wide page title, used when a user has no override.
    pub app_title: Arc<str>,
}

impl AppState {
    /// Wire state with the default admission bucket (1 token/s, burst 5).
    pub fn new(config: &AppConfig, listing: ConcreteListingService) -> Self {
        Self::with_bucket(config, listing, BucketConfig::default())
    }

    pub fn with_bucket(
        config: &AppConfig,
        listing: ConcreteListingService,
        bucket: BucketConfig,
    ) -> Self {
        Self {
            admission: Arc::new(AdmissionController::new(bucket, Instant::now())),
            authenticator: Arc::new(Authenticator::new(config.user_table())),
            listing: Arc::new(listing),
            app_title: Arc::from(config.app_title.as_str()),
        }
    }
}
