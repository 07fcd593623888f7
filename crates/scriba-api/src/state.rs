//! Application state.
//!
//! Everything handlers need is constructed once at startup in
//! `setup::services` and injected here; there is no global mutable state.
//! The pool closes when the last `AppState` clone is dropped at shutdown.

use crate::services::pipeline::UploadPipeline;
use crate::storage::UploadVault;
use scriba_core::Config;
use scriba_db::UploadRepository;
use sqlx::PgPool;

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub uploads: UploadRepository,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub vault: UploadVault,
    pub pipeline: UploadPipeline,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
