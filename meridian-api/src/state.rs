use meridian_exam::{AccountDirectory, ExamAttempt, ExamCatalog};
use meridian_reservation::ReservationStore;
use meridian_store::SnapshotStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

/// A live attempt plus the handle of its one-second ticker task. The handle
/// is aborted on manual submission so no orphaned tickers survive.
pub struct AttemptEntry {
    pub attempt: ExamAttempt,
    pub ticker: Option<JoinHandle<()>>,
}

/// Mutable exam-app state: accounts, the exam/result catalog and any live
/// attempts. Mutations are mirrored to the snapshot store best-effort.
///
/// `attempts` holds in-progress attempts only: entries are removed as soon
/// as the attempt is submitted and its result recorded, so the map does not
/// grow with finished attempts.
pub struct ExamAppState {
    pub directory: AccountDirectory,
    pub catalog: ExamCatalog,
    pub attempts: HashMap<Uuid, AttemptEntry>,
}

impl ExamAppState {
    pub fn new(directory: AccountDirectory, catalog: ExamCatalog) -> Self {
        Self {
            directory,
            catalog,
            attempts: HashMap::new(),
        }
    }

    // Snapshot writes are synchronous best-effort: failures are logged and
    // never surfaced to the client.

    pub fn persist_accounts(&self, snapshot: &dyn SnapshotStore) {
        if let Err(e) = snapshot.save_users(self.directory.accounts()) {
            tracing::warn!("failed to persist user accounts: {}", e);
        }
    }

    pub fn persist_exams(&self, snapshot: &dyn SnapshotStore) {
        if let Err(e) = snapshot.save_exams(self.catalog.exams()) {
            tracing::warn!("failed to persist exams: {}", e);
        }
    }

    pub fn persist_results(&self, snapshot: &dyn SnapshotStore) {
        if let Err(e) = snapshot.save_results(self.catalog.results()) {
            tracing::warn!("failed to persist results: {}", e);
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<RwLock<ReservationStore>>,
    pub exam: Arc<RwLock<ExamAppState>>,
    pub snapshot: Arc<dyn SnapshotStore>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(
        reservations: ReservationStore,
        exam: ExamAppState,
        snapshot: Arc<dyn SnapshotStore>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            reservations: Arc::new(RwLock::new(reservations)),
            exam: Arc::new(RwLock::new(exam)),
            snapshot,
            auth,
        }
    }
}
