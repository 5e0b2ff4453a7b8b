use meridian_exam::models::{Exam, ExamResult, UserAccount};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed keys for the three independently persisted blobs.
const USERS_KEY: &str = "users";
const EXAMS_KEY: &str = "exams";
const RESULTS_KEY: &str = "results";

/// Durable key/value persistence for the exam app.
///
/// Each key holds one JSON-serialized list, written whole on every mutation.
/// Last writer wins; there is no versioning or migration, so a schema change
/// requires clearing the stored data.
pub trait SnapshotStore: Send + Sync {
    fn load_users(&self) -> Result<Vec<UserAccount>, SnapshotError>;
    fn save_users(&self, users: &[UserAccount]) -> Result<(), SnapshotError>;

    fn load_exams(&self) -> Result<Vec<Exam>, SnapshotError>;
    fn save_exams(&self, exams: &[Exam]) -> Result<(), SnapshotError>;

    fn load_results(&self) -> Result<Vec<ExamResult>, SnapshotError>;
    fn save_results(&self, results: &[ExamResult]) -> Result<(), SnapshotError>;
}

/// One JSON file per key under a data directory.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, SnapshotError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string_pretty(items)?;
        fs::write(self.path_for(key), raw)?;
        tracing::debug!(key, "snapshot written");
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_users(&self) -> Result<Vec<UserAccount>, SnapshotError> {
        self.load(USERS_KEY)
    }

    fn save_users(&self, users: &[UserAccount]) -> Result<(), SnapshotError> {
        self.save(USERS_KEY, users)
    }

    fn load_exams(&self) -> Result<Vec<Exam>, SnapshotError> {
        self.load(EXAMS_KEY)
    }

    fn save_exams(&self, exams: &[Exam]) -> Result<(), SnapshotError> {
        self.save(EXAMS_KEY, exams)
    }

    fn load_results(&self) -> Result<Vec<ExamResult>, SnapshotError> {
        self.load(RESULTS_KEY)
    }

    fn save_results(&self, results: &[ExamResult]) -> Result<(), SnapshotError> {
        self.save(RESULTS_KEY, results)
    }
}

/// In-memory store for tests; serializes through the same JSON layout.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, SnapshotError> {
        let blobs = self.blobs.lock().map_err(|_| SnapshotError::Poisoned)?;
        match blobs.get(key) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(items)?;
        let mut blobs = self.blobs.lock().map_err(|_| SnapshotError::Poisoned)?;
        blobs.insert(key.to_string(), raw);
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    fn load_users(&self) -> Result<Vec<UserAccount>, SnapshotError> {
        self.load(USERS_KEY)
    }

    fn save_users(&self, users: &[UserAccount]) -> Result<(), SnapshotError> {
        self.save(USERS_KEY, users)
    }

    fn load_exams(&self) -> Result<Vec<Exam>, SnapshotError> {
        self.load(EXAMS_KEY)
    }

    fn save_exams(&self, exams: &[Exam]) -> Result<(), SnapshotError> {
        self.save(EXAMS_KEY, exams)
    }

    fn load_results(&self) -> Result<Vec<ExamResult>, SnapshotError> {
        self.load(RESULTS_KEY)
    }

    fn save_results(&self, results: &[ExamResult]) -> Result<(), SnapshotError> {
        self.save(RESULTS_KEY, results)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Snapshot store lock poisoned")]
    Poisoned,
}
