//! Submission persistence
//!
//! The scorer never touches storage: submissions are stored raw and
//! re-evaluated on every read. Two backends are provided:
//!
//! - [`FileStore`]: one pretty-printed JSON file per submission
//! - [`MemoryStore`]: in-process, for tests and embedding

use crate::models::{Question, Submission, SubmissionRequest};
use crate::validate::{validate, ValidationError};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a submission store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Submission {0} not found")]
    NotFound(u64),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt submission file {path}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the validate-then-store flow
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Common interface for submission stores
pub trait SubmissionStore: Send + Sync {
    /// Name of this store (for logging)
    fn name(&self) -> &str;

    /// Persist a request under a new id. Ids are never reused.
    fn create(&self, request: SubmissionRequest) -> StoreResult<Submission>;

    /// Fetch a submission; unknown ids are `StoreError::NotFound`
    fn get(&self, id: u64) -> StoreResult<Submission>;

    /// All submissions, ordered by id
    fn list(&self) -> StoreResult<Vec<Submission>>;
}

/// Validate a request, then persist it.
///
/// Nothing is written when validation fails.
pub fn submit(
    store: &dyn SubmissionStore,
    request: SubmissionRequest,
    questions: &[Question],
) -> Result<Submission, SubmitError> {
    validate(&request, questions)?;
    let submission = store.create(request)?;
    debug!("Stored submission {} in {}", submission.id, store.name());
    Ok(submission)
}

fn into_submission(id: u64, request: SubmissionRequest) -> Submission {
    Submission {
        id,
        answers: request.answers,
        email: request.email.filter(|e| !e.trim().is_empty()),
        user_info: request.user_info,
        created_at: Utc::now(),
    }
}

/// In-memory store
#[derive(Default)]
pub struct MemoryStore {
    submissions: Mutex<Vec<Submission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn create(&self, request: SubmissionRequest) -> StoreResult<Submission> {
        let mut subs = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        let id = subs.last().map_or(1, |s| s.id + 1);
        let submission = into_submission(id, request);
        subs.push(submission.clone());
        Ok(submission)
    }

    fn get(&self, id: u64) -> StoreResult<Submission> {
        let subs = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        subs.iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> StoreResult<Vec<Submission>> {
        let subs = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        Ok(subs.clone())
    }
}

/// Directory-backed store: `<dir>/<id>.json`
pub struct FileStore {
    dir: PathBuf,
    /// Serializes id allocation within this process
    alloc: Mutex<()>,
}

/// Attempts at claiming a fresh id before giving up
const MAX_CLAIM_ATTEMPTS: usize = 16;

impl FileStore {
    /// Open a store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            context: format!("Failed to create store directory {}", dir.display()),
            source,
        })?;
        Ok(Self {
            dir,
            alloc: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Ids of every stored submission, ascending
    fn ids(&self) -> StoreResult<Vec<u64>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            context: format!("Failed to read store directory {}", self.dir.display()),
            source,
        })?;

        let mut ids: Vec<u64> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .filter_map(|p| p.file_stem()?.to_str()?.parse().ok())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn read(&self, path: &Path) -> StoreResult<Submission> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            context: format!("Failed to read {}", path.display()),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SubmissionStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn create(&self, request: SubmissionRequest) -> StoreResult<Submission> {
        let _guard = self.alloc.lock().unwrap_or_else(|e| e.into_inner());
        let mut id = self.ids()?.last().map_or(1, |last| last + 1);
        let mut submission = into_submission(id, request);

        // create_new so a concurrent writer can never be overwritten
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let path = self.path_for(id);
            let json = serde_json::to_string_pretty(&submission).map_err(|source| {
                StoreError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?;
            match std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(mut file) => {
                    if let Err(source) = file.write_all(json.as_bytes()).and_then(|_| file.sync_all())
                    {
                        drop(file);
                        // remove the partial file
                        if let Err(e) = std::fs::remove_file(&path) {
                            warn!("Failed to remove partial {}: {}", path.display(), e);
                        }
                        return Err(StoreError::Io {
                            context: format!("Failed to write {}", path.display()),
                            source,
                        });
                    }
                    return Ok(submission);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    warn!("Submission id {} already taken, trying next", id);
                    id += 1;
                    submission.id = id;
                }
                Err(source) => {
                    return Err(StoreError::Io {
                        context: format!("Failed to create {}", path.display()),
                        source,
                    })
                }
            }
        }

        Err(StoreError::Io {
            context: format!("Could not claim a submission id in {}", self.dir.display()),
            source: std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        })
    }

    fn get(&self, id: u64) -> StoreResult<Submission> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }
        self.read(&path)
    }

    /// Unreadable JSON files are logged and skipped so one bad file cannot
    /// hide every other submission.
    fn list(&self) -> StoreResult<Vec<Submission>> {
        let mut submissions = Vec::new();
        for id in self.ids()? {
            match self.read(&self.path_for(id)) {
                Ok(submission) => submissions.push(submission),
                Err(StoreError::Corrupt { path, source }) => {
                    warn!("Skipping corrupt submission {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(submissions)
    }
}
