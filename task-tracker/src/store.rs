use crate::task::{Status, Task};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Task not found (ID: {0})")]
    TaskNotFound(u32),
    #[error("cannot access task file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("task file {} is not valid JSON: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot serialize tasks: {source}")]
    Serialize { source: serde_json::Error },
}

/// Durable CRUD over the task collection, backed by a single JSON file.
///
/// Every operation loads the whole collection from the file and, if it
/// mutates anything, writes the whole collection back. The store holds no
/// state besides its path, so two instances pointed at the same file see
/// each other's writes.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    strict: bool,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strict: false,
        }
    }

    /// Makes a malformed task file a hard error instead of a logged warning.
    ///
    /// By default a file that exists but cannot be parsed is discarded: the
    /// store warns and starts from an empty collection, so the next save
    /// overwrites whatever was there. That keeps the tool usable but loses
    /// the old contents; opt in here to fail loudly instead.
    pub fn with_strict_parsing(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full collection from the backing file.
    ///
    /// A missing, empty, whitespace-only, or `[]` file yields an empty
    /// collection. Unreadable or unparseable contents also yield an empty
    /// collection with a warning, unless strict parsing is enabled (see
    /// [`TaskStore::with_strict_parsing`]).
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %source,
                    "cannot read task file, starting from an empty list"
                );
                return Ok(Vec::new());
            }
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&contents) {
            Ok(tasks) => Ok(tasks),
            Err(source) if self.strict => Err(StoreError::Malformed {
                path: self.path.clone(),
                source,
            }),
            Err(source) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %source,
                    "task file is not valid JSON, starting from an empty list"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Serializes the full collection and replaces the backing file.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write leaves the previous contents intact.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)
            .map_err(|source| StoreError::Serialize { source })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Appends a new `todo` task and returns its assigned id.
    ///
    /// Ids grow monotonically: one past the highest id currently stored,
    /// starting at 1. Deleted ids are never reused.
    #[tracing::instrument(skip(self))]
    pub fn add(&self, description: &str) -> Result<u32, StoreError> {
        let mut tasks = self.load()?;
        let id = tasks.iter().map(Task::id).max().unwrap_or(0) + 1;
        tasks.push(Task::new(id, description));
        self.save(&tasks)?;
        Ok(id)
    }

    /// Replaces the description of the task with the given id and refreshes
    /// its `updated_at`. Nothing is written when the id is unknown.
    #[tracing::instrument(skip(self))]
    pub fn update(&self, id: u32, description: &str) -> Result<(), StoreError> {
        let mut tasks = self.load()?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.set_description(description);
        task.touch();
        self.save(&tasks)
    }

    /// Removes the task with the given id. Nothing is written when the id is
    /// unknown.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: u32) -> Result<(), StoreError> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == before {
            return Err(StoreError::TaskNotFound(id));
        }
        self.save(&tasks)
    }

    /// Moves the task with the given id to `status` and refreshes its
    /// `updated_at`. Nothing is written when the id is unknown.
    #[tracing::instrument(skip(self))]
    pub fn mark(&self, id: u32, status: Status) -> Result<(), StoreError> {
        let mut tasks = self.load()?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.set_status(status);
        task.touch();
        self.save(&tasks)
    }

    /// Returns tasks in stored order, optionally restricted to one status.
    /// Never writes.
    pub fn list(&self, filter: Option<Status>) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.load()?;
        if let Some(status) = filter {
            tasks.retain(|task| task.status() == status);
        }
        Ok(tasks)
    }
}
