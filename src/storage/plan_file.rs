use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::domain::PlanSnapshot;

/// A one-way sink for persisting plan edits upstream.
///
/// The planner never calls a sink itself. The shell driving the planner
/// decides when to persist, and a failed write leaves the in-memory session
/// as it is.
pub trait PlanSink {
    /// The error returned when persisting fails.
    type Error;

    /// Persists the whole plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan could not be persisted.
    fn update_plan(&mut self, snapshot: &PlanSnapshot) -> Result<(), Self::Error>;

    /// Persists an edit to one of the plan's majors.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit could not be persisted.
    fn update_major(&mut self, index: usize, major: &str) -> Result<(), Self::Error>;
}

/// A plan snapshot stored as a YAML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFile {
    path: PathBuf,
}

impl PlanFile {
    /// Creates a handle for the plan file at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The location of the plan file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the file does not exist, or another
    /// [`LoadError`] if it cannot be read or parsed.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<PlanSnapshot, LoadError> {
        let file = File::open(&self.path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(self.path.clone()),
            _ => LoadError::Io(io_error),
        })?;

        let snapshot: PlanSnapshot = serde_yaml::from_reader(BufReader::new(file))?;
        debug!(semesters = snapshot.semesters.len(), "loaded plan");
        Ok(snapshot)
    }

    /// Writes the snapshot to disk, stamping it with the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`SaveError`] if the snapshot cannot be serialized or the
    /// file cannot be written.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, snapshot: &PlanSnapshot) -> Result<(), SaveError> {
        let stamped = PlanSnapshot {
            updated: Some(Utc::now()),
            ..snapshot.clone()
        };

        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_yaml::to_writer(&mut writer, &stamped)?;
        writer.flush()?;
        Ok(())
    }
}

impl PlanSink for PlanFile {
    type Error = SinkError;

    fn update_plan(&mut self, snapshot: &PlanSnapshot) -> Result<(), Self::Error> {
        Ok(self.save(snapshot)?)
    }

    fn update_major(&mut self, index: usize, major: &str) -> Result<(), Self::Error> {
        let mut snapshot = self.load()?;
        let slot = snapshot
            .majors
            .get_mut(index)
            .ok_or(SinkError::UnknownMajor(index))?;
        major.clone_into(slot);
        Ok(self.save(&snapshot)?)
    }
}

/// Errors that can occur when reading a plan or catalog file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// An I/O error occurred.
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),
    /// The plan file is not a valid snapshot.
    #[error("invalid plan file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The catalog file is not a valid catalog.
    #[error("invalid catalog file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when writing a plan file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// An I/O error occurred.
    #[error("failed to write plan file: {0}")]
    Io(#[from] io::Error),
    /// The snapshot could not be serialized.
    #[error("failed to serialize plan: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors returned by the file-backed [`PlanSink`].
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The current plan could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The updated plan could not be written.
    #[error(transparent)]
    Save(#[from] SaveError),
    /// The plan has no major at this position.
    #[error("no major at position {0}")]
    UnknownMajor(usize),
}
