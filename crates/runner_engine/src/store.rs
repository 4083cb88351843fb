use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use runner_core::{
    dataset_filename, find_run, latest_run, run_result_filename, RunDescriptor, RUN_LOG_FILENAME,
};
use runner_logging::{runner_debug, runner_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::persist::{AtomicFileWriter, PersistError};

/// A pretty-printed JSON list on disk that only ever grows.
#[derive(Debug, Clone)]
pub struct JsonListFile {
    path: PathBuf,
}

impl JsonListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries. A missing file is an empty list; a bare object is a
    /// list of one, which is what earlier tooling wrote on first launch.
    pub fn read(&self) -> Result<Vec<Value>, PersistError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(PersistError::Io(err)),
        };

        let value: Value = serde_json::from_str(&content).map_err(|err| self.corrupt(err))?;
        match value {
            Value::Array(entries) => Ok(entries),
            Value::Object(_) => {
                runner_warn!(
                    "{} holds a single object; reading it as a one-entry list",
                    self.path.display()
                );
                Ok(vec![value])
            }
            other => Err(self.corrupt(format!("found {}", kind_of(&other)))),
        }
    }

    pub fn read_as<T: DeserializeOwned>(&self) -> Result<Vec<T>, PersistError> {
        self.read()?
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| {
                serde_json::from_value(entry).map_err(|err| self.corrupt(format!("entry {idx}: {err}")))
            })
            .collect()
    }

    /// Read, extend, and atomically rewrite the whole list. Returns the new
    /// length. Appending nothing still creates the file as `[]`.
    pub fn append<T: Serialize>(&self, items: &[T]) -> Result<usize, PersistError> {
        let mut entries = self.read()?;
        for item in items {
            entries.push(serde_json::to_value(item)?);
        }

        let mut content = serde_json::to_string_pretty(&entries)?;
        content.push('\n');

        let (dir, filename) = self.split_path()?;
        AtomicFileWriter::new(dir).write(&filename, &content)?;
        runner_debug!(
            "Appended {} entries to {} ({} total)",
            items.len(),
            self.path.display(),
            entries.len()
        );
        Ok(entries.len())
    }

    fn split_path(&self) -> Result<(PathBuf, String), PersistError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PersistError::OutputDir(format!("{} has no file name", self.path.display())))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((dir, filename.to_string()))
    }

    fn corrupt(&self, message: impl ToString) -> PersistError {
        PersistError::Corrupt {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// The data directory: the run log plus per-run dataset and run-result files.
#[derive(Debug, Clone)]
pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn run_log(&self) -> JsonListFile {
        JsonListFile::new(self.dir.join(RUN_LOG_FILENAME))
    }

    pub fn dataset_file(&self, run_id: &str) -> Result<JsonListFile, PersistError> {
        dataset_filename(run_id)
            .map(|name| JsonListFile::new(self.dir.join(name)))
            .ok_or_else(|| PersistError::InvalidRunId(run_id.to_string()))
    }

    pub fn run_result_file(&self, run_id: &str) -> Result<JsonListFile, PersistError> {
        run_result_filename(run_id)
            .map(|name| JsonListFile::new(self.dir.join(name)))
            .ok_or_else(|| PersistError::InvalidRunId(run_id.to_string()))
    }

    pub fn runs(&self) -> Result<Vec<RunDescriptor>, PersistError> {
        self.run_log().read_as()
    }

    /// Append a launched run to the run log; returns the log length.
    pub fn record_run(&self, run: &RunDescriptor) -> Result<usize, PersistError> {
        self.run_log().append(std::slice::from_ref(run))
    }

    pub fn latest_run(&self) -> Result<RunDescriptor, PersistError> {
        let runs = self.runs()?;
        latest_run(&runs)
            .cloned()
            .ok_or_else(|| PersistError::EmptyRunLog(self.run_log().path().to_path_buf()))
    }

    /// The run named by `run_id`, or the latest one when `None`.
    pub fn resolve_run(&self, run_id: Option<&str>) -> Result<RunDescriptor, PersistError> {
        let Some(run_id) = run_id else {
            return self.latest_run();
        };
        let runs = self.runs()?;
        find_run(&runs, run_id)
            .cloned()
            .ok_or_else(|| PersistError::UnknownRun(run_id.to_string()))
    }
}
