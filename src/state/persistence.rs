use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::editor::{ColorMode, Editor};
use crate::command::{HistoryError, HistoryItem, HistoryLog};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::geometry::Dimensions;
use crate::layer::LayerId;

/// Format version written into every project file.
pub const PROJECT_VERSION: &str = "1.0";

const AUTOSAVE_PREFIX: &str = "autosave_";

/// Errors that can occur while saving or loading a project
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize project: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Project file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project file is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid project data: {0}")]
    InvalidState(String),

    #[error("Invalid project history: {0}")]
    History(#[from] HistoryError),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color_mode: ColorMode,
}

impl FileInfo {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// The on-disk project envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub version: String,
    #[serde(default)]
    pub source_image: Option<String>,
    pub history: Vec<HistoryItem>,
    pub current_history_index: usize,
    pub file_info: FileInfo,
}

/// Captures the whole session: every history entry plus the cursor.
pub fn save_project(editor: &Editor) -> ProjectFile {
    ProjectFile {
        version: PROJECT_VERSION.to_string(),
        source_image: editor.document().source_image.clone(),
        history: editor.history().items().to_vec(),
        current_history_index: editor.history().current_index(),
        file_info: editor.file_info().clone(),
    }
}

pub fn save_project_to_string(editor: &Editor) -> PersistenceResult<String> {
    Ok(serde_json::to_string_pretty(&save_project(editor))?)
}

pub fn save_project_to_file(editor: &Editor, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, save_project_to_string(editor)?)?;
    info!("Project saved to {}", path.display());
    Ok(())
}

/// Parses and validates a project envelope.
///
/// `version`, `history` and `currentHistoryIndex` must be present. A version
/// other than [`PROJECT_VERSION`] is logged and accepted.
pub fn load_project_from_str(json: &str) -> PersistenceResult<ProjectFile> {
    let value: Value = serde_json::from_str(json)?;
    let object = value
        .as_object()
        .ok_or_else(|| PersistenceError::InvalidState("expected a JSON object".to_string()))?;
    for field in ["version", "history", "currentHistoryIndex"] {
        if !object.contains_key(field) {
            return Err(PersistenceError::MissingField(field));
        }
    }

    let project: ProjectFile = serde_json::from_value(value)?;
    if project.version != PROJECT_VERSION {
        warn!(
            "Project version {} differs from current version {}",
            project.version, PROJECT_VERSION
        );
    }
    // validates non-empty history and the cursor
    HistoryLog::from_parts(project.history.clone(), project.current_history_index)?;
    Ok(project)
}

pub fn load_project_from_file(path: impl AsRef<Path>) -> PersistenceResult<ProjectFile> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    debug!("Read project file {}", path.display());
    load_project_from_str(&json)
}

fn restore_session(project: ProjectFile) -> PersistenceResult<(Document, HistoryLog, FileInfo)> {
    let history = HistoryLog::from_parts(project.history, project.current_history_index)?;
    let current = history.current();
    let mut document = Document::new(
        project.file_info.dimensions(),
        current.layers.clone(),
        current.state.clone(),
    );
    document.source_image = project.source_image;
    if document.layer(&LayerId::background()).is_ok() {
        let _ = document.select_layer(Some(LayerId::background()));
    }
    Ok((document, history, project.file_info))
}

impl Editor {
    /// Builds a session from a loaded project.
    pub fn from_project(project: ProjectFile, config: EditorConfig) -> PersistenceResult<Self> {
        let (document, history, file_info) = restore_session(project)?;
        Ok(Self::from_parts(document, history, file_info, config))
    }

    /// Replaces the open session with `project`.
    ///
    /// Everything is validated first; on error the open document is untouched.
    pub fn open_project(&mut self, project: ProjectFile) -> PersistenceResult<()> {
        let (document, history, file_info) = restore_session(project)?;
        info!(
            "Project '{}' opened at history {}/{}",
            file_info.name,
            history.current_index() + 1,
            history.len()
        );
        self.replace_session(document, history, file_info);
        Ok(())
    }
}

/// Periodic autosaves into a directory, keeping only the newest few.
#[derive(Debug, Clone)]
pub struct AutosaveManager {
    state_dir: PathBuf,
    max_autosaves: usize,
    autosave_interval: u64,
    last_autosave: Option<u64>,
    sequence: u32,
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

impl AutosaveManager {
    pub fn new(state_dir: impl Into<PathBuf>, config: &EditorConfig) -> Self {
        Self {
            state_dir: state_dir.into(),
            max_autosaves: config.max_autosaves.max(1),
            autosave_interval: config.autosave_interval_secs,
            last_autosave: None,
            sequence: 0,
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// True before the first autosave and once the interval has elapsed.
    pub fn should_autosave(&self) -> bool {
        match self.last_autosave {
            None => true,
            Some(last) => {
                let now = (timestamp_millis() / 1000) as u64;
                now.saturating_sub(last) >= self.autosave_interval
            }
        }
    }

    /// Autosaves if due. Returns the written file.
    pub fn try_autosave(&mut self, editor: &Editor) -> PersistenceResult<Option<PathBuf>> {
        if !self.should_autosave() {
            return Ok(None);
        }
        self.autosave_now(editor).map(Some)
    }

    pub fn autosave_now(&mut self, editor: &Editor) -> PersistenceResult<PathBuf> {
        let millis = timestamp_millis();
        let path = self.state_dir.join(format!(
            "{AUTOSAVE_PREFIX}{millis:016}_{:04}.json",
            self.sequence
        ));
        self.sequence = self.sequence.wrapping_add(1);

        save_project_to_file(editor, &path)?;
        self.last_autosave = Some((millis / 1000) as u64);
        self.cleanup_old_autosaves()?;
        Ok(path)
    }

    /// Autosave files, oldest first.
    fn autosaves(&self) -> PersistenceResult<Vec<PathBuf>> {
        if !self.state_dir.exists() {
            return Ok(Vec::new());
        }
        let mut files: Vec<PathBuf> = fs::read_dir(&self.state_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(AUTOSAVE_PREFIX)
            })
            .map(|entry| entry.path())
            .collect();
        // names embed a zero-padded timestamp, so lexical order is age order
        files.sort();
        Ok(files)
    }

    fn cleanup_old_autosaves(&self) -> PersistenceResult<()> {
        let files = self.autosaves()?;
        let excess = files.len().saturating_sub(self.max_autosaves);
        for old in &files[..excess] {
            debug!("Removing old autosave {}", old.display());
            fs::remove_file(old)?;
        }
        Ok(())
    }

    pub fn find_latest_autosave(&self) -> PersistenceResult<Option<PathBuf>> {
        Ok(self.autosaves()?.pop())
    }

    pub fn load_latest_autosave(&self) -> PersistenceResult<Option<ProjectFile>> {
        self.find_latest_autosave()?
            .map(load_project_from_file)
            .transpose()
    }
}
