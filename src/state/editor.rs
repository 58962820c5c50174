use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use super::persistence::FileInfo;
use crate::color::Rgb;
use crate::command::{Command, HistoryItem, HistoryLog};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::edit_state::EditState;
use crate::error::{EditorResult, Outcome};
use crate::event::{EditorEvent, EventBus, EventHandler, Notification, NotificationLevel};
use crate::geometry::{normalize_degrees, Dimensions};
use crate::layer::{factory, LayerId, LayerPatch};
use crate::tools::ToolType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Rgb,
    Cmyk,
    Grayscale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectSettings {
    pub width: u32,
    pub height: u32,
    pub background_color: Rgb,
    pub color_mode: ColorMode,
    #[serde(default = "NewProjectSettings::default_name")]
    pub name: String,
}

impl NewProjectSettings {
    fn default_name() -> String {
        "Untitled".to_string()
    }

    pub fn new(width: u32, height: u32, background_color: Rgb) -> Self {
        Self {
            width,
            height,
            background_color,
            color_mode: ColorMode::Rgb,
            name: Self::default_name(),
        }
    }
}

/// The editing session of one open document.
///
/// Owns the document and its history log; created when a document is opened
/// and dropped when it is closed. Every durable change goes through
/// [`Editor::record_history`]; setters that skip it are live previews.
#[derive(Debug)]
pub struct Editor {
    pub(crate) document: Document,
    pub(crate) history: HistoryLog,
    config: EditorConfig,
    active_tool: ToolType,
    event_bus: EventBus,
    file_info: FileInfo,
}

impl Editor {
    /// A blank document with a locked, filled background layer.
    pub fn new_project(settings: &NewProjectSettings, config: EditorConfig) -> Self {
        let (document, file_info) = Self::blank_document(settings);
        let history = HistoryLog::new(HistoryItem::new(
            "New Project Created",
            &document.edit_state,
            document.layers(),
        ));
        info!(
            "New project '{}' {}x{}",
            file_info.name, file_info.width, file_info.height
        );
        Self {
            document,
            history,
            config,
            active_tool: ToolType::default(),
            event_bus: EventBus::new(),
            file_info,
        }
    }

    /// A document whose locked background layer is the decoded image `source`.
    pub fn open_image(
        name: impl Into<String>,
        source: impl Into<String>,
        dimensions: Dimensions,
        config: EditorConfig,
    ) -> Self {
        let (document, file_info) = Self::image_document(name.into(), source.into(), dimensions);
        let history = HistoryLog::new(HistoryItem::new(
            "Image Loaded",
            &document.edit_state,
            document.layers(),
        ));
        info!(
            "Image '{}' loaded {}x{}",
            file_info.name, dimensions.width, dimensions.height
        );
        Self {
            document,
            history,
            config,
            active_tool: ToolType::default(),
            event_bus: EventBus::new(),
            file_info,
        }
    }

    pub(crate) fn from_parts(
        document: Document,
        history: HistoryLog,
        file_info: FileInfo,
        config: EditorConfig,
    ) -> Self {
        Self {
            document,
            history,
            config,
            active_tool: ToolType::default(),
            event_bus: EventBus::new(),
            file_info,
        }
    }

    fn blank_document(settings: &NewProjectSettings) -> (Document, FileInfo) {
        let dimensions = Dimensions::new(settings.width, settings.height);
        let mut document = Document::new(
            dimensions,
            vec![factory::create_background(settings.background_color)],
            EditState::initial(),
        );
        // the background always exists at this point
        let _ = document.select_layer(Some(LayerId::background()));
        let file_info = FileInfo {
            name: settings.name.clone(),
            width: settings.width,
            height: settings.height,
            color_mode: settings.color_mode,
        };
        (document, file_info)
    }

    fn image_document(name: String, source: String, dimensions: Dimensions) -> (Document, FileInfo) {
        let mut document = Document::new(
            dimensions,
            vec![factory::create_image_background(source.clone(), dimensions)],
            EditState::initial(),
        );
        document.source_image = Some(source);
        let _ = document.select_layer(Some(LayerId::background()));
        let file_info = FileInfo {
            name,
            width: dimensions.width,
            height: dimensions.height,
            color_mode: ColorMode::Rgb,
        };
        (document, file_info)
    }

    /// Replaces the open document with a blank project, resetting history.
    pub fn start_new_project(&mut self, settings: &NewProjectSettings) {
        let (document, file_info) = Self::blank_document(settings);
        self.replace_document(document, file_info, "New Project Created");
    }

    /// Replaces the open document with a decoded image, resetting history.
    pub fn load_image(&mut self, name: impl Into<String>, source: impl Into<String>, dimensions: Dimensions) {
        let (document, file_info) = Self::image_document(name.into(), source.into(), dimensions);
        self.replace_document(document, file_info, "Image Loaded");
    }

    fn replace_document(&mut self, document: Document, file_info: FileInfo, entry: &str) {
        self.history = HistoryLog::new(HistoryItem::new(entry, &document.edit_state, document.layers()));
        self.document = document;
        self.file_info = file_info;
        info!("Document replaced: {entry}");
        self.event_bus.emit(EditorEvent::DocumentReplaced);
    }

    pub(crate) fn replace_session(&mut self, document: Document, history: HistoryLog, file_info: FileInfo) {
        self.document = document;
        self.history = history;
        self.file_info = file_info;
        self.event_bus.emit(EditorEvent::DocumentReplaced);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn edit_state(&self) -> &EditState {
        &self.document.edit_state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn file_info(&self) -> &FileInfo {
        &self.file_info
    }

    pub fn active_tool(&self) -> ToolType {
        self.active_tool
    }

    pub fn set_active_tool(&mut self, tool: ToolType) {
        info!("Active tool: {}", tool.name());
        self.active_tool = tool;
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn unsubscribe_all(&self) {
        self.event_bus.clear();
    }

    pub(crate) fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }

    /// Snapshots the current edit state and layers as a new history entry.
    ///
    /// This is the only way a change becomes undoable.
    pub fn record_history(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.history
            .record(name.clone(), &self.document.edit_state, self.document.layers());
        self.event_bus.emit(EditorEvent::HistoryRecorded {
            name,
            index: self.history.current_index(),
            len: self.history.len(),
        });
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.rehydrate();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.rehydrate();
        }
        moved
    }

    /// Moves to a history entry (history panel click). The index is clamped.
    pub fn jump_to(&mut self, index: usize) -> usize {
        let index = self.history.jump(index);
        self.rehydrate();
        index
    }

    /// Makes the entry at the cursor the document's current truth.
    fn rehydrate(&mut self) {
        let item = self.history.current();
        self.document.restore(item.state.clone(), item.layers.clone());
        self.event_bus.emit(EditorEvent::HistoryMoved {
            index: self.history.current_index(),
        });
    }

    /// Runs a discrete command and records it. Nothing is recorded on error.
    pub fn execute(&mut self, command: Command) -> EditorResult<()> {
        let name = command.history_name();
        command.execute(&mut self.document)?;
        self.event_bus.emit(EditorEvent::LayersChanged);
        self.record_history(name);
        Ok(())
    }

    pub fn select_layer(&mut self, id: Option<LayerId>) -> EditorResult<()> {
        self.document.select_layer(id.clone())?;
        self.event_bus.emit(EditorEvent::SelectionChanged { selected_layer: id });
        Ok(())
    }

    /// Live layer update; pair with [`Editor::commit_layer_update`].
    ///
    /// Opacity, size, rotation and vector points are clamped before they
    /// reach the document.
    pub fn update_layer(&mut self, id: &LayerId, patch: &LayerPatch) -> EditorResult<()> {
        let patch = self.clamped_patch(patch);
        self.document.update_layer(id, &patch)?;
        self.event_bus.emit(EditorEvent::LayersChanged);
        Ok(())
    }

    fn clamped_patch(&self, patch: &LayerPatch) -> LayerPatch {
        let min_size = self.config.min_layer_size_percent;
        let mut patch = patch.clone();
        if let Some(opacity) = patch.opacity.as_mut() {
            *opacity = opacity.clamp(0.0, 100.0);
        }
        if let Some(geometry) = patch.geometry.as_mut() {
            geometry.width = geometry.width.max(min_size);
            geometry.height = geometry.height.max(min_size);
            geometry.rotation = normalize_degrees(geometry.rotation);
        }
        if let Some(points) = patch.points.as_mut() {
            for point in points.iter_mut() {
                *point = point.clamped();
            }
        }
        patch
    }

    pub fn commit_layer_update(&mut self, name: impl Into<String>) {
        self.record_history(name);
    }

    /// Live opacity change, clamped to 0–100.
    pub fn set_layer_opacity(&mut self, id: &LayerId, opacity: f32) -> EditorResult<()> {
        self.update_layer(id, &LayerPatch::opacity(opacity))
    }

    pub fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!("{}", notification.message),
            NotificationLevel::Warning => warn!("{}", notification.message),
            NotificationLevel::Error => error!("{}", notification.message),
        }
        self.event_bus.emit(EditorEvent::Notification(notification));
    }

    /// Reports rejected user input. Nothing changes.
    pub(crate) fn reject(&self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.notify(Notification::warning(message.clone()));
        Outcome::Rejected(message)
    }

    /// Reports an external-service failure. Nothing changes.
    pub(crate) fn fail(&self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.notify(Notification::error(message.clone()));
        Outcome::Failed(message)
    }
}
