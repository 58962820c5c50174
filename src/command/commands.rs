use super::{CommandError, CommandResult};
use crate::document::Document;
use crate::edit_state::EditState;
use crate::id_generator::generate_layer_id;
use crate::layer::{Layer, LayerId, LayerPatch};
use crate::mask::Mask;

/// Discrete document actions that each produce exactly one history entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert a layer above the selection (or on top) and select it
    AddLayer { layer: Layer },

    DeleteLayer { layer_id: LayerId },

    /// Copy a layer under a fresh id, directly above the original
    DuplicateLayer { layer_id: LayerId },

    ReorderLayer { layer_id: LayerId, new_index: usize },

    RenameLayer { layer_id: LayerId, name: String },

    SetVisibility { layer_id: LayerId, visible: bool },

    SetLocked { layer_id: LayerId, locked: bool },

    SetLayerMask { layer_id: LayerId, mask: Option<Mask> },

    /// Replace the whole edit state with a saved preset
    ApplyPreset { name: String, state: Box<EditState> },

    /// Back to default adjustments; the active selection is kept
    ResetAllEdits,
}

impl Command {
    /// Label of the history entry this command records.
    pub fn history_name(&self) -> String {
        match self {
            Command::AddLayer { layer } => format!("Add {} Layer", layer.kind.label()),
            Command::DeleteLayer { .. } => "Delete Layer".to_string(),
            Command::DuplicateLayer { .. } => "Duplicate Layer".to_string(),
            Command::ReorderLayer { .. } => "Reorder Layers".to_string(),
            Command::RenameLayer { .. } => "Rename Layer".to_string(),
            Command::SetVisibility { visible: true, .. } => "Show Layer".to_string(),
            Command::SetVisibility { visible: false, .. } => "Hide Layer".to_string(),
            Command::SetLocked { locked: true, .. } => "Lock Layer".to_string(),
            Command::SetLocked { locked: false, .. } => "Unlock Layer".to_string(),
            Command::SetLayerMask { mask: Some(_), .. } => "Add Layer Mask".to_string(),
            Command::SetLayerMask { mask: None, .. } => "Remove Layer Mask".to_string(),
            Command::ApplyPreset { name, .. } => format!("Apply Preset: {name}"),
            Command::ResetAllEdits => "Reset All".to_string(),
        }
    }

    /// Applies the command to `document`. On error the document is unchanged.
    pub fn execute(&self, document: &mut Document) -> CommandResult {
        match self {
            Command::AddLayer { layer } => {
                let above = document.selected_layer_id().cloned();
                document.insert_layer(layer.clone(), above.as_ref())?;
                document.select_layer(Some(layer.id.clone()))?;
            }

            Command::DeleteLayer { layer_id } => {
                document.remove_layer(layer_id)?;
            }

            Command::DuplicateLayer { layer_id } => {
                let mut copy = document.layer(layer_id)?.clone();
                copy.id = generate_layer_id();
                copy.name = format!("{} copy", copy.name);
                let copy_id = copy.id.clone();
                document.insert_layer(copy, Some(layer_id))?;
                document.select_layer(Some(copy_id))?;
            }

            Command::ReorderLayer { layer_id, new_index } => {
                document.move_layer(layer_id, *new_index)?;
            }

            Command::RenameLayer { layer_id, name } => {
                if name.trim().is_empty() {
                    return Err(CommandError::InvalidParameters(
                        "layer name must not be empty".to_string(),
                    ));
                }
                document.update_layer(layer_id, &LayerPatch::name(name.trim()))?;
            }

            Command::SetVisibility { layer_id, visible } => {
                let patch = LayerPatch {
                    visible: Some(*visible),
                    ..LayerPatch::default()
                };
                document.update_layer(layer_id, &patch)?;
            }

            Command::SetLocked { layer_id, locked } => {
                let patch = LayerPatch {
                    is_locked: Some(*locked),
                    ..LayerPatch::default()
                };
                document.update_layer(layer_id, &patch)?;
            }

            Command::SetLayerMask { layer_id, mask } => {
                if let Some(mask) = mask {
                    if mask.dimensions() != document.dimensions() {
                        return Err(CommandError::InvalidParameters(format!(
                            "mask is {:?}, document is {:?}",
                            mask.dimensions(),
                            document.dimensions()
                        )));
                    }
                }
                let patch = LayerPatch {
                    mask: Some(mask.clone()),
                    ..LayerPatch::default()
                };
                document.update_layer(layer_id, &patch)?;
            }

            Command::ApplyPreset { state, .. } => {
                // masks belong to the image, not to the look
                let current = std::mem::replace(&mut document.edit_state, (**state).clone());
                document.edit_state.selection_mask = current.selection_mask;
                document.edit_state.selective_blur_mask = current.selective_blur_mask;
                document.edit_state.selective_sharpen_mask = current.selective_sharpen_mask;
            }

            Command::ResetAllEdits => {
                let selection = document.edit_state.selection_mask.take();
                document.edit_state = EditState::initial();
                document.edit_state.selection_mask = selection;
            }
        }
        Ok(())
    }
}
