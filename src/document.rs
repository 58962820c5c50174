use log::debug;
use thiserror::Error;

use crate::edit_state::EditState;
use crate::geometry::Dimensions;
use crate::layer::{Layer, LayerId, LayerPatch};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayerError {
    #[error("Layer not found: {0}")]
    NotFound(LayerId),

    #[error("Layer id already in use: {0}")]
    DuplicateId(LayerId),

    #[error("Layer {0} is locked")]
    Locked(LayerId),

    #[error("Cannot delete the last layer")]
    LastLayer,

    #[error("Layer index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type LayerResult<T> = Result<T, LayerError>;

/// The open document: the ordered layer stack (index 0 at the bottom) plus
/// the global edit state.
///
/// The document owns every layer; a layer removed from the stack is gone,
/// including from `selected_layer_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    dimensions: Dimensions,
    layers: Vec<Layer>,
    selected_layer_id: Option<LayerId>,
    pub edit_state: EditState,
    /// Reference to the decoded source image, if the document was opened from one.
    pub source_image: Option<String>,
}

impl Document {
    pub fn new(dimensions: Dimensions, layers: Vec<Layer>, edit_state: EditState) -> Self {
        Self {
            dimensions,
            layers,
            selected_layer_id: None,
            edit_state,
            source_image: None,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: &LayerId) -> LayerResult<&Layer> {
        self.layers
            .iter()
            .find(|l| &l.id == id)
            .ok_or_else(|| LayerError::NotFound(id.clone()))
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> LayerResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| LayerError::NotFound(id.clone()))
    }

    pub fn index_of(&self, id: &LayerId) -> LayerResult<usize> {
        self.layers
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| LayerError::NotFound(id.clone()))
    }

    pub fn selected_layer_id(&self) -> Option<&LayerId> {
        self.selected_layer_id.as_ref()
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected_layer_id.as_ref().and_then(|id| self.layer(id).ok())
    }

    pub fn select_layer(&mut self, id: Option<LayerId>) -> LayerResult<()> {
        if let Some(id) = &id {
            self.index_of(id)?;
        }
        self.selected_layer_id = id;
        Ok(())
    }

    /// Inserts `layer` directly above `above`, or on top of the stack.
    pub fn insert_layer(&mut self, layer: Layer, above: Option<&LayerId>) -> LayerResult<usize> {
        if self.layers.iter().any(|l| l.id == layer.id) {
            return Err(LayerError::DuplicateId(layer.id));
        }
        let index = match above {
            Some(id) => self.index_of(id)? + 1,
            None => self.layers.len(),
        };
        debug!("Inserting layer {} at index {}", layer.id, index);
        self.layers.insert(index, layer);
        Ok(index)
    }

    /// Removes a layer and every reference to it.
    pub fn remove_layer(&mut self, id: &LayerId) -> LayerResult<Layer> {
        let index = self.index_of(id)?;
        if self.layers.len() == 1 {
            return Err(LayerError::LastLayer);
        }
        let layer = self.layers.remove(index);
        if self.selected_layer_id.as_ref() == Some(id) {
            self.selected_layer_id = None;
        }
        for other in &mut self.layers {
            if let crate::layer::LayerKind::Group(group) = &mut other.kind {
                group.children.retain(|child| child != id);
            }
        }
        Ok(layer)
    }

    pub fn move_layer(&mut self, id: &LayerId, new_index: usize) -> LayerResult<()> {
        let len = self.layers.len();
        if new_index >= len {
            return Err(LayerError::IndexOutOfRange { index: new_index, len });
        }
        let index = self.index_of(id)?;
        let layer = self.layers.remove(index);
        self.layers.insert(new_index, layer);
        Ok(())
    }

    /// Applies `patch` as given. Geometry edits on a locked layer are refused;
    /// property edits are allowed.
    pub fn update_layer(&mut self, id: &LayerId, patch: &LayerPatch) -> LayerResult<()> {
        let layer = self.layer_mut(id)?;
        if layer.is_locked && patch.touches_geometry() {
            return Err(LayerError::Locked(id.clone()));
        }
        layer.apply(patch);
        Ok(())
    }

    /// Replaces the edit state and layer stack wholesale, as a history move does.
    ///
    /// The selection survives only if the selected layer still exists.
    pub fn restore(&mut self, edit_state: EditState, layers: Vec<Layer>) {
        self.edit_state = edit_state;
        self.layers = layers;
        if let Some(id) = &self.selected_layer_id {
            if !self.layers.iter().any(|l| &l.id == id) {
                self.selected_layer_id = None;
            }
        }
    }
}
