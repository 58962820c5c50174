//! Generative commands run by an external AI orchestrator.

use async_trait::async_trait;
use log::info;
use thiserror::Error;

use crate::error::Outcome;
use crate::event::EditorEvent;
use crate::geometry::Dimensions;
use crate::layer::factory;
use crate::mask::Mask;
use crate::state::Editor;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    #[error("Not authorized")]
    Unauthorized,

    #[error("AI request failed: {0}")]
    Request(String),

    #[error("AI service returned no result")]
    EmptyResponse,
}

/// A user's request from an AI panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    pub command: String,
    pub prompt: String,
    pub requires_prompt: bool,
}

impl AiRequest {
    pub fn new(command: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            prompt: prompt.into(),
            requires_prompt: true,
        }
    }

    /// Commands such as background removal that take no prompt.
    pub fn without_prompt(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            prompt: String::new(),
            requires_prompt: false,
        }
    }
}

/// What is sent to the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct AiCall<'a> {
    pub command: &'a str,
    pub prompt: &'a str,
    pub image: &'a str,
    pub dimensions: Dimensions,
    pub selection: Option<&'a Mask>,
    pub token: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiResponse {
    /// Reference to a generated image, added as a new layer.
    pub result_url: Option<String>,
    /// A document-sized mask, stored as the selection.
    pub mask: Option<Mask>,
}

#[async_trait]
pub trait AiOrchestrator: Send + Sync {
    async fn call(&self, call: AiCall<'_>) -> Result<AiResponse, AiError>;
}

/// Runs one AI command against the open document.
///
/// Missing prompt, image or token are rejected before any call is made.
/// Failures leave the document as it was.
pub async fn run_ai_command(
    editor: &mut Editor,
    orchestrator: &dyn AiOrchestrator,
    request: &AiRequest,
    token: Option<&str>,
) -> Outcome {
    let prompt = request.prompt.trim();
    if request.requires_prompt && prompt.is_empty() {
        return editor.reject("Please enter a prompt");
    }
    let Some(image) = editor.document().source_image.clone() else {
        return editor.reject("Load an image before using AI tools");
    };
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return editor.reject("Sign in to use AI tools");
    };

    let dimensions = editor.document().dimensions();
    let selection = editor.edit_state().selection_mask.clone();
    let call = AiCall {
        command: &request.command,
        prompt,
        image: &image,
        dimensions,
        selection: selection.as_ref(),
        token,
    };
    let response = match orchestrator.call(call).await {
        Ok(response) => response,
        Err(err) => return editor.fail(format!("AI {} failed: {err}", request.command)),
    };

    if response.result_url.is_none() && response.mask.is_none() {
        return editor.fail(format!("AI {} failed: {}", request.command, AiError::EmptyResponse));
    }
    if let Some(mask) = &response.mask {
        if mask.dimensions() != dimensions {
            return editor.fail(format!(
                "AI {} returned a {:?} mask for a {:?} document",
                request.command,
                mask.dimensions(),
                dimensions
            ));
        }
    }

    let name = format!("AI: {}", request.command);
    if let Some(url) = response.result_url {
        let layer = factory::create_image(name.clone(), url, dimensions, dimensions);
        let id = layer.id.clone();
        let above = editor.document().selected_layer_id().cloned();
        if let Err(err) = editor.document.insert_layer(layer, above.as_ref()) {
            return editor.fail(format!("AI {} failed: {err}", request.command));
        }
        // the layer was just inserted
        let _ = editor.document.select_layer(Some(id));
        editor.emit(EditorEvent::LayersChanged);
    }
    if let Some(mask) = response.mask {
        editor.document.edit_state.selection_mask = Some(mask);
        editor.emit(EditorEvent::EditStateChanged);
    }

    info!("{name} applied");
    editor.record_history(name);
    Outcome::Applied
}
