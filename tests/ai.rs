use async_trait::async_trait;
use futures::executor::block_on;
use nanoedit::ai::{run_ai_command, AiCall, AiError, AiOrchestrator, AiRequest, AiResponse};
use nanoedit::geometry::Dimensions;
use nanoedit::{Editor, EditorConfig, Mask, NewProjectSettings, Outcome, Rgb};
use parking_lot::Mutex;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Replies with a canned response and remembers what it was asked.
struct ScriptedOrchestrator {
    reply: Result<AiResponse, AiError>,
    calls: Mutex<Vec<(String, String, bool)>>,
}

impl ScriptedOrchestrator {
    fn new(reply: Result<AiResponse, AiError>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl AiOrchestrator for ScriptedOrchestrator {
    async fn call(&self, call: AiCall<'_>) -> Result<AiResponse, AiError> {
        self.calls.lock().push((
            call.command.to_string(),
            call.prompt.to_string(),
            call.selection.is_some(),
        ));
        self.reply.clone()
    }
}

fn editor() -> Editor {
    init();
    Editor::open_image(
        "street.jpg",
        "blob:street",
        Dimensions::new(300, 200),
        EditorConfig::default(),
    )
}

fn generated_image() -> Result<AiResponse, AiError> {
    Ok(AiResponse {
        result_url: Some("https://cdn.example/generated.png".to_string()),
        mask: None,
    })
}

#[test]
fn test_empty_prompt_is_rejected_before_calling() {
    let mut editor = editor();
    let orchestrator = ScriptedOrchestrator::new(generated_image());
    let request = AiRequest::new("Generative Fill", "   ");

    let outcome = block_on(run_ai_command(&mut editor, &orchestrator, &request, Some("token")));
    assert_eq!(outcome, Outcome::Rejected("Please enter a prompt".to_string()));
    assert_eq!(orchestrator.call_count(), 0);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_missing_token_or_image_is_rejected() {
    let mut editor = editor();
    let orchestrator = ScriptedOrchestrator::new(generated_image());
    let request = AiRequest::without_prompt("Remove Background");

    assert!(block_on(run_ai_command(&mut editor, &orchestrator, &request, None)).is_rejected());
    assert!(block_on(run_ai_command(&mut editor, &orchestrator, &request, Some(""))).is_rejected());

    let mut blank = Editor::new_project(
        &NewProjectSettings::new(300, 200, Rgb::WHITE),
        EditorConfig::default(),
    );
    let outcome = block_on(run_ai_command(&mut blank, &orchestrator, &request, Some("token")));
    assert_eq!(
        outcome,
        Outcome::Rejected("Load an image before using AI tools".to_string())
    );
    assert_eq!(orchestrator.call_count(), 0);
}

#[test]
fn test_result_image_becomes_selected_layer() {
    let mut editor = editor();
    let orchestrator = ScriptedOrchestrator::new(generated_image());
    nanoedit::selection::select_all(&mut editor);
    let request = AiRequest::new("Generative Fill", " a red kite ");

    let outcome = block_on(run_ai_command(&mut editor, &orchestrator, &request, Some("token")));
    assert_eq!(outcome, Outcome::Applied);

    let calls = orchestrator.calls.lock().clone();
    assert_eq!(
        calls,
        vec![("Generative Fill".to_string(), "a red kite".to_string(), true)]
    );

    let layers = editor.document().layers();
    assert_eq!(layers.len(), 2);
    let added = &layers[1];
    assert_eq!(added.name, "AI: Generative Fill");
    assert_eq!(added.type_name(), "image");
    assert_eq!(editor.document().selected_layer_id(), Some(&added.id));
    assert_eq!(editor.history().current().name, "AI: Generative Fill");
}

#[test]
fn test_mask_response_replaces_selection() {
    let mut editor = editor();
    let mut mask = Mask::empty(Dimensions::new(300, 200));
    mask.set(10, 10, 255);
    let orchestrator = ScriptedOrchestrator::new(Ok(AiResponse {
        result_url: None,
        mask: Some(mask.clone()),
    }));

    let request = AiRequest::without_prompt("Select Subject");
    assert!(block_on(run_ai_command(&mut editor, &orchestrator, &request, Some("token"))).is_applied());
    assert_eq!(editor.edit_state().selection_mask.as_ref(), Some(&mask));
    assert_eq!(editor.document().layers().len(), 1);
}

#[test]
fn test_failures_leave_document_untouched() {
    let mut editor = editor();
    let request = AiRequest::new("Generative Fill", "clouds");
    let failing = [
        ScriptedOrchestrator::new(Err(AiError::Request("timeout".to_string()))),
        ScriptedOrchestrator::new(Err(AiError::Unauthorized)),
        ScriptedOrchestrator::new(Ok(AiResponse::default())),
        ScriptedOrchestrator::new(Ok(AiResponse {
            result_url: None,
            mask: Some(Mask::filled(Dimensions::new(10, 10))),
        })),
    ];

    for orchestrator in &failing {
        let outcome = block_on(run_ai_command(&mut editor, orchestrator, &request, Some("token")));
        assert!(outcome.is_failed(), "{outcome:?}");
        assert_eq!(orchestrator.call_count(), 1);
    }
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.document().layers().len(), 1);
    assert!(editor.edit_state().selection_mask.is_none());
}
