use nanoedit::command::Command;
use nanoedit::edit_state::AdjustmentKey;
use nanoedit::layer::factory;
use nanoedit::state::{
    load_project_from_file, load_project_from_str, save_project, save_project_to_file,
    save_project_to_string, AutosaveManager, PersistenceError, PROJECT_VERSION,
};
use nanoedit::{Editor, EditorConfig, NewProjectSettings, Rgb};
use serde_json::Value;
use tempfile::TempDir;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Project with a few history entries and the cursor one step back.
fn edited_editor() -> Editor {
    init();
    let mut editor = Editor::new_project(
        &NewProjectSettings::new(640, 480, Rgb::WHITE),
        EditorConfig::default(),
    );
    editor
        .execute(Command::AddLayer {
            layer: factory::create_text("Title"),
        })
        .unwrap();
    editor.on_adjustment_change(AdjustmentKey::Saturation, 40.0);
    editor.on_adjustment_commit(AdjustmentKey::Saturation, 40.0);
    editor.on_adjustment_change(AdjustmentKey::Vibrance, 20.0);
    editor.on_adjustment_commit(AdjustmentKey::Vibrance, 20.0);
    editor.undo();
    editor
}

fn without(json: &str, field: &str) -> String {
    let mut value: Value = serde_json::from_str(json).unwrap();
    value.as_object_mut().unwrap().remove(field);
    value.to_string()
}

#[test]
fn test_round_trip_through_string() {
    let editor = edited_editor();
    let json = save_project_to_string(&editor).unwrap();
    let loaded = load_project_from_str(&json).unwrap();

    assert_eq!(loaded, save_project(&editor));
    assert_eq!(loaded.version, PROJECT_VERSION);
    assert_eq!(loaded.current_history_index, 2);
    assert_eq!(loaded.history.len(), 4);
    assert_eq!(loaded.file_info.width, 640);
}

#[test]
fn test_envelope_uses_camel_case_keys() {
    let editor = edited_editor();
    let value: Value = serde_json::from_str(&save_project_to_string(&editor).unwrap()).unwrap();
    for key in ["version", "history", "currentHistoryIndex", "fileInfo"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["fileInfo"]["height"], 480);
}

#[test]
fn test_round_trip_through_file_restores_session() {
    let editor = edited_editor();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("projects").join("poster.json");
    save_project_to_file(&editor, &path).unwrap();

    let project = load_project_from_file(&path).unwrap();
    let restored = Editor::from_project(project, EditorConfig::default()).unwrap();
    assert_eq!(restored.history().items(), editor.history().items());
    assert_eq!(restored.history().current_index(), 2);
    assert_eq!(restored.edit_state().adjustments.saturation, 40.0);
    assert_eq!(restored.edit_state().adjustments.vibrance, 0.0);
    assert_eq!(restored.document().layers().len(), 2);
    assert_eq!(restored.file_info(), editor.file_info());

    // the redo branch survives the round trip
    let mut restored = restored;
    assert!(restored.redo());
    assert_eq!(restored.edit_state().adjustments.vibrance, 20.0);
}

#[test]
fn test_missing_fields_are_reported() {
    let json = save_project_to_string(&edited_editor()).unwrap();
    for field in ["version", "history", "currentHistoryIndex"] {
        let err = load_project_from_str(&without(&json, field)).unwrap_err();
        assert!(
            matches!(err, PersistenceError::MissingField(name) if name == field),
            "{err}"
        );
    }
}

#[test]
fn test_other_version_is_accepted() {
    let json = save_project_to_string(&edited_editor()).unwrap();
    let mut value: Value = serde_json::from_str(&json).unwrap();
    value["version"] = Value::from("0.9");
    let project = load_project_from_str(&value.to_string()).unwrap();
    assert_eq!(project.version, "0.9");
}

#[test]
fn test_bad_cursor_leaves_open_project_untouched() {
    let mut editor = edited_editor();
    let mut project = save_project(&editor);
    project.current_history_index = 42;

    let before = editor.history().clone();
    assert!(matches!(
        editor.open_project(project),
        Err(PersistenceError::History(_))
    ));
    assert_eq!(editor.history(), &before);
    assert_eq!(editor.edit_state().adjustments.saturation, 40.0);
}

#[test]
fn test_open_project_replaces_session() {
    let source = edited_editor();
    let mut editor = Editor::new_project(
        &NewProjectSettings::new(10, 10, Rgb::BLACK),
        EditorConfig::default(),
    );
    editor.open_project(save_project(&source)).unwrap();
    assert_eq!(editor.history().len(), 4);
    assert_eq!(editor.document().dimensions(), source.document().dimensions());
}

#[test]
fn test_autosave_keeps_only_newest_files() {
    let editor = edited_editor();
    let dir = TempDir::new().unwrap();
    let config = EditorConfig {
        max_autosaves: 2,
        ..EditorConfig::default()
    };
    let mut autosave = AutosaveManager::new(dir.path(), &config);
    assert!(autosave.find_latest_autosave().unwrap().is_none());
    assert!(autosave.should_autosave());

    let written: Vec<_> = (0..4).map(|_| autosave.autosave_now(&editor).unwrap()).collect();
    let remaining = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(remaining, 2);
    assert!(!written[0].exists());
    assert!(written[3].exists());

    assert_eq!(autosave.find_latest_autosave().unwrap().as_ref(), Some(&written[3]));
    let latest = autosave.load_latest_autosave().unwrap().unwrap();
    assert_eq!(latest, save_project(&editor));

    // the interval has not elapsed yet
    assert!(!autosave.should_autosave());
    assert!(autosave.try_autosave(&editor).unwrap().is_none());
}
