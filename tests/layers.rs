use nanoedit::command::{Command, CommandError};
use nanoedit::document::LayerError;
use nanoedit::geometry::{Dimensions, Point};
use nanoedit::layer::{factory, LayerGeometry, LayerKind, LayerPatch, ShapeType};
use nanoedit::state::ColorMode;
use nanoedit::{Editor, EditorConfig, EditorError, LayerId, NewProjectSettings, Rgb};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_project() -> Editor {
    let settings = NewProjectSettings {
        width: 1920,
        height: 1080,
        background_color: Rgb::WHITE,
        color_mode: ColorMode::Rgb,
        name: "Poster".to_string(),
    };
    Editor::new_project(&settings, EditorConfig::default())
}

#[test]
fn test_new_project_has_locked_drawing_background() {
    init();
    let editor = new_project();
    let layers = editor.document().layers();
    assert_eq!(layers.len(), 1);

    let background = &layers[0];
    assert!(background.id.is_background());
    assert_eq!(background.type_name(), "drawing");
    assert!(background.is_locked);
    match &background.kind {
        LayerKind::Drawing(drawing) => assert_eq!(drawing.fill, Some(Rgb::WHITE)),
        other => panic!("unexpected background {other:?}"),
    }

    assert_eq!(editor.history().names(), vec!["New Project Created"]);
    assert_eq!(editor.document().dimensions(), Dimensions::new(1920, 1080));
    assert_eq!(editor.file_info().name, "Poster");
}

#[test]
fn test_open_image_uses_image_background() {
    let editor = Editor::open_image(
        "beach.jpg",
        "blob:beach",
        Dimensions::new(640, 480),
        EditorConfig::default(),
    );
    let background = &editor.document().layers()[0];
    assert_eq!(background.type_name(), "image");
    assert!(background.is_locked);
    assert_eq!(editor.document().source_image.as_deref(), Some("blob:beach"));
    assert_eq!(editor.history().current().name, "Image Loaded");
}

#[test]
fn test_add_layer_goes_above_selection_and_selects_it() {
    let mut editor = new_project();
    let text = factory::create_text("Hello");
    let text_id = text.id.clone();
    editor.execute(Command::AddLayer { layer: text }).unwrap();

    let shape = factory::create_shape(ShapeType::Star, Rgb::BLACK);
    let shape_id = shape.id.clone();
    // select the background so the shape lands between it and the text
    editor.select_layer(Some(LayerId::background())).unwrap();
    editor.execute(Command::AddLayer { layer: shape }).unwrap();

    let ids: Vec<_> = editor.document().layers().iter().map(|l| l.id.clone()).collect();
    assert_eq!(ids, vec![LayerId::background(), shape_id.clone(), text_id]);
    assert_eq!(editor.document().selected_layer_id(), Some(&shape_id));
    assert_eq!(editor.history().current().name, "Add Shape Layer");
}

#[test]
fn test_layer_ids_are_never_reused() {
    let a = factory::create_drawing("a");
    let b = factory::create_drawing("a");
    assert_ne!(a.id, b.id);
}

#[test]
fn test_delete_clears_selection() {
    let mut editor = new_project();
    let layer = factory::create_drawing("Sketch");
    let id = layer.id.clone();
    editor.execute(Command::AddLayer { layer }).unwrap();
    assert_eq!(editor.document().selected_layer_id(), Some(&id));

    editor.execute(Command::DeleteLayer { layer_id: id.clone() }).unwrap();
    assert_eq!(editor.document().selected_layer_id(), None);
    assert!(editor.document().layer(&id).is_err());

    // undo brings the layer back from the snapshot
    assert!(editor.undo());
    assert!(editor.document().layer(&id).is_ok());
}

#[test]
fn test_last_layer_cannot_be_deleted() {
    let mut editor = new_project();
    let err = editor
        .execute(Command::DeleteLayer {
            layer_id: LayerId::background(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Command(CommandError::Layer(LayerError::LastLayer))
    ));
    // nothing was recorded
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_duplicate_rename_and_reorder() {
    let mut editor = new_project();
    let layer = factory::create_drawing("Ink");
    let id = layer.id.clone();
    editor.execute(Command::AddLayer { layer }).unwrap();
    editor.execute(Command::DuplicateLayer { layer_id: id.clone() }).unwrap();

    let copy = editor.document().selected_layer().unwrap().clone();
    assert_ne!(copy.id, id);
    assert_eq!(copy.name, "Ink copy");
    assert_eq!(editor.document().index_of(&copy.id).unwrap(), 2);

    editor
        .execute(Command::RenameLayer {
            layer_id: copy.id.clone(),
            name: "Ink shadow".to_string(),
        })
        .unwrap();
    editor
        .execute(Command::ReorderLayer {
            layer_id: copy.id.clone(),
            new_index: 1,
        })
        .unwrap();

    assert_eq!(editor.document().index_of(&copy.id).unwrap(), 1);
    assert_eq!(editor.document().layer(&copy.id).unwrap().name, "Ink shadow");
    assert_eq!(
        editor.history().names(),
        vec![
            "New Project Created",
            "Add Drawing Layer",
            "Duplicate Layer",
            "Rename Layer",
            "Reorder Layers"
        ]
    );
}

#[test]
fn test_locked_layer_accepts_property_edits() {
    let mut editor = new_project();
    editor
        .execute(Command::SetVisibility {
            layer_id: LayerId::background(),
            visible: false,
        })
        .unwrap();
    editor.set_layer_opacity(&LayerId::background(), 150.0).unwrap();
    editor.commit_layer_update("Layer Opacity");

    let background = editor.document().layer(&LayerId::background()).unwrap();
    assert!(!background.visible);
    assert_eq!(background.opacity, 100.0);
    assert_eq!(editor.history().current().name, "Layer Opacity");
}

#[test]
fn test_live_layer_update_clamps_values() {
    init();
    let mut editor = new_project();
    let shape = factory::create_shape(ShapeType::Rectangle, Rgb::BLACK);
    let id = shape.id.clone();
    editor.execute(Command::AddLayer { layer: shape }).unwrap();

    editor.update_layer(&id, &LayerPatch::opacity(150.0)).unwrap();
    editor
        .update_layer(
            &id,
            &LayerPatch::geometry(LayerGeometry {
                width: -20.0,
                height: 0.0,
                rotation: 400.0,
                ..LayerGeometry::default()
            }),
        )
        .unwrap();
    editor
        .update_layer(
            &id,
            &LayerPatch::points(vec![Point::new(-5.0, 50.0), Point::new(120.0, 100.5)]),
        )
        .unwrap();
    editor.commit_layer_update("Layer Properties");

    let min_size = editor.config().min_layer_size_percent;
    let snapshot = &editor.history().current().layers;
    let layer = snapshot.iter().find(|layer| layer.id == id).unwrap();
    assert_eq!(layer.opacity, 100.0);
    assert_eq!(layer.geometry.width, min_size);
    assert_eq!(layer.geometry.height, min_size);
    assert!((layer.geometry.rotation - 40.0).abs() < 1e-3);
    assert_eq!(
        layer.vector_points().unwrap(),
        &[Point::new(0.0, 50.0), Point::new(100.0, 100.0)]
    );
    assert_eq!(editor.document().layer(&id).unwrap(), layer);
}

#[test]
fn test_start_new_project_resets_history() {
    let mut editor = new_project();
    editor
        .execute(Command::AddLayer {
            layer: factory::create_drawing("x"),
        })
        .unwrap();
    editor.start_new_project(&NewProjectSettings::new(100, 100, Rgb::BLACK));
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.document().layers().len(), 1);
    assert_eq!(editor.document().dimensions(), Dimensions::new(100, 100));
}
