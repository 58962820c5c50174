use egui::{pos2, Rect};
use nanoedit::command::Command;
use nanoedit::geometry::{Corner, Point};
use nanoedit::interaction::{InteractionError, InteractionPhase, LayerInteraction, Viewport};
use nanoedit::layer::{factory, LayerGeometry, ShapeType};
use nanoedit::{Editor, EditorConfig, EditorEvent, LayerId, NewProjectSettings, Rgb, ToolType};
use std::sync::{Arc, Mutex};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

// 1000x500 container; a 30% layer centered in it spans (350,175)-(650,325)
fn setup() -> (Editor, LayerInteraction, LayerId) {
    init();
    let mut editor = Editor::new_project(
        &NewProjectSettings::new(1000, 1000, Rgb::WHITE),
        EditorConfig::default(),
    );
    let layer = factory::create_drawing("Sticker").with_geometry(LayerGeometry::centered(30.0, 30.0));
    let id = layer.id.clone();
    editor.execute(Command::AddLayer { layer }).unwrap();
    let viewport = Viewport::new(Rect::from_min_max(pos2(0.0, 0.0), pos2(1000.0, 500.0)));
    (editor, LayerInteraction::new(viewport), id)
}

fn geometry(editor: &Editor, id: &LayerId) -> LayerGeometry {
    editor.document().layer(id).unwrap().geometry
}

#[test]
fn test_drag_converts_pixels_to_percent_and_commits_once() {
    let (mut editor, mut interaction, id) = setup();
    let phase = interaction.pointer_down(&mut editor, pos2(500.0, 250.0)).unwrap();
    assert_eq!(phase, InteractionPhase::Dragging);

    interaction.pointer_move(&mut editor, pos2(550.0, 260.0)).unwrap();
    interaction.pointer_move(&mut editor, pos2(600.0, 300.0)).unwrap();
    let live = geometry(&editor, &id);
    assert_close(live.x, 60.0);
    assert_close(live.y, 60.0);
    // nothing recorded while dragging
    assert_eq!(editor.history().len(), 2);

    assert!(interaction.pointer_up(&mut editor).unwrap());
    assert_eq!(interaction.phase(), InteractionPhase::Idle);
    assert_eq!(editor.history().len(), 3);
    assert_eq!(editor.history().current().name, "Move Layer");
}

#[test]
fn test_click_without_move_records_nothing() {
    let (mut editor, mut interaction, _) = setup();
    interaction.pointer_down(&mut editor, pos2(500.0, 250.0)).unwrap();
    assert!(!interaction.pointer_up(&mut editor).unwrap());
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_resize_never_goes_below_minimum() {
    let (mut editor, mut interaction, id) = setup();
    let phase = interaction.pointer_down(&mut editor, pos2(650.0, 325.0)).unwrap();
    assert_eq!(phase, InteractionPhase::Resizing(Corner::BottomRight));

    for target in [pos2(-5000.0, -5000.0), pos2(-1.0e7, 4.0), pos2(651.0, -1.0e6)] {
        interaction.pointer_move(&mut editor, target).unwrap();
        let g = geometry(&editor, &id);
        assert!(g.width >= 1.0 && g.height >= 1.0, "{g:?}");
    }
    interaction.pointer_up(&mut editor).unwrap();
    assert_eq!(editor.history().current().name, "Resize Layer");
}

#[test]
fn test_top_left_resize_keeps_opposite_edge() {
    let (mut editor, mut interaction, id) = setup();
    interaction.begin_resize(&editor, &id, Corner::TopLeft, pos2(350.0, 175.0)).unwrap();
    interaction.pointer_move(&mut editor, pos2(400.0, 175.0)).unwrap();

    let g = geometry(&editor, &id);
    assert_close(g.width, 25.0);
    assert_close(g.height, 30.0);
    assert_close(g.x, 52.5);
    // right edge stays at 65%
    assert_close(g.x + g.width / 2.0, 65.0);
}

#[test]
fn test_rotate_handle_follows_pointer_angle() {
    let (mut editor, mut interaction, id) = setup();
    // the handle sits 30px above the top edge
    let phase = interaction.pointer_down(&mut editor, pos2(500.0, 145.0)).unwrap();
    assert_eq!(phase, InteractionPhase::Rotating);

    interaction.pointer_move(&mut editor, pos2(650.0, 250.0)).unwrap();
    assert_close(geometry(&editor, &id).rotation, 90.0);

    interaction.pointer_move(&mut editor, pos2(400.0, 250.0)).unwrap();
    assert_close(geometry(&editor, &id).rotation, 270.0);

    interaction.pointer_up(&mut editor).unwrap();
    assert_eq!(editor.history().current().name, "Rotate Layer");
}

#[test]
fn test_vector_point_moves_in_layer_space_and_clamps() {
    let (mut editor, mut interaction, _) = setup();
    let shape = factory::create_shape(ShapeType::Triangle, Rgb::BLACK);
    let shape_id = shape.id.clone();
    editor.execute(Command::AddLayer { layer: shape }).unwrap();

    // apex (50, 0) of the 300x150 box
    let phase = interaction.pointer_down(&mut editor, pos2(500.0, 175.0)).unwrap();
    assert_eq!(phase, InteractionPhase::DraggingVectorPoint(0));

    interaction.pointer_move(&mut editor, pos2(530.0, 100.0)).unwrap();
    interaction.pointer_up(&mut editor).unwrap();

    let layer = editor.document().layer(&shape_id).unwrap();
    let apex = layer.vector_points().unwrap()[0];
    assert_close(apex.x, 60.0);
    assert_close(apex.y, 0.0);
    assert_eq!(layer.vector_points().unwrap()[1], Point::new(100.0, 100.0));
    assert_eq!(editor.history().current().name, "Edit Shape Points");
}

#[test]
fn test_locked_layer_rejects_every_gesture() {
    let (mut editor, mut interaction, _) = setup();
    let background = LayerId::background();
    let locked = InteractionError::LayerLocked(background.clone());

    assert_eq!(interaction.begin_drag(&editor, &background, pos2(10.0, 10.0)), Err(locked.clone()));
    assert_eq!(
        interaction.begin_resize(&editor, &background, Corner::TopLeft, pos2(0.0, 0.0)),
        Err(locked.clone())
    );
    assert_eq!(interaction.begin_rotate(&editor, &background, pos2(10.0, 10.0)), Err(locked));

    // pressing on the background outside the sticker
    editor.select_layer(Some(background)).unwrap();
    assert!(interaction.pointer_down(&mut editor, pos2(20.0, 20.0)).is_err());
    assert_eq!(interaction.phase(), InteractionPhase::Idle);
}

#[test]
fn test_only_one_gesture_at_a_time() {
    let (mut editor, mut interaction, id) = setup();
    interaction.begin_drag(&editor, &id, pos2(500.0, 250.0)).unwrap();
    assert_eq!(
        interaction.begin_rotate(&editor, &id, pos2(500.0, 145.0)),
        Err(InteractionError::Busy)
    );
    assert_eq!(
        interaction.pointer_down(&mut editor, pos2(500.0, 250.0)),
        Err(InteractionError::Busy)
    );
    assert_eq!(interaction.phase(), InteractionPhase::Dragging);
}

#[test]
fn test_cancel_restores_geometry() {
    let (mut editor, mut interaction, id) = setup();
    let before = geometry(&editor, &id);
    interaction.pointer_down(&mut editor, pos2(650.0, 325.0)).unwrap();
    interaction.pointer_move(&mut editor, pos2(900.0, 450.0)).unwrap();
    assert_ne!(geometry(&editor, &id), before);

    interaction.cancel(&mut editor).unwrap();
    assert_eq!(geometry(&editor, &id), before);
    assert_eq!(interaction.phase(), InteractionPhase::Idle);
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_paint_tools_do_not_drag_layers() {
    let (mut editor, mut interaction, _) = setup();
    editor.set_active_tool(ToolType::Brush);
    let phase = interaction.pointer_down(&mut editor, pos2(500.0, 250.0)).unwrap();
    assert_eq!(phase, InteractionPhase::Idle);

    // a neutral tool drags only the selected layer
    editor.set_active_tool(ToolType::Hand);
    editor.select_layer(Some(LayerId::background())).unwrap();
    let phase = interaction.pointer_down(&mut editor, pos2(500.0, 250.0)).unwrap();
    assert_eq!(phase, InteractionPhase::Idle);
}

#[test]
fn test_move_tool_selects_pressed_layer() {
    let (mut editor, mut interaction, id) = setup();
    editor.select_layer(Some(LayerId::background())).unwrap();
    let phase = interaction.pointer_down(&mut editor, pos2(500.0, 250.0)).unwrap();
    assert_eq!(phase, InteractionPhase::Dragging);
    assert_eq!(editor.document().selected_layer_id(), Some(&id));
}

#[test]
fn test_press_on_locked_layer_keeps_selection() {
    let (mut editor, mut interaction, id) = setup();
    editor.set_active_tool(ToolType::Move);
    assert_eq!(editor.document().selected_layer_id(), Some(&id));
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    editor.subscribe(Box::new(move |event: &EditorEvent| {
        sink.lock().unwrap().push(event.clone());
    }));

    // the background is hit outside the sticker
    assert_eq!(
        interaction.pointer_down(&mut editor, pos2(20.0, 20.0)),
        Err(InteractionError::LayerLocked(LayerId::background()))
    );
    assert_eq!(editor.document().selected_layer_id(), Some(&id));
    assert_eq!(interaction.phase(), InteractionPhase::Idle);
    assert!(
        !events
            .lock()
            .unwrap()
            .iter()
            .any(|event| matches!(event, EditorEvent::SelectionChanged { .. }))
    );
}
