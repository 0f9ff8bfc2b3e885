use pixel_canvas::{Editor, EditorConfig, EditorEvent, PaintMode, PointerEvent, Rgba};

fn dot(editor: &mut Editor, x: i32, y: i32) {
    editor.handle_pointer(PointerEvent::down(x, y));
    editor.handle_pointer(PointerEvent::up(x, y));
}

#[test]
fn test_undo_redo_cycle() {
    let mut editor = Editor::new(EditorConfig::with_size(4, 4)).unwrap();
    editor.set_color(Rgba::WHITE);

    // 1. Two separate strokes
    dot(&mut editor, 0, 0);
    dot(&mut editor, 1, 1);
    assert!(editor.can_undo());
    assert!(!editor.can_redo());

    // 2. Undo the second
    let events = editor.undo();
    assert!(events.contains(&EditorEvent::BufferChanged));
    assert_eq!(editor.buffer().get(0, 0), Some(Rgba::WHITE.0));
    assert_eq!(editor.buffer().get(1, 1), Some(0));
    assert!(editor.can_redo());

    // 3. Undo the first; back to the baseline
    editor.undo();
    assert!(editor.buffer().is_blank());
    assert!(!editor.can_undo());
    assert!(editor.undo().is_empty());

    // 4. Redo both
    editor.redo();
    editor.redo();
    assert_eq!(editor.buffer().get(1, 1), Some(Rgba::WHITE.0));
    assert!(!editor.can_redo());
    assert!(editor.redo().is_empty());
}

#[test]
fn test_new_edit_discards_redo() {
    let mut editor = Editor::new(EditorConfig::with_size(4, 4)).unwrap();
    editor.set_color(Rgba::WHITE);

    dot(&mut editor, 0, 0);
    editor.undo();
    assert!(editor.can_redo());

    dot(&mut editor, 3, 3);
    assert!(!editor.can_redo());
    assert_eq!(editor.buffer().get(0, 0), Some(0));
}

#[test]
fn test_undo_mid_stroke_finishes_it_first() {
    let mut editor = Editor::new(EditorConfig::with_size(4, 4)).unwrap();
    editor.set_color(Rgba::WHITE);

    dot(&mut editor, 0, 0);
    editor.handle_pointer(PointerEvent::down(2, 2));

    // The open stroke is recorded, then undone; the earlier dot survives.
    editor.undo();
    assert_eq!(editor.buffer().get(2, 2), Some(0));
    assert_eq!(editor.buffer().get(0, 0), Some(Rgba::WHITE.0));

    editor.redo();
    assert_eq!(editor.buffer().get(2, 2), Some(Rgba::WHITE.0));
}

#[test]
fn test_clear_is_undoable() {
    let mut editor = Editor::new(EditorConfig::with_size(4, 4)).unwrap();
    editor.set_color(Rgba::WHITE);
    dot(&mut editor, 1, 2);

    let events = editor.clear();
    assert!(events.contains(&EditorEvent::BufferChanged));
    assert!(editor.buffer().is_blank());

    // Clearing a blank canvas does nothing.
    assert!(editor.clear().is_empty());

    editor.undo();
    assert_eq!(editor.buffer().get(1, 2), Some(Rgba::WHITE.0));
}

#[test]
fn test_history_limit() {
    let config = EditorConfig {
        max_history: 3,
        ..EditorConfig::with_size(8, 1)
    };
    let mut editor = Editor::new(config).unwrap();
    editor.set_color(Rgba::WHITE);

    for x in 0..5 {
        dot(&mut editor, x, 0);
    }

    // Only two steps back fit alongside the current state.
    editor.undo();
    editor.undo();
    assert!(!editor.can_undo());
    assert_eq!(editor.buffer().get(2, 0), Some(Rgba::WHITE.0));
    assert_eq!(editor.buffer().get(3, 0), Some(0));
}

#[test]
fn test_lost_pointer_up_keeps_separate_undo_steps() {
    let mut editor = Editor::new(EditorConfig::with_size(8, 8)).unwrap();
    editor.set_color(Rgba::WHITE);

    // 1. First stroke never receives its pointer-up
    editor.handle_pointer(PointerEvent::down(0, 0));
    let events = editor.handle_pointer(PointerEvent::down(5, 0));
    assert!(events.contains(&EditorEvent::EditFinished));
    editor.handle_pointer(PointerEvent::up(5, 0));

    // 2. Undo removes only the second stroke
    editor.undo();
    assert_eq!(editor.buffer().get(0, 0), Some(Rgba::WHITE.0));
    assert_eq!(editor.buffer().get(5, 0), Some(0));

    editor.undo();
    assert!(editor.buffer().is_blank());
}

#[test]
fn test_fill_after_lost_pointer_up_is_its_own_step() {
    let mut editor = Editor::new(EditorConfig::with_size(8, 8)).unwrap();
    editor.set_color(Rgba::WHITE);

    editor.handle_pointer(PointerEvent::down(0, 0));
    editor.set_paint_mode(PaintMode::Fill);
    editor.set_color(Rgba::from_rgb(0, 0, 255));
    editor.handle_pointer(PointerEvent::down(4, 4));

    // Undoing the fill keeps the stroke.
    editor.undo();
    assert_eq!(editor.buffer().get(0, 0), Some(Rgba::WHITE.0));
    assert_eq!(editor.buffer().get(4, 4), Some(0));
}
