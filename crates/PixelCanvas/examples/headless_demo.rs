use pixel_canvas::persistence;
use pixel_canvas::render::DrawCommand;
use pixel_canvas::{Editor, EditorConfig, EditorEvent, PaintMode, PointerEvent, Rgba};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== PixelCanvas Headless Demo ===");

    // 1. Initialize Editor
    let mut editor = match Editor::new(EditorConfig::with_size(16, 16)) {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Failed to create editor: {err}");
            return;
        }
    };

    // 2. Draw a red diagonal
    editor.set_color(Rgba::from_rgb(220, 38, 38));
    let mut events = editor.handle_pointer(PointerEvent::down(1, 1));
    for i in 2..=10 {
        events.extend(editor.handle_pointer(PointerEvent::moved(i, i)));
    }
    events.extend(editor.handle_pointer(PointerEvent::up(10, 10)));
    report("Stroke", &events);

    // 3. Fill the region below it
    editor.set_paint_mode(PaintMode::Fill);
    editor.set_color(Rgba::from_rgb(250, 204, 21));
    let events = editor.handle_pointer(PointerEvent::down(0, 15));
    report("Fill", &events);

    // 4. Render
    let draw_list = editor.render();
    let cells = draw_list
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Rect { .. }))
        .count();
    println!("Frame: {} commands ({} rects)", draw_list.len(), cells);

    // 5. Save
    let blob = editor.export_blob();
    println!(
        "Saved {} words ({} pixels): {}",
        blob.len(),
        editor.buffer().cells().len(),
        persistence::blob_to_base64(&blob)
    );

    // 6. Undo the fill and reload the save
    editor.undo();
    match editor.load_blob(&blob) {
        Ok(events) => report("Reload", &events),
        Err(err) => eprintln!("Reload failed: {err}"),
    }
    println!("Can undo: {}, can redo: {}", editor.can_undo(), editor.can_redo());
}

fn report(label: &str, events: &[EditorEvent]) {
    let changes = events
        .iter()
        .filter(|e| matches!(e, EditorEvent::BufferChanged))
        .count();
    println!("{label}: {} events, {changes} buffer changes", events.len());
}
