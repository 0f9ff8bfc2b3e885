use glam::Vec2;
use macroquad::prelude as mq;
use pixel_canvas::persistence;
use pixel_canvas::render::DrawCommand;
use pixel_canvas::view::View;
use pixel_canvas::{EditorConfig, GridPos, PaintMode, PointerEvent, PointerKind};
use pixel_canvas_sdk::{EditorClient, EditorService};

/// Screen offset of the grid's top-left corner.
const MARGIN: f32 = 20.0;

/// Colors on keys 1 to 8.
const PALETTE: [&str; 8] = [
    "#000000", "#ffffff", "#ef4444", "#f97316", "#facc15", "#22c55e", "#3b82f6", "#a855f7",
];

const PALETTE_KEYS: [mq::KeyCode; 8] = [
    mq::KeyCode::Key1,
    mq::KeyCode::Key2,
    mq::KeyCode::Key3,
    mq::KeyCode::Key4,
    mq::KeyCode::Key5,
    mq::KeyCode::Key6,
    mq::KeyCode::Key7,
    mq::KeyCode::Key8,
];

/// Turns raw mouse state into the editor's pointer protocol.
#[derive(Default)]
struct PointerTracker {
    drawing: bool,
    hovering: bool,
    last: Option<GridPos>,
}

#[macroquad::main("PixelCanvas Playground")]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // 1. Runtime for the editor service
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {:?}", e);
            return;
        }
    };
    let _guard = runtime.enter();

    // 2. Initialize Editor (SDK)
    let config = EditorConfig::with_size(32, 32);
    let view = View::new(config.dot_size, Vec2::ZERO);
    let (width, height) = (config.width as i32, config.height as i32);
    let client = match EditorService::spawn(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to start editor: {:?}", e);
            return;
        }
    };
    let mut events = client.subscribe();
    let mut pointer = PointerTracker::default();

    loop {
        // 3. Pointer Handling
        let (mx, my) = mq::mouse_position();
        let local = Vec2::new(mx - MARGIN, my - MARGIN);
        let cell = view.screen_to_grid(local);
        let inside = local.x >= 0.0 && local.y >= 0.0 && cell.x < width && cell.y < height;

        if let Err(e) = pointer.update(&client, cell, inside).await {
            tracing::error!(error = %e, "Pointer update failed");
        }

        // 4. Keyboard
        if let Err(e) = handle_keys(&client).await {
            tracing::error!(error = %e, "Command failed");
        }

        while let Ok(event) = events.try_recv() {
            tracing::trace!(?event, "Editor event");
        }

        // 5. Render
        let draw_list = match client.render().await {
            Ok(list) => list,
            Err(e) => {
                eprintln!("Render error: {:?}", e);
                return;
            }
        };

        mq::clear_background(mq::DARKGRAY);

        for cmd in draw_list {
            match cmd {
                DrawCommand::Rect { pos, size, color } => {
                    mq::draw_rectangle(
                        pos.x + MARGIN,
                        pos.y + MARGIN,
                        size.x,
                        size.y,
                        mq::Color::new(color.x, color.y, color.z, color.w),
                    );
                }
                DrawCommand::Line {
                    start,
                    end,
                    color,
                    width,
                } => {
                    mq::draw_line(
                        start.x + MARGIN,
                        start.y + MARGIN,
                        end.x + MARGIN,
                        end.y + MARGIN,
                        width,
                        mq::Color::new(color.x, color.y, color.z, color.w),
                    );
                }
            }
        }

        mq::next_frame().await
    }
}

impl PointerTracker {
    async fn update(
        &mut self,
        client: &EditorClient,
        cell: GridPos,
        inside: bool,
    ) -> anyhow::Result<()> {
        let left = mq::MouseButton::Left;

        if mq::is_mouse_button_pressed(left) && inside {
            self.drawing = true;
            self.hovering = true;
            self.last = Some(cell);
            return client.pointer(PointerEvent::new(PointerKind::Down, cell.x, cell.y)).await;
        }

        if self.drawing && mq::is_mouse_button_released(left) {
            self.drawing = false;
            return client.pointer(PointerEvent::new(PointerKind::Up, cell.x, cell.y)).await;
        }

        if self.last == Some(cell) {
            return Ok(());
        }

        // Strokes keep going outside the grid; hovering does not.
        if self.drawing || inside {
            self.hovering = true;
            self.last = Some(cell);
            return client.pointer(PointerEvent::new(PointerKind::Move, cell.x, cell.y)).await;
        }

        if self.hovering {
            self.hovering = false;
            self.last = None;
            return client.pointer_leave().await;
        }
        Ok(())
    }
}

async fn handle_keys(client: &EditorClient) -> anyhow::Result<()> {
    let ctrl = mq::is_key_down(mq::KeyCode::LeftControl)
        || mq::is_key_down(mq::KeyCode::RightControl);

    if ctrl {
        if mq::is_key_pressed(mq::KeyCode::Z) {
            return client.undo().await;
        }
        if mq::is_key_pressed(mq::KeyCode::Y) {
            return client.redo().await;
        }
        return Ok(());
    }

    for (mode, key) in [
        (PaintMode::Pen, mq::KeyCode::P),
        (PaintMode::Erase, mq::KeyCode::E),
        (PaintMode::Fill, mq::KeyCode::F),
    ] {
        if mq::is_key_pressed(key) {
            tracing::info!(?mode, "Tool selected");
            client.set_paint_mode(mode).await?;
        }
    }

    for (color, key) in PALETTE.iter().zip(PALETTE_KEYS) {
        if mq::is_key_pressed(key) {
            client.set_color_hex(color).await?;
        }
    }

    if mq::is_key_pressed(mq::KeyCode::G) {
        let visible = client.toggle_grid().await?;
        tracing::info!(visible, "Grid toggled");
    }
    if mq::is_key_pressed(mq::KeyCode::C) {
        client.clear().await?;
    }
    if mq::is_key_pressed(mq::KeyCode::S) {
        let blob = client.export().await?;
        println!("{}", persistence::blob_to_base64(&blob));
    }
    Ok(())
}
