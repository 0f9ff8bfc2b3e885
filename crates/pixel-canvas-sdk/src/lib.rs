use anyhow::{Context, Result, anyhow};
use pixel_canvas::render::RenderList;
use pixel_canvas::{
    Artwork, Editor, EditorConfig, EditorEvent, PaintMode, PointerEvent, Rgba,
};
use tokio::sync::{broadcast, oneshot};

/// Capacity of the event bus. Slow subscribers that fall further behind than
/// this see `RecvError::Lagged` and should redraw from a fresh snapshot.
const EVENT_CAPACITY: usize = 256;

/// Requests accepted by the editor service.
///
/// Commands are handled strictly in the order they were sent. Those that
/// produce a value carry a `oneshot` sender for the reply.
#[derive(Debug)]
pub enum EditorCommand {
    Pointer(PointerEvent),
    PointerLeave,
    SetPaintMode(PaintMode),
    SetColor(Rgba),
    SetColorHex(String, oneshot::Sender<pixel_canvas::Result<Rgba>>),
    Undo,
    Redo,
    Clear,
    Export(oneshot::Sender<Vec<u32>>),
    Load(Vec<u32>, oneshot::Sender<pixel_canvas::Result<()>>),
    Snapshot(oneshot::Sender<EditorSnapshot>),
    Render(oneshot::Sender<RenderList>),
    ToggleGrid(oneshot::Sender<bool>),
    Shutdown,
}

/// Point-in-time copy of the editor state, for late subscribers and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSnapshot {
    pub artwork: Artwork,
    pub paint_mode: PaintMode,
    pub color: Rgba,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Single owner of an [`Editor`].
///
/// The editor is not shared between threads. Instead one task owns it and
/// serializes every request arriving on the command channel, so any number of
/// [`EditorClient`]s can drive it concurrently.
pub struct EditorService {
    editor: Editor,
    commands: async_channel::Receiver<EditorCommand>,
    events: broadcast::Sender<EditorEvent>,
}

impl EditorService {
    /// Creates the editor and spawns its task on the current tokio runtime.
    pub fn spawn(config: EditorConfig) -> Result<EditorClient> {
        let editor = Editor::new(config)?;
        let (command_tx, command_rx) = async_channel::unbounded();
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let service = Self {
            editor,
            commands: command_rx,
            events: event_tx.clone(),
        };
        tokio::spawn(service.run());

        Ok(EditorClient {
            commands: command_tx,
            events: event_tx,
        })
    }

    #[tracing::instrument(skip(self), name = "editor_service")]
    async fn run(mut self) {
        tracing::info!("Editor service started");
        while let Ok(command) = self.commands.recv().await {
            if !self.handle(command) {
                break;
            }
        }
        // Requests queued behind a shutdown are dropped so their callers see
        // a closed reply channel instead of waiting forever.
        self.commands.close();
        let dropped = std::iter::from_fn(|| self.commands.try_recv().ok()).count();
        tracing::info!(dropped, "Editor service stopped");
    }

    /// Returns false once the service should stop.
    fn handle(&mut self, command: EditorCommand) -> bool {
        let events = match command {
            EditorCommand::Pointer(event) => self.editor.handle_pointer(event),
            EditorCommand::PointerLeave => self.editor.pointer_leave(),
            EditorCommand::SetPaintMode(mode) => {
                self.editor.set_paint_mode(mode);
                Vec::new()
            }
            EditorCommand::SetColor(color) => {
                self.editor.set_color(color);
                Vec::new()
            }
            EditorCommand::SetColorHex(input, reply) => {
                let result = self.editor.set_color_hex(&input);
                if let Err(err) = &result {
                    tracing::warn!(error = %err, "Color rejected");
                }
                let _ = reply.send(result);
                Vec::new()
            }
            EditorCommand::Undo => self.editor.undo(),
            EditorCommand::Redo => self.editor.redo(),
            EditorCommand::Clear => self.editor.clear(),
            EditorCommand::Export(reply) => {
                let _ = reply.send(self.editor.export_blob());
                Vec::new()
            }
            EditorCommand::Load(blob, reply) => {
                let (result, events) = match self.editor.load_blob(&blob) {
                    Ok(events) => (Ok(()), events),
                    Err(err) => {
                        tracing::warn!(error = %err, "Load rejected");
                        (Err(err), Vec::new())
                    }
                };
                let _ = reply.send(result);
                events
            }
            EditorCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
                Vec::new()
            }
            EditorCommand::Render(reply) => {
                let _ = reply.send(self.editor.render());
                Vec::new()
            }
            EditorCommand::ToggleGrid(reply) => {
                let _ = reply.send(self.editor.toggle_grid());
                Vec::new()
            }
            EditorCommand::Shutdown => return false,
        };

        for event in events {
            // No subscribers is not an error.
            let _ = self.events.send(event);
        }
        true
    }

    fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            artwork: Artwork::from_buffer(self.editor.buffer()),
            paint_mode: self.editor.paint_mode(),
            color: self.editor.color(),
            can_undo: self.editor.can_undo(),
            can_redo: self.editor.can_redo(),
        }
    }
}

/// Cheap, cloneable handle to a running [`EditorService`].
#[derive(Clone)]
pub struct EditorClient {
    commands: async_channel::Sender<EditorCommand>,
    events: broadcast::Sender<EditorEvent>,
}

impl EditorClient {
    /// Subscribes to every event produced after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.events.subscribe()
    }

    pub async fn pointer(&self, event: PointerEvent) -> Result<()> {
        self.send(EditorCommand::Pointer(event)).await
    }

    pub async fn pointer_leave(&self) -> Result<()> {
        self.send(EditorCommand::PointerLeave).await
    }

    pub async fn set_paint_mode(&self, mode: PaintMode) -> Result<()> {
        self.send(EditorCommand::SetPaintMode(mode)).await
    }

    pub async fn set_color(&self, color: Rgba) -> Result<()> {
        self.send(EditorCommand::SetColor(color)).await
    }

    /// Selects a color given as a hex string and returns it as stored.
    pub async fn set_color_hex(&self, input: &str) -> Result<Rgba> {
        let (tx, rx) = oneshot::channel();
        self.send(EditorCommand::SetColorHex(input.to_string(), tx))
            .await?;
        let color = rx.await.context("editor service dropped the color request")??;
        Ok(color)
    }

    pub async fn undo(&self) -> Result<()> {
        self.send(EditorCommand::Undo).await
    }

    pub async fn redo(&self) -> Result<()> {
        self.send(EditorCommand::Redo).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.send(EditorCommand::Clear).await
    }

    /// Fetches the artwork blob for the current buffer.
    pub async fn export(&self) -> Result<Vec<u32>> {
        let (tx, rx) = oneshot::channel();
        self.send(EditorCommand::Export(tx)).await?;
        rx.await.context("editor service dropped the export request")
    }

    /// Loads an artwork blob. A rejected blob comes back as a
    /// [`pixel_canvas::Error`] inside the `anyhow::Error`.
    pub async fn load(&self, blob: Vec<u32>) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(EditorCommand::Load(blob, tx)).await?;
        rx.await.context("editor service dropped the load request")??;
        Ok(())
    }

    pub async fn snapshot(&self) -> Result<EditorSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(EditorCommand::Snapshot(tx)).await?;
        rx.await.context("editor service dropped the snapshot request")
    }

    pub async fn render(&self) -> Result<RenderList> {
        let (tx, rx) = oneshot::channel();
        self.send(EditorCommand::Render(tx)).await?;
        rx.await.context("editor service dropped the render request")
    }

    /// Flips grid line visibility and returns the new setting.
    pub async fn toggle_grid(&self) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.send(EditorCommand::ToggleGrid(tx)).await?;
        rx.await.context("editor service dropped the toggle request")
    }

    /// Asks the service to stop after the commands already queued.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(EditorCommand::Shutdown).await
    }

    async fn send(&self, command: EditorCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("editor service has stopped"))
    }
}
