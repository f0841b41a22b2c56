use egui::{Color32, Pos2, TextureHandle, TextureOptions};

use crate::canvas::{Canvas, Nib};
use crate::event::StoreEvent;
use crate::gesture;
use crate::panels::{central_panel, tools_panel};
use crate::store::{PaintStore, load_preferences, save_preferences};
use crate::tool::ToolKind;

const INITIAL_CANVAS_SIZE: (u32, u32) = (800, 600);

/// The paint application. Owns the one [`PaintStore`] of the session and
/// passes it to the panels explicitly.
pub struct PaintApp {
    store: PaintStore,
    canvas: Canvas,
    texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl std::fmt::Debug for PaintApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintApp")
            .field("store", &self.store)
            .field("canvas", &self.canvas)
            .finish()
    }
}

impl Default for PaintApp {
    fn default() -> Self {
        let (width, height) = INITIAL_CANVAS_SIZE;
        Self {
            store: PaintStore::new(),
            canvas: Canvas::new(width, height),
            texture: None,
            uploaded_version: None,
        }
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();

        if let Some(storage) = cc.storage {
            match load_preferences(storage) {
                Ok(Some(preferences)) => {
                    log::info!("Restored tool preferences ({})", preferences.tool);
                    app.store.apply_preferences(preferences);
                }
                Ok(None) => {}
                Err(err) => log::warn!("Ignoring saved preferences: {}", err),
            }
        }

        // Any store change may alter what the panels show
        let ctx = cc.egui_ctx.clone();
        app.store.subscribe(move |_: &StoreEvent| ctx.request_repaint());

        app
    }

    pub fn store(&self) -> &PaintStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PaintStore {
        &mut self.store
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Switches tools from the palette, abandoning any gesture in progress.
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.cancel_gesture();
        self.store.select_tool(kind);
    }

    pub fn clear_canvas(&mut self) {
        self.cancel_gesture();
        self.canvas.clear();
    }

    /// Grows the canvas to the space the panel gives it. Never shrinks, so
    /// artwork past a smaller window edge survives.
    pub fn fit_canvas(&mut self, width: u32, height: u32) {
        let width = width.max(self.canvas.width());
        let height = height.max(self.canvas.height());
        self.canvas.resize(width, height);
    }

    fn stroke_color(&self) -> Color32 {
        self.store.tool().color32().unwrap_or_else(|err| {
            log::debug!("Drawing in black: {}", err);
            Color32::BLACK
        })
    }

    fn paint_segment(&mut self, from: Pos2, to: Pos2) {
        let color = self.stroke_color();
        let tool = self.store.tool();
        match tool.name {
            ToolKind::Brush => self.canvas.draw_segment(from, to, tool.size, Nib::Round, color),
            ToolKind::Pencil => self.canvas.draw_segment(from, to, tool.size, Nib::Square, color),
            ToolKind::Eraser => self.canvas.erase_segment(from, to, tool.size),
            ToolKind::Shape => {}
        }
    }

    /// Pointer pressed at `pos`, in canvas coordinates.
    pub fn pointer_down(&mut self, pos: Pos2) {
        let canvas = &self.canvas;
        if !gesture::pointer_down(&mut self.store, pos, || canvas.snapshot()) {
            return;
        }
        // A click without movement still leaves a dot
        self.paint_segment(pos, pos);
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        let Some(previous) = gesture::pointer_move(&mut self.store, pos) else {
            return;
        };
        let tool = self.store.tool();
        if let (Some(start), Some(snapshot)) = (tool.shape_start, tool.snapshot.clone()) {
            // Preview: put the committed pixels back, then draw the shape on top
            let (size, color) = (tool.size, self.stroke_color());
            self.canvas.restore(&snapshot);
            self.canvas.draw_rectangle(start, pos, size, color);
        } else {
            self.paint_segment(previous, pos);
        }
    }

    pub fn pointer_up(&mut self, pos: Pos2) {
        let previous = self.store.tool().last_pos;
        let end = gesture::pointer_up(&mut self.store, pos);
        match (end.kind, end.shape_start, &end.snapshot) {
            (Some(ToolKind::Shape), Some(start), Some(snapshot)) => {
                let (size, color) = (self.store.tool().size, self.stroke_color());
                self.canvas.restore(snapshot);
                self.canvas.draw_rectangle(start, pos, size, color);
            }
            // The release can arrive at a position no move reported
            (Some(_), _, _) => self.paint_segment(previous, pos),
            (None, _, _) => {}
        }
    }

    /// Drops the gesture in progress. A shape preview is rolled back; stroke
    /// pixels already painted stay.
    pub fn cancel_gesture(&mut self) {
        let end = gesture::cancel(&mut self.store);
        if let Some(snapshot) = end.snapshot {
            self.canvas.restore(&snapshot);
        }
    }

    /// Uploads the canvas if it changed since the last frame.
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let version = self.canvas.version();
        let texture = match self.texture.take() {
            Some(mut texture) => {
                if self.uploaded_version != Some(version) {
                    texture.set(self.canvas.to_color_image(), TextureOptions::NEAREST);
                }
                texture
            }
            None => ctx.load_texture(
                "paint_canvas",
                self.canvas.to_color_image(),
                TextureOptions::NEAREST,
            ),
        };
        self.uploaded_version = Some(version);
        let id = texture.id();
        self.texture = Some(texture);
        id
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Err(err) = save_preferences(&self.store.preferences(), storage) {
            log::warn!("Failed to save preferences: {}", err);
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
