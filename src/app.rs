use std::sync::Arc;

use parking_lot::Mutex;

use crate::color;
use crate::command::Command;
use crate::config::{BrushSettings, CanvasConfig};
use crate::controller::CanvasController;
use crate::input::InputHandler;
use crate::notes::{self, InMemoryNotes, Notepad, NotesStore};
use crate::panels;
use crate::texture_manager::TextureManager;
use crate::user::{USER_ID_KEY, UserId};

/// Storage key for the note rows (JSON, same shape as the hosted table)
const NOTES_KEY: &str = "notes";

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    pub canvas: CanvasConfig,
    pub brush: BrushSettings,
    pub show_notes: bool,
}

/// Undo/redo availability as last reported by the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFlags {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Text being edited in the notepad, separate from the saved note
#[derive(Debug, Default)]
pub struct NoteDraft {
    pub note_id: Option<uuid::Uuid>,
    pub title: String,
    pub content: String,
}

pub struct SketchpadApp {
    settings: AppSettings,
    /// `None` once the surface failed; the failure is shown instead of the canvas
    canvas: Option<CanvasController>,
    canvas_error: Option<String>,
    history_flags: Arc<Mutex<HistoryFlags>>,
    input: InputHandler,
    textures: TextureManager,
    user_id: UserId,
    notes_store: Arc<InMemoryNotes>,
    notepad: Notepad,
    draft: NoteDraft,
    /// Text of the custom colour box in the toolbar
    color_entry: String,
    status: Option<String>,
}

impl SketchpadApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: AppSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let user_id = UserId::load_or_create(cc.storage);

        let rows = cc
            .storage
            .and_then(|storage| storage.get_string(NOTES_KEY))
            .map(|json| {
                notes::rows_from_json(&json).unwrap_or_else(|err| {
                    log::warn!("Discarding stored notes: {err}");
                    Vec::new()
                })
            })
            .unwrap_or_default();

        Self::with_parts(settings, user_id, rows, Some(cc.egui_ctx.clone()))
    }

    /// Build the app without a window; `ctx` is asked to repaint on canvas changes
    pub fn with_parts(
        settings: AppSettings,
        user_id: UserId,
        rows: Vec<notes::Note>,
        ctx: Option<egui::Context>,
    ) -> Self {
        let history_flags = Arc::new(Mutex::new(HistoryFlags::default()));
        let (canvas, canvas_error) = match CanvasController::new(0, 0, settings.canvas.clone()) {
            Ok(mut canvas) => {
                canvas.set_brush(settings.brush);
                let flags = history_flags.clone();
                canvas.on_state_change(move |can_undo, can_redo| {
                    *flags.lock() = HistoryFlags { can_undo, can_redo };
                    if let Some(ctx) = &ctx {
                        ctx.request_repaint();
                    }
                });
                (Some(canvas), None)
            }
            Err(err) => (None, Some(err.to_string())),
        };

        let notes_store = Arc::new(InMemoryNotes::from_rows(rows));
        let initial = notes_store.list(&user_id).unwrap_or_default();
        let notepad = Notepad::new(notes_store.clone(), user_id, initial);

        Self {
            settings,
            canvas,
            canvas_error,
            history_flags,
            input: InputHandler::new(),
            textures: TextureManager::new(),
            user_id,
            notes_store,
            notepad,
            draft: NoteDraft::default(),
            color_entry: String::new(),
            status: None,
        }
    }

    pub fn canvas(&self) -> Option<&CanvasController> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut CanvasController> {
        self.canvas.as_mut()
    }

    pub fn canvas_error(&self) -> Option<&str> {
        self.canvas_error.as_deref()
    }

    pub fn history_flags(&self) -> HistoryFlags {
        *self.history_flags.lock()
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn show_notes(&self) -> bool {
        self.settings.show_notes
    }

    pub fn set_show_notes(&mut self, show: bool) {
        self.settings.show_notes = show;
    }

    pub fn brush(&self) -> BrushSettings {
        self.canvas
            .as_ref()
            .map_or(self.settings.brush, |canvas| *canvas.brush())
    }

    /// Change the brush on the canvas and in the persisted settings
    pub fn update_brush(&mut self, update: impl FnOnce(&mut BrushSettings)) {
        let mut brush = self.brush();
        update(&mut brush);
        self.settings.brush = brush;
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.set_brush(brush);
        }
    }

    pub fn color_entry_mut(&mut self) -> &mut String {
        &mut self.color_entry
    }

    /// Switch the pencil to the colour typed in the toolbar (`#RRGGBB`, `#RGB` or a name)
    pub fn apply_color_entry(&mut self) -> bool {
        match color::parse_color(&self.color_entry) {
            Ok(parsed) => {
                self.update_brush(|brush| brush.set_color(parsed));
                self.color_entry = color::to_hex(parsed);
                self.status = None;
                true
            }
            Err(err) => {
                log::warn!("{err}");
                self.status = Some(err.to_string());
                false
            }
        }
    }

    pub fn execute_command(&mut self, command: Command) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.execute(command);
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn notepad(&self) -> &Notepad {
        &self.notepad
    }

    pub fn notepad_mut(&mut self) -> &mut Notepad {
        &mut self.notepad
    }

    /// Split borrow used by the notes panel
    pub fn notes_parts(&mut self) -> (&mut Notepad, &mut NoteDraft) {
        (&mut self.notepad, &mut self.draft)
    }

    /// Export the drawing as `drawing.png`
    pub fn save_drawing(&mut self) {
        let Some(canvas) = self.canvas.as_ref() else {
            return;
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            self.status = Some(match canvas.save_to(None) {
                Ok(path) => format!("Saved {}", path.display()),
                Err(err) => {
                    log::error!("Save failed: {err}");
                    format!("Save failed: {err}")
                }
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            let result = canvas
                .export_image()
                .map_err(|err| err.to_string())
                .and_then(|bytes| crate::export::download_png(&bytes));
            self.status = Some(match result {
                Ok(()) => format!("Downloaded {}", crate::export::EXPORT_FILE_NAME),
                Err(err) => {
                    log::error!("Download failed: {err}");
                    format!("Download failed: {err}")
                }
            });
        }
    }

    /// Per-frame canvas work: resize, input, texture upload and painting
    pub fn canvas_frame(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };

        let width = rect.width().max(0.0).round() as u32;
        let height = rect.height().max(0.0).round() as u32;
        if let Err(err) = canvas.resize(width, height) {
            // reported once; this canvas instance is not retried
            self.canvas_error = Some(err.to_string());
            self.canvas = None;
            self.textures.invalidate();
            return;
        }
        canvas.set_origin(rect.min);

        for event in self.input.process_input(ctx, rect) {
            canvas.handle_input(event);
        }
        for command in self.input.shortcut_commands(ctx) {
            canvas.execute(command);
        }

        painter.rect_filled(rect, 0.0, canvas.surface().background());
        if let Some(texture_id) = self.textures.sync(ctx, canvas.surface()) {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            let image_rect = egui::Rect::from_min_size(
                rect.min,
                egui::vec2(width as f32, height as f32),
            );
            painter.image(texture_id, image_rect, uv, egui::Color32::WHITE);
        }

        if canvas.is_tracking() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for SketchpadApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
        eframe::set_value(storage, USER_ID_KEY, &self.user_id);
        match notes::rows_to_json(&self.notes_store.rows()) {
            Ok(json) => storage.set_string(NOTES_KEY, json),
            Err(err) => log::error!("Failed to persist notes: {err}"),
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        if self.show_notes() {
            panels::notes_panel(self, ctx);
        }
        panels::central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeMode;
    use egui::{Color32, pos2};

    fn app() -> SketchpadApp {
        SketchpadApp::with_parts(AppSettings::default(), UserId::generate(), Vec::new(), None)
    }

    #[test]
    fn test_history_flags_follow_canvas() {
        let mut app = app();
        assert_eq!(app.history_flags(), HistoryFlags::default());

        app.canvas_mut()
            .unwrap()
            .commit_stroke(vec![pos2(1.0, 1.0)], Color32::BLACK, 3.0, StrokeMode::Draw);
        assert_eq!(app.history_flags(), HistoryFlags { can_undo: true, can_redo: false });

        app.execute_command(Command::Undo);
        assert_eq!(app.history_flags(), HistoryFlags { can_undo: false, can_redo: true });
    }

    #[test]
    fn test_brush_changes_are_persisted() {
        let mut app = app();
        app.update_brush(|brush| brush.set_eraser(true));
        assert!(app.settings().brush.is_eraser());
        assert!(app.canvas().unwrap().brush().is_eraser());
    }

    #[test]
    fn test_typed_colour_becomes_pencil_colour() {
        let mut app = app();
        app.update_brush(|brush| brush.set_eraser(true));

        *app.color_entry_mut() = "orange".into();
        assert!(app.apply_color_entry());
        assert_eq!(app.brush().color(), Color32::from_rgb(255, 165, 0));
        assert!(!app.brush().is_eraser());
        assert_eq!(app.color_entry_mut().as_str(), "#FFA500");

        *app.color_entry_mut() = "#12".into();
        assert!(!app.apply_color_entry());
        assert_eq!(app.brush().color(), Color32::from_rgb(255, 165, 0));
        assert!(app.status().is_some());
    }

    #[test]
    fn test_stored_notes_seed_notepad() {
        let owner = UserId::generate();
        let store = InMemoryNotes::new();
        store.create(&owner, "hello", "world").unwrap();

        let app = SketchpadApp::with_parts(AppSettings::default(), owner, store.rows(), None);
        assert_eq!(app.notepad().notes().len(), 1);
        assert_eq!(app.notepad().active_note().unwrap().title, "hello");
    }
}
