use egui::{Color32, Pos2};

use crate::command::{Command, History};
use crate::config::{BrushSettings, CanvasConfig};
use crate::document::Document;
use crate::error::{CanvasResult, ExportError};
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::export;
use crate::input::{InputEvent, InputTracker, TrackerAction, TrackerState};
use crate::stroke::{Stroke, StrokeMode, StrokeStyle};
use crate::surface::DrawingSurface;

/// The drawing board: owns the strokes, their history and the raster
///
/// Every operation runs to completion before returning. Listeners
/// registered with [`CanvasController::subscribe`] are told when the
/// collection changes and when undo/redo availability may have changed.
#[derive(Debug)]
pub struct CanvasController {
    document: Document,
    history: History,
    tracker: InputTracker,
    surface: DrawingSurface,
    brush: BrushSettings,
    config: CanvasConfig,
    /// Top-left of the surface in client space
    origin: Pos2,
    event_bus: EventBus,
}

impl CanvasController {
    /// Creates an empty board with a `width` x `height` surface
    ///
    /// Fails only when a non-empty surface cannot be allocated.
    pub fn new(width: u32, height: u32, config: CanvasConfig) -> CanvasResult<Self> {
        let surface = DrawingSurface::new(width, height, config.background, config.anti_alias)
            .inspect_err(|err| log::error!("Canvas unavailable: {err}"))?;

        Ok(Self {
            document: Document::new(),
            history: History::with_limit(config.history_limit),
            tracker: InputTracker::new(),
            surface,
            brush: BrushSettings::default(),
            config,
            origin: Pos2::ZERO,
            event_bus: EventBus::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut BrushSettings {
        &mut self.brush
    }

    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.brush = brush;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    /// Register a listener for canvas events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// Register a callback for `(can_undo, can_redo)` updates
    pub fn on_state_change<F>(&self, mut callback: F)
    where
        F: FnMut(bool, bool) + Send + 'static,
    {
        self.subscribe(Box::new(move |event: &CanvasEvent| {
            if let CanvasEvent::HistoryChanged { can_undo, can_redo } = *event {
                callback(can_undo, can_redo);
            }
        }));
    }

    /// Apply a UI request; returns whether anything changed
    pub fn execute(&mut self, command: Command) -> bool {
        log::debug!("Executing command: {}", command.label());
        match command {
            Command::CommitStroke { points, style } => {
                self.commit_stroke(points, style.color, style.width, style.mode)
            }
            Command::Clear => {
                self.clear();
                true
            }
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
        }
    }

    /// Empty the drawing; the previous drawing stays one undo away
    pub fn clear(&mut self) {
        self.abandon_live_stroke();
        let previous = std::mem::take(&mut self.document);
        log::info!("Clearing canvas ({} strokes)", previous.len());
        self.history.record_before_change(previous);
        self.surface.repaint(&self.document);
        self.collection_changed();
    }

    /// Restore the drawing as it was before the last change
    pub fn undo(&mut self) -> bool {
        let current = self.document.clone();
        let Some(previous) = self.history.undo(current) else {
            log::debug!("Nothing to undo");
            return false;
        };
        self.abandon_live_stroke();
        self.document = previous;
        self.surface.repaint(&self.document);
        self.collection_changed();
        true
    }

    /// Reapply the last undone change
    pub fn redo(&mut self) -> bool {
        let current = self.document.clone();
        let Some(next) = self.history.redo(current) else {
            log::debug!("Nothing to redo");
            return false;
        };
        self.abandon_live_stroke();
        self.document = next;
        self.surface.repaint(&self.document);
        self.collection_changed();
        true
    }

    /// Append a finished stroke; empty point lists and bad widths are ignored
    pub fn commit_stroke(
        &mut self,
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
        mode: StrokeMode,
    ) -> bool {
        let stroke = match Stroke::new_ref(points, StrokeStyle::new(color, width, mode)) {
            Ok(stroke) => stroke,
            Err(err) => {
                log::warn!("Ignoring stroke: {err}");
                return false;
            }
        };

        let next = self.document.with_stroke(stroke.clone());
        let previous = std::mem::replace(&mut self.document, next);
        self.history.record_before_change(previous);
        self.surface.commit(&stroke);
        log::info!(
            "Committed {:?} stroke with {} points ({} total)",
            stroke.mode(),
            stroke.points().len(),
            self.document.len()
        );
        self.collection_changed();
        true
    }

    /// Where the surface's top-left corner is in client space
    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    /// Feed one pointer event through the tracker, painting as it goes
    pub fn handle_input(&mut self, event: InputEvent) {
        let action = self.tracker.handle(event, self.origin, self.brush.style());
        match action {
            TrackerAction::Ignored => {}
            TrackerAction::Started { point, style } => {
                // a restarted press drops whatever was live
                self.surface.discard_live();
                self.surface.begin_live(point, &style);
            }
            TrackerAction::Extended { from, to, style } => {
                self.surface.extend_live(from, to, &style);
            }
            TrackerAction::Finished { points, style } => {
                if !self.commit_stroke(points, style.color, style.width, style.mode) {
                    self.surface.discard_live();
                }
            }
            TrackerAction::Discarded => self.surface.discard_live(),
        }
    }

    /// Reset the raster to a new size, keeping the drawing
    ///
    /// A stroke being drawn survives the resize and is painted again on top.
    pub fn resize(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        if self.surface.size() == [width, height] {
            return Ok(());
        }
        self.surface
            .resize(width, height, &self.document)
            .inspect_err(|err| log::error!("Canvas resize failed: {err}"))?;
        if let TrackerState::Tracking { points, style } = self.tracker.state() {
            self.surface.paint_live(points, style);
        }
        Ok(())
    }

    /// Full repaint of the current collection
    pub fn repaint(&mut self) {
        self.surface.repaint(&self.document);
    }

    /// PNG bytes of the committed drawing
    pub fn export_image(&self) -> CanvasResult<Vec<u8>> {
        let pixmap = self.surface.committed().ok_or(ExportError::EmptySurface)?;
        let bytes = export::encode_png(pixmap)?;
        log::info!("Exported {}x{} drawing ({} bytes)", pixmap.width(), pixmap.height(), bytes.len());
        Ok(bytes)
    }

    /// Export and write `drawing.png` into `dir`, or the configured export directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, dir: Option<&std::path::Path>) -> CanvasResult<std::path::PathBuf> {
        let bytes = self.export_image()?;
        let dir = dir
            .map(std::path::Path::to_path_buf)
            .or_else(|| self.config.export_dir.clone())
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        Ok(export::save_png(&dir, &bytes)?)
    }

    /// Tell listeners about the new collection and history state
    pub fn notify_state_changed(&self) {
        self.event_bus.emit(CanvasEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }

    fn collection_changed(&self) {
        self.event_bus.emit(CanvasEvent::CollectionChanged {
            strokes: self.document.len(),
        });
        self.notify_state_changed();
    }

    fn abandon_live_stroke(&mut self) {
        if self.tracker.is_tracking() {
            log::debug!("Dropping live stroke");
            self.tracker.reset();
            self.surface.discard_live();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn board() -> CanvasController {
        CanvasController::new(40, 40, CanvasConfig::default()).unwrap()
    }

    #[test]
    fn test_failed_commit_leaves_history_alone() {
        let mut canvas = board();
        assert!(!canvas.commit_stroke(Vec::new(), Color32::BLACK, 5.0, StrokeMode::Draw));
        assert!(!canvas.commit_stroke(vec![pos2(1.0, 1.0)], Color32::BLACK, 0.0, StrokeMode::Draw));
        assert!(!canvas.can_undo());
        assert!(canvas.document().is_empty());
    }

    #[test]
    fn test_state_callback_follows_history() {
        let mut canvas = board();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        canvas.on_state_change(move |can_undo, can_redo| sink.lock().push((can_undo, can_redo)));

        canvas.commit_stroke(vec![pos2(1.0, 1.0)], Color32::BLACK, 5.0, StrokeMode::Draw);
        canvas.undo();
        canvas.redo();
        canvas.clear();

        assert_eq!(
            *seen.lock(),
            vec![(true, false), (false, true), (true, false), (true, false)]
        );
    }

    #[test]
    fn test_clear_drops_live_stroke() {
        let mut canvas = board();
        canvas.handle_input(InputEvent::PointerDown { position: pos2(10.0, 10.0) });
        assert!(canvas.is_tracking());
        canvas.clear();
        assert!(!canvas.is_tracking());
        assert_eq!(canvas.surface().pixel(10, 10), Some(Color32::WHITE));

        canvas.handle_input(InputEvent::PointerUp);
        assert_eq!(canvas.history().undo_len(), 1);
    }

    #[test]
    fn test_execute_dispatches_commands() {
        let mut canvas = board();
        let style = StrokeStyle::new(Color32::RED, 3.0, StrokeMode::Draw);
        assert!(canvas.execute(Command::CommitStroke { points: vec![pos2(2.0, 2.0)], style }));
        assert!(canvas.execute(Command::Undo));
        assert!(!canvas.execute(Command::Undo));
        assert!(canvas.execute(Command::Redo));
        assert_eq!(canvas.document().strokes()[0].color(), Color32::RED);
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = CanvasConfig {
            history_limit: Some(3),
            ..CanvasConfig::default()
        };
        let mut canvas = CanvasController::new(10, 10, config).unwrap();
        for i in 0..10 {
            canvas.commit_stroke(vec![pos2(i as f32, 1.0)], Color32::BLACK, 2.0, StrokeMode::Draw);
        }
        assert_eq!(canvas.history().undo_len(), 3);
    }

    #[test]
    fn test_resize_keeps_stroke_in_progress() {
        let mut canvas = board();
        canvas.handle_input(InputEvent::PointerDown { position: pos2(5.0, 10.5) });
        canvas.handle_input(InputEvent::PointerMove { position: pos2(20.0, 10.5) });

        canvas.resize(60, 60).unwrap();
        assert!(canvas.is_tracking());
        assert_eq!(canvas.surface().pixel(12, 10), Some(Color32::BLACK));

        canvas.handle_input(InputEvent::PointerMove { position: pos2(50.0, 10.5) });
        canvas.handle_input(InputEvent::PointerUp);
        assert_eq!(canvas.document().len(), 1);
        assert_eq!(
            canvas.document().strokes()[0].points(),
            &[pos2(5.0, 10.5), pos2(20.0, 10.5), pos2(50.0, 10.5)]
        );
        assert_eq!(canvas.surface().pixel(45, 10), Some(Color32::BLACK));
    }

    #[test]
    fn test_export_of_empty_surface_fails() {
        let canvas = CanvasController::new(0, 0, CanvasConfig::default()).unwrap();
        assert!(canvas.export_image().is_err());
    }
}
