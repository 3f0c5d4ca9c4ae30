/// Notifications the canvas sends to whoever is listening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    /// The stroke collection was replaced; it now holds `strokes` strokes
    CollectionChanged { strokes: usize },
    /// Undo/redo availability may have changed
    HistoryChanged { can_undo: bool, can_redo: bool },
}
