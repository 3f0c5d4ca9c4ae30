pub mod history;

use egui::Pos2;

use crate::stroke::StrokeStyle;

pub use history::History;

/// Requests the surrounding UI can make of the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Finalize a stroke into the collection
    CommitStroke { points: Vec<Pos2>, style: StrokeStyle },
    /// Replace the collection with an empty one
    Clear,
    Undo,
    Redo,
}

impl Command {
    /// Short label for logs and the history readout
    pub fn label(&self) -> &'static str {
        match self {
            Command::CommitStroke { .. } => "Commit Stroke",
            Command::Clear => "Clear",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
        }
    }
}
