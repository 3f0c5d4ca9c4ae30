#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod components;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod event;
pub mod export;
pub mod input;
pub mod notes;
pub mod panels;
pub mod stroke;
pub mod surface;
pub mod texture_manager;
pub mod user;
pub mod util;

pub use app::SketchpadApp;
pub use command::{Command, History};
pub use config::{BrushSettings, CanvasConfig};
pub use controller::CanvasController;
pub use document::Document;
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, EventHandler};
pub use input::{InputEvent, InputHandler, InputTracker};
pub use stroke::{Stroke, StrokeMode, StrokeRef, StrokeStyle};
pub use surface::DrawingSurface;
