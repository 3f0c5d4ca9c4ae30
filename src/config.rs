use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::stroke::{StrokeMode, StrokeStyle};

/// Smallest brush the toolbar allows
pub const MIN_BRUSH_WIDTH: f32 = 1.0;
/// Largest brush the toolbar allows
pub const MAX_BRUSH_WIDTH: f32 = 20.0;
pub const DEFAULT_BRUSH_WIDTH: f32 = 5.0;

/// Settings for one canvas instance, persisted with the app state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Colour the surface is cleared to before strokes are painted
    pub background: Color32,
    pub anti_alias: bool,
    /// Maximum undo (and redo) depth; `None` keeps everything
    pub history_limit: Option<usize>,
    /// Where "Save" writes `drawing.png` on native builds
    pub export_dir: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            anti_alias: true,
            history_limit: None,
            export_dir: None,
        }
    }
}

/// The pencil/eraser the user is holding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    color: Color32,
    width: f32,
    eraser: bool,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: DEFAULT_BRUSH_WIDTH,
            eraser: false,
        }
    }
}

impl BrushSettings {
    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Picking a colour goes back to the pencil
    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
        self.eraser = false;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        if width.is_finite() {
            self.width = width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser
    }

    pub fn set_eraser(&mut self, eraser: bool) {
        self.eraser = eraser;
    }

    pub fn mode(&self) -> StrokeMode {
        if self.eraser {
            StrokeMode::Erase
        } else {
            StrokeMode::Draw
        }
    }

    /// Style a stroke started now would get
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(self.color, self.width, self.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_is_clamped() {
        let mut brush = BrushSettings::default();
        brush.set_width(100.0);
        assert_eq!(brush.width(), MAX_BRUSH_WIDTH);
        brush.set_width(0.0);
        assert_eq!(brush.width(), MIN_BRUSH_WIDTH);
        brush.set_width(f32::NAN);
        assert_eq!(brush.width(), MIN_BRUSH_WIDTH);
    }

    #[test]
    fn test_picking_color_leaves_eraser() {
        let mut brush = BrushSettings::default();
        brush.set_eraser(true);
        assert_eq!(brush.style().mode, StrokeMode::Erase);

        brush.set_color(Color32::RED);
        assert!(!brush.is_eraser());
        assert_eq!(brush.style(), StrokeStyle::new(Color32::RED, DEFAULT_BRUSH_WIDTH, StrokeMode::Draw));
    }

    #[test]
    fn test_config_loads_with_missing_fields() {
        let config: CanvasConfig = serde_json::from_str(r#"{"history_limit": 50}"#).unwrap();
        assert_eq!(config.history_limit, Some(50));
        assert!(config.anti_alias);
        assert_eq!(config.background, Color32::WHITE);
    }
}
