use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::StrokeError;

/// How a stroke composites onto the pixels beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeMode {
    /// Paint over existing pixels
    #[default]
    Draw,
    /// Clear existing pixels back to transparent
    Erase,
}

/// Paint settings shared by a committed stroke and the live one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub mode: StrokeMode,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32, mode: StrokeMode) -> Self {
        Self { color, width, mode }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color32::BLACK, 5.0, StrokeMode::Draw)
    }
}

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    style: StrokeStyle,
}

pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    /// Create a committed stroke
    ///
    /// Fails when `points` is empty or the width is not a positive finite number.
    pub fn new(points: Vec<Pos2>, style: StrokeStyle) -> Result<Self, StrokeError> {
        if points.is_empty() {
            return Err(StrokeError::Empty);
        }
        if !style.is_valid() {
            return Err(StrokeError::InvalidWidth(style.width));
        }
        Ok(Self { points, style })
    }

    pub fn new_ref(points: Vec<Pos2>, style: StrokeStyle) -> Result<StrokeRef, StrokeError> {
        Self::new(points, style).map(Arc::new)
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn color(&self) -> Color32 {
        self.style.color
    }

    pub fn width(&self) -> f32 {
        self.style.width
    }

    pub fn mode(&self) -> StrokeMode {
        self.style.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_empty_points_rejected() {
        let result = Stroke::new(Vec::new(), StrokeStyle::default());
        assert_eq!(result, Err(StrokeError::Empty));
    }

    #[test]
    fn test_bad_width_rejected() {
        let points = vec![pos2(1.0, 1.0)];
        for width in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let style = StrokeStyle::new(Color32::RED, width, StrokeMode::Draw);
            assert!(matches!(
                Stroke::new(points.clone(), style),
                Err(StrokeError::InvalidWidth(_))
            ));
        }
    }

    #[test]
    fn test_single_point_is_a_stroke() {
        let stroke = Stroke::new(vec![pos2(4.0, 4.0)], StrokeStyle::default()).unwrap();
        assert_eq!(stroke.points().len(), 1);
        assert_eq!(stroke.mode(), StrokeMode::Draw);
    }
}
