use egui::{Color32, Pos2};
use tiny_skia::{
    BlendMode, Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    Stroke as RasterStroke, Transform,
};

use crate::document::Document;
use crate::error::SurfaceError;
use crate::stroke::{Stroke, StrokeMode, StrokeStyle};

/// Raster target for the drawing
///
/// Keeps two pixmaps of the same size. `committed` holds the background
/// plus every committed stroke, painted in order. `visible` is what the
/// user sees: the committed pixels with the live stroke painted on top,
/// one segment per pointer move. Committing paints the finished stroke
/// onto `committed` and copies it over `visible`, so after a commit the
/// visible pixels are exactly what a full repaint would produce.
///
/// A zero-sized surface holds no pixmaps and every paint is a no-op.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    committed: Option<Pixmap>,
    visible: Option<Pixmap>,
    width: u32,
    height: u32,
    background: Color32,
    anti_alias: bool,
    /// Bumped on every pixel change so textures can be refreshed lazily
    version: u64,
}

impl DrawingSurface {
    pub fn new(
        width: u32,
        height: u32,
        background: Color32,
        anti_alias: bool,
    ) -> Result<Self, SurfaceError> {
        let mut surface = Self {
            committed: allocate(width, height)?,
            visible: allocate(width, height)?,
            width,
            height,
            background,
            anti_alias,
            version: 0,
        };
        surface.repaint(&Document::new());
        Ok(surface)
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    /// True when there is nothing to paint on
    pub fn is_empty(&self) -> bool {
        self.visible.is_none()
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Reset the raster to a new size and repaint `document` into it
    ///
    /// On failure the previous raster is kept untouched.
    pub fn resize(&mut self, width: u32, height: u32, document: &Document) -> Result<(), SurfaceError> {
        let committed = allocate(width, height)?;
        let visible = allocate(width, height)?;
        log::debug!("surface resized {}x{} -> {}x{}", self.width, self.height, width, height);
        self.committed = committed;
        self.visible = visible;
        self.width = width;
        self.height = height;
        self.repaint(document);
        Ok(())
    }

    /// Clear to the background and paint every stroke in order
    ///
    /// Any live stroke on screen is dropped.
    pub fn repaint(&mut self, document: &Document) {
        let Some(committed) = self.committed.as_mut() else {
            return;
        };
        committed.fill(to_raster_color(self.background));
        for stroke in document.strokes() {
            paint_points(committed, stroke.points(), &stroke.style(), self.anti_alias);
        }
        self.sync_visible();
    }

    /// Paint a newly committed stroke on top of the committed pixels
    pub fn commit(&mut self, stroke: &Stroke) {
        let Some(committed) = self.committed.as_mut() else {
            return;
        };
        paint_points(committed, stroke.points(), &stroke.style(), self.anti_alias);
        self.sync_visible();
    }

    /// First point of a live stroke
    pub fn begin_live(&mut self, point: Pos2, style: &StrokeStyle) {
        if let Some(visible) = self.visible.as_mut() {
            paint_points(visible, &[point], style, self.anti_alias);
            self.version += 1;
        }
    }

    /// Newest segment of a live stroke
    pub fn extend_live(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle) {
        if let Some(visible) = self.visible.as_mut() {
            paint_points(visible, &[from, to], style, self.anti_alias);
            self.version += 1;
        }
    }

    /// Paint a whole live stroke at once, used after the raster was reset
    pub fn paint_live(&mut self, points: &[Pos2], style: &StrokeStyle) {
        if points.is_empty() {
            return;
        }
        if let Some(visible) = self.visible.as_mut() {
            paint_points(visible, points, style, self.anti_alias);
            self.version += 1;
        }
    }

    /// Throw away the live stroke pixels
    pub fn discard_live(&mut self) {
        self.sync_visible();
    }

    /// What is on screen right now
    pub fn visible(&self) -> Option<&Pixmap> {
        self.visible.as_ref()
    }

    /// Background plus committed strokes only
    pub fn committed(&self) -> Option<&Pixmap> {
        self.committed.as_ref()
    }

    /// Unpremultiplied colour of one visible pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let color = self.visible.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    fn sync_visible(&mut self) {
        if let (Some(committed), Some(visible)) = (self.committed.as_ref(), self.visible.as_mut()) {
            visible.data_mut().copy_from_slice(committed.data());
        }
        self.version += 1;
    }
}

fn allocate(width: u32, height: u32) -> Result<Option<Pixmap>, SurfaceError> {
    if width == 0 || height == 0 {
        return Ok(None);
    }
    Pixmap::new(width, height)
        .map(Some)
        .ok_or(SurfaceError::ContextUnavailable { width, height })
}

fn to_raster_color(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

fn paint_for(style: &StrokeStyle, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = anti_alias;
    match style.mode {
        StrokeMode::Draw => {
            let [r, g, b, a] = style.color.to_srgba_unmultiplied();
            paint.set_color_rgba8(r, g, b, a);
            paint.blend_mode = BlendMode::SourceOver;
        }
        StrokeMode::Erase => {
            // only the coverage matters for destination-out
            paint.set_color_rgba8(255, 255, 255, 255);
            paint.blend_mode = BlendMode::DestinationOut;
        }
    }
    paint
}

fn line_style(width: f32) -> RasterStroke {
    RasterStroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..RasterStroke::default()
    }
}

/// Paint a polyline with round caps and joins, or a dot for a single position
fn paint_points(pixmap: &mut Pixmap, points: &[Pos2], style: &StrokeStyle, anti_alias: bool) {
    let Some(first) = points.first() else {
        return;
    };
    if !style.is_valid() {
        return;
    }
    let paint = paint_for(style, anti_alias);

    if points.iter().all(|p| p == first) {
        if let Some(dot) = PathBuilder::from_circle(first.x, first.y, style.width / 2.0) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in &points[1..] {
        builder.line_to(point.x, point.y);
    }
    if let Some(path) = builder.finish() {
        pixmap.stroke_path(&path, &paint, &line_style(style.width), Transform::identity(), None);
    }
}
