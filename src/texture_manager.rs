use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::DrawingSurface;

/// Mirrors the drawing surface into an egui texture
///
/// The upload only happens when the surface version moved since the last
/// sync, so idle frames cost nothing.
#[derive(Default)]
pub struct TextureManager {
    handle: Option<TextureHandle>,
    /// Surface version the texture currently shows
    uploaded_version: Option<u64>,
    /// Number of uploads so far
    uploads: u64,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("has_texture", &self.handle.is_some())
            .field("uploaded_version", &self.uploaded_version)
            .field("uploads", &self.uploads)
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture showing the current surface pixels, if the surface has any
    pub fn sync(&mut self, ctx: &Context, surface: &DrawingSurface) -> Option<TextureId> {
        let Some(pixmap) = surface.visible() else {
            self.invalidate();
            return None;
        };

        if self.uploaded_version != Some(surface.version()) || self.handle.is_none() {
            let [width, height] = surface.size();
            let image = ColorImage::from_rgba_premultiplied(
                [width as usize, height as usize],
                pixmap.data(),
            );
            match self.handle.as_mut() {
                Some(handle) => handle.set(image, TextureOptions::LINEAR),
                None => {
                    self.handle = Some(ctx.load_texture("drawing_surface", image, TextureOptions::LINEAR));
                }
            }
            self.uploaded_version = Some(surface.version());
            self.uploads += 1;
        }

        self.handle.as_ref().map(TextureHandle::id)
    }

    /// Drop the texture; the next sync uploads from scratch
    pub fn invalidate(&mut self) {
        self.handle = None;
        self.uploaded_version = None;
    }

    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{StrokeMode, StrokeStyle};
    use egui::{Color32, pos2};

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let surface = DrawingSurface::new(8, 8, Color32::WHITE, true).unwrap();
        let mut manager = TextureManager::new();

        let first = manager.sync(&ctx, &surface).unwrap();
        let second = manager.sync(&ctx, &surface).unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.upload_count(), 1);
    }

    #[test]
    fn test_paint_triggers_upload() {
        let ctx = Context::default();
        let mut surface = DrawingSurface::new(8, 8, Color32::WHITE, true).unwrap();
        let mut manager = TextureManager::new();
        let first = manager.sync(&ctx, &surface).unwrap();

        let style = StrokeStyle::new(Color32::BLACK, 2.0, StrokeMode::Draw);
        surface.begin_live(pos2(4.0, 4.0), &style);
        let second = manager.sync(&ctx, &surface).unwrap();

        // same texture, new pixels
        assert_eq!(first, second);
        assert_eq!(manager.upload_count(), 2);
    }

    #[test]
    fn test_empty_surface_has_no_texture() {
        let ctx = Context::default();
        let surface = DrawingSurface::new(0, 0, Color32::WHITE, true).unwrap();
        let mut manager = TextureManager::new();
        assert!(manager.sync(&ctx, &surface).is_none());
        assert_eq!(manager.upload_count(), 0);
    }
}
